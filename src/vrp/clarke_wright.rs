//! Clarke-Wright savings algorithm with capacity and time windows.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own route (depot → customer → depot). It then merges routes by
//! computing the "savings" of joining customers i and j directly:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! Only positive savings are kept. Pairs are processed in decreasing order
//! of savings; a merge is applied only if
//!
//! 1. i and j are both endpoints of their (different) routes,
//! 2. the combined load fits the vehicle capacity, and
//! 3. the merged sequence stays feasible under forward time propagation
//!    (a closed window or an exceeded shift rejects the merge; an early
//!    arrival waits).
//!
//! Rejected merges are skipped silently. No improvement runs after the
//! construction.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings),
//! plus O(n) feasibility propagation per attempted merge.
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use tracing::{debug, trace};

use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::models::{Point, RoutingPlan, Vehicle};

/// A savings value for joining two customers.
#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

/// Constructs routes using the Clarke-Wright savings algorithm.
///
/// `locations[0]` is the depot; matrix rows follow the same order. The
/// fleet is homogeneous and unbounded: each resulting route gets its own
/// vehicle ID, numbered from `vehicle.id()` upwards. Customers that cannot
/// be served even by a dedicated round trip are reported as unassigned.
///
/// # Examples
///
/// ```
/// use u_logistics::models::{Point, Vehicle};
/// use u_logistics::geo::Euclidean;
/// use u_logistics::distance::DistanceMatrix;
/// use u_logistics::vrp::clarke_wright_savings;
///
/// let locations = vec![
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 0.0, 1.0).with_demand(10),
///     Point::new(2, 0.0, 2.0).with_demand(10),
///     Point::new(3, 0.0, 3.0).with_demand(10),
/// ];
/// let dm = DistanceMatrix::from_points(&locations, &Euclidean);
/// let vehicle = Vehicle::new(0, 30);
///
/// let plan = clarke_wright_savings(&locations, &dm, &vehicle);
/// assert_eq!(plan.num_routes(), 1);
/// assert!((plan.total_distance() - 6.0).abs() < 1e-10);
/// ```
pub fn clarke_wright_savings(
    locations: &[Point],
    distances: &DistanceMatrix,
    vehicle: &Vehicle,
) -> RoutingPlan {
    let n = locations.len();
    let mut plan = RoutingPlan::new();
    if n <= 1 {
        return plan;
    }

    let evaluator = RouteEvaluator::new(locations, distances, vehicle);

    // Each servable customer starts on its own route; route index = customer index.
    let mut route_of = vec![usize::MAX; n];
    let mut route_load = vec![0i32; n];
    let mut route_members: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 1..n {
        if evaluator.is_feasible(&[i]) {
            route_of[i] = i;
            route_load[i] = locations[i].demand();
            route_members[i].push(i);
        } else {
            plan.add_unassigned(locations[i].id());
        }
    }

    let mut savings = Vec::new();
    for i in 1..n {
        if route_of[i] == usize::MAX {
            continue;
        }
        for j in (i + 1)..n {
            if route_of[j] == usize::MAX {
                continue;
            }
            let s = distances.get(0, i) + distances.get(0, j) - distances.get(i, j);
            if s > 0.0 {
                savings.push(Saving { i, j, value: s });
            }
        }
    }
    savings.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut merges = 0;
    for saving in &savings {
        let ri = route_of[saving.i];
        let rj = route_of[saving.j];
        if ri == rj {
            continue;
        }

        let combined_load = route_load[ri] + route_load[rj];
        if combined_load > vehicle.capacity() {
            continue;
        }

        let i_at_start = route_members[ri].first() == Some(&saving.i);
        let i_at_end = route_members[ri].last() == Some(&saving.i);
        let j_at_start = route_members[rj].first() == Some(&saving.j);
        let j_at_end = route_members[rj].last() == Some(&saving.j);

        // Orient both routes so that i is followed directly by j.
        let (reverse_i, reverse_j) = if i_at_end && j_at_start {
            (false, false)
        } else if i_at_end && j_at_end {
            (false, true)
        } else if i_at_start && j_at_start {
            (true, false)
        } else if i_at_start && j_at_end {
            (true, true)
        } else {
            continue;
        };

        let mut merged = route_members[ri].clone();
        if reverse_i {
            merged.reverse();
        }
        let start_j = merged.len();
        merged.extend_from_slice(&route_members[rj]);
        if reverse_j {
            merged[start_j..].reverse();
        }

        if !evaluator.is_feasible(&merged) {
            trace!(i = saving.i, j = saving.j, "merge rejected by time feasibility");
            continue;
        }

        for &cid in &merged {
            route_of[cid] = ri;
        }
        route_members[ri] = merged;
        route_members[rj].clear();
        route_load[ri] = combined_load;
        route_load[rj] = 0;
        merges += 1;
        trace!(i = saving.i, j = saving.j, saving = saving.value, "routes merged");
    }

    let mut next_vehicle = vehicle.id();
    for members in route_members.iter().filter(|m| !m.is_empty()) {
        let (mut route, _) = evaluator.build_route(members);
        route.set_vehicle_id(next_vehicle);
        next_vehicle += 1;
        plan.add_route(route);
    }

    debug!(
        customers = n - 1,
        savings = savings.len(),
        merges,
        routes = plan.num_routes(),
        unassigned = plan.unassigned().len(),
        distance = plan.total_distance(),
        "clarke-wright construction finished"
    );
    plan
}
