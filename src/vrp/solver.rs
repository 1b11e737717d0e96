//! Vehicle routing entry point.

use tracing::debug;

use super::clarke_wright_savings;
use crate::config::VehicleRoutingConfig;
use crate::distance::DistanceMatrix;
use crate::geo::MetricKind;
use crate::models::{Point, RoutingPlan, Vehicle};

/// Splits customers into capacity- and window-feasible routes from one
/// depot with Clarke-Wright savings.
///
/// The fleet is homogeneous and unbounded; every vehicle shares the
/// capacity passed to [`solve`](Self::solve) and the configured speed and
/// shift length.
///
/// # Examples
///
/// ```
/// use u_logistics::config::VehicleRoutingConfig;
/// use u_logistics::geo::MetricKind;
/// use u_logistics::models::Point;
/// use u_logistics::vrp::VehicleRoutingSolver;
///
/// let solver = VehicleRoutingSolver::new(VehicleRoutingConfig::default(), MetricKind::Euclidean);
/// let depot = Point::new(0, 0.0, 0.0);
/// let customers = vec![
///     Point::new(1, 0.0, 1.0).with_demand(15),
///     Point::new(2, 0.0, 2.0).with_demand(15),
///     Point::new(3, 0.0, 3.0).with_demand(15),
/// ];
///
/// let plan = solver.solve(&depot, &customers, 30);
/// assert_eq!(plan.num_routes(), 2);
/// assert!(plan.routes().iter().all(|r| r.total_load() <= 30));
/// ```
#[derive(Debug, Clone)]
pub struct VehicleRoutingSolver {
    config: VehicleRoutingConfig,
    metric: MetricKind,
}

impl VehicleRoutingSolver {
    pub fn new(config: VehicleRoutingConfig, metric: MetricKind) -> Self {
        Self { config, metric }
    }

    /// Template vehicle for the configured fleet.
    fn vehicle(&self, capacity: i32) -> Vehicle {
        let vehicle = Vehicle::new(0, capacity).with_speed(self.config.average_speed_mps);
        match self.config.max_route_duration {
            Some(max) => vehicle.with_max_duration(max),
            None => vehicle,
        }
    }

    /// Routes `customers` from `depot` with vehicles of `capacity`.
    pub fn solve(&self, depot: &Point, customers: &[Point], capacity: i32) -> RoutingPlan {
        let mut locations = Vec::with_capacity(customers.len() + 1);
        locations.push(depot.clone());
        locations.extend_from_slice(customers);
        let distances = DistanceMatrix::from_points(&locations, &self.metric);
        self.solve_with_distances(&locations, &distances, capacity)
    }

    /// Routes `locations[1..]` from the depot at `locations[0]` using a
    /// caller-supplied matrix.
    pub fn solve_with_distances(
        &self,
        locations: &[Point],
        distances: &DistanceMatrix,
        capacity: i32,
    ) -> RoutingPlan {
        let vehicle = self.vehicle(capacity);
        let plan = clarke_wright_savings(locations, distances, &vehicle);
        debug!(
            customers = locations.len().saturating_sub(1),
            capacity,
            routes = plan.num_routes(),
            unassigned = plan.unassigned().len(),
            "vehicle routing solved"
        );
        plan
    }
}

impl Default for VehicleRoutingSolver {
    fn default() -> Self {
        Self::new(VehicleRoutingConfig::default(), MetricKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn planar(speed: f64, max_route_duration: Option<f64>) -> VehicleRoutingSolver {
        let config = VehicleRoutingConfig {
            average_speed_mps: speed,
            max_route_duration,
        };
        VehicleRoutingSolver::new(config, MetricKind::Euclidean)
    }

    #[test]
    fn test_solve_empty() {
        let plan = planar(1.0, None).solve(&Point::new(0, 0.0, 0.0), &[], 10);
        assert_eq!(plan.num_routes(), 0);
        assert!(plan.unassigned().is_empty());
    }

    #[test]
    fn test_solve_capacity_split() {
        let depot = Point::new(0, 0.0, 0.0);
        let customers: Vec<Point> = (1..=6)
            .map(|i| Point::new(i, 0.0, i as f64).with_demand(10))
            .collect();
        let plan = planar(1.0, None).solve(&depot, &customers, 30);
        assert_eq!(plan.num_served(), 6);
        for route in plan.routes() {
            assert!(route.total_load() <= 30);
        }
        assert!(plan.num_routes() >= 2);
    }

    #[test]
    fn test_speed_scales_window_feasibility() {
        // 100 units away with a window closing at 20: only a fast vehicle makes it.
        let depot = Point::new(0, 0.0, 0.0);
        let customers =
            vec![Point::new(1, 0.0, 100.0).with_time_window(TimeWindow::new(0.0, 20.0).expect("valid"))];
        let slow = planar(1.0, None).solve(&depot, &customers, 10);
        assert_eq!(slow.unassigned(), &[1]);
        let fast = planar(10.0, None).solve(&depot, &customers, 10);
        assert_eq!(fast.num_served(), 1);
    }

    #[test]
    fn test_shift_limit_splits_routes() {
        // Alone each fits in 3; together 1 + 1 + 1.41 exceeds it.
        let depot = Point::new(0, 0.0, 0.0);
        let customers = vec![Point::new(1, 0.0, 1.0), Point::new(2, 1.0, 1.0)];
        let unlimited = planar(1.0, None).solve(&depot, &customers, 100);
        assert_eq!(unlimited.num_routes(), 1);
        let limited = planar(1.0, Some(3.0)).solve(&depot, &customers, 100);
        assert_eq!(limited.num_routes(), 2);
    }

    #[test]
    fn test_route_stops_carry_ids() {
        let depot = Point::new(50, 0.0, 0.0);
        let customers = vec![
            Point::new(7, 0.0, 1.0).with_demand(1),
            Point::new(9, 0.0, 2.0).with_demand(1),
        ];
        let plan = planar(1.0, None).solve(&depot, &customers, 10);
        let mut ids = plan.routes()[0].point_ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![7, 9]);
    }
}
