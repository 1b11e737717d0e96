//! Routing plan and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A type of constraint violation found while evaluating a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Cumulative load above vehicle capacity.
    CapacityExceeded {
        /// Load carried.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Arrival after the point's window closed.
    WindowClosed {
        /// Point ID.
        point_id: usize,
        /// Arrival time.
        arrival: f64,
        /// Window close time.
        end: f64,
    },
    /// Return to depot after the vehicle's shift ended.
    ShiftExceeded {
        /// Route duration.
        duration: f64,
        /// Maximum allowed duration.
        max_duration: f64,
    },
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationType,
}

impl Violation {
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Output of the vehicle routing solver: one route per vehicle, plus the
/// points no feasible route could serve.
///
/// # Examples
///
/// ```
/// use u_logistics::models::{Route, RoutingPlan};
///
/// let mut plan = RoutingPlan::new();
/// plan.add_route(Route::new(0));
/// plan.add_unassigned(9);
/// assert_eq!(plan.num_routes(), 1);
/// assert_eq!(plan.unassigned(), &[9]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingPlan {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
}

impl RoutingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn add_unassigned(&mut self, point_id: usize) {
        self.unassigned.push(point_id);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// IDs of points left out of every route.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Distance summed over all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }

    /// Number of points served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Consumes the plan, yielding its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;

    fn route_with(vehicle: usize, ids: &[usize], distance: f64) -> Route {
        let mut r = Route::new(vehicle);
        for (k, &id) in ids.iter().enumerate() {
            r.push_stop(Stop {
                point_id: id,
                arrival_time: 0.0,
                service_start: 0.0,
                departure_time: 0.0,
                load_after: k as i32 + 1,
            });
        }
        r.set_totals(distance, 0.0);
        r
    }

    #[test]
    fn test_plan_empty() {
        let plan = RoutingPlan::new();
        assert_eq!(plan.num_routes(), 0);
        assert_eq!(plan.num_served(), 0);
        assert_eq!(plan.total_distance(), 0.0);
    }

    #[test]
    fn test_plan_totals() {
        let mut plan = RoutingPlan::new();
        plan.add_route(route_with(0, &[1], 50.0));
        plan.add_route(route_with(1, &[2, 3], 80.0));
        plan.add_unassigned(4);
        assert_eq!(plan.num_served(), 3);
        assert!((plan.total_distance() - 130.0).abs() < 1e-10);
        assert_eq!(plan.into_routes().len(), 2);
    }

    #[test]
    fn test_violation_kind() {
        let v = Violation::new(ViolationType::CapacityExceeded {
            load: 250,
            capacity: 200,
        });
        assert!(matches!(
            v.kind,
            ViolationType::CapacityExceeded { load: 250, .. }
        ));
    }
}
