//! Route and stop types.

use serde::{Deserialize, Serialize};

/// A single stop within a route, with its computed timing and load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// ID of the visited point.
    pub point_id: usize,
    /// Arrival time.
    pub arrival_time: f64,
    /// Service start (arrival plus any wait for the window to open).
    pub service_start: f64,
    /// Departure time (service start plus service duration).
    pub departure_time: f64,
    /// Cumulative load after this stop.
    pub load_after: i32,
}

/// An ordered sequence of stops driven by one vehicle.
///
/// The route starts and ends at the depot, which is not stored in `stops`.
/// Totals include the final leg back to the depot.
///
/// # Examples
///
/// ```
/// use u_logistics::models::{Route, Stop};
///
/// let mut route = Route::new(0);
/// route.push_stop(Stop {
///     point_id: 4,
///     arrival_time: 10.0,
///     service_start: 10.0,
///     departure_time: 15.0,
///     load_after: 3,
/// });
/// assert_eq!(route.point_ids(), vec![4]);
/// assert_eq!(route.total_load(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<Stop>,
    total_distance: f64,
    total_duration: f64,
    total_load: i32,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            ..Self::default()
        }
    }

    /// Appends a stop.
    pub fn push_stop(&mut self, stop: Stop) {
        self.total_load = stop.load_after;
        self.stops.push(stop);
    }

    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    pub(crate) fn set_vehicle_id(&mut self, id: usize) {
        self.vehicle_id = id;
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops (excluding the depot).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Point IDs in visiting order.
    pub fn point_ids(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.point_id).collect()
    }

    /// Distance including the return to the depot.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Time back at the depot.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn total_load(&self) -> i32 {
        self.total_load
    }

    pub(crate) fn set_totals(&mut self, distance: f64, duration: f64) {
        self.total_distance = distance;
        self.total_duration = duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(point_id: usize, load_after: i32) -> Stop {
        Stop {
            point_id,
            arrival_time: 0.0,
            service_start: 0.0,
            departure_time: 0.0,
            load_after,
        }
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new(3);
        assert!(r.is_empty());
        assert_eq!(r.vehicle_id(), 3);
        assert_eq!(r.total_distance(), 0.0);
        assert_eq!(r.total_load(), 0);
    }

    #[test]
    fn test_route_push_stop() {
        let mut r = Route::new(1);
        r.push_stop(stop(5, 20));
        r.push_stop(stop(3, 35));
        r.set_totals(12.0, 30.0);
        assert_eq!(r.len(), 2);
        assert_eq!(r.point_ids(), vec![5, 3]);
        assert_eq!(r.total_load(), 35);
        assert_eq!(r.total_distance(), 12.0);
        assert_eq!(r.total_duration(), 30.0);
    }
}
