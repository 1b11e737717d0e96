//! Route evaluator that computes timing, load, and feasibility.

use crate::distance::DistanceMatrix;
use crate::models::{Point, Route, Stop, Vehicle, Violation, ViolationType};

/// Evaluates stop sequences by propagating time and load forward from the
/// depot and checking capacity, time windows, and shift length.
///
/// Locations are addressed by index: `locations[0]` is the depot and the
/// distance matrix rows follow the same order. Travel time is distance
/// divided by the vehicle's constant speed; arriving before a window opens
/// waits, arriving after it closes is a violation.
///
/// # Examples
///
/// ```
/// use u_logistics::models::{Point, Vehicle};
/// use u_logistics::geo::Euclidean;
/// use u_logistics::distance::DistanceMatrix;
/// use u_logistics::evaluation::RouteEvaluator;
///
/// let locations = vec![
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 4.0, 3.0).with_demand(10).with_service_duration(5.0),
///     Point::new(2, 8.0, 6.0).with_demand(20).with_service_duration(5.0),
/// ];
/// let dm = DistanceMatrix::from_points(&locations, &Euclidean);
/// let vehicle = Vehicle::new(0, 100);
///
/// let evaluator = RouteEvaluator::new(&locations, &dm, &vehicle);
/// let (route, violations) = evaluator.build_route(&[1, 2]);
/// assert_eq!(route.point_ids(), vec![1, 2]);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    locations: &'a [Point],
    distances: &'a DistanceMatrix,
    vehicle: &'a Vehicle,
    depot: usize,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator with the depot at index 0.
    pub fn new(locations: &'a [Point], distances: &'a DistanceMatrix, vehicle: &'a Vehicle) -> Self {
        Self {
            locations,
            distances,
            vehicle,
            depot: 0,
        }
    }

    /// Departure time from the depot: its window opening, or zero.
    fn start_time(&self) -> f64 {
        self.locations
            .get(self.depot)
            .and_then(|d| d.time_window())
            .map_or(0.0, |tw| tw.start())
    }

    /// Builds a timed route from a sequence of location indices.
    ///
    /// Returns the route (with point IDs, not indices, in its stops) and all
    /// constraint violations found.
    pub fn build_route(&self, sequence: &[usize]) -> (Route, Vec<Violation>) {
        let mut route = Route::new(self.vehicle.id());
        let mut violations = Vec::new();
        let route_start = self.start_time();
        let mut current_time = route_start;
        let mut current_load: i32 = 0;
        let mut total_distance = 0.0;
        let mut prev = self.depot;

        for &idx in sequence {
            let leg = self.distances.get(prev, idx);
            total_distance += leg;
            let arrival = current_time + self.vehicle.travel_time(leg);
            let point = &self.locations[idx];

            let service_start = match point.time_window() {
                Some(tw) => {
                    if tw.is_closed_at(arrival) {
                        violations.push(Violation::new(ViolationType::WindowClosed {
                            point_id: point.id(),
                            arrival,
                            end: tw.end(),
                        }));
                    }
                    arrival + tw.wait_before(arrival)
                }
                None => arrival,
            };

            let departure = service_start + point.service_duration();
            current_load += point.demand();

            route.push_stop(Stop {
                point_id: point.id(),
                arrival_time: arrival,
                service_start,
                departure_time: departure,
                load_after: current_load,
            });

            current_time = departure;
            prev = idx;
        }

        let mut total_duration = 0.0;
        if !sequence.is_empty() {
            let back = self.distances.get(prev, self.depot);
            total_distance += back;
            total_duration = current_time + self.vehicle.travel_time(back) - route_start;
        }
        route.set_totals(total_distance, total_duration);

        if current_load > self.vehicle.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                load: current_load,
                capacity: self.vehicle.capacity(),
            }));
        }

        if let Some(max) = self.vehicle.max_duration() {
            if total_duration > max {
                violations.push(Violation::new(ViolationType::ShiftExceeded {
                    duration: total_duration,
                    max_duration: max,
                }));
            }
        }

        (route, violations)
    }

    /// Returns `true` if the sequence violates no constraint.
    ///
    /// Stops at the first window violation instead of building the route.
    pub fn is_feasible(&self, sequence: &[usize]) -> bool {
        let route_start = self.start_time();
        let mut current_time = route_start;
        let mut load: i32 = 0;
        let mut prev = self.depot;

        for &idx in sequence {
            let arrival =
                current_time + self.vehicle.travel_time(self.distances.get(prev, idx));
            let point = &self.locations[idx];
            let service_start = match point.time_window() {
                Some(tw) if tw.is_closed_at(arrival) => return false,
                Some(tw) => arrival + tw.wait_before(arrival),
                None => arrival,
            };
            current_time = service_start + point.service_duration();
            load += point.demand();
            prev = idx;
        }

        if load > self.vehicle.capacity() {
            return false;
        }
        match (self.vehicle.max_duration(), sequence.is_empty()) {
            (Some(max), false) => {
                let back = self.vehicle.travel_time(self.distances.get(prev, self.depot));
                current_time + back - route_start <= max
            }
            _ => true,
        }
    }
}
