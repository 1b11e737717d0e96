//! Route sequencing entry point.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{nearest_neighbor_tour, time_window_tour, two_opt_improve, two_opt_improve_feasible, BlendWeights};
use crate::config::SequencingConfig;
use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::geo::MetricKind;
use crate::models::{Point, Vehicle};

/// An ordered single-vehicle tour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequencedRoute {
    /// Point IDs in visiting order; the depot is implicit at both ends.
    pub point_ids: Vec<usize>,
    /// Closed tour length including the return to the depot.
    pub total_distance: f64,
    /// Point IDs left out because their windows (or the capacity) could
    /// not be met.
    pub unreachable: Vec<usize>,
}

/// Orders the stops of one vehicle.
///
/// Without time windows or a capacity: priority-weighted nearest neighbor
/// followed by 2-opt. If any stop has a window or a capacity is set: blended
/// time-window construction followed by 2-opt restricted to feasible
/// reversals, with the stops that do not fit reported as unreachable.
///
/// # Examples
///
/// ```
/// use u_logistics::config::SequencingConfig;
/// use u_logistics::geo::MetricKind;
/// use u_logistics::models::Point;
/// use u_logistics::sequencing::RouteSequencer;
///
/// let sequencer = RouteSequencer::new(SequencingConfig::default(), MetricKind::Euclidean);
/// let depot = Point::new(0, 0.0, 0.0);
/// let stops = vec![
///     Point::new(1, 0.0, 1.0),
///     Point::new(2, 1.0, 0.0),
///     Point::new(3, 1.0, 1.0),
/// ];
/// let route = sequencer.sequence_route(&stops, &depot);
/// assert_eq!(route.point_ids.len(), 3);
/// assert!((route.total_distance - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct RouteSequencer {
    config: SequencingConfig,
    metric: MetricKind,
    capacity: Option<i32>,
}

impl RouteSequencer {
    pub fn new(config: SequencingConfig, metric: MetricKind) -> Self {
        Self {
            config,
            metric,
            capacity: None,
        }
    }

    /// Limits the cumulative demand of the tour. Stops that would overflow
    /// it are reported as unreachable.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sequences `points` starting and ending at `depot`.
    pub fn sequence_route(&self, points: &[Point], depot: &Point) -> SequencedRoute {
        let mut locations = Vec::with_capacity(points.len() + 1);
        locations.push(depot.clone());
        locations.extend_from_slice(points);
        let distances = DistanceMatrix::from_points(&locations, &self.metric);
        self.sequence_with_distances(&locations, &distances)
    }

    /// Sequences `locations[1..]` from the depot at `locations[0]` using a
    /// caller-supplied matrix (e.g. road distances).
    pub fn sequence_with_distances(
        &self,
        locations: &[Point],
        distances: &DistanceMatrix,
    ) -> SequencedRoute {
        if locations.len() <= 1 {
            return SequencedRoute::default();
        }

        let windowed = locations[1..].iter().any(|p| p.time_window().is_some());
        let (tour, length, unreachable) = if windowed || self.capacity.is_some() {
            let vehicle = Vehicle::new(0, self.capacity.unwrap_or(i32::MAX))
                .with_speed(self.config.average_speed_mps);
            let weights = BlendWeights::from(&self.config);
            let timed = time_window_tour(
                locations,
                distances,
                self.config.average_speed_mps,
                self.capacity,
                &weights,
            );
            let evaluator = RouteEvaluator::new(locations, distances, &vehicle);
            let outcome = two_opt_improve_feasible(
                &timed.tour,
                0,
                distances,
                self.config.max_two_opt_passes,
                self.config.improvement_epsilon,
                |candidate| evaluator.is_feasible(candidate),
            );
            (outcome.tour, outcome.length, timed.unreachable)
        } else {
            let initial = nearest_neighbor_tour(locations, distances);
            let outcome = two_opt_improve(
                &initial,
                0,
                distances,
                self.config.max_two_opt_passes,
                self.config.improvement_epsilon,
            );
            (outcome.tour, outcome.length, Vec::new())
        };

        debug!(
            stops = locations.len() - 1,
            windowed,
            capacity = ?self.capacity,
            length,
            unreachable = unreachable.len(),
            "route sequenced"
        );

        SequencedRoute {
            point_ids: tour.iter().map(|&i| locations[i].id()).collect(),
            total_distance: length,
            unreachable: unreachable.iter().map(|&i| locations[i].id()).collect(),
        }
    }
}

impl Default for RouteSequencer {
    fn default() -> Self {
        Self::new(SequencingConfig::default(), MetricKind::default())
    }
}
