//! Time-window-aware tour construction.
//!
//! # Algorithm
//!
//! Greedy construction from the depot. At each step every unvisited stop is
//! projected forward: `arrival = now + distance / speed`. Stops whose window
//! would already be closed on arrival (or that would exceed the optional
//! capacity) are skipped for this step. The remaining candidates are scored
//!
//! ```text
//! score = w_d · d / d_max + w_p · 1 / priority + w_u · slack / slack_max
//! ```
//!
//! where `slack = window_end − arrival` (stops without a window count as
//! fully relaxed, urgency term 1). The lowest score is visited next; an early
//! arrival waits for the window to open. Stops that never become feasible
//! are reported as unreachable.
//!
//! # Complexity
//!
//! O(n²) where n = number of stops.
//!
//! # Reference
//!
//! Solomon, M.M. (1987). "Algorithms for the Vehicle Routing and Scheduling
//! Problems with Time Window Constraints", *Operations Research* 35(2), 254-265.

use tracing::trace;

use crate::config::SequencingConfig;
use crate::distance::DistanceMatrix;
use crate::models::Point;

/// Weights of the candidate score terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub distance: f64,
    pub priority: f64,
    pub urgency: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self::from(&SequencingConfig::default())
    }
}

impl From<&SequencingConfig> for BlendWeights {
    fn from(config: &SequencingConfig) -> Self {
        Self {
            distance: config.distance_weight,
            priority: config.priority_weight,
            urgency: config.urgency_weight,
        }
    }
}

/// Result of [`time_window_tour`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimedTour {
    /// Visiting order as location indices (depot excluded).
    pub tour: Vec<usize>,
    /// Location indices no feasible arrival could reach.
    pub unreachable: Vec<usize>,
}

struct Candidate {
    index: usize,
    distance: f64,
    slack: Option<f64>,
}

/// Builds a window-feasible tour over `locations[1..]` from the depot at
/// index 0.
///
/// The clock starts at the depot's window opening (or zero) and advances at
/// `speed_mps`. With `capacity` set, stops whose demand would overflow the
/// vehicle are treated as infeasible.
///
/// # Examples
///
/// ```
/// use u_logistics::models::{Point, TimeWindow};
/// use u_logistics::geo::Euclidean;
/// use u_logistics::distance::DistanceMatrix;
/// use u_logistics::sequencing::{time_window_tour, BlendWeights};
///
/// let locations = vec![
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 0.0, 1.0).with_time_window(TimeWindow::new(0.0, 1000.0).unwrap()),
///     Point::new(2, 0.0, 1.5).with_time_window(TimeWindow::new(0.0, 2.0).unwrap()),
/// ];
/// let dm = DistanceMatrix::from_points(&locations, &Euclidean);
///
/// // Stop 2 is farther but its window is about to close.
/// let timed = time_window_tour(&locations, &dm, 1.0, None, &BlendWeights::default());
/// assert_eq!(timed.tour, vec![2, 1]);
/// assert!(timed.unreachable.is_empty());
/// ```
pub fn time_window_tour(
    locations: &[Point],
    distances: &DistanceMatrix,
    speed_mps: f64,
    capacity: Option<i32>,
    weights: &BlendWeights,
) -> TimedTour {
    let n = locations.len();
    if n <= 1 {
        return TimedTour::default();
    }

    let mut visited = vec![false; n];
    visited[0] = true;
    let mut tour = Vec::with_capacity(n - 1);
    let mut current = 0;
    let mut now = locations[0].time_window().map_or(0.0, |tw| tw.start());
    let mut load: i32 = 0;

    loop {
        let mut candidates = Vec::new();
        for i in 1..n {
            if visited[i] {
                continue;
            }
            let point = &locations[i];
            if capacity.is_some_and(|cap| load + point.demand() > cap) {
                continue;
            }
            let distance = distances.get(current, i);
            let arrival = now + distance / speed_mps;
            let slack = match point.time_window() {
                Some(tw) if tw.is_closed_at(arrival) => continue,
                Some(tw) => Some(tw.slack(arrival)),
                None => None,
            };
            candidates.push(Candidate {
                index: i,
                distance,
                slack,
            });
        }

        let Some(next) = pick(&candidates, locations, weights) else {
            break;
        };

        let point = &locations[next];
        let arrival = now + distances.get(current, next) / speed_mps;
        let service_start = point
            .time_window()
            .map_or(arrival, |tw| arrival + tw.wait_before(arrival));
        now = service_start + point.service_duration();
        load += point.demand();
        visited[next] = true;
        tour.push(next);
        current = next;
        trace!(stop = point.id(), arrival, service_start, "time-window stop");
    }

    let unreachable = (1..n).filter(|&i| !visited[i]).collect();
    TimedTour { tour, unreachable }
}

fn pick(candidates: &[Candidate], locations: &[Point], weights: &BlendWeights) -> Option<usize> {
    let max_distance = candidates.iter().map(|c| c.distance).fold(0.0, f64::max);
    let max_slack = candidates
        .iter()
        .filter_map(|c| c.slack)
        .fold(0.0, f64::max);

    let mut best: Option<(usize, f64)> = None;
    for c in candidates {
        let distance_term = if max_distance > 0.0 {
            c.distance / max_distance
        } else {
            0.0
        };
        let priority_term = 1.0 / locations[c.index].effective_priority();
        let urgency_term = match c.slack {
            Some(s) if max_slack > 0.0 => s / max_slack,
            Some(_) => 0.0,
            None => 1.0,
        };
        let score = weights.distance * distance_term
            + weights.priority * priority_term
            + weights.urgency * urgency_term;
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((c.index, score));
        }
    }
    best.map(|(index, _)| index)
}
