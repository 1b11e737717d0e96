//! Single-vehicle stop sequencing.
//!
//! - [`nearest_neighbor_tour`] — Priority-weighted greedy construction, O(n²)
//! - [`two_opt_improve`] — Segment-reversal local search, O(n²) per pass
//! - [`time_window_tour`] — Blended distance/priority/urgency construction
//!   that honors arrival windows
//! - [`RouteSequencer`] — Runs construction and 2-opt over a point list

mod nearest_neighbor;
mod sequencer;
mod time_window;
mod two_opt;

pub use nearest_neighbor::nearest_neighbor_tour;
pub use sequencer::{RouteSequencer, SequencedRoute};
pub use time_window::{time_window_tour, BlendWeights, TimedTour};
pub use two_opt::{two_opt_improve, two_opt_improve_feasible, TwoOptOutcome};
