//! Shortest paths over a sparse [`Graph`](crate::models::Graph).
//!
//! - [`MinQueue`] — Binary min-heap keyed by an `f64` priority
//! - [`dijkstra`] — Non-negative weight shortest path, O((V+E) log V)
//! - [`a_star`] — Dijkstra guided by the haversine distance to the target

mod queue;
mod search;

pub use queue::MinQueue;
pub use search::{a_star, dijkstra, shortest_path, SearchMode, ShortestPath};
