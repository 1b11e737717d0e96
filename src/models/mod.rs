//! Domain model types for the logistics engine.
//!
//! Provides the per-invocation input and output structures: points with
//! demands, priorities, and time windows; vehicles with capacity and speed;
//! timed routes and routing plans; and the sparse weighted graph consumed by
//! the shortest-path solvers.

mod graph;
mod plan;
mod point;
mod route;
mod vehicle;

pub use graph::Graph;
pub use plan::{RoutingPlan, Violation, ViolationType};
pub use point::{Point, TimeWindow};
pub use route::{Route, Stop};
pub use vehicle::Vehicle;
