//! # u-logistics
//!
//! Logistics optimization engine: shortest paths over road graphs, stop
//! sequencing for one vehicle, capacitated multi-vehicle routing with time
//! windows, courier-to-order assignment, network flow and load
//! consolidation.
//!
//! All solvers are synchronous and operate on caller-owned inputs; there is
//! no I/O and no shared mutable state. Algorithmic outcomes such as an
//! unreachable target or an unservable customer are part of the results,
//! not errors.
//!
//! ## Modules
//!
//! - [`geo`] — Haversine distance and the [`Metric`](geo::Metric) trait
//! - [`models`] — Points, time windows, vehicles, routes, graphs
//! - [`distance`] — Dense distance matrix
//! - [`evaluation`] — Forward time/load propagation and feasibility
//! - [`pathfinding`] — Dijkstra and A*
//! - [`sequencing`] — Nearest neighbor, 2-opt, time-window construction
//! - [`vrp`] — Clarke-Wright savings
//! - [`assignment`] — Kuhn-Munkres and augmenting-path matching
//! - [`flow`] — Max-flow, min-cost flow, bin packing
//! - [`dispatch`] — Worker pool for background optimization jobs
//! - [`optimizer`] — [`Optimizer`] facade over all of the above
//! - [`config`] — TOML-loadable configuration

pub mod assignment;
pub mod config;
pub mod dispatch;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod flow;
pub mod geo;
pub mod models;
pub mod optimizer;
pub mod pathfinding;
pub mod sequencing;
pub mod vrp;

pub use error::{LogisticsError, Result};
pub use optimizer::Optimizer;
