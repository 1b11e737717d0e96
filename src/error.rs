//! Error types for the logistics engine.
//!
//! Algorithmic outcomes (an unreachable target, an infeasible merge, an
//! empty instance) are not errors; they are encoded in the solver results.
//! These variants cover input structures a solver cannot represent and the
//! configuration and worker-pool layers.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for logistics operations.
#[derive(Debug, Error)]
pub enum LogisticsError {
    /// Graph edge weight is negative or not finite.
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight {
        /// Source node ID.
        from: usize,
        /// Target node ID.
        to: usize,
        /// Rejected weight.
        weight: f64,
    },

    /// A matrix row does not match the width of the first row.
    #[error("matrix row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        /// Offending row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// Flow edge endpoint outside the network.
    #[error("flow edge references node {node} but the network has {nodes} nodes")]
    UnknownFlowNode {
        /// Referenced node.
        node: usize,
        /// Number of nodes in the network.
        nodes: usize,
    },

    /// Flow node ID too large to size a dense network.
    #[error("flow node {0} is out of range for a dense network")]
    FlowNodeOutOfRange(usize),

    /// Flow edge with negative capacity.
    #[error("flow edge {from} -> {to} has negative capacity {capacity}")]
    NegativeCapacity {
        /// Source node.
        from: usize,
        /// Target node.
        to: usize,
        /// Rejected capacity.
        capacity: i64,
    },

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Worker pool could not be created.
    #[error("worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Job terminated without sending a result (it panicked).
    #[error("optimization job '{0}' terminated without a result")]
    JobLost(String),

    /// Job was cancelled before it started.
    #[error("optimization job '{0}' was cancelled")]
    JobCancelled(String),
}

/// Result type alias for logistics operations.
pub type Result<T> = std::result::Result<T, LogisticsError>;
