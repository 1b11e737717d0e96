//! Distance matrices.
//!
//! Provides a dense distance matrix shared by the sequencing and vehicle
//! routing solvers.

mod matrix;

pub use matrix::DistanceMatrix;
