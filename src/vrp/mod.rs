//! Multi-vehicle routing by Clarke-Wright savings.
//!
//! - [`clarke_wright_savings`] — Savings construction over an indexed
//!   location list and distance matrix
//! - [`VehicleRoutingSolver`] — Builds the matrix from points and runs the
//!   construction for a homogeneous, unbounded fleet

mod clarke_wright;
mod solver;

pub use clarke_wright::clarke_wright_savings;
pub use solver::VehicleRoutingSolver;
