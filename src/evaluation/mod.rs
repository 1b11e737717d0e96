//! Route evaluation: forward time and load propagation with feasibility
//! checking.

mod evaluator;

pub use evaluator::RouteEvaluator;
