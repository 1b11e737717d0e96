//! Bipartite assignment between two sets (e.g. couriers and orders).
//!
//! - [`CostMatrix`] — Rectangular costs; `f64::INFINITY` forbids a pair
//! - [`KuhnMunkres`] — Minimum-cost assignment, O(n³)
//! - [`AugmentingPathMatcher`] — Maximum-cardinality matching, cheapest
//!   candidates first, no cost guarantee
//! - [`AssignmentSolver`] — Picks the algorithm from configuration

mod augmenting;
mod hungarian;
mod matrix;

pub use augmenting::AugmentingPathMatcher;
pub use hungarian::KuhnMunkres;
pub use matrix::CostMatrix;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AssignmentConfig, AssignmentStrategy};

/// A matching algorithm over a cost matrix.
pub trait MatchingAlgorithm: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Matches rows (left) to columns (right).
    fn assign(&self, costs: &CostMatrix) -> Assignment;
}

/// Result of an assignment: a partial injective map from right to left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    right_to_left: Vec<Option<usize>>,
    num_left: usize,
    total_cost: f64,
}

impl Assignment {
    pub(crate) fn from_right_to_left(right_to_left: Vec<Option<usize>>, costs: &CostMatrix) -> Self {
        let total_cost = right_to_left
            .iter()
            .enumerate()
            .filter_map(|(right, left)| left.map(|l| costs.get(l, right)))
            .sum();
        Self {
            right_to_left,
            num_left: costs.rows(),
            total_cost,
        }
    }

    /// Left node matched to each right node; `None` if unmatched.
    pub fn right_to_left(&self) -> &[Option<usize>] {
        &self.right_to_left
    }

    /// Right node matched to each left node; `None` if unmatched.
    pub fn left_to_right(&self) -> Vec<Option<usize>> {
        let mut out = vec![None; self.num_left];
        for (right, left) in self.pairs_iter() {
            if let Some(slot) = out.get_mut(left) {
                *slot = Some(right);
            }
        }
        out
    }

    /// Matched `(left, right)` pairs in right-node order.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.pairs_iter().map(|(right, left)| (left, right)).collect()
    }

    fn pairs_iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.right_to_left
            .iter()
            .enumerate()
            .filter_map(|(right, left)| left.map(|l| (right, l)))
    }

    pub fn num_matched(&self) -> usize {
        self.pairs_iter().count()
    }

    /// Sum of the costs of the matched pairs.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// `true` if no left node is matched to two right nodes.
    pub fn is_injective(&self) -> bool {
        let mut seen = vec![false; self.num_left];
        for (_, left) in self.pairs_iter() {
            match seen.get_mut(left) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }
        true
    }
}

/// Configured assignment entry point.
///
/// # Examples
///
/// ```
/// use u_logistics::assignment::{AssignmentSolver, CostMatrix};
/// use u_logistics::config::AssignmentConfig;
/// use u_logistics::geo::Euclidean;
/// use u_logistics::models::Point;
///
/// let couriers = vec![Point::new(0, 0.0, 0.0), Point::new(1, 10.0, 10.0)];
/// let orders = vec![Point::new(10, 10.0, 9.0), Point::new(11, 0.0, 1.0)];
/// let costs = CostMatrix::from_points(&couriers, &orders, &Euclidean);
///
/// let result = AssignmentSolver::new(AssignmentConfig::default()).assign(&costs);
/// assert_eq!(result.right_to_left(), &[Some(1), Some(0)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssignmentSolver {
    config: AssignmentConfig,
}

impl AssignmentSolver {
    pub fn new(config: AssignmentConfig) -> Self {
        Self { config }
    }

    fn algorithm(&self) -> &'static dyn MatchingAlgorithm {
        match self.config.strategy {
            AssignmentStrategy::Optimal => &KuhnMunkres,
            AssignmentStrategy::AugmentingPath => &AugmentingPathMatcher,
        }
    }

    pub fn assign(&self, costs: &CostMatrix) -> Assignment {
        let algorithm = self.algorithm();
        let result = algorithm.assign(costs);
        debug!(
            algorithm = algorithm.name(),
            left = costs.rows(),
            right = costs.cols(),
            matched = result.num_matched(),
            total_cost = result.total_cost(),
            "assignment solved"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Euclidean;
    use crate::models::Point;

    fn couriers_and_orders() -> CostMatrix {
        let couriers = vec![Point::new(0, 0.0, 0.0), Point::new(1, 10.0, 10.0)];
        let orders = vec![Point::new(0, 0.0, 1.0), Point::new(1, 10.0, 9.0)];
        CostMatrix::from_points(&couriers, &orders, &Euclidean)
    }

    #[test]
    fn test_nearest_pairing_both_strategies() {
        let costs = couriers_and_orders();
        for strategy in [AssignmentStrategy::Optimal, AssignmentStrategy::AugmentingPath] {
            let solver = AssignmentSolver::new(AssignmentConfig { strategy });
            let a = solver.assign(&costs);
            assert_eq!(a.right_to_left(), &[Some(0), Some(1)]);
            assert_eq!(a.pairs(), vec![(0, 0), (1, 1)]);
            assert!((a.total_cost() - 2.0).abs() < 1e-12);
            assert!(a.is_injective());
        }
    }

    #[test]
    fn test_left_to_right_inverse() {
        let costs = CostMatrix::from_rows(vec![vec![9.0, 1.0], vec![1.0, 9.0], vec![5.0, 5.0]]).unwrap();
        let a = AssignmentSolver::default().assign(&costs);
        assert_eq!(a.left_to_right(), vec![Some(1), Some(0), None]);
    }

    #[test]
    fn test_is_injective_detects_duplicates() {
        let costs = CostMatrix::from_rows(vec![vec![1.0, 1.0]]).unwrap();
        let a = Assignment::from_right_to_left(vec![Some(0), Some(0)], &costs);
        assert!(!a.is_injective());
    }
}
