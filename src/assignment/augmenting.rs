//! Bipartite matching by depth-first augmenting paths.
//!
//! # Algorithm
//!
//! For each left node in turn, search for an augmenting path: try its
//! allowed right nodes in ascending cost; a right node is taken if it is
//! free or if its current partner can be re-routed to another right node
//! (recursively). The visited set is reset for every left node.
//!
//! The result is a maximum-cardinality matching. Costs only order the
//! candidates, so the total cost is low in practice but not guaranteed
//! minimal; see [`KuhnMunkres`](super::KuhnMunkres) for that.
//!
//! # Complexity
//!
//! O(V · E) plus O(E log E) for sorting the candidate lists.

use tracing::trace;

use super::{Assignment, CostMatrix, MatchingAlgorithm};

/// Augmenting-path matcher with cheapest-first candidate order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AugmentingPathMatcher;

impl MatchingAlgorithm for AugmentingPathMatcher {
    fn name(&self) -> &'static str {
        "augmenting_path"
    }

    fn assign(&self, costs: &CostMatrix) -> Assignment {
        let candidates: Vec<Vec<usize>> = (0..costs.rows())
            .map(|row| {
                let mut cols: Vec<usize> = (0..costs.cols())
                    .filter(|&col| !costs.is_forbidden(row, col))
                    .collect();
                cols.sort_by(|&a, &b| costs.get(row, a).total_cmp(&costs.get(row, b)));
                cols
            })
            .collect();

        let mut right_to_left = vec![None; costs.cols()];
        let mut visited = vec![false; costs.cols()];
        for left in 0..costs.rows() {
            visited.fill(false);
            let matched = augment(left, &candidates, &mut visited, &mut right_to_left);
            trace!(left, matched, "augmenting path search");
        }

        Assignment::from_right_to_left(right_to_left, costs)
    }
}

fn augment(
    left: usize,
    candidates: &[Vec<usize>],
    visited: &mut [bool],
    right_to_left: &mut [Option<usize>],
) -> bool {
    for &right in &candidates[left] {
        if visited[right] {
            continue;
        }
        visited[right] = true;
        let free = match right_to_left[right] {
            None => true,
            Some(other) => augment(other, candidates, visited, right_to_left),
        };
        if free {
            right_to_left[right] = Some(left);
            return true;
        }
    }
    false
}
