//! Minimum-cost assignment by the Kuhn-Munkres (Hungarian) algorithm.
//!
//! # Algorithm
//!
//! The cost matrix is padded to an n×n square with zero-cost dummy rows or
//! columns. Forbidden pairs are replaced by a penalty larger than any
//! difference in finite total cost, so the solver first maximizes the
//! number of real pairs and then minimizes their cost. Rows are inserted
//! one at a time; dual potentials `u`, `v` keep reduced costs
//! non-negative, and each insertion grows a shortest augmenting path over
//! the tight edges.
//!
//! Pairs that land on a dummy or a penalized entry are reported unmatched.
//!
//! # Complexity
//!
//! O(n³) where n = max(rows, cols).
//!
//! # Reference
//!
//! Kuhn, H.W. (1955). "The Hungarian method for the assignment problem",
//! *Naval Research Logistics Quarterly* 2, 83-97.

use super::{Assignment, CostMatrix, MatchingAlgorithm};

/// Optimal assignment solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct KuhnMunkres;

impl MatchingAlgorithm for KuhnMunkres {
    fn name(&self) -> &'static str {
        "kuhn_munkres"
    }

    fn assign(&self, costs: &CostMatrix) -> Assignment {
        if costs.is_empty() {
            return Assignment::from_right_to_left(vec![None; costs.cols()], costs);
        }

        let n = costs.rows().max(costs.cols());
        let square = padded(costs, n);
        let row_of_col = solve_square(&square, n);

        let right_to_left = (0..costs.cols())
            .map(|col| {
                let row = row_of_col[col];
                (row < costs.rows() && !costs.is_forbidden(row, col)).then_some(row)
            })
            .collect();
        Assignment::from_right_to_left(right_to_left, costs)
    }
}

/// Square matrix with dummy padding and penalized forbidden entries.
fn padded(costs: &CostMatrix, n: usize) -> Vec<f64> {
    let (mut lo, mut hi) = (0.0f64, 0.0f64);
    for row in 0..costs.rows() {
        for col in 0..costs.cols() {
            if !costs.is_forbidden(row, col) {
                let c = costs.get(row, col);
                lo = lo.min(c);
                hi = hi.max(c);
            }
        }
    }
    let penalty = hi + (hi - lo + 1.0) * n as f64;

    let mut square = vec![0.0; n * n];
    for row in 0..costs.rows() {
        for col in 0..costs.cols() {
            square[row * n + col] = if costs.is_forbidden(row, col) {
                penalty
            } else {
                costs.get(row, col)
            };
        }
    }
    square
}

/// Returns, for each column, the row assigned to it.
fn solve_square(a: &[f64], n: usize) -> Vec<usize> {
    // 1-based with index 0 as the virtual start column.
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut p = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut minv = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = a[(i0 - 1) * n + (j - 1)] - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    (1..=n).map(|j| p[j] - 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::AugmentingPathMatcher;

    #[test]
    fn test_classic_3x3() {
        let costs = CostMatrix::from_rows(vec![
            vec![4.0, 1.0, 3.0],
            vec![2.0, 0.0, 5.0],
            vec![3.0, 2.0, 2.0],
        ])
        .unwrap();
        let a = KuhnMunkres.assign(&costs);
        assert!((a.total_cost() - 5.0).abs() < 1e-12);
        assert_eq!(a.num_matched(), 3);
    }

    #[test]
    fn test_beats_augmenting_heuristic() {
        let costs = CostMatrix::from_rows(vec![vec![1.0, 10.0], vec![0.5, 1.0]]).unwrap();
        let optimal = KuhnMunkres.assign(&costs);
        let heuristic = AugmentingPathMatcher.assign(&costs);
        assert!((optimal.total_cost() - 2.0).abs() < 1e-12);
        assert!(optimal.total_cost() < heuristic.total_cost());
    }

    #[test]
    fn test_more_left_than_right() {
        let costs =
            CostMatrix::from_rows(vec![vec![5.0, 9.0], vec![1.0, 2.0], vec![3.0, 1.0]]).unwrap();
        let a = KuhnMunkres.assign(&costs);
        assert_eq!(a.right_to_left(), &[Some(1), Some(2)]);
        assert_eq!(a.left_to_right(), vec![None, Some(0), Some(1)]);
        assert!((a.total_cost() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_more_right_than_left() {
        let costs = CostMatrix::from_rows(vec![vec![7.0, 3.0, 4.0]]).unwrap();
        let a = KuhnMunkres.assign(&costs);
        assert_eq!(a.right_to_left(), &[None, Some(0), None]);
    }

    #[test]
    fn test_forbidden_pairs_unmatched() {
        let inf = f64::INFINITY;
        let costs = CostMatrix::from_rows(vec![vec![inf, 1.0], vec![inf, 2.0]]).unwrap();
        let a = KuhnMunkres.assign(&costs);
        assert_eq!(a.right_to_left(), &[None, Some(0)]);
        assert!((a.total_cost() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cardinality_before_cost() {
        // Matching both pairs costs 200; matching one would cost 1 but
        // leaves a left node out.
        let inf = f64::INFINITY;
        let costs = CostMatrix::from_rows(vec![vec![1.0, 100.0], vec![100.0, inf]]).unwrap();
        let a = KuhnMunkres.assign(&costs);
        assert_eq!(a.num_matched(), 2);
        assert_eq!(a.right_to_left(), &[Some(1), Some(0)]);
    }

    #[test]
    fn test_weights_maximized() {
        let costs = CostMatrix::from_weights(vec![vec![5.0, 4.0], vec![4.0, 1.0]]).unwrap();
        let a = KuhnMunkres.assign(&costs);
        // 4 + 4 beats 5 + 1.
        assert_eq!(a.right_to_left(), &[Some(1), Some(0)]);
        assert!((a.total_cost() + 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        let costs = CostMatrix::from_rows(Vec::new()).unwrap();
        let a = KuhnMunkres.assign(&costs);
        assert_eq!(a.num_matched(), 0);
    }
}
