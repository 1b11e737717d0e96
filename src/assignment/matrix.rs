//! Rectangular cost matrix between a left and a right set.

use crate::error::{LogisticsError, Result};
use crate::geo::Metric;
use crate::models::Point;

/// Dense `rows × cols` cost matrix, row-major.
///
/// Row `i` is left node `i` (e.g. a courier), column `j` is right node `j`
/// (e.g. an order). `f64::INFINITY` marks a forbidden pair that is never
/// matched.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Builds a matrix from cost rows.
    ///
    /// NaN entries are treated as forbidden.
    ///
    /// # Errors
    ///
    /// [`LogisticsError::RaggedMatrix`] if a row's width differs from the
    /// first row's.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::collect(rows, |c| if c.is_nan() { f64::INFINITY } else { c })
    }

    /// Builds a matrix from a weight (benefit) matrix.
    ///
    /// A positive weight `w` becomes cost `-w`, so maximizing weight means
    /// minimizing cost. Non-positive weights mark missing pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_logistics::assignment::CostMatrix;
    ///
    /// let m = CostMatrix::from_weights(vec![vec![3.0, 0.0]]).unwrap();
    /// assert_eq!(m.get(0, 0), -3.0);
    /// assert!(m.is_forbidden(0, 1));
    /// ```
    pub fn from_weights(weights: Vec<Vec<f64>>) -> Result<Self> {
        Self::collect(weights, |w| if w > 0.0 { -w } else { f64::INFINITY })
    }

    /// Distance from every left point to every right point under `metric`.
    pub fn from_points<M: Metric + ?Sized>(left: &[Point], right: &[Point], metric: &M) -> Self {
        let data = left
            .iter()
            .flat_map(|l| right.iter().map(move |r| metric.distance(l, r)))
            .collect();
        Self {
            rows: left.len(),
            cols: right.len(),
            data,
        }
    }

    fn collect(rows: Vec<Vec<f64>>, map: impl Fn(f64) -> f64) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n_cols {
                return Err(LogisticsError::RaggedMatrix {
                    row,
                    expected: n_cols,
                    found: values.len(),
                });
            }
            data.extend(values.into_iter().map(&map));
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Cost of pairing left `row` with right `col`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// `true` if the pair may never be matched.
    pub fn is_forbidden(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == f64::INFINITY
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}
