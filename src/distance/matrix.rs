//! Dense distance matrix.

use crate::geo::Metric;
use crate::models::Point;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built either from point coordinates under a [`Metric`] or from explicit
/// data such as road-network distances supplied by the caller.
///
/// # Examples
///
/// ```
/// use u_logistics::models::Point;
/// use u_logistics::geo::Euclidean;
/// use u_logistics::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 4.0, 3.0),
///     Point::new(2, 8.0, 6.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, &Euclidean);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes all pairwise distances between `points` under `metric`.
    ///
    /// Row/column `k` corresponds to `points[k]`.
    pub fn from_points<M: Metric + ?Sized>(points: &[Point], metric: &M) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = metric.distance(&points[i], &points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }

    /// Length of the closed tour `depot → tour[0] → … → tour[n-1] → depot`.
    pub fn tour_length(&self, tour: &[usize], depot: usize) -> f64 {
        let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
            return 0.0;
        };
        let inner: f64 = tour.windows(2).map(|w| self.get(w[0], w[1])).sum();
        self.get(depot, first) + inner + self.get(last, depot)
    }
}
