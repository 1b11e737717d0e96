//! Priority-weighted nearest-neighbor tour construction.
//!
//! Starting from the depot, repeatedly moves to the unvisited location that
//! minimizes `distance / priority`, where priority is clamped to at least 1.
//! With uniform priorities this is the plain nearest-neighbor heuristic.
//!
//! # Complexity
//!
//! O(n²) where n = number of stops.

use crate::distance::DistanceMatrix;
use crate::models::Point;

/// Builds a tour over `locations[1..]` starting from the depot at index 0.
///
/// Returns location indices in visiting order (depot excluded). Ties are
/// broken by the lower index.
///
/// # Examples
///
/// ```
/// use u_logistics::models::Point;
/// use u_logistics::geo::Euclidean;
/// use u_logistics::distance::DistanceMatrix;
/// use u_logistics::sequencing::nearest_neighbor_tour;
///
/// let locations = vec![
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 0.0, 10.0),
///     Point::new(2, 0.0, 1.0),
///     Point::new(3, 0.0, 8.0).with_priority(10.0),
/// ];
/// let dm = DistanceMatrix::from_points(&locations, &Euclidean);
///
/// // Stop 3 is 8 away but priority 10 makes its score 0.8 < 1.0.
/// assert_eq!(nearest_neighbor_tour(&locations, &dm), vec![3, 1, 2]);
/// ```
pub fn nearest_neighbor_tour(locations: &[Point], distances: &DistanceMatrix) -> Vec<usize> {
    let n = locations.len();
    if n <= 1 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    visited[0] = true;
    let mut tour = Vec::with_capacity(n - 1);
    let mut current = 0;

    while tour.len() < n - 1 {
        let mut best: Option<(usize, f64)> = None;
        for i in 1..n {
            if visited[i] {
                continue;
            }
            let score = distances.get(current, i) / locations[i].effective_priority();
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((i, score));
            }
        }

        match best {
            Some((next, _)) => {
                visited[next] = true;
                tour.push(next);
                current = next;
            }
            None => break,
        }
    }

    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Euclidean;

    fn line() -> Vec<Point> {
        vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 0.0, 3.0),
            Point::new(2, 0.0, 1.0),
            Point::new(3, 0.0, 2.0),
        ]
    }

    #[test]
    fn test_nn_line_order() {
        let locations = line();
        let dm = DistanceMatrix::from_points(&locations, &Euclidean);
        assert_eq!(nearest_neighbor_tour(&locations, &dm), vec![2, 3, 1]);
    }

    #[test]
    fn test_nn_empty_and_depot_only() {
        let dm = DistanceMatrix::new(0);
        assert!(nearest_neighbor_tour(&[], &dm).is_empty());
        let depot = vec![Point::new(0, 0.0, 0.0)];
        let dm = DistanceMatrix::from_points(&depot, &Euclidean);
        assert!(nearest_neighbor_tour(&depot, &dm).is_empty());
    }

    #[test]
    fn test_nn_visits_all_once() {
        let locations: Vec<Point> = (0..12)
            .map(|i| Point::new(i, (i * 7 % 5) as f64, (i * 3 % 11) as f64))
            .collect();
        let dm = DistanceMatrix::from_points(&locations, &Euclidean);
        let mut tour = nearest_neighbor_tour(&locations, &dm);
        tour.sort_unstable();
        assert_eq!(tour, (1..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_low_priority_clamped() {
        // Priority below 1 scores as 1, so the nearer stop still wins.
        let locations = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 0.0, 1.5).with_priority(0.5),
            Point::new(2, 0.0, -2.0),
        ];
        let dm = DistanceMatrix::from_points(&locations, &Euclidean);
        assert_eq!(nearest_neighbor_tour(&locations, &dm), vec![1, 2]);
    }

    #[test]
    fn test_tie_prefers_lower_index() {
        let locations = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 1.0, 0.0),
            Point::new(2, 0.0, 1.0),
        ];
        let dm = DistanceMatrix::from_points(&locations, &Euclidean);
        assert_eq!(nearest_neighbor_tour(&locations, &dm)[0], 1);
    }
}
