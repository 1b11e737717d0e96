//! Dijkstra and A* search.
//!
//! # Algorithm
//!
//! Both searches pop the frontier node with the lowest key, relax its
//! outgoing edges, and stop as soon as the target is popped. Dijkstra keys
//! nodes by their tentative distance `g`; A* keys them by `g + h`, where `h`
//! is the metric distance from the node to the target. Stale queue entries
//! (pushed before a cheaper path was found) are skipped on pop, so an
//! admissible but inconsistent heuristic still yields shortest paths.
//!
//! # Complexity
//!
//! O((V + E) log V) with the binary heap.
//!
//! # Reference
//!
//! Hart, P.E., Nilsson, N.J. & Raphael, B. (1968). "A Formal Basis for the
//! Heuristic Determination of Minimum Cost Paths", *IEEE Transactions on
//! Systems Science and Cybernetics* 4(2), 100-107.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::MinQueue;
use crate::geo::{Haversine, Metric};
use crate::models::Graph;

/// Search algorithm for [`shortest_path`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Dijkstra,
    AStar,
}

/// Result of a shortest-path query.
///
/// An unreachable target is reported with an empty path and an infinite
/// distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// Node IDs from start to end, inclusive.
    pub path: Vec<usize>,
    /// Sum of edge weights along the path.
    pub distance: f64,
    /// Number of nodes settled before the search stopped.
    pub explored: usize,
}

impl ShortestPath {
    fn unreachable(explored: usize) -> Self {
        Self {
            path: Vec::new(),
            distance: f64::INFINITY,
            explored,
        }
    }

    /// Returns `true` if a path was found.
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Runs the selected search, using haversine distance as the A* heuristic.
///
/// # Examples
///
/// ```
/// use u_logistics::models::{Graph, Point};
/// use u_logistics::pathfinding::{shortest_path, SearchMode};
///
/// let mut g = Graph::new();
/// for (id, lat) in [(1, 0.0), (2, 0.01), (3, 0.02)] {
///     g.add_node(Point::new(id, lat, 0.0));
/// }
/// g.add_undirected_edge(1, 2, 1200.0).unwrap();
/// g.add_undirected_edge(2, 3, 1200.0).unwrap();
/// g.add_undirected_edge(1, 3, 5000.0).unwrap();
///
/// let result = shortest_path(&g, 1, 3, SearchMode::AStar);
/// assert_eq!(result.path, vec![1, 2, 3]);
/// assert_eq!(result.distance, 2400.0);
///
/// let none = shortest_path(&g, 1, 99, SearchMode::Dijkstra);
/// assert!(!none.is_reachable());
/// ```
pub fn shortest_path(graph: &Graph, start: usize, end: usize, mode: SearchMode) -> ShortestPath {
    match mode {
        SearchMode::Dijkstra => dijkstra(graph, start, end),
        SearchMode::AStar => a_star(graph, start, end, &Haversine),
    }
}

/// Dijkstra's algorithm from `start` to `end`.
pub fn dijkstra(graph: &Graph, start: usize, end: usize) -> ShortestPath {
    search(graph, start, end, |_| 0.0)
}

/// A* from `start` to `end`, guided by `metric` distance to the target.
///
/// Nodes without coordinates (edge endpoints never added with
/// [`Graph::add_node`]) get a zero heuristic. With an admissible metric the
/// result equals Dijkstra's; the search typically settles fewer nodes.
pub fn a_star<M: Metric + ?Sized>(graph: &Graph, start: usize, end: usize, metric: &M) -> ShortestPath {
    let target = graph.node(end);
    search(graph, start, end, |id| match (graph.node(id), target) {
        (Some(p), Some(t)) => metric.distance(p, t),
        _ => 0.0,
    })
}

fn search<H>(graph: &Graph, start: usize, end: usize, heuristic: H) -> ShortestPath
where
    H: Fn(usize) -> f64,
{
    if !graph.contains(start) || !graph.contains(end) {
        return ShortestPath::unreachable(0);
    }

    let mut g_score: HashMap<usize, f64> = HashMap::new();
    let mut came_from: HashMap<usize, usize> = HashMap::new();
    let mut open = MinQueue::new();
    let mut explored = 0;

    g_score.insert(start, 0.0);
    open.push((start, 0.0), heuristic(start));

    while let Some(((node, g), _)) = open.pop() {
        if g > g_score.get(&node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }
        explored += 1;

        if node == end {
            let path = reconstruct(&came_from, start, end);
            debug!(start, end, distance = g, explored, hops = path.len(), "shortest path found");
            return ShortestPath {
                path,
                distance: g,
                explored,
            };
        }

        for (next, weight) in graph.neighbors(node) {
            let tentative = g + weight;
            if tentative < g_score.get(&next).copied().unwrap_or(f64::INFINITY) {
                g_score.insert(next, tentative);
                came_from.insert(next, node);
                open.push((next, tentative), tentative + heuristic(next));
            }
        }
    }

    debug!(start, end, explored, "target unreachable");
    ShortestPath::unreachable(explored)
}

fn reconstruct(came_from: &HashMap<usize, usize>, start: usize, end: usize) -> Vec<usize> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
