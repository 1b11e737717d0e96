//! Sparse weighted graph over points.

use std::collections::HashMap;

use super::Point;
use crate::error::{LogisticsError, Result};
use crate::geo::Metric;

/// A directed graph stored as a map of adjacency maps.
///
/// Nodes carry coordinates so that A* can compute its heuristic. Edge
/// weights must be finite and non-negative.
///
/// # Examples
///
/// ```
/// use u_logistics::models::{Graph, Point};
///
/// let mut g = Graph::new();
/// g.add_node(Point::new(1, 0.0, 0.0));
/// g.add_node(Point::new(2, 0.0, 1.0));
/// g.add_undirected_edge(1, 2, 120.0).unwrap();
/// assert_eq!(g.weight(2, 1), Some(120.0));
/// assert!(g.add_edge(1, 2, -1.0).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<usize, Point>,
    edges: HashMap<usize, HashMap<usize, f64>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a node, keyed by its point ID.
    pub fn add_node(&mut self, point: Point) {
        self.nodes.insert(point.id(), point);
    }

    /// Adds (or overwrites) a directed edge.
    ///
    /// # Errors
    ///
    /// Returns [`LogisticsError::InvalidWeight`] for negative or non-finite
    /// weights.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(LogisticsError::InvalidWeight { from, to, weight });
        }
        self.edges.entry(from).or_default().insert(to, weight);
        self.edges.entry(to).or_default();
        Ok(())
    }

    /// Adds the edge in both directions.
    pub fn add_undirected_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<()> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Adds an undirected edge weighted by the metric distance between two
    /// existing nodes. Returns `false` if either node is missing.
    pub fn connect_by_metric<M: Metric + ?Sized>(&mut self, a: usize, b: usize, metric: &M) -> bool {
        let weight = match (self.nodes.get(&a), self.nodes.get(&b)) {
            (Some(pa), Some(pb)) => metric.distance(pa, pb),
            _ => return false,
        };
        self.edges.entry(a).or_default().insert(b, weight);
        self.edges.entry(b).or_default().insert(a, weight);
        true
    }

    pub fn node(&self, id: usize) -> Option<&Point> {
        self.nodes.get(&id)
    }

    /// Returns `true` if the ID is a node or appears as an edge endpoint.
    pub fn contains(&self, id: usize) -> bool {
        self.nodes.contains_key(&id) || self.edges.contains_key(&id)
    }

    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        self.edges.get(&from).and_then(|adj| adj.get(&to)).copied()
    }

    /// Outgoing edges of `id` as `(neighbor, weight)`.
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.edges
            .get(&id)
            .into_iter()
            .flat_map(|adj| adj.iter().map(|(&to, &w)| (to, w)))
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.values().map(|adj| adj.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
