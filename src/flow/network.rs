//! Residual flow network.

use serde::{Deserialize, Serialize};

use crate::error::{LogisticsError, Result};

/// A directed edge with integral capacity and per-unit cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub capacity: i64,
    #[serde(default)]
    pub cost: f64,
}

impl FlowEdge {
    /// Creates a zero-cost edge.
    pub fn new(from: usize, to: usize, capacity: i64) -> Self {
        Self {
            from,
            to,
            capacity,
            cost: 0.0,
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

/// One direction of a residual edge pair.
#[derive(Debug, Clone)]
pub(crate) struct Arc {
    pub(crate) to: usize,
    pub(crate) residual: i64,
    pub(crate) cost: f64,
}

/// Residual graph over nodes `0..n`.
///
/// Edge `k` is stored as forward arc `2k` and reverse arc `2k + 1`; the
/// reverse arc carries the negated cost and starts with zero residual
/// capacity, so pushing flow back along it cancels earlier flow.
///
/// # Examples
///
/// ```
/// use u_logistics::flow::{max_flow, FlowEdge, FlowNetwork};
///
/// let mut net = FlowNetwork::from_edges(&[
///     FlowEdge::new(0, 1, 3),
///     FlowEdge::new(1, 2, 2),
/// ]).unwrap();
/// assert_eq!(max_flow(&mut net, 0, 2), 2);
/// assert_eq!(net.edge_flows(), vec![2, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    pub(crate) arcs: Vec<Arc>,
    pub(crate) adjacency: Vec<Vec<usize>>,
    capacities: Vec<i64>,
}

impl FlowNetwork {
    /// Creates a network with `nodes` nodes and no edges.
    pub fn new(nodes: usize) -> Self {
        Self {
            arcs: Vec::new(),
            adjacency: vec![Vec::new(); nodes],
            capacities: Vec::new(),
        }
    }

    /// Builds a network sized to the largest node ID in `edges`.
    ///
    /// Node IDs are used directly as indices; sparse IDs should be
    /// compacted first (see [`solve_max_flow`](super::solve_max_flow)).
    ///
    /// # Errors
    ///
    /// [`LogisticsError::FlowNodeOutOfRange`] for a node ID of `usize::MAX`,
    /// [`LogisticsError::NegativeCapacity`] for an edge with capacity < 0.
    pub fn from_edges(edges: &[FlowEdge]) -> Result<Self> {
        let mut nodes = 0;
        for edge in edges {
            let highest = edge.from.max(edge.to);
            let count = highest
                .checked_add(1)
                .ok_or(LogisticsError::FlowNodeOutOfRange(highest))?;
            nodes = nodes.max(count);
        }
        let mut net = Self::new(nodes);
        for edge in edges {
            net.add_edge(*edge)?;
        }
        Ok(net)
    }

    /// Adds an edge and returns its index.
    ///
    /// # Errors
    ///
    /// [`LogisticsError::UnknownFlowNode`] if an endpoint is outside the
    /// network, [`LogisticsError::NegativeCapacity`] if the capacity is
    /// negative.
    pub fn add_edge(&mut self, edge: FlowEdge) -> Result<usize> {
        let nodes = self.num_nodes();
        for node in [edge.from, edge.to] {
            if node >= nodes {
                return Err(LogisticsError::UnknownFlowNode { node, nodes });
            }
        }
        if edge.capacity < 0 {
            return Err(LogisticsError::NegativeCapacity {
                from: edge.from,
                to: edge.to,
                capacity: edge.capacity,
            });
        }

        let index = self.capacities.len();
        self.adjacency[edge.from].push(self.arcs.len());
        self.arcs.push(Arc {
            to: edge.to,
            residual: edge.capacity,
            cost: edge.cost,
        });
        self.adjacency[edge.to].push(self.arcs.len());
        self.arcs.push(Arc {
            to: edge.from,
            residual: 0,
            cost: -edge.cost,
        });
        self.capacities.push(edge.capacity);
        Ok(index)
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn num_edges(&self) -> usize {
        self.capacities.len()
    }

    /// Flow currently on edge `index`, or `None` if there is no such edge.
    pub fn edge_flow(&self, index: usize) -> Option<i64> {
        self.arcs.get(2 * index + 1).map(|reverse| reverse.residual)
    }

    /// Flow on every edge, in insertion order.
    pub fn edge_flows(&self) -> Vec<i64> {
        self.arcs.iter().skip(1).step_by(2).map(|a| a.residual).collect()
    }

    /// Removes all flow, restoring the original capacities.
    pub fn reset(&mut self) {
        for (k, &capacity) in self.capacities.iter().enumerate() {
            self.arcs[2 * k].residual = capacity;
            self.arcs[2 * k + 1].residual = 0;
        }
    }

    /// The node an arc starts from.
    pub(crate) fn tail(&self, arc: usize) -> usize {
        self.arcs[arc ^ 1].to
    }

    /// Pushes `amount` along `arc` and takes it from the paired arc.
    pub(crate) fn push(&mut self, arc: usize, amount: i64) {
        self.arcs[arc].residual -= amount;
        self.arcs[arc ^ 1].residual += amount;
    }

    /// `true` if both endpoints exist and differ.
    pub(crate) fn is_valid_pair(&self, source: usize, sink: usize) -> bool {
        source != sink && source < self.num_nodes() && sink < self.num_nodes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_node_rejected() {
        let mut net = FlowNetwork::new(2);
        let err = net.add_edge(FlowEdge::new(0, 5, 1)).unwrap_err();
        assert!(matches!(err, LogisticsError::UnknownFlowNode { node: 5, nodes: 2 }));
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let err = FlowNetwork::from_edges(&[FlowEdge::new(0, 1, -3)]).unwrap_err();
        assert!(matches!(err, LogisticsError::NegativeCapacity { capacity: -3, .. }));
    }

    #[test]
    fn test_max_node_id_rejected() {
        let err = FlowNetwork::from_edges(&[FlowEdge::new(0, usize::MAX, 1)]).unwrap_err();
        assert!(matches!(err, LogisticsError::FlowNodeOutOfRange(usize::MAX)));
    }

    #[test]
    fn test_from_edges_sizes_network() {
        let net = FlowNetwork::from_edges(&[FlowEdge::new(0, 4, 1), FlowEdge::new(2, 1, 1)]).unwrap();
        assert_eq!(net.num_nodes(), 5);
        assert_eq!(net.num_edges(), 2);
        assert_eq!(net.edge_flows(), vec![0, 0]);
        assert_eq!(net.edge_flow(2), None);
    }

    #[test]
    fn test_push_and_reset() {
        let mut net = FlowNetwork::from_edges(&[FlowEdge::new(0, 1, 4)]).unwrap();
        net.push(0, 3);
        assert_eq!(net.edge_flow(0), Some(3));
        assert_eq!(net.tail(0), 0);
        assert_eq!(net.tail(1), 1);
        net.reset();
        assert_eq!(net.edge_flow(0), Some(0));
    }
}
