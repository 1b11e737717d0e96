//! Minimum-cost flow by successive shortest paths.
//!
//! # Algorithm
//!
//! Repeatedly finds the cheapest residual path from source to sink with
//! SPFA (queue-based Bellman-Ford, which tolerates the negative costs of
//! reverse arcs), then pushes the path's bottleneck, capped by the flow
//! still needed. Stops when the target is met or no path remains.
//!
//! # Complexity
//!
//! O(F · V · E) where F = flow value.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::FlowNetwork;

/// Relaxations must improve a label by more than this.
const RELAX_EPSILON: f64 = 1e-9;

/// Flow value and its total cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub flow: i64,
    pub cost: f64,
}

/// Sends up to `target` units (all the network can carry if `None`) from
/// `source` to `sink` at minimum total cost.
///
/// Returns the achieved flow, which is below the target only if the
/// network cannot carry more.
///
/// # Examples
///
/// ```
/// use u_logistics::flow::{min_cost_flow, FlowEdge, FlowNetwork};
///
/// let mut net = FlowNetwork::from_edges(&[
///     FlowEdge::new(0, 1, 5).with_cost(1.0),
///     FlowEdge::new(1, 3, 3).with_cost(1.0),
///     FlowEdge::new(0, 2, 5).with_cost(2.0),
///     FlowEdge::new(2, 3, 5).with_cost(1.0),
/// ]).unwrap();
///
/// let result = min_cost_flow(&mut net, 0, 3, Some(5));
/// assert_eq!(result.flow, 5);
/// assert!((result.cost - 12.0).abs() < 1e-9);
/// ```
pub fn min_cost_flow(
    net: &mut FlowNetwork,
    source: usize,
    sink: usize,
    target: Option<i64>,
) -> FlowResult {
    let mut result = FlowResult::default();
    if !net.is_valid_pair(source, sink) {
        return result;
    }
    let limit = target.unwrap_or(i64::MAX).max(0);

    while result.flow < limit {
        let Some(path) = cheapest_path(net, source, sink) else {
            break;
        };
        let Some(bottleneck) = path.iter().map(|&arc| net.arcs[arc].residual).min() else {
            break;
        };
        let amount = bottleneck.min(limit - result.flow);
        if amount <= 0 {
            break;
        }
        let unit_cost: f64 = path.iter().map(|&arc| net.arcs[arc].cost).sum();
        for &arc in &path {
            net.push(arc, amount);
        }
        result.flow += amount;
        result.cost += amount as f64 * unit_cost;
        trace!(amount, unit_cost, "cheapest path augmented");
    }

    if let Some(target) = target {
        if result.flow < target {
            debug!(target, achieved = result.flow, "flow target not reachable");
        }
    }
    debug!(
        nodes = net.num_nodes(),
        edges = net.num_edges(),
        flow = result.flow,
        cost = result.cost,
        "min-cost flow computed"
    );
    result
}

/// Arcs of the cheapest residual path, or `None` if the sink is
/// unreachable or a negative cycle makes costs unbounded.
fn cheapest_path(net: &FlowNetwork, source: usize, sink: usize) -> Option<Vec<usize>> {
    let n = net.num_nodes();
    let mut dist = vec![f64::INFINITY; n];
    let mut parent_arc: Vec<Option<usize>> = vec![None; n];
    let mut in_queue = vec![false; n];
    let mut enqueued = vec![0usize; n];

    dist[source] = 0.0;
    in_queue[source] = true;
    let mut queue = VecDeque::from([source]);

    while let Some(u) = queue.pop_front() {
        in_queue[u] = false;
        for &arc in &net.adjacency[u] {
            let a = &net.arcs[arc];
            if a.residual <= 0 {
                continue;
            }
            let candidate = dist[u] + a.cost;
            if candidate < dist[a.to] - RELAX_EPSILON {
                dist[a.to] = candidate;
                parent_arc[a.to] = Some(arc);
                if !in_queue[a.to] {
                    enqueued[a.to] += 1;
                    if enqueued[a.to] > n {
                        warn!(node = a.to, "negative-cost cycle in residual network");
                        return None;
                    }
                    in_queue[a.to] = true;
                    queue.push_back(a.to);
                }
            }
        }
    }

    if dist[sink].is_infinite() {
        return None;
    }
    let mut path = Vec::new();
    let mut node = sink;
    while let Some(arc) = parent_arc[node] {
        path.push(arc);
        node = net.tail(arc);
    }
    path.reverse();
    Some(path)
}
