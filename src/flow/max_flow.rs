//! Maximum flow by Edmonds-Karp.
//!
//! # Algorithm
//!
//! Breadth-first search finds a shortest augmenting path in the residual
//! graph; the path's bottleneck is pushed along it, updating forward and
//! reverse residuals. Repeats until the sink is unreachable.
//!
//! # Complexity
//!
//! O(V · E²).
//!
//! # Reference
//!
//! Edmonds, J. & Karp, R.M. (1972). "Theoretical improvements in algorithmic
//! efficiency for network flow problems", *Journal of the ACM* 19(2), 248-264.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::FlowNetwork;

/// Pushes a maximum flow from `source` to `sink` and returns its value.
///
/// Flow already present in the network is kept and extended. Returns 0 if
/// `source == sink` or either node is outside the network.
pub fn max_flow(net: &mut FlowNetwork, source: usize, sink: usize) -> i64 {
    if !net.is_valid_pair(source, sink) {
        return 0;
    }

    let mut total = 0;
    let mut augmentations = 0;
    while let Some(path) = bfs_path(net, source, sink) {
        let bottleneck = path
            .iter()
            .map(|&arc| net.arcs[arc].residual)
            .min()
            .unwrap_or(0);
        if bottleneck <= 0 {
            break;
        }
        for &arc in &path {
            net.push(arc, bottleneck);
        }
        total += bottleneck;
        augmentations += 1;
        trace!(bottleneck, hops = path.len(), "augmenting path");
    }

    debug!(
        nodes = net.num_nodes(),
        edges = net.num_edges(),
        augmentations,
        flow = total,
        "max flow computed"
    );
    total
}

/// Arcs of a shortest residual path, source to sink.
fn bfs_path(net: &FlowNetwork, source: usize, sink: usize) -> Option<Vec<usize>> {
    let mut parent_arc: Vec<Option<usize>> = vec![None; net.num_nodes()];
    let mut seen = vec![false; net.num_nodes()];
    seen[source] = true;
    let mut queue = VecDeque::from([source]);

    while let Some(u) = queue.pop_front() {
        if u == sink {
            break;
        }
        for &arc in &net.adjacency[u] {
            let a = &net.arcs[arc];
            if a.residual > 0 && !seen[a.to] {
                seen[a.to] = true;
                parent_arc[a.to] = Some(arc);
                queue.push_back(a.to);
            }
        }
    }

    if !seen[sink] {
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
