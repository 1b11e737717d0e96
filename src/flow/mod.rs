//! Network flow and load consolidation.
//!
//! - [`FlowNetwork`] — Residual graph with paired forward/reverse arcs
//! - [`max_flow`] — Edmonds-Karp
//! - [`min_cost_flow`] — Successive shortest paths with SPFA
//! - [`first_fit_decreasing`] — Bin packing into fixed-capacity containers
//!
//! [`solve_max_flow`] and [`solve_min_cost_flow`] build the network from an
//! edge list with arbitrary node IDs and report per-edge flows alongside the
//! totals.

mod bin_packing;
mod max_flow;
mod min_cost;
mod network;

pub use bin_packing::{first_fit_decreasing, Container, PackItem, Packing};
pub use max_flow::max_flow;
pub use min_cost::{min_cost_flow, FlowResult};
pub use network::{FlowEdge, FlowNetwork};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Totals plus the flow on each input edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSummary {
    pub flow: i64,
    pub cost: f64,
    /// Flow per edge, aligned with the input edge list.
    pub edge_flows: Vec<i64>,
}

/// Relabels node IDs to `0..k` so the network holds only the nodes in use.
fn compact(edges: &[FlowEdge], source: usize, sink: usize) -> (Vec<FlowEdge>, usize, usize) {
    let mut ids = BTreeMap::new();
    let mut intern = |id: usize| {
        let next = ids.len();
        *ids.entry(id).or_insert(next)
    };
    let dense = edges
        .iter()
        .map(|e| FlowEdge {
            from: intern(e.from),
            to: intern(e.to),
            ..*e
        })
        .collect();
    let source = intern(source);
    let sink = intern(sink);
    (dense, source, sink)
}

/// Maximum flow over an edge list. Edge costs are ignored.
///
/// # Errors
///
/// Fails if an edge has negative capacity.
pub fn solve_max_flow(edges: &[FlowEdge], source: usize, sink: usize) -> Result<FlowSummary> {
    let (dense, source, sink) = compact(edges, source, sink);
    let mut net = FlowNetwork::from_edges(&dense)?;
    let flow = max_flow(&mut net, source, sink);
    let edge_flows = net.edge_flows();
    let cost = edges
        .iter()
        .zip(&edge_flows)
        .map(|(e, &f)| e.cost * f as f64)
        .sum();
    Ok(FlowSummary {
        flow,
        cost,
        edge_flows,
    })
}

/// Minimum-cost flow of up to `target` units over an edge list.
///
/// # Errors
///
/// Fails if an edge has negative capacity.
pub fn solve_min_cost_flow(
    edges: &[FlowEdge],
    source: usize,
    sink: usize,
    target: Option<i64>,
) -> Result<FlowSummary> {
    let (dense, source, sink) = compact(edges, source, sink);
    let mut net = FlowNetwork::from_edges(&dense)?;
    let FlowResult { flow, cost } = min_cost_flow(&mut net, source, sink, target);
    Ok(FlowSummary {
        flow,
        cost,
        edge_flows: net.edge_flows(),
    })
}
