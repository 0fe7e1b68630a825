//! Transition model of the random surfer.
//!
//! With probability `d` the surfer follows one of the current page's links
//! uniformly at random; with probability `1 - d` it jumps to any page uniformly.
//! A sink behaves as if it linked to every page.

use crate::graph::{GraphRef, LinkGraph};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Next-step distribution from `node`, over every node of `graph`.
pub fn transition_model(
    graph: &LinkGraph,
    node: &str,
    damping: f64,
) -> Result<BTreeMap<String, f64>> {
    validate_damping(damping)?;
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }
    let idx = graph
        .node_index(node)
        .ok_or_else(|| Error::UnknownNode(node.to_string()))?;

    let mut probs = Vec::with_capacity(graph.len());
    transition_probs_into(graph, idx, damping, &mut probs);
    Ok(graph.node_names().iter().cloned().zip(probs).collect())
}

/// Index-based transition row for `node`, written into `out` (resized to `node_count`).
///
/// Callers validate `damping` and non-emptiness.
pub(crate) fn transition_probs_into<G: GraphRef>(
    graph: &G,
    node: usize,
    damping: f64,
    out: &mut Vec<f64>,
) {
    let n = graph.node_count();
    let n_f64 = n as f64;
    let teleport = (1.0 - damping) / n_f64;
    let links = graph.neighbors_ref(node);

    out.clear();
    if links.is_empty() {
        out.resize(n, teleport + damping / n_f64);
        return;
    }
    out.resize(n, teleport);
    let share = damping / links.len() as f64;
    for &v in links {
        out[v] += share;
    }
}

pub(crate) fn validate_damping(damping: f64) -> Result<()> {
    // Written to reject NaN as well.
    if !(damping > 0.0 && damping < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "damping must be in (0, 1) (got {damping})"
        )));
    }
    Ok(())
}
