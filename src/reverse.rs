//! Reverse-link index over the sink-normalized graph.
//!
//! Sinks are treated as linking to every node (themselves included) before the
//! index is built, so every node has out-degree >= 1 and no rank mass is lost.

use crate::graph::{GraphRef, LinkGraph};
use std::collections::{BTreeMap, BTreeSet};

/// "Who links to me", derived from a [`LinkGraph`] after sink normalization.
#[derive(Debug, Clone)]
pub struct ReverseIndex {
    names: Vec<String>,
    incoming: Vec<Vec<usize>>,
    out_degrees: Vec<usize>,
}

impl ReverseIndex {
    /// Normalize sinks on a copy of `graph` and index its incoming links.
    pub fn build(graph: &LinkGraph) -> Self {
        let normalized = graph.normalized();
        let (incoming, out_degrees) = reverse_links(&normalized);
        Self {
            names: graph.node_names().to_vec(),
            incoming,
            out_degrees,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn index_of(&self, node: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(node)).ok()
    }

    /// Nodes linking to `node` in the normalized graph, in node-id order.
    pub fn origins(&self, node: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.index_of(node)?;
        Some(self.incoming[idx].iter().map(|&o| self.names[o].as_str()))
    }

    /// Out-degree of `node` in the normalized graph.
    pub fn out_degree(&self, node: &str) -> Option<usize> {
        self.index_of(node).map(|idx| self.out_degrees[idx])
    }

    pub fn to_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.names
            .iter()
            .zip(&self.incoming)
            .map(|(name, origins)| {
                let origins = origins.iter().map(|&o| self.names[o].clone()).collect();
                (name.clone(), origins)
            })
            .collect()
    }

    pub(crate) fn name_at(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub(crate) fn incoming_at(&self, idx: usize) -> &[usize] {
        &self.incoming[idx]
    }

    pub(crate) fn out_degree_at(&self, idx: usize) -> usize {
        self.out_degrees[idx]
    }
}

/// Incoming adjacency lists and out-degrees of `graph`.
///
/// Origins are pushed in increasing node order, so each incoming list is sorted.
fn reverse_links<G: GraphRef>(graph: &G) -> (Vec<Vec<usize>>, Vec<usize>) {
    let n = graph.node_count();
    let mut rev: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut out_degrees = vec![0usize; n];
    for u in 0..n {
        let out = graph.neighbors_ref(u);
        out_degrees[u] = out.len();
        for &v in out {
            rev[v].push(u);
        }
    }
    (rev, out_degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_is_an_origin_of_every_node() {
        let g = LinkGraph::new([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec![])]).unwrap();
        let idx = ReverseIndex::build(&g);
        for node in ["a", "b", "c"] {
            let origins: Vec<&str> = idx.origins(node).unwrap().collect();
            assert!(origins.contains(&"c"), "{node} should list sink c as origin");
        }
        assert_eq!(idx.out_degree("c"), Some(3));
        assert_eq!(idx.out_degree("a"), Some(1));
        // The caller's graph still sees c as a sink.
        assert_eq!(g.is_sink("c"), Some(true));
    }

    #[test]
    fn reverses_plain_links() {
        let g = LinkGraph::new([("a", vec!["b", "c"]), ("b", vec!["c"]), ("c", vec!["a"])]).unwrap();
        let idx = ReverseIndex::build(&g);
        let m = idx.to_map();
        assert_eq!(m["a"], BTreeSet::from(["c".to_string()]));
        assert_eq!(m["b"], BTreeSet::from(["a".to_string()]));
        assert_eq!(m["c"], BTreeSet::from(["a".to_string(), "b".to_string()]));
        assert!(idx.origins("zzz").is_none());
    }
}
