//! Rank vectors returned by both estimators.

use crate::graph::LinkGraph;
use crate::topk::top_k;
use std::collections::BTreeMap;

/// Per-node PageRank estimate, keyed by node id.
///
/// Keys are exactly the node set of the graph it was computed on, and values sum to 1
/// up to floating-point drift.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RankVector {
    scores: BTreeMap<String, f64>,
}

impl RankVector {
    /// `scores[i]` belongs to the graph's node with index `i`.
    pub(crate) fn from_scores(graph: &LinkGraph, scores: &[f64]) -> Self {
        debug_assert_eq!(graph.len(), scores.len());
        let scores = graph
            .node_names()
            .iter()
            .cloned()
            .zip(scores.iter().copied())
            .collect();
        Self { scores }
    }

    pub fn get(&self, node: &str) -> Option<f64> {
        self.scores.get(node).copied()
    }

    /// `(node, rank)` pairs in node-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.scores.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.scores.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.scores.values().sum()
    }

    /// The `k` highest-ranked nodes, highest first; ties keep node-id order.
    pub fn top_k(&self, k: usize) -> Vec<(&str, f64)> {
        let names: Vec<&str> = self.nodes().collect();
        let values: Vec<f64> = self.scores.values().copied().collect();
        top_k(&values, k)
            .into_iter()
            .map(|(i, score)| (names[i], score))
            .collect()
    }

    /// Largest absolute per-node difference, or `None` if the node sets differ.
    pub fn max_abs_diff(&self, other: &RankVector) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        self.scores
            .iter()
            .zip(&other.scores)
            .try_fold(0.0f64, |acc, ((a, x), (b, y))| {
                (a == b).then(|| acc.max((x - y).abs()))
            })
    }

    pub fn into_map(self) -> BTreeMap<String, f64> {
        self.scores
    }
}

impl<'a> IntoIterator for &'a RankVector {
    type Item = (&'a str, f64);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, f64)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(pairs: &[(&str, f64)]) -> RankVector {
        let graph = LinkGraph::new(pairs.iter().map(|(n, _)| (*n, Vec::<&str>::new()))).unwrap();
        let scores: Vec<f64> = pairs.iter().map(|(_, s)| *s).collect();
        RankVector::from_scores(&graph, &scores)
    }

    #[test]
    fn top_k_orders_by_rank_then_name() {
        let r = ranks(&[("a", 0.2), ("b", 0.4), ("c", 0.2), ("d", 0.2)]);
        assert_eq!(r.top_k(3), vec![("b", 0.4), ("a", 0.2), ("c", 0.2)]);
        assert!((r.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn max_abs_diff_requires_same_nodes() {
        let a = ranks(&[("a", 0.5), ("b", 0.5)]);
        let b = ranks(&[("a", 0.4), ("b", 0.6)]);
        let c = ranks(&[("a", 0.5), ("c", 0.5)]);
        assert!((a.max_abs_diff(&b).unwrap() - 0.1).abs() < 1e-12);
        assert_eq!(a.max_abs_diff(&c), None);
    }
}
