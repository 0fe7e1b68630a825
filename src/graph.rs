//! Link graph model and index adapters.
//!
//! [`LinkGraph`] is the validated, string-keyed graph handed to both estimators.
//! Internally nodes are numbered `0..n` in lexicographic id order and the
//! algorithms run against the index-based [`GraphRef`] view.

use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// A graph view that can return **borrowed** neighbor slices.
///
/// Avoids allocating a new `Vec` on every step of a random walk.
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn neighbors_ref(&self, node: usize) -> &[usize];
    fn out_degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

/// Directed link graph: node id -> set of linked node ids.
///
/// Every link target is itself a node. Nodes with no outbound links are sinks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkGraph {
    names: Vec<String>,
    links: Vec<Vec<usize>>,
}

impl LinkGraph {
    /// Build a graph, rejecting any link whose target is not a node.
    ///
    /// Repeated keys are merged.
    pub fn new<I, K, V, T>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let raw = collect_pages(pages);
        for (from, targets) in &raw {
            if let Some(to) = targets.iter().find(|t| !raw.contains_key(*t)) {
                return Err(Error::DanglingLink {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
        Ok(Self::from_checked(raw))
    }

    /// Build a graph, silently dropping links whose target is not a node.
    pub fn from_links_lossy<I, K, V, T>(pages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut raw = collect_pages(pages);
        let keys: BTreeSet<String> = raw.keys().cloned().collect();
        for targets in raw.values_mut() {
            targets.retain(|t| keys.contains(t));
        }
        Self::from_checked(raw)
    }

    fn from_checked(raw: BTreeMap<String, BTreeSet<String>>) -> Self {
        let names: Vec<String> = raw.keys().cloned().collect();
        // Both `names` and each target set are sorted, so target indices come out sorted.
        let links = raw
            .values()
            .map(|targets| {
                targets
                    .iter()
                    .filter_map(|t| names.binary_search(t).ok())
                    .collect()
            })
            .collect();
        Self { names, links }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }

    /// Node ids in index order (lexicographic).
    pub fn node_names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, node: &str) -> bool {
        self.node_index(node).is_some()
    }

    pub fn node_index(&self, node: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(node)).ok()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Outbound links of `node`, or `None` if it is not in the graph.
    pub fn links(&self, node: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.node_index(node)?;
        Some(self.links[idx].iter().map(|&t| self.names[t].as_str()))
    }

    pub fn is_sink(&self, node: &str) -> Option<bool> {
        self.node_index(node).map(|idx| self.links[idx].is_empty())
    }

    pub fn sinks(&self) -> impl Iterator<Item = &str> + '_ {
        self.names
            .iter()
            .zip(&self.links)
            .filter(|(_, out)| out.is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// A new graph in which every sink links to every node, itself included.
    ///
    /// `self` is left untouched.
    pub fn normalized(&self) -> LinkGraph {
        let n = self.len();
        let links = self
            .links
            .iter()
            .map(|out| {
                if out.is_empty() {
                    (0..n).collect()
                } else {
                    out.clone()
                }
            })
            .collect();
        LinkGraph {
            names: self.names.clone(),
            links,
        }
    }

    pub fn to_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.names
            .iter()
            .zip(&self.links)
            .map(|(name, out)| {
                let targets = out.iter().map(|&t| self.names[t].clone()).collect();
                (name.clone(), targets)
            })
            .collect()
    }
}

impl GraphRef for LinkGraph {
    fn node_count(&self) -> usize {
        self.names.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.links.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn collect_pages<I, K, V, T>(pages: I) -> BTreeMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (page, targets) in pages {
        raw.entry(page.into())
            .or_default()
            .extend(targets.into_iter().map(Into::into));
    }
    raw
}

#[cfg(feature = "petgraph")]
impl LinkGraph {
    /// Convert a directed `petgraph` graph whose node weights are document ids.
    ///
    /// Nodes sharing an id are merged; parallel edges collapse to one link.
    pub fn from_petgraph<E, Ix>(graph: &petgraph::Graph<String, E, petgraph::Directed, Ix>) -> Self
    where
        Ix: petgraph::graph::IndexType,
    {
        use petgraph::visit::EdgeRef;

        let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for idx in graph.node_indices() {
            raw.entry(graph[idx].clone()).or_default();
        }
        for edge in graph.edge_references() {
            raw.entry(graph[edge.source()].clone())
                .or_default()
                .insert(graph[edge.target()].clone());
        }
        Self::from_checked(raw)
    }
}
