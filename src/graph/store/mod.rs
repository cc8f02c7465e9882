//! In-memory attack graph store
//!
//! Owns the nodes and directed edges of one analysis session. Insertion is
//! permissive: duplicate node ids overwrite, and edges are stored even when
//! an endpoint was never added. Such dangling edges are inert during
//! traversal. Strict checks belong to the sources that build the graph.

use indexmap::IndexMap;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

use super::traits::GraphQuery;
use crate::models::{AttackEdge, AttackNode, Category};

/// Attack graph for a single analysis
#[derive(Debug, Clone, Default)]
pub struct AttackGraph {
    /// Node lookup by id, in insertion order
    nodes: IndexMap<String, AttackNode>,
    /// Outgoing edges keyed by `from`
    edges: IndexMap<String, Vec<AttackEdge>>,
    /// Derived adjacency: id -> reachable ids, parallel to `edges`
    adjacency: IndexMap<String, Vec<String>>,
}

/// Summary counts for reporting
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub dangling_edges: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl AttackGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from node and edge lists in one go
    pub fn from_parts(
        nodes: impl IntoIterator<Item = AttackNode>,
        edges: impl IntoIterator<Item = AttackEdge>,
    ) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    // ==================== Mutation ====================

    /// Add or replace a node. Last write wins on duplicate ids.
    pub fn add_node(&mut self, node: AttackNode) {
        self.adjacency.entry(node.id.clone()).or_default();
        self.nodes.insert(node.id.clone(), node);
    }

    /// Append an edge to its source's edge and adjacency lists
    pub fn add_edge(&mut self, edge: AttackEdge) {
        self.adjacency
            .entry(edge.from.clone())
            .or_default()
            .push(edge.to.clone());
        self.edges.entry(edge.from.clone()).or_default().push(edge);
    }

    // ==================== Queries ====================

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &AttackNode> {
        self.nodes.values()
    }

    /// All stored edges, grouped by source in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &AttackEdge> {
        self.edges.values().flatten()
    }

    /// Ids of every node in `category`, sorted lexically
    pub fn nodes_by_category(&self, category: Category) -> Vec<String> {
        let mut ids: Vec<String> = self
            .nodes
            .values()
            .filter(|n| n.category == category)
            .map(|n| n.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Edges with an endpoint that is not a node of this graph
    pub fn dangling_edges(&self) -> Vec<&AttackEdge> {
        self.edges()
            .filter(|e| !self.nodes.contains_key(&e.from) || !self.nodes.contains_key(&e.to))
            .collect()
    }

    /// Node sets that form cycles: SCCs with more than one node, or a self-loop.
    ///
    /// Each cycle is sorted by id, and the list is sorted for stable output.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut index: FxHashMap<&str, NodeIndex> = FxHashMap::default();

        for id in self.nodes.keys() {
            index.insert(id.as_str(), graph.add_node(id.as_str()));
        }
        for edge in self.edges() {
            if let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str())) {
                graph.add_edge(a, b, ());
            }
        }

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut ids: Vec<String> = scc.iter().map(|&i| graph[i].to_string()).collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }

    pub fn stats(&self) -> GraphStats {
        let mut by_category = BTreeMap::new();
        for node in self.nodes.values() {
            *by_category.entry(node.category).or_insert(0) += 1;
        }
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            dangling_edges: self.dangling_edges().len(),
            by_category,
        }
    }
}

impl GraphQuery for AttackGraph {
    fn node(&self, id: &str) -> Option<&AttackNode> {
        self.nodes.get(id)
    }

    fn neighbors(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn outgoing(&self, id: &str) -> &[AttackEdge] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
