//! Read-only graph interface shared by the path enumerator and scorer

use crate::models::{AttackEdge, AttackNode};

/// Common interface for attack graph stores
pub trait GraphQuery: Send + Sync {
    /// Look up a node by id
    fn node(&self, id: &str) -> Option<&AttackNode>;

    /// Ids directly reachable from `id`, in edge insertion order
    fn neighbors(&self, id: &str) -> &[String];

    /// Outgoing edges of `id`, in insertion order
    fn outgoing(&self, id: &str) -> &[AttackEdge];

    /// First stored edge from `from` to `to`
    fn edge_between(&self, from: &str, to: &str) -> Option<&AttackEdge> {
        self.outgoing(from).iter().find(|e| e.to == to)
    }

    /// Every stored edge from `from` to `to`
    fn edges_between(&self, from: &str, to: &str) -> Vec<&AttackEdge> {
        self.outgoing(from).iter().filter(|e| e.to == to).collect()
    }

    fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }
}
