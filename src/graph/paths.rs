//! Exhaustive simple-path enumeration
//!
//! Depth-first search with backtracking. The visited set tracks only the
//! current path, so a node may appear in many results but never twice in
//! one. Path length is bounded by the node count, which guarantees
//! termination on cyclic graphs. Worst case is exponential in dense graphs;
//! nothing is pruned or memoized because every path must be reported.

use rustc_hash::FxHashSet;

use super::traits::GraphQuery;

/// Every simple path from `start` to `end`, in depth-first order.
///
/// Returns `[[start]]` when `start == end`, and nothing when either id is
/// not a node of the graph.
pub fn find_all_paths<G: GraphQuery + ?Sized>(graph: &G, start: &str, end: &str) -> Vec<Vec<String>> {
    if !graph.contains(start) || !graph.contains(end) {
        return Vec::new();
    }

    let mut walker = PathWalker {
        graph,
        target: end,
        visited: FxHashSet::default(),
        path: Vec::new(),
        found: Vec::new(),
    };
    walker.visit(start);
    walker.found
}

struct PathWalker<'a, G: ?Sized> {
    graph: &'a G,
    target: &'a str,
    visited: FxHashSet<&'a str>,
    path: Vec<&'a str>,
    found: Vec<Vec<String>>,
}

impl<'a, G: GraphQuery + ?Sized> PathWalker<'a, G> {
    fn visit(&mut self, current: &'a str) {
        self.visited.insert(current);
        self.path.push(current);

        if current == self.target {
            self.found
                .push(self.path.iter().map(|id| id.to_string()).collect());
        } else {
            let graph = self.graph;
            for neighbor in graph.neighbors(current) {
                // Dangling edge targets are inert
                if !self.visited.contains(neighbor.as_str()) && graph.contains(neighbor) {
                    self.visit(neighbor.as_str());
                }
            }
        }

        self.path.pop();
        self.visited.remove(current);
    }
}
