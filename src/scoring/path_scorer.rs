//! Path probability and risk scorer

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{MissingEdgePolicy, ParallelEdgePolicy, ScoringConfig};
use crate::graph::GraphQuery;
use crate::models::{AttackEdge, AttackNode};

/// Ceiling for any risk score
pub const MAX_RISK: f64 = 10.0;

/// A path with its scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPath {
    pub path: Vec<String>,
    pub probability: f64,
    pub risk: f64,
}

/// Scores paths against one graph
pub struct PathScorer<'a, G: ?Sized> {
    graph: &'a G,
    config: &'a ScoringConfig,
}

impl<'a, G: GraphQuery + ?Sized> PathScorer<'a, G> {
    pub fn new(graph: &'a G, config: &'a ScoringConfig) -> Self {
        Self { graph, config }
    }

    /// Edge used for the step `from -> to`, per the parallel-edge policy
    pub fn select_edge(&self, from: &str, to: &str) -> Option<&'a AttackEdge> {
        let graph = self.graph;
        match self.config.parallel_edges {
            ParallelEdgePolicy::First => graph.edge_between(from, to),
            ParallelEdgePolicy::Max => graph
                .outgoing(from)
                .iter()
                .filter(|e| e.to == to)
                .reduce(|best, e| if e.probability > best.probability { e } else { best }),
        }
    }

    /// Probability that an attacker completes every step of `path`.
    ///
    /// Paths with fewer than two nodes have no transitions and score 1.0.
    pub fn path_probability<S: AsRef<str>>(&self, path: &[S]) -> f64 {
        if path.len() < 2 {
            return 1.0;
        }

        let mut probability = 1.0;
        for step in path.windows(2) {
            match self.select_edge(step[0].as_ref(), step[1].as_ref()) {
                Some(edge) => probability *= edge.probability,
                None => match self.config.missing_edge {
                    MissingEdgePolicy::Skip => {}
                    MissingEdgePolicy::Zero => return 0.0,
                },
            }
        }
        probability
    }

    /// CVSS weighted by the severity multiplier
    pub fn node_risk(&self, node: &AttackNode) -> f64 {
        node.cvss * self.config.severity_multipliers.for_severity(node.severity)
    }

    /// Mean node risk discounted by path probability, capped at [`MAX_RISK`].
    ///
    /// Ids that are not nodes add nothing to the sum but still count toward
    /// the path length.
    pub fn path_risk<S: AsRef<str>>(&self, path: &[S]) -> f64 {
        if path.is_empty() {
            return 0.0;
        }

        let total: f64 = path
            .iter()
            .filter_map(|id| self.graph.node(id.as_ref()))
            .map(|node| self.node_risk(node))
            .sum();

        let mean = total / path.len() as f64;
        (mean * self.path_probability(path)).min(MAX_RISK)
    }

    /// Score every path, preserving input order
    pub fn score_paths(&self, paths: &[Vec<String>]) -> Vec<ScoredPath> {
        paths
            .par_iter()
            .map(|path| ScoredPath {
                path: path.clone(),
                probability: self.path_probability(path),
                risk: self.path_risk(path),
            })
            .collect()
    }
}
