//! Graph sources
//!
//! The engine never builds graphs itself. A [`GraphSource`] produces a
//! [`GraphDocument`] (plain node and edge lists) which is checked and then
//! turned into an [`AttackGraph`]. Construction problems such as dangling
//! edge references or out-of-range scores are caught here; the store itself
//! stays permissive.
//!
//! # Document Format
//!
//! ```json
//! {
//!   "nodes": [{ "id": "1", "category": "entry", "severity": "high", "cvss": 8.1 }],
//!   "edges": [{ "id": "e1", "from": "1", "to": "2", "probability": 0.95 }]
//! }
//! ```

mod file;
mod sample;

pub use file::{DocumentFormat, FileSource};
pub use sample::SampleCatalog;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::graph::AttackGraph;
use crate::models::{AttackEdge, AttackNode, Category};

/// A single construction problem found in a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    #[error("node '{0}' has an unrecognized category")]
    UnknownCategory(String),

    #[error("node '{id}' has cvss {cvss}, expected 0.0-10.0")]
    CvssOutOfRange { id: String, cvss: f64 },

    #[error("edge '{id}' has probability {probability}, expected 0.0-1.0")]
    ProbabilityOutOfRange { id: String, probability: f64 },

    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownEndpoint { edge: String, node: String },
}

/// Errors raised while loading a graph
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML graph: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Graph has {nodes} nodes, limit is {max} (raise analysis.max_nodes to allow it)")]
    TooLarge { nodes: usize, max: usize },

    #[error("Graph failed validation: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Serializable node and edge lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<AttackNode>,
    #[serde(default)]
    pub edges: Vec<AttackEdge>,
}

impl GraphDocument {
    /// Snapshot an existing graph, nodes first in insertion order
    pub fn from_graph(graph: &AttackGraph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges().cloned().collect(),
        }
    }

    /// Every construction problem, in document order
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                issues.push(ValidationIssue::DuplicateNode(node.id.clone()));
            }
            if node.category == Category::Unknown {
                issues.push(ValidationIssue::UnknownCategory(node.id.clone()));
            }
            if !(0.0..=10.0).contains(&node.cvss) {
                issues.push(ValidationIssue::CvssOutOfRange {
                    id: node.id.clone(),
                    cvss: node.cvss,
                });
            }
        }

        for edge in &self.edges {
            if !(0.0..=1.0).contains(&edge.probability) {
                issues.push(ValidationIssue::ProbabilityOutOfRange {
                    id: edge.id.clone(),
                    probability: edge.probability,
                });
            }
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains(endpoint.as_str()) {
                    issues.push(ValidationIssue::UnknownEndpoint {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }

        issues
    }

    pub fn into_graph(self) -> AttackGraph {
        AttackGraph::from_parts(self.nodes, self.edges)
    }
}

/// How strictly a source checks what it loads
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Reject documents with validation issues instead of logging them
    pub strict: bool,
    pub max_nodes: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strict: true,
            max_nodes: 64,
        }
    }
}

/// Anything that can supply attack graph data
pub trait GraphSource {
    /// Human-readable origin for logs
    fn describe(&self) -> String;

    fn load_document(&self) -> SourceResult<GraphDocument>;

    /// Load, check and build a graph
    fn load(&self, options: &LoadOptions) -> SourceResult<AttackGraph> {
        let document = self.load_document()?;
        debug!(
            "Loaded {} nodes and {} edges from {}",
            document.nodes.len(),
            document.edges.len(),
            self.describe()
        );

        if document.nodes.len() > options.max_nodes {
            return Err(SourceError::TooLarge {
                nodes: document.nodes.len(),
                max: options.max_nodes,
            });
        }

        let issues = document.issues();
        if !issues.is_empty() {
            if options.strict {
                return Err(SourceError::Invalid(issues));
            }
            for issue in &issues {
                warn!("{}: {}", self.describe(), issue);
            }
        }

        Ok(document.into_graph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    struct Inline(GraphDocument);

    impl GraphSource for Inline {
        fn describe(&self) -> String {
            "inline".into()
        }

        fn load_document(&self) -> SourceResult<GraphDocument> {
            Ok(self.0.clone())
        }
    }

    fn doc() -> GraphDocument {
        GraphDocument {
            nodes: vec![
                AttackNode::new("a", Category::Entry, Severity::High, 7.0),
                AttackNode::new("b", Category::Exfiltration, Severity::High, 7.0),
            ],
            edges: vec![AttackEdge::new("e1", "a", "b", 0.5)],
        }
    }

    #[test]
    fn test_clean_document_has_no_issues() {
        assert!(doc().issues().is_empty());
        let graph = Inline(doc()).load(&LoadOptions::default()).expect("load");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_issues_are_collected() {
        let mut d = doc();
        d.nodes.push(AttackNode::new("a", Category::Exploit, Severity::Low, 11.0));
        d.edges.push(AttackEdge::new("e2", "b", "ghost", 1.5));

        let issues = d.issues();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::DuplicateNode("a".into()),
                ValidationIssue::CvssOutOfRange { id: "a".into(), cvss: 11.0 },
                ValidationIssue::ProbabilityOutOfRange { id: "e2".into(), probability: 1.5 },
                ValidationIssue::UnknownEndpoint { edge: "e2".into(), node: "ghost".into() },
            ]
        );
    }

    #[test]
    fn test_nan_scores_are_rejected() {
        let mut d = doc();
        d.nodes[0].cvss = f64::NAN;
        assert_eq!(d.issues().len(), 1);
    }

    #[test]
    fn test_strict_load_rejects_and_lenient_load_builds() {
        let mut d = doc();
        d.edges.push(AttackEdge::new("e2", "a", "ghost", 0.5));

        let err = Inline(d.clone()).load(&LoadOptions::default()).unwrap_err();
        assert!(matches!(err, SourceError::Invalid(ref issues) if issues.len() == 1));
        assert!(err.to_string().contains("unknown node 'ghost'"));

        let lenient = LoadOptions {
            strict: false,
            ..Default::default()
        };
        let graph = Inline(d).load(&lenient).expect("lenient load");
        assert_eq!(graph.dangling_edges().len(), 1);
    }

    #[test]
    fn test_unrecognized_category_is_an_issue() {
        let mut d = doc();
        d.nodes.push(AttackNode::new("c", Category::Unknown, Severity::Low, 3.0));
        assert_eq!(d.issues(), vec![ValidationIssue::UnknownCategory("c".into())]);

        assert!(Inline(d.clone()).load(&LoadOptions::default()).is_err());
        let lenient = LoadOptions {
            strict: false,
            ..Default::default()
        };
        let graph = Inline(d).load(&lenient).expect("lenient load");
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_size_limit() {
        let options = LoadOptions {
            strict: true,
            max_nodes: 1,
        };
        let err = Inline(doc()).load(&options).unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { nodes: 2, max: 1 }));
    }

    #[test]
    fn test_document_round_trips_graph() {
        let graph = doc().into_graph();
        assert_eq!(GraphDocument::from_graph(&graph), doc());
    }
}
