//! Chain builder: terminal selection, path ranking and chain assembly

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::summary::summarize;
use crate::config::AnalysisConfig;
use crate::graph::{find_all_paths, AttackGraph, GraphQuery};
use crate::models::{AttackChain, AttackNode, ChainStatus};
use crate::scoring::{PathScorer, ScoredPath};

/// How an analysis ended
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// No node in the entry or the exit category
    NoTerminals { entries: usize, exits: usize },
    /// A requested terminal id is not a node of the graph
    UnknownNode(String),
    /// Terminals exist but no path connects them
    NoPath { start: String, end: String },
    Completed(Box<AttackChain>),
}

impl AnalysisOutcome {
    pub fn into_chain(self) -> Option<AttackChain> {
        match self {
            AnalysisOutcome::Completed(chain) => Some(*chain),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisOutcome::Completed(_))
    }
}

/// Builds attack chains from one graph snapshot
pub struct ChainBuilder<'a> {
    graph: &'a AttackGraph,
    config: &'a AnalysisConfig,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(graph: &'a AttackGraph, config: &'a AnalysisConfig) -> Self {
        Self { graph, config }
    }

    /// Analyze the graph and return the chain, if any
    pub fn analyze(&self, name: &str) -> Option<AttackChain> {
        self.analyze_outcome(name).into_chain()
    }

    /// Analyze between the lexically first entry and exit nodes
    pub fn analyze_outcome(&self, name: &str) -> AnalysisOutcome {
        let _span = info_span!("analyze", name).entered();
        info!("Starting attack chain analysis");

        let (starts, ends) = self.terminals();
        let (Some(start), Some(end)) = (starts.first(), ends.first()) else {
            warn!(
                entries = starts.len(),
                exits = ends.len(),
                "No entry or exfiltration nodes found"
            );
            return AnalysisOutcome::NoTerminals {
                entries: starts.len(),
                exits: ends.len(),
            };
        };

        debug!(
            "Selected {} of {} entries and {} of {} exits",
            start,
            starts.len(),
            end,
            ends.len()
        );
        self.run_pair(name, start, end)
    }

    /// Analyze between two explicitly chosen nodes
    pub fn analyze_between(&self, name: &str, start: &str, end: &str) -> AnalysisOutcome {
        let _span = info_span!("analyze", name, start, end).entered();
        info!("Starting attack chain analysis");

        for id in [start, end] {
            if !self.graph.contains(id) {
                warn!("Unknown node '{}'", id);
                return AnalysisOutcome::UnknownNode(id.to_string());
            }
        }
        self.run_pair(name, start, end)
    }

    /// One chain per connected (entry, exit) pair, highest risk first.
    ///
    /// Pairs are analyzed in parallel. Equal scores keep lexical pair order.
    pub fn analyze_all(&self, name: &str) -> Vec<AttackChain> {
        let (starts, ends) = self.terminals();
        if starts.is_empty() || ends.is_empty() {
            warn!(
                entries = starts.len(),
                exits = ends.len(),
                "No entry or exfiltration nodes found"
            );
            return Vec::new();
        }

        let pairs: Vec<(&String, &String)> = starts
            .iter()
            .flat_map(|s| ends.iter().map(move |e| (s, e)))
            .collect();
        info!("Analyzing {} terminal pairs", pairs.len());

        let mut chains: Vec<AttackChain> = pairs
            .par_iter()
            .filter_map(|(start, end)| {
                let label = format!("{name} ({start} -> {end})");
                match self.chain_for(&label, start, end) {
                    Some(chain) => Some(chain),
                    None => {
                        debug!("No path from {} to {}", start, end);
                        None
                    }
                }
            })
            .collect();

        chains.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
        info!("Built {} attack chains", chains.len());
        chains
    }

    /// Sorted candidate ids for the configured entry and exit categories
    fn terminals(&self) -> (Vec<String>, Vec<String>) {
        let settings = &self.config.analysis;
        (
            self.graph.nodes_by_category(settings.entry_category),
            self.graph.nodes_by_category(settings.exit_category),
        )
    }

    fn run_pair(&self, name: &str, start: &str, end: &str) -> AnalysisOutcome {
        match self.chain_for(name, start, end) {
            Some(chain) => {
                info!(
                    risk_score = chain.risk_score,
                    steps = chain.summary.total_steps,
                    "Attack chain analysis completed"
                );
                AnalysisOutcome::Completed(Box::new(chain))
            }
            None => {
                warn!("No attack paths found from {} to {}", start, end);
                AnalysisOutcome::NoPath {
                    start: start.to_string(),
                    end: end.to_string(),
                }
            }
        }
    }

    /// Enumerate, score and assemble. `None` when no path exists.
    fn chain_for(&self, name: &str, start: &str, end: &str) -> Option<AttackChain> {
        let paths = find_all_paths(self.graph, start, end);
        debug!("Found {} simple paths from {} to {}", paths.len(), start, end);

        let scorer = PathScorer::new(self.graph, &self.config.scoring);
        let scored = scorer.score_paths(&paths);

        let most_likely = first_max_by(&scored, |s| s.probability)?;
        let riskiest = first_max_by(&scored, |s| s.risk)?;

        let nodes: Vec<&AttackNode> = most_likely
            .path
            .iter()
            .filter_map(|id| self.graph.node(id))
            .collect();
        let edges = most_likely
            .path
            .windows(2)
            .filter_map(|step| scorer.select_edge(&step[0], &step[1]))
            .cloned()
            .collect();

        Some(AttackChain {
            id: format!("chain-{}", Uuid::new_v4()),
            name: name.to_string(),
            nodes: nodes.iter().map(|n| (*n).clone()).collect(),
            edges,
            risk_score: riskiest.risk,
            status: ChainStatus::Completed,
            created_at: Utc::now(),
            summary: summarize(&most_likely.path, &nodes, most_likely.probability),
            highest_risk_path: riskiest.path.clone(),
        })
    }
}

/// First element with the greatest key. Later ties never replace it.
fn first_max_by<'s>(
    scored: &'s [ScoredPath],
    key: impl Fn(&ScoredPath) -> f64,
) -> Option<&'s ScoredPath> {
    let mut best: Option<&ScoredPath> = None;
    for candidate in scored {
        match best {
            Some(current) if key(candidate) <= key(current) => {}
            _ => best = Some(candidate),
        }
    }
    best
}
