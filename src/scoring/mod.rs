//! Attack path scoring
//!
//! # Scoring Formula
//!
//! ```text
//! probability(path) = Π edge(a, b).probability   for each step a -> b
//!                   = 1.0                         for paths of 0 or 1 node
//!
//! node_risk         = cvss × severity_multiplier
//! risk(path)        = min(10, mean(node_risk) × probability(path))
//! ```
//!
//! # Severity Multipliers (configurable)
//!
//! - Critical: 1.5
//! - High: 1.2
//! - Medium: 1.0
//! - Low: 0.8
//! - Unknown: 1.0
//!
//! Discounting by probability keeps long, unlikely paths through severe
//! nodes from outranking paths an attacker can actually complete.
//!
//! # Example
//!
//! Two steps, critical CVSS 9.0 then low CVSS 5.0, joined by a 50% edge:
//!
//! risk = ((13.5 + 4.0) / 2) × 0.5 = 4.375

mod path_scorer;

pub use path_scorer::{PathScorer, ScoredPath, MAX_RISK};
