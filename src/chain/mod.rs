//! Attack chain analysis
//!
//! Orchestrates one analysis over a graph snapshot:
//!
//! ```text
//! started ──► no entry/exit nodes  ─► NoTerminals
//!         ├─► no connecting path   ─► NoPath
//!         └─► enumerate → score → select → summarize ─► Completed(chain)
//! ```
//!
//! The chain narrates the most likely path (highest success probability)
//! while its `risk_score` reflects the highest-risk path. Both are kept on
//! the result. Missing chains are a normal outcome, reported through a
//! warning log and a `None`/non-completed value rather than an error.

mod builder;
mod summary;

pub use builder::{AnalysisOutcome, ChainBuilder};
pub use summary::{estimate_time, risk_factors, summarize};
