//! attackchain - attack-chain analysis engine
//!
//! Models multi-step attacker progression as a directed graph of attack
//! steps, enumerates every simple path between an entry point and an
//! exfiltration target, scores each path, and returns an explainable
//! [`models::AttackChain`].
//!
//! ```no_run
//! use attackchain::chain::ChainBuilder;
//! use attackchain::config::AnalysisConfig;
//! use attackchain::source::{GraphSource, LoadOptions, SampleCatalog};
//!
//! let graph = SampleCatalog.load(&LoadOptions::default())?;
//! let config = AnalysisConfig::default();
//! if let Some(chain) = ChainBuilder::new(&graph, &config).analyze("demo") {
//!     println!("{} risk {:.2}", chain.name, chain.risk_score);
//! }
//! # Ok::<(), attackchain::source::SourceError>(())
//! ```

pub mod chain;
pub mod config;
pub mod graph;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod source;
