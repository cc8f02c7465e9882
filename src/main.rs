//! attackchain - Attack chain analysis CLI
//!
//! Loads a graph of attack steps from a fixture file, finds the paths an
//! attacker could take from entry to exfiltration, and reports the most
//! likely chain with a quantitative risk score.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging; RUST_LOG overrides --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("attackchain={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
