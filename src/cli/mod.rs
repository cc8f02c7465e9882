//! CLI command definitions and handlers

mod analyze;
mod init;
mod paths;
mod sample;
mod validate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use attackchain::config::{load_config, AnalysisConfig};
use attackchain::graph::AttackGraph;
use attackchain::source::{FileSource, GraphSource, LoadOptions};

/// attackchain - Attack chain analysis over graphs of attack steps
#[derive(Parser, Debug)]
#[command(name = "attackchain")]
#[command(
    version,
    about = "Find, score and explain multi-step attack paths through a graph of attack steps",
    long_about = "attackchain loads a graph of attack steps (entry points, vulnerabilities, \
exploits, privilege escalation, persistence and exfiltration) and the transitions between \
them, enumerates every simple path from entry to exfiltration, and reports the most likely \
chain together with a 0-10 risk score.",
    after_help = "\
Examples:
  attackchain sample > graph.json                 Write the demo graph
  attackchain analyze graph.json                  Analyze it
  attackchain analyze graph.json --format json    JSON output for scripting
  attackchain paths graph.json --from 1 --to 6    Rank every path between two steps
  attackchain validate graph.json                 Check a graph before analysis"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ./attackchain.toml, then the user config dir)
    #[arg(long, global = true, env = "ATTACKCHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a graph and report the attack chain
    #[command(after_help = "\
Examples:
  attackchain analyze graph.json                        Chain between the first entry and exit
  attackchain analyze graph.toml --name \"Prod VPC\"      Name the chain
  attackchain analyze graph.json --all                  Every connected entry/exit pair, riskiest first
  attackchain analyze graph.json --from web --to db     Chain between two chosen steps
  attackchain analyze graph.json -f markdown -o chain.md   Markdown report
  attackchain analyze graph.json --fail-on-empty        Exit code 2 if no chain exists (CI mode)")]
    Analyze {
        /// Graph file (.json or .toml)
        graph: PathBuf,

        /// Name for the resulting chain
        #[arg(long, default_value = "Attack Chain")]
        name: String,

        /// Analyze every entry/exit pair instead of the first
        #[arg(long, conflicts_with_all = ["from", "to"])]
        all: bool,

        /// Start node id (requires --to)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// End node id (requires --from)
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Single-line JSON (with --format json)
        #[arg(long, conflicts_with = "all")]
        compact: bool,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 2 when no attack chain is found
        #[arg(long)]
        fail_on_empty: bool,

        /// Log construction problems instead of rejecting the graph
        #[arg(long)]
        lenient: bool,
    },

    /// Enumerate and score every simple path between two nodes
    #[command(after_help = "\
Examples:
  attackchain paths graph.json --from 1 --to 6            All paths, riskiest first
  attackchain paths graph.json --from 1 --to 6 --top 3    Only the three riskiest
  attackchain paths graph.json --from 1 --to 6 -f json    JSON output")]
    Paths {
        /// Graph file (.json or .toml)
        graph: PathBuf,

        /// Start node id
        #[arg(long)]
        from: String,

        /// End node id
        #[arg(long)]
        to: String,

        /// Maximum paths to show
        #[arg(long)]
        top: Option<usize>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Log construction problems instead of rejecting the graph
        #[arg(long)]
        lenient: bool,
    },

    /// Check a graph for construction problems, dangling edges and cycles
    Validate {
        /// Graph file (.json or .toml)
        graph: PathBuf,
    },

    /// Print the built-in sample graph
    Sample {
        /// Output format: json, toml
        #[arg(long, short = 'f', default_value = "json", value_parser = ["json", "toml"])]
        format: String,
    },

    /// Write a commented attackchain.toml in the current directory
    Init,

    /// Show version info
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    match cli.command {
        Commands::Init => init::run(&cwd),

        Commands::Version => {
            println!("attackchain {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        Commands::Sample { format } => sample::run(&format),

        Commands::Validate { graph } => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            validate::run(&graph, &config)
        }

        Commands::Paths {
            graph,
            from,
            to,
            top,
            format,
            lenient,
        } => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            let graph = load_graph(&graph, &config, lenient)?;
            paths::run(&graph, &config, &from, &to, top, &format)
        }

        Commands::Analyze {
            graph,
            name,
            all,
            from,
            to,
            format,
            compact,
            output,
            fail_on_empty,
            lenient,
        } => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            let format = format
                .or_else(|| config.defaults.format.clone())
                .unwrap_or_else(|| "text".to_string());
            let graph = load_graph(&graph, &config, lenient)?;

            let target = match (from, to) {
                (Some(from), Some(to)) => analyze::Target::Between(from, to),
                _ if all => analyze::Target::All,
                _ => analyze::Target::First,
            };

            analyze::run(
                &graph,
                &config,
                analyze::AnalyzeArgs {
                    name: &name,
                    target,
                    format: &format,
                    compact,
                    output: output.as_deref(),
                    fail_on_empty,
                },
            )
        }
    }
}

/// Load a graph file with the configured size limit
fn load_graph(path: &Path, config: &AnalysisConfig, lenient: bool) -> Result<AttackGraph> {
    let options = LoadOptions {
        strict: !lenient,
        max_nodes: config.analysis.max_nodes,
    };
    FileSource::new(path)
        .load(&options)
        .with_context(|| format!("Failed to load graph {}", path.display()))
}
