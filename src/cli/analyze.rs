//! Analyze command - build and report attack chains

use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use attackchain::chain::{AnalysisOutcome, ChainBuilder};
use attackchain::config::AnalysisConfig;
use attackchain::graph::AttackGraph;
use attackchain::reporters::{self, OutputFormat};

/// Which terminal pair(s) to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Lexically first entry and exit nodes
    First,
    /// Every entry/exit pair
    All,
    Between(String, String),
}

pub struct AnalyzeArgs<'a> {
    pub name: &'a str,
    pub target: Target,
    pub format: &'a str,
    pub compact: bool,
    pub output: Option<&'a Path>,
    pub fail_on_empty: bool,
}

/// Run the analyze command
pub fn run(graph: &AttackGraph, config: &AnalysisConfig, args: AnalyzeArgs<'_>) -> Result<()> {
    let format = OutputFormat::from_str(args.format)?;
    let builder = ChainBuilder::new(graph, config);

    let rendered = match &args.target {
        Target::All => {
            let chains = builder.analyze_all(args.name);
            if chains.is_empty() {
                return no_result("no connected entry/exit pair", args.fail_on_empty);
            }
            reporters::report_all(&chains, format)?
        }
        Target::First | Target::Between(..) => {
            let outcome = match &args.target {
                Target::Between(from, to) => builder.analyze_between(args.name, from, to),
                _ => builder.analyze_outcome(args.name),
            };
            let chain = match outcome {
                AnalysisOutcome::Completed(chain) => chain,
                other => return no_result(&describe(&other), args.fail_on_empty),
            };
            if args.compact && format == OutputFormat::Json {
                reporters::render_json_compact(&chain)?
            } else {
                reporters::report_with_format(&chain, format)?
            }
        }
    };

    match args.output {
        Some(path) => {
            let path = output_path(path, format);
            let rendered = plain_unless(rendered, false);
            std::fs::write(&path, rendered.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{}Report written to: {}",
                style("📄 ").bold(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", plain_unless(rendered, console::colors_enabled())),
    }
    Ok(())
}

/// `-o report` gets the format's extension; explicit extensions are kept
fn output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(reporters::file_extension(format))
    }
}

/// Strip ANSI styling unless it is going to a color-capable terminal
fn plain_unless(rendered: String, colored: bool) -> String {
    if colored {
        rendered
    } else {
        console::strip_ansi_codes(&rendered).into_owned()
    }
}

/// Absence of a chain is a valid outcome unless the caller asked otherwise
fn no_result(reason: &str, fail_on_empty: bool) -> Result<()> {
    eprintln!(
        "{} No attack chain found: {}",
        style("ℹ").cyan(),
        reason
    );
    if fail_on_empty {
        eprintln!("Failing due to --fail-on-empty");
        std::process::exit(2);
    }
    Ok(())
}

fn describe(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::NoTerminals { entries, exits } => {
            format!("{} entry and {} exit nodes", entries, exits)
        }
        AnalysisOutcome::UnknownNode(id) => format!("unknown node '{}'", id),
        AnalysisOutcome::NoPath { start, end } => {
            format!("no path from '{}' to '{}'", start, end)
        }
        AnalysisOutcome::Completed(_) => "completed".to_string(),
    }
}
