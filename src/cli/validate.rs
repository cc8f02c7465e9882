//! Validate command - report construction problems without analyzing

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use attackchain::config::AnalysisConfig;
use attackchain::models::Category;
use attackchain::source::{FileSource, GraphSource};

/// Run the validate command. Fails when the graph would be rejected by a strict load.
pub fn run(path: &Path, config: &AnalysisConfig) -> Result<()> {
    let document = FileSource::new(path)
        .load_document()
        .with_context(|| format!("Failed to load graph {}", path.display()))?;

    let issues = document.issues();
    let oversized = document.nodes.len() > config.analysis.max_nodes;
    let graph = document.into_graph();
    let stats = graph.stats();

    println!("\n{} {}\n", style("Validating").bold(), style(path.display()).cyan());
    println!("  Nodes: {}  Edges: {}", stats.nodes, stats.edges);
    for category in Category::all() {
        let count = stats.by_category.get(category).copied().unwrap_or(0);
        println!("    {:<22} {}", category.to_string(), count);
    }

    let entries = graph.nodes_by_category(config.analysis.entry_category);
    let exits = graph.nodes_by_category(config.analysis.exit_category);
    if entries.is_empty() || exits.is_empty() {
        println!(
            "  {} No {} or {} nodes, analysis will find no chain",
            style("⚠").yellow(),
            config.analysis.entry_category,
            config.analysis.exit_category
        );
    }

    let cycles = graph.find_cycles();
    if !cycles.is_empty() {
        // Cycles are legal; enumeration only follows simple paths
        println!("  {} {} cycle(s):", style("ℹ").cyan(), cycles.len());
        for cycle in &cycles {
            println!("    {}", cycle.join(", "));
        }
    }

    if oversized {
        println!(
            "  {} {} nodes exceeds max_nodes = {}",
            style("✗").red(),
            stats.nodes,
            config.analysis.max_nodes
        );
    }
    for issue in &issues {
        println!("  {} {}", style("✗").red(), issue);
    }

    let problems = issues.len() + usize::from(oversized);
    if problems > 0 {
        anyhow::bail!("{} has {} problem(s)", path.display(), problems);
    }

    println!("\n{} Graph is valid", style("✓").green());
    Ok(())
}
