//! Paths command - rank every simple path between two nodes

use anyhow::Result;
use console::style;

use attackchain::config::AnalysisConfig;
use attackchain::graph::{find_all_paths, AttackGraph, GraphQuery};
use attackchain::scoring::{PathScorer, ScoredPath};

/// Run the paths command
pub fn run(
    graph: &AttackGraph,
    config: &AnalysisConfig,
    from: &str,
    to: &str,
    top: Option<usize>,
    format: &str,
) -> Result<()> {
    for id in [from, to] {
        if !graph.contains(id) {
            anyhow::bail!("Unknown node '{}'", id);
        }
    }

    let paths = find_all_paths(graph, from, to);
    let scorer = PathScorer::new(graph, &config.scoring);
    let ranked = rank(scorer.score_paths(&paths), top);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("{} No paths from {} to {}", style("ℹ").cyan(), from, to);
        return Ok(());
    }

    println!(
        "\n{} {} of {} paths from {} to {}\n",
        style("Paths").bold(),
        ranked.len(),
        paths.len(),
        style(from).cyan(),
        style(to).cyan()
    );
    println!("  {:>3}  {:>6}  {:>8}  PATH", "#", "RISK", "SUCCESS");
    for (i, scored) in ranked.iter().enumerate() {
        let labels: Vec<&str> = scored
            .path
            .iter()
            .map(|id| graph.node(id).map_or(id.as_str(), |n| n.label.as_str()))
            .collect();
        println!(
            "  {:>3}  {:>6.2}  {:>7.1}%  {}",
            i + 1,
            scored.risk,
            scored.probability * 100.0,
            labels.join(" → ")
        );
    }
    Ok(())
}

/// Riskiest first, enumeration order among equals, truncated to `top`
fn rank(mut scored: Vec<ScoredPath>, top: Option<usize>) -> Vec<ScoredPath> {
    scored.sort_by(|a, b| b.risk.total_cmp(&a.risk));
    if let Some(n) = top {
        scored.truncate(n);
    }
    scored
}
