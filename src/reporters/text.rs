//! Text (terminal) reporter with colors and formatting

use crate::models::{AttackChain, Severity};
use crate::scoring::MAX_RISK;
use anyhow::Result;

/// Severity colors
fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31m", // Red
        Severity::High => "\x1b[91m",     // Light red
        Severity::Medium => "\x1b[33m",   // Yellow
        Severity::Low => "\x1b[34m",      // Blue
        Severity::Unknown => "\x1b[90m",  // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Severity tag
fn severity_tag(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "[C]",
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
        Severity::Unknown => "[?]",
    }
}

/// Render chain as formatted terminal output
pub fn render(chain: &AttackChain) -> Result<String> {
    let mut out = String::new();
    let summary = &chain.summary;

    // Header
    out.push_str(&format!("\n{BOLD}Attack Chain: {}{RESET}\n", chain.name));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Risk: {}  Success: {BOLD}{:.1}%{RESET}  Steps: {}  Critical: {}  Time: {}\n\n",
        format_risk(chain.risk_score),
        summary.success_probability,
        summary.total_steps,
        summary.critical_vulns,
        summary.estimated_time
    ));

    // Most likely path, one step per row
    out.push_str(&format!("{BOLD}MOST LIKELY PATH{RESET}\n"));
    out.push_str(&format!(
        "{DIM}  #   SEV   STEP                                     TECHNIQUE{RESET}\n"
    ));
    for (i, node) in chain.nodes.iter().enumerate() {
        let sev_c = severity_color(&node.severity);
        let label: String = node.label.chars().take(38).collect();
        out.push_str(&format!(
            "  {DIM}{:>3}{RESET}  {sev_c}{}{RESET}  {:<40}  {DIM}{}{RESET}\n",
            i + 1,
            severity_tag(&node.severity),
            label,
            node.technique_ref
        ));
        if let Some(edge) = chain.edges.get(i) {
            out.push_str(&format!(
                "        {DIM}│ {} ({}){RESET}\n",
                edge.label, edge.id
            ));
        }
    }
    out.push('\n');

    if chain.highest_risk_path != summary.most_likely_path && !chain.highest_risk_path.is_empty()
    {
        out.push_str(&format!(
            "{BOLD}HIGHEST RISK PATH{RESET}\n  {}\n\n",
            chain.highest_risk_path.join(" → ")
        ));
    }

    if !summary.risk_factors.is_empty() {
        out.push_str(&format!("{BOLD}RISK FACTORS{RESET}\n"));
        for factor in &summary.risk_factors {
            out.push_str(&format!("  • {}\n", factor));
        }
        out.push('\n');
    }

    let fixes: Vec<_> = chain
        .nodes
        .iter()
        .filter(|n| !n.remediation.is_empty())
        .collect();
    if !fixes.is_empty() {
        out.push_str(&format!("{BOLD}REMEDIATION{RESET}\n"));
        for node in fixes {
            out.push_str(&format!("  {}: {}\n", node.label, node.remediation));
        }
        out.push('\n');
    }

    Ok(out)
}

/// Render ranked chains back to back
pub fn render_all(chains: &[AttackChain]) -> Result<String> {
    if chains.is_empty() {
        return Ok(format!("{DIM}No attack chains found.{RESET}\n"));
    }
    let mut out = format!("{BOLD}{} attack chains, highest risk first{RESET}\n", chains.len());
    for chain in chains {
        out.push_str(&render(chain)?);
    }
    Ok(out)
}

fn format_risk(risk: f64) -> String {
    let color = if risk >= 7.0 {
        "\x1b[31m"
    } else if risk >= 4.0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    format!("{color}{BOLD}{:.2}/{:.0}{RESET}", risk, MAX_RISK)
}
