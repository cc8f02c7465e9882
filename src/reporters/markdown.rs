//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - Security review tickets
//! - Documentation

use crate::models::{AttackChain, AttackNode, Severity};
use anyhow::Result;

/// Render chain as GitHub-flavored Markdown
pub fn render(chain: &AttackChain) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(chain));
    md.push('\n');

    md.push_str(&render_summary(chain));
    md.push('\n');

    md.push_str(&render_steps(chain));
    md.push('\n');

    md.push_str(&render_risk_factors(chain));

    Ok(md)
}

/// Render ranked chains as one document
pub fn render_all(chains: &[AttackChain]) -> Result<String> {
    let mut md = String::from("# Attack Chain Report\n\n");
    if chains.is_empty() {
        md.push_str("No attack chains found.\n");
        return Ok(md);
    }

    md.push_str("| Rank | Chain | Risk | Success | Steps |\n");
    md.push_str("|------|-------|------|---------|-------|\n");
    for (i, chain) in chains.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {:.2} | {:.1}% | {} |\n",
            i + 1,
            chain.name,
            chain.risk_score,
            chain.summary.success_probability,
            chain.summary.total_steps
        ));
    }
    md.push('\n');

    for chain in chains {
        // Demote each chain one heading level under the report title
        let body = render(chain)?;
        for line in body.lines() {
            if line.starts_with('#') {
                md.push('#');
            }
            md.push_str(line);
            md.push('\n');
        }
    }
    Ok(md)
}

fn render_header(chain: &AttackChain) -> String {
    format!(
        r#"# {} Attack Chain: {}

**Risk: {:.2}/10** | **Success Probability: {:.1}%**

Generated: {}
"#,
        risk_emoji(chain.risk_score),
        chain.name,
        chain.risk_score,
        chain.summary.success_probability,
        chain.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn render_summary(chain: &AttackChain) -> String {
    let s = &chain.summary;
    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Total Steps** | {} |
| **Critical Vulnerabilities** | {} |
| **Estimated Time** | {} |
| **Most Likely Path** | {} |
| **Highest Risk Path** | {} |
"#,
        s.total_steps,
        s.critical_vulns,
        s.estimated_time,
        s.most_likely_path.join(" → "),
        chain.highest_risk_path.join(" → ")
    )
}

fn render_steps(chain: &AttackChain) -> String {
    let mut md = String::from("## Attack Steps\n\n");
    md.push_str("| # | Step | Category | Severity | CVSS | Technique |\n");
    md.push_str("|---|------|----------|----------|------|-----------|\n");
    for (i, node) in chain.nodes.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} {} | {:.1} | {} |\n",
            i + 1,
            node.label,
            node.category,
            severity_emoji(&node.severity),
            node.severity,
            node.cvss,
            technique_cell(node)
        ));
    }

    let fixes: Vec<&AttackNode> = chain
        .nodes
        .iter()
        .filter(|n| !n.remediation.is_empty())
        .collect();
    if !fixes.is_empty() {
        md.push_str("\n### Remediation\n\n");
        for node in fixes {
            md.push_str(&format!("- **{}**: {}\n", node.label, node.remediation));
        }
    }
    md
}

fn render_risk_factors(chain: &AttackChain) -> String {
    let mut md = String::from("## Risk Factors\n\n");
    if chain.summary.risk_factors.is_empty() {
        md.push_str("None identified.\n");
    }
    for factor in &chain.summary.risk_factors {
        md.push_str(&format!("- {}\n", factor));
    }
    md
}

fn technique_cell(node: &AttackNode) -> String {
    if node.technique_ref.is_empty() {
        "-".to_string()
    } else {
        format!("`{}`", node.technique_ref)
    }
}

fn severity_emoji(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::High => "🟠",
        Severity::Medium => "🟡",
        Severity::Low => "🔵",
        Severity::Unknown => "⚪",
    }
}

fn risk_emoji(risk: f64) -> &'static str {
    if risk >= 7.0 {
        "🚨"
    } else if risk >= 4.0 {
        "⚠️"
    } else {
        "ℹ️"
    }
}
