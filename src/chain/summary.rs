//! Chain summary synthesis

use crate::models::{AttackNode, ChainSummary, Severity};

/// Minutes budgeted per step
const MINUTES_PER_STEP: usize = 30;
/// Extra minutes per critical node on the path
const MINUTES_PER_CRITICAL: usize = 60;

/// Steps beyond this make a path "long"
const LONG_PATH_STEPS: usize = 5;
/// Probability above this is flagged as likely to succeed
const HIGH_SUCCESS_PROBABILITY: f64 = 0.8;

/// Bucketed attack duration for `steps` steps with `critical` critical nodes
pub fn estimate_time(steps: usize, critical: usize) -> &'static str {
    let minutes = steps * MINUTES_PER_STEP + critical * MINUTES_PER_CRITICAL;
    match minutes {
        0..=59 => "<1h",
        60..=120 => "1-2h",
        121..=240 => "2-4h",
        241..=480 => "4-8h",
        _ => ">8h",
    }
}

fn count_severity(nodes: &[&AttackNode], severity: Severity) -> usize {
    nodes.iter().filter(|n| n.severity == severity).count()
}

/// Qualitative flags describing why a path is dangerous
pub fn risk_factors(nodes: &[&AttackNode], steps: usize, probability: f64) -> Vec<String> {
    let mut factors = Vec::new();

    let critical = count_severity(nodes, Severity::Critical);
    if critical > 0 {
        factors.push(format!("{critical} critical vulnerabilities"));
    }
    let high = count_severity(nodes, Severity::High);
    if high > 0 {
        factors.push(format!("{high} high-severity vulnerabilities"));
    }
    if steps > LONG_PATH_STEPS {
        factors.push("long attack path".to_string());
    }
    if probability > HIGH_SUCCESS_PROBABILITY {
        factors.push("high success likelihood".to_string());
    }

    factors
}

/// Summarize a path given its resolved nodes and success probability.
///
/// `path` may contain ids with no node; they count as steps but carry no
/// severity.
pub fn summarize(path: &[String], nodes: &[&AttackNode], probability: f64) -> ChainSummary {
    let total_steps = path.len();
    let critical_vulns = count_severity(nodes, Severity::Critical);

    ChainSummary {
        total_steps,
        critical_vulns,
        estimated_time: estimate_time(total_steps, critical_vulns).to_string(),
        success_probability: probability * 100.0,
        most_likely_path: path.to_vec(),
        risk_factors: risk_factors(nodes, total_steps, probability),
    }
}
