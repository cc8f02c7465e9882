//! Core data models for attack-chain analysis
//!
//! These models describe single attack steps, the transitions between them,
//! and the analysis result handed to reporters and callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity levels for attack steps
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    /// Any label outside the known set. Scores like `medium`.
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Unknown => write!(f, "unknown"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Kill-chain stage an attack step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Entry,
    Vulnerability,
    Exploit,
    #[serde(alias = "privilege")]
    PrivilegeEscalation,
    Persistence,
    Exfiltration,
    /// Any label outside the known set. Sources report it as a validation issue.
    #[serde(other)]
    Unknown,
}

impl Category {
    /// Every recognized category, in kill-chain order
    pub fn all() -> &'static [Category] {
        &[
            Category::Entry,
            Category::Vulnerability,
            Category::Exploit,
            Category::PrivilegeEscalation,
            Category::Persistence,
            Category::Exfiltration,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Entry => "entry",
            Category::Vulnerability => "vulnerability",
            Category::Exploit => "exploit",
            Category::PrivilegeEscalation => "privilege-escalation",
            Category::Persistence => "persistence",
            Category::Exfiltration => "exfiltration",
            Category::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entry" => Ok(Category::Entry),
            "vulnerability" => Ok(Category::Vulnerability),
            "exploit" => Ok(Category::Exploit),
            "privilege-escalation" | "privilege" => Ok(Category::PrivilegeEscalation),
            "persistence" => Ok(Category::Persistence),
            "exfiltration" => Ok(Category::Exfiltration),
            _ => Err(anyhow::anyhow!(
                "Unknown category '{}'. Valid categories: entry, vulnerability, exploit, privilege-escalation, persistence, exfiltration",
                s
            )),
        }
    }
}

/// One attacker-observable step in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "type")]
    pub category: Category,
    #[serde(default)]
    pub severity: Severity,
    /// CVSS base score, 0.0 - 10.0
    #[serde(default)]
    pub cvss: f64,
    /// ATT&CK technique id (e.g. T1190)
    #[serde(default, alias = "mitre")]
    pub technique_ref: String,
    #[serde(default)]
    pub remediation: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl AttackNode {
    pub fn new(id: &str, category: Category, severity: Severity, cvss: f64) -> Self {
        Self {
            id: id.to_string(),
            label: id.to_string(),
            description: String::new(),
            category,
            severity,
            cvss,
            technique_ref: String::new(),
            remediation: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_technique(mut self, technique: &str) -> Self {
        self.technique_ref = technique.to_string();
        self
    }

    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = remediation.to_string();
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
}

/// A directed transition between two attack steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: String,
    /// Probability the transition succeeds given the previous step did
    pub probability: f64,
    /// Effort metric. Carried through to reports, not scored.
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl AttackEdge {
    pub fn new(id: &str, from: &str, to: &str, probability: f64) -> Self {
        Self {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            label: format!("{:.0}%", probability * 100.0),
            probability,
            weight: 1.0,
            conditions: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_condition(mut self, condition: &str) -> Self {
        self.conditions.push(condition.to_string());
        self
    }
}

/// Lifecycle state of a chain analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChainStatus {
    #[default]
    Completed,
}

impl std::fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Read-only digest of the chosen path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChainSummary {
    pub total_steps: usize,
    pub critical_vulns: usize,
    pub estimated_time: String,
    /// Percentage, 0 - 100
    pub success_probability: f64,
    pub most_likely_path: Vec<String>,
    pub risk_factors: Vec<String>,
}

/// Result of one analysis
///
/// `nodes`/`edges` narrate the most likely path while `risk_score` comes from
/// the highest-risk path. The two paths can differ; `highest_risk_path`
/// records the latter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackChain {
    pub id: String,
    pub name: String,
    pub nodes: Vec<AttackNode>,
    pub edges: Vec<AttackEdge>,
    pub risk_score: f64,
    pub status: ChainStatus,
    pub created_at: DateTime<Utc>,
    pub summary: ChainSummary,
    #[serde(default)]
    pub highest_risk_path: Vec<String>,
}
