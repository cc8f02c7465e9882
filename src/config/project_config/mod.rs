//! Analysis configuration support
//!
//! Loads scoring and analysis settings from `attackchain.toml`.
//!
//! # Configuration Format
//!
//! ```toml
//! # attackchain.toml
//!
//! [scoring]
//! missing_edge = "skip"      # skip | zero
//! parallel_edges = "first"   # first | max
//!
//! [scoring.severity_multipliers]
//! critical = 1.5
//! high = 1.2
//!
//! [analysis]
//! entry_category = "entry"
//! exit_category = "exfiltration"
//! max_nodes = 64
//!
//! [defaults]
//! format = "json"
//! ```
//!
//! Lookup order: an explicit `--config` path, `./attackchain.toml`, then
//! `<config dir>/attackchain/config.toml`. Missing keys take defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::{Category, Severity};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "attackchain.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub analysis: AnalysisSettings,

    #[serde(default)]
    pub defaults: CliDefaults,
}

/// How a path step with no stored edge affects path probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingEdgePolicy {
    /// The step contributes no factor (probability unchanged)
    #[default]
    Skip,
    /// The whole path probability becomes 0
    Zero,
}

/// Which edge is used when several connect the same ordered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParallelEdgePolicy {
    /// First stored edge wins
    #[default]
    First,
    /// Highest-probability edge wins
    Max,
}

/// Scoring configuration for path probability and risk
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub missing_edge: MissingEdgePolicy,

    #[serde(default)]
    pub parallel_edges: ParallelEdgePolicy,

    #[serde(default)]
    pub severity_multipliers: SeverityMultipliers,
}

/// CVSS weighting per severity label
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeverityMultipliers {
    #[serde(default = "default_critical")]
    pub critical: f64,
    #[serde(default = "default_high")]
    pub high: f64,
    #[serde(default = "default_one")]
    pub medium: f64,
    #[serde(default = "default_low")]
    pub low: f64,
    #[serde(default = "default_one")]
    pub unknown: f64,
}

impl Default for SeverityMultipliers {
    fn default() -> Self {
        Self {
            critical: default_critical(),
            high: default_high(),
            medium: default_one(),
            low: default_low(),
            unknown: default_one(),
        }
    }
}

fn default_critical() -> f64 {
    1.5
}
fn default_high() -> f64 {
    1.2
}
fn default_one() -> f64 {
    1.0
}
fn default_low() -> f64 {
    0.8
}

impl SeverityMultipliers {
    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unknown => self.unknown,
        }
    }

    /// All multipliers finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.critical, self.high, self.medium, self.low, self.unknown]
            .iter()
            .all(|m| m.is_finite() && *m >= 0.0)
    }
}

/// Terminal selection and size limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_entry_category")]
    pub entry_category: Category,

    #[serde(default = "default_exit_category")]
    pub exit_category: Category,

    /// Graphs larger than this are rejected by sources before analysis
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            entry_category: default_entry_category(),
            exit_category: default_exit_category(),
            max_nodes: default_max_nodes(),
        }
    }
}

fn default_entry_category() -> Category {
    Category::Entry
}
fn default_exit_category() -> Category {
    Category::Exfiltration
}
fn default_max_nodes() -> usize {
    64
}

/// CLI defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    pub format: Option<String>,
}

impl AnalysisConfig {
    /// Replace invalid values with defaults, logging what was reset
    fn sanitize(mut self, origin: &Path) -> Self {
        if !self.scoring.severity_multipliers.is_valid() {
            warn!(
                "Invalid severity multipliers in {}, using defaults",
                origin.display()
            );
            self.scoring.severity_multipliers = SeverityMultipliers::default();
        }
        if self.analysis.max_nodes == 0 {
            warn!("max_nodes = 0 in {}, using default", origin.display());
            self.analysis.max_nodes = default_max_nodes();
        }
        self
    }
}

/// User-level config path (`<config dir>/attackchain/config.toml`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("attackchain").join("config.toml"))
}

/// Load configuration.
///
/// An explicit path must load cleanly. Discovered files that fail to parse
/// are logged and skipped.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<AnalysisConfig> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        return Ok(config.sanitize(path));
    }

    let candidates = std::iter::once(dir.join(CONFIG_FILE_NAME)).chain(user_config_path());
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_toml_config(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return Ok(config.sanitize(&path));
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    Ok(AnalysisConfig::default())
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Commented starter file written by `attackchain init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# attackchain configuration

[scoring]
# How a path step without a stored edge counts: "skip" (no factor) or "zero"
missing_edge = "skip"

# Which of several parallel edges to use: "first" or "max"
parallel_edges = "first"

[scoring.severity_multipliers]
critical = 1.5
high = 1.2
medium = 1.0
low = 0.8
unknown = 1.0

[analysis]
# Node categories that bound the attack chain
entry_category = "entry"
exit_category = "exfiltration"

# Refuse graphs larger than this (path enumeration is exponential)
max_nodes = 64

[defaults]
# Default output format (text, json, markdown)
format = "text"
"#;

#[cfg(test)]
mod tests;
