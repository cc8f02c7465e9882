//! Configuration module
//!
//! This module handles:
//! - Scoring policies and severity multipliers
//! - Terminal categories and graph size limits
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config,
    user_config_path,
    AnalysisConfig,
    AnalysisSettings,
    CliDefaults,
    MissingEdgePolicy,
    ParallelEdgePolicy,
    ScoringConfig,
    SeverityMultipliers,
    CONFIG_FILE_NAME,
    DEFAULT_CONFIG_TEMPLATE,
};
