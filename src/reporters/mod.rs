//! Output reporters for attack chain results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

pub use json::render_compact as render_json_compact;

use crate::models::AttackChain;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render one chain using an OutputFormat enum
pub fn report_with_format(chain: &AttackChain, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(chain),
        OutputFormat::Json => json::render(chain),
        OutputFormat::Markdown => markdown::render(chain),
    }
}

/// Render a ranked list of chains. JSON output is an array.
pub fn report_all(chains: &[AttackChain], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_all(chains),
        OutputFormat::Json => json::render_all(chains),
        OutputFormat::Markdown => markdown::render_all(chains),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    }
}
