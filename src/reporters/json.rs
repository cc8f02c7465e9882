//! JSON reporter
//!
//! Outputs the full AttackChain as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::AttackChain;
use anyhow::Result;

/// Render chain as JSON
pub fn render(chain: &AttackChain) -> Result<String> {
    Ok(serde_json::to_string_pretty(chain)?)
}

/// Render chain as compact JSON (single line)
pub fn render_compact(chain: &AttackChain) -> Result<String> {
    Ok(serde_json::to_string(chain)?)
}

/// Render ranked chains as a JSON array
pub fn render_all(chains: &[AttackChain]) -> Result<String> {
    Ok(serde_json::to_string_pretty(chains)?)
}
