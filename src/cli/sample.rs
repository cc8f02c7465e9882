//! Sample command - print the built-in demonstration graph

use anyhow::Result;

use attackchain::source::{GraphDocument, SampleCatalog};

/// Run the sample command
pub fn run(format: &str) -> Result<()> {
    print!("{}", render(&SampleCatalog::document(), format)?);
    Ok(())
}

fn render(document: &GraphDocument, format: &str) -> Result<String> {
    match format {
        "toml" => Ok(toml::to_string(document)?),
        _ => Ok(serde_json::to_string_pretty(document)? + "\n"),
    }
}
