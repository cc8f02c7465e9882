//! Init command - write a starter attackchain.toml

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use attackchain::config::{CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};

/// Run the init command
pub fn run(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    println!("\n{} Initializing attackchain\n", style("🔗").bold());

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Write the demo graph", style("attackchain sample > graph.json").cyan());
    println!("  {} Analyze it", style("attackchain analyze graph.json").cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_once() {
        let dir = tempdir().expect("create temp dir");
        run(dir.path()).expect("init");
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(
            std::fs::read_to_string(&path).expect("read config"),
            DEFAULT_CONFIG_TEMPLATE
        );

        std::fs::write(&path, "# edited").expect("edit config");
        run(dir.path()).expect("init again");
        assert_eq!(std::fs::read_to_string(&path).expect("read config"), "# edited");
    }

    #[test]
    fn test_init_rejects_files() {
        let dir = tempdir().expect("create temp dir");
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "").expect("write file");
        assert!(run(&file).is_err());
    }
}
