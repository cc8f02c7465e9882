use super::*;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = AnalysisConfig::default();
    assert_eq!(config.scoring.missing_edge, MissingEdgePolicy::Skip);
    assert_eq!(config.scoring.parallel_edges, ParallelEdgePolicy::First);
    assert_eq!(config.analysis.entry_category, Category::Entry);
    assert_eq!(config.analysis.exit_category, Category::Exfiltration);
    assert_eq!(config.analysis.max_nodes, 64);
    assert!(config.defaults.format.is_none());
}

#[test]
fn test_severity_multiplier_table() {
    let m = SeverityMultipliers::default();
    assert_eq!(m.for_severity(Severity::Critical), 1.5);
    assert_eq!(m.for_severity(Severity::High), 1.2);
    assert_eq!(m.for_severity(Severity::Medium), 1.0);
    assert_eq!(m.for_severity(Severity::Low), 0.8);
    assert_eq!(m.for_severity(Severity::Unknown), 1.0);
    assert!(m.is_valid());

    let bad = SeverityMultipliers {
        critical: -1.0,
        ..Default::default()
    };
    assert!(!bad.is_valid());
}

#[test]
fn test_template_parses_to_defaults() {
    let config: AnalysisConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("parse template");
    assert_eq!(
        config.scoring.severity_multipliers,
        SeverityMultipliers::default()
    );
    assert_eq!(config.analysis.max_nodes, 64);
    assert_eq!(config.defaults.format.as_deref(), Some("text"));
}

#[test]
fn test_partial_toml() {
    let toml = r#"
[scoring]
missing_edge = "zero"
parallel_edges = "max"

[scoring.severity_multipliers]
critical = 2.0

[analysis]
entry_category = "vulnerability"
"#;
    let config: AnalysisConfig = toml::from_str(toml).expect("parse partial config");
    assert_eq!(config.scoring.missing_edge, MissingEdgePolicy::Zero);
    assert_eq!(config.scoring.parallel_edges, ParallelEdgePolicy::Max);
    assert_eq!(config.scoring.severity_multipliers.critical, 2.0);
    assert_eq!(config.scoring.severity_multipliers.high, 1.2);
    assert_eq!(config.analysis.entry_category, Category::Vulnerability);
    assert_eq!(config.analysis.exit_category, Category::Exfiltration);
}

#[test]
fn test_load_from_directory() {
    let dir = tempdir().expect("create temp dir");
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[analysis]\nmax_nodes = 12\n",
    )
    .expect("write config");

    let config = load_config(None, dir.path()).expect("load config");
    assert_eq!(config.analysis.max_nodes, 12);
}

#[test]
fn test_explicit_path_must_parse() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[scoring\nmissing_edge = ").expect("write config");

    assert!(load_config(Some(&path), dir.path()).is_err());
    assert!(load_config(Some(&dir.path().join("absent.toml")), dir.path()).is_err());
}

#[test]
fn test_invalid_values_are_reset() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        "[scoring.severity_multipliers]\nhigh = -3.0\n\n[analysis]\nmax_nodes = 0\n",
    )
    .expect("write config");

    let config = load_config(Some(&path), dir.path()).expect("load config");
    assert_eq!(
        config.scoring.severity_multipliers,
        SeverityMultipliers::default()
    );
    assert_eq!(config.analysis.max_nodes, 64);
}
