use pretty_assertions::assert_eq;
use sadl_shell::{ShellConfig, load_config};
use sadl_workflow::WorkflowConfig;
use std::io::Write;

#[test]
fn empty_document_gives_defaults() {
    let config = ShellConfig::from_toml("").unwrap();
    assert_eq!(config, ShellConfig::default());
    assert_eq!(config.workflow, WorkflowConfig::default());
    assert_eq!(config.workflow.default_product, "SADL-PRO");
    assert_eq!(config.workflow.activation_timeout_ms, 30_000);
}

#[test]
fn partial_document_keeps_other_defaults() {
    let config = ShellConfig::from_toml(
        r#"
simulated_latency_ms = 250

[workflow]
log_capacity = 50
"#,
    )
    .unwrap();
    assert_eq!(config.simulated_latency_ms, 250);
    assert_eq!(config.workflow.log_capacity, 50);
    assert_eq!(config.workflow.default_years, 1);
    assert_eq!(config.workflow.base_url, "http://www.omnicheck.co.za");
}

#[test]
fn invalid_document_is_an_error() {
    let err = ShellConfig::from_toml("workflow = 3").unwrap_err();
    assert!(err.to_string().contains("parse"));
}

#[test]
fn loads_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[workflow]\nactivation_timeout_ms = 1500").unwrap();

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.workflow.activation_timeout_ms, 1500);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
