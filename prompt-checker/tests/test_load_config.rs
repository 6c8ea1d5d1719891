use serial_test::serial;
use std::env;
use std::fs::write;
use tempfile::NamedTempFile;

use prompt_checker::load_config::{load_config, resolve_config, Config, DEFAULT_TOKEN_ENV};
use prompt_checker::report::OutputFormat;

fn config_file(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), contents).expect("write config");
    file
}

#[test]
fn test_load_config_full_file() {
    let config_file = config_file(
        r#"
output:
  format: json
download:
  timeout_secs: 5
  token_env: SURVEY_FILES_TOKEN
logging:
  level: debug
"#,
    );

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.download.timeout_secs, 5);
    assert_eq!(config.download.token_env, "SURVEY_FILES_TOKEN");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_load_config_partial_file_keeps_defaults() {
    let config_file = config_file("download:\n  timeout_secs: 12\n");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.output.format, OutputFormat::Text);
    assert_eq!(config.download.timeout_secs, 12);
    assert_eq!(config.download.token_env, DEFAULT_TOKEN_ENV);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_config_empty_file_is_default() {
    let config_file = config_file("   \n");
    let config = load_config(config_file.path()).expect("Empty config should load");
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_config_invalid_yaml_is_error() {
    let config_file = config_file("output:\n  format: [not, a, format]\n");
    let err = load_config(config_file.path()).expect_err("Invalid YAML must fail");
    assert!(
        err.to_string().contains("Failed to parse config YAML"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_load_config_unknown_format_is_error() {
    let config_file = config_file("output:\n  format: xml\n");
    assert!(load_config(config_file.path()).is_err());
}

#[test]
fn test_load_config_missing_file_is_error() {
    let err = load_config("does/not/exist.yaml").expect_err("Missing file must fail");
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_resolve_config_without_path_is_default() {
    let config = resolve_config(None).expect("defaults");
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_bearer_token_read_from_configured_variable() {
    let config_file = config_file("download:\n  token_env: PROMPT_CHECKER_TEST_TOKEN\n");
    let config = load_config(config_file.path()).expect("Config should load");

    env::set_var("PROMPT_CHECKER_TEST_TOKEN", "abc123");
    assert_eq!(config.download.bearer_token().as_deref(), Some("abc123"));

    env::set_var("PROMPT_CHECKER_TEST_TOKEN", "   ");
    assert_eq!(config.download.bearer_token(), None);

    env::remove_var("PROMPT_CHECKER_TEST_TOKEN");
    assert_eq!(config.download.bearer_token(), None);
}
