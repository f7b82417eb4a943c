use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use workflowdoc::logging::config::{LoggingConfig, CONSOLE_OUTPUT_ENV, LEVEL_ENV};
use workflowdoc::logging::ConsoleOutput;

fn clear_env() {
    env::remove_var(LEVEL_ENV);
    env::remove_var(CONSOLE_OUTPUT_ENV);
}

#[test]
#[serial]
fn defaults_without_config_file() {
    clear_env();
    let root = tempdir().unwrap();
    let config = LoggingConfig::load(Some(root.path())).unwrap();
    assert_eq!(config, LoggingConfig::default());
    assert_eq!(config.default_level, "warn");
    assert_eq!(config.console_output, ConsoleOutput::Stderr);
    assert!(config.log_dir.is_none());
}

#[test]
#[serial]
fn config_file_overrides_defaults() {
    clear_env();
    let root = tempdir().unwrap();
    fs::write(
        root.path().join("workflowdoc.toml"),
        r#"
[logging]
default_level = "debug"
console_output = "stdout"
log_dir = ".workflowdoc/logs"
"#,
    )
    .unwrap();

    let config = LoggingConfig::load(Some(root.path())).unwrap();
    assert_eq!(config.default_level, "debug");
    assert_eq!(config.console_output, ConsoleOutput::Stdout);
    assert_eq!(config.log_dir, Some(PathBuf::from(".workflowdoc/logs")));
}

#[test]
#[serial]
fn env_overrides_config_file() {
    clear_env();
    let root = tempdir().unwrap();
    fs::write(
        root.path().join("workflowdoc.toml"),
        "[logging]\ndefault_level = \"debug\"\nconsole_output = \"stdout\"\n",
    )
    .unwrap();
    env::set_var(LEVEL_ENV, "trace");
    env::set_var(CONSOLE_OUTPUT_ENV, "none");

    let config = LoggingConfig::load(Some(root.path()));
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.default_level, "trace");
    assert_eq!(config.console_output, ConsoleOutput::None);
}

#[test]
#[serial]
fn invalid_console_output_env_is_rejected() {
    clear_env();
    env::set_var(CONSOLE_OUTPUT_ENV, "syslog");
    let result = LoggingConfig::load(None);
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("console_output"));
}

#[test]
#[serial]
fn unparsable_config_file_is_rejected() {
    clear_env();
    let root = tempdir().unwrap();
    fs::write(root.path().join("workflowdoc.toml"), "[logging\n").unwrap();

    let err = LoggingConfig::load(Some(root.path())).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}
