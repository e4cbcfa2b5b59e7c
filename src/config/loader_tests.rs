use std::fs;

use tempfile::TempDir;

use super::*;
use crate::attributes::DisplayDuration;
use crate::scheduler::TiePolicy;

#[test]
fn test_config_path_returns_config_dir() {
    let path = config_path();
    assert!(path.is_some());
    let path = path.unwrap();
    assert!(path.to_string_lossy().contains(".config/entrykit"));
    assert!(path.to_string_lossy().ends_with("config.toml"));
}

#[test]
fn test_parse_config_empty_string() {
    let config = parse_config("").unwrap();
    assert_eq!(config.scheduler.max_priority_ties, TiePolicy::Preempt);
}

#[test]
fn test_parse_config_invalid_syntax() {
    let result = parse_config("[scheduler\nmax_priority_ties = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_load_config_from_path_valid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[scheduler]
max_priority_ties = "enqueue"
"#,
    )
    .unwrap();

    let result = load_config_from_path(&path);
    assert!(result.warning.is_none());
    assert_eq!(result.config.scheduler.max_priority_ties, TiePolicy::Enqueue);
}

#[test]
fn test_load_config_from_path_missing_file_warns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");

    let result = load_config_from_path(&path);
    assert!(result.warning.is_some());
    assert_eq!(result.config.scheduler.max_priority_ties, TiePolicy::Preempt);
}

#[test]
fn test_load_config_from_path_malformed_falls_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[defaults]\ndisplay_duration = -3\n").unwrap();

    let result = load_config_from_path(&path);
    let warning = result.warning.unwrap();
    assert!(warning.contains("Using defaults"));
    assert!(!result.config.defaults.display_duration.is_infinite());
}

#[test]
fn test_parse_config_huge_duration_is_an_error() {
    let result = parse_config("[defaults]\ndisplay_duration = 1e30\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_load_config_from_path_huge_duration_falls_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[defaults]\ndisplay_duration = 1e30\n").unwrap();

    let result = load_config_from_path(&path);
    assert!(result.warning.unwrap().contains("Using defaults"));
    assert_eq!(
        result.config.defaults.display_duration,
        DisplayDuration::default()
    );
}
