use rp_reporter::config::{default_launch_name, Config};
use rp_reporter::model::LaunchMode;
use std::path::PathBuf;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.launch.name, default_launch_name());
    assert_eq!(config.launch.mode, LaunchMode::Default);
    assert!(config.launch.skipped_issue);
    assert!(!config.launch.is_launch_merge_required);
    assert!(config.launch.attributes.is_empty());
    assert!(config.artifacts.screenshots_dir.is_none());
    assert_eq!(config.merge.lock_dir, PathBuf::from("."));
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_from_file_reads_partial_config() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(".rpreporterrc.toml");
    std::fs::write(&path, "[launch]\nname = \"regression\"\n").unwrap();

    let config = Config::load_from_file(&path).expect("config loads");

    assert_eq!(config.launch.name, "regression");
    assert!(config.launch.skipped_issue);
}

#[test]
fn test_load_from_missing_file_is_error() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    assert!(Config::load_from_file(&dir.path().join("absent.toml")).is_err());
}
