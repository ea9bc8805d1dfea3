//! Configuration module tests

use std::fs;
use tempfile::TempDir;
use todo_cli::config::{Config, DEFAULT_URL};
use todo_view::SyncOptions;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.sync_options(), SyncOptions::default());
}

#[test]
fn test_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
url = "http://todo.internal:8080"
timeout_secs = 5
use_template = true
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(config.url.as_deref(), Some("http://todo.internal:8080"));
    assert!(config.sync_options().use_template);
    assert!(!config.sync_options().full_reload_on_toggle);

    let client = config.client_config(None);
    assert_eq!(client.base_url, "http://todo.internal:8080");
    assert_eq!(client.timeout_secs, 5);
    assert_eq!(client.graphql_path, "/graphql");
}

#[test]
fn test_url_flag_wins_over_file() {
    let config = Config {
        url: Some("http://from-file:1".to_string()),
        ..Config::default()
    };
    assert_eq!(
        config.client_config(Some("http://from-flag:2")).base_url,
        "http://from-flag:2"
    );
    assert_eq!(Config::default().client_config(None).base_url, DEFAULT_URL);
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config {
        url: Some("http://localhost:9999".to_string()),
        timeout_secs: Some(12),
        use_template: false,
        full_reload_on_toggle: true,
    };

    config.save_to_path(&path).unwrap();
    assert_eq!(Config::load_from_path(&path).unwrap(), config);
}

#[test]
fn test_broken_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "url = [").unwrap();
    assert!(Config::load_from_path(&path).is_err());
}
