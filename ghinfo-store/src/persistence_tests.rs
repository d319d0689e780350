//! Persistence round-trip and edge case tests.

use tempfile::TempDir;

use crate::config::Config;
use crate::error::StoreError;
use crate::persistence::{ensure_dir, load_json, save_json};
use ghinfo_core::{SortDirection, SortKey};

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("deeply").join("nested").join("test.json");

    save_json(&nested, &serde_json::json!({"key": "value"}))
        .await
        .unwrap();
    assert!(nested.exists());

    let loaded: serde_json::Value = load_json(&nested).await.unwrap();
    assert_eq!(loaded["key"], "value");
}

#[tokio::test]
async fn test_save_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    save_json(&path, &Config::default()).await.unwrap();
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("test_dir");

    ensure_dir(&dir).await.unwrap();
    ensure_dir(&dir).await.unwrap();
    assert!(dir.is_dir());
}

// ============================================================================
// Config Tests
// ============================================================================

#[tokio::test]
async fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ghinfo").join("config.json");

    let config = Config {
        api_base_url: "https://ghe.example.com/api/v3".into(),
        concurrency: 3,
        sort_key: SortKey::StarTotal,
        sort_direction: SortDirection::Descending,
        ..Config::default()
    };
    config.save_to(&path).await.unwrap();

    let loaded = Config::load_from(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_missing_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let loaded = Config::load_from(&temp_dir.path().join("absent.json"))
        .await
        .unwrap();
    assert_eq!(loaded, Config::default());
}

#[tokio::test]
async fn test_malformed_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let err = Config::load_from(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
}

#[tokio::test]
async fn test_invalid_config_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    tokio::fs::write(&path, r#"{"timeout_secs": 0}"#).await.unwrap();

    let err = Config::load_from(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::Config(_)));
}
