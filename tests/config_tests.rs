//! Configuration files and the config manager
use corp_registry_lib::infrastructure::{AppConfig, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn json_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "site": { "max_results": 5 }, "parsing": { "decode_protected_email": true } }"#,
    )
    .unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.site.max_results, 5);
    assert!(config.parsing.decode_protected_email);
    assert_eq!(config.site.base_url, "https://www.zaubacorp.com");
    assert_eq!(config.fetcher.timeout_seconds, 30);
}

#[test]
fn toml_file_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn invalid_values_fail_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "site": { "max_results": 0 } }"#).unwrap();

    assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Validation { .. })));
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempdir().unwrap();
    let result = AppConfig::from_file(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Load { .. })));
}

#[tokio::test]
async fn manager_creates_then_reloads_the_file() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("corp-registry/config.json"));

    let created = manager.load_config().await.unwrap();
    assert_eq!(created, AppConfig::default());
    assert!(manager.config_path().exists());

    let mut changed = created.clone();
    changed.site.max_results = 7;
    manager.save_config(&changed).await.unwrap();

    let reloaded = manager.load_config().await.unwrap();
    assert_eq!(reloaded.site.max_results, 7);

    let reset = manager.reset_to_defaults().await.unwrap();
    assert_eq!(reset.site.max_results, 50);
}
