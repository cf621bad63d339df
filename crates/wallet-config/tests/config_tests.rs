use std::fs;

use wallet_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_targets_rials_on_port_4000() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "IRR");
    assert_eq!(cfg.locale, "en-GB");
    assert_eq!(cfg.server.port, 4000);
    assert!(cfg.data_file.is_none());
}

#[test]
fn missing_config_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(&dir.path().join("home")).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(!manager.config_path().exists());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency = "USD".to_string();
    cfg.data_file = Some("ledger.json".into());
    cfg.server.port = 5050;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn partial_config_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "currency": "EUR" }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.locale, "en-GB");
    assert!(loaded.ui_color_enabled);
    assert_eq!(loaded.server.host, "127.0.0.1");
}

#[test]
fn malformed_config_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "currency = EUR").expect("write");

    let err = ConfigManager::new(path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Serde(_)));
}
