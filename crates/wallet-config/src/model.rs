use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DATA_DIR: &str = "data";
const DATA_FILE: &str = "db.json";

/// User preferences shared by the CLI and the HTTP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Explicit location of the wallet document. Defaults to `<base>/data/db.json`.
    pub data_file: Option<PathBuf>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            locale: Self::default_locale(),
            data_file: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "IRR".into()
    }

    pub fn default_locale() -> String {
        "en-GB".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_file(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => base.join(DATA_DIR).join(DATA_FILE),
        }
    }

    /// Applies `WALLET_*` environment overrides. A bare `PORT` is honoured
    /// too, but `WALLET_PORT` wins when both are set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| env::var(key).ok())
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(currency) = lookup("WALLET_CURRENCY").filter(|v| !v.trim().is_empty()) {
            self.currency = currency.trim().to_uppercase();
        }
        if let Some(path) = lookup("WALLET_DATA_FILE").filter(|v| !v.trim().is_empty()) {
            self.data_file = Some(PathBuf::from(path));
        }
        if let Some(host) = lookup("WALLET_HOST").filter(|v| !v.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(raw) = lookup("WALLET_PORT").or_else(|| lookup("PORT")) {
            self.server.port = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "port",
                value: raw.clone(),
            })?;
        }
        Ok(())
    }
}
