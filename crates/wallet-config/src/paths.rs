use std::{env, path::PathBuf};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".wallet";
const HOME_ENV: &str = "WALLET_HOME";

/// Application data directory: `$WALLET_HOME` when set, else `~/.wallet`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
