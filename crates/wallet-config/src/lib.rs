//! wallet-config
//!
//! User preferences for the wallet tracker and the helpers that locate and
//! persist them.

pub mod error;
pub mod manager;
pub mod model;
pub mod paths;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, ServerConfig};
pub use paths::app_data_dir;
