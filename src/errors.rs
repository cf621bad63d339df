use thiserror::Error;
use wallet_config::ConfigError;
use wallet_core::CoreError;

/// Failures surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Process exit code: 2 for rejected input, 3 for unknown ids, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(CoreError::InvalidInput(_)) | CliError::InvalidArgument(_) => 2,
            CliError::Core(CoreError::NotFound(_)) => 3,
            _ => 1,
        }
    }
}
