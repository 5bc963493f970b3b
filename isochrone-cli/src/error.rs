//! CLI error type.

use isochrone::config::ConfigError;
use isochrone::engine::IsochroneError;
use isochrone::logging::LoggingError;
use isochrone::provider::ProviderError;
use isochrone::request::ValidationError;
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Isochrone computation failed: {0}")]
    Compute(#[from] IsochroneError),

    #[error("Routing provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("Failed to encode GeoJSON: {0}")]
    Output(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Bad input exits with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(_) => 2,
            _ => 1,
        }
    }
}
