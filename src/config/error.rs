//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating skill configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
