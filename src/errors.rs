//! Error types for tokenizer configuration.
//!
//! Tokenization itself never fails; only loading configuration can.

use thiserror::Error;

/// Errors raised while loading or interpreting tokenizer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid tokenizer configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A granularity name that is neither `token` nor `subtoken`.
    #[error("unknown granularity '{0}', expected 'token' or 'subtoken'")]
    UnknownGranularity(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
