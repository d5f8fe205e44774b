//! Error types for config loading.

use crate::loader::SourceFormat;
use thiserror::Error;

/// Errors returned while resolving config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config file failed.
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    /// Parsing the source content failed.
    #[error("failed to parse {format} config: {source}")]
    Parse {
        format: SourceFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The file extension names no supported format.
    #[error("unsupported config format: {0:?}")]
    UnsupportedFormat(String),
    /// Mapping the merged tree onto the typed config failed.
    #[error("failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
    /// An override value could not be coerced to its field's type.
    #[error("invalid config value at {path}: {message}")]
    InvalidField { path: String, message: String },
}
