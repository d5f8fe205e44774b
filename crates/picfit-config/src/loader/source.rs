//! Reading and parsing config sources into a value tree.

use crate::ConfigError;
use log::debug;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;

/// Serialization format of a config source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Strict JSON; also the fixed format for inline content payloads.
    Json,
    /// YAML documents (`.yaml` / `.yml`).
    Yaml,
    /// TOML documents.
    Toml,
}

impl SourceFormat {
    /// Detect the format from a file extension, case-insensitively.
    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        };
        f.write_str(name)
    }
}

/// Read a config file and parse it according to its extension.
///
/// The format is settled before any I/O happens, so an unsupported
/// extension is reported even for files that do not exist.
pub(super) fn read_file(path: &Path) -> Result<Value, ConfigError> {
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let format = SourceFormat::from_extension(ext)
        .ok_or_else(|| ConfigError::UnsupportedFormat(ext.to_string()))?;
    let contents = fs::read_to_string(path)?;
    debug!(
        "parsing config file (path={}, format={format})",
        path.display()
    );
    parse(format, &contents)
}

/// Parse source contents in the given format into a JSON value tree.
///
/// An empty document (a bare YAML/JSON `null`) specifies nothing and maps
/// to an empty object.
pub(super) fn parse(format: SourceFormat, contents: &str) -> Result<Value, ConfigError> {
    let value = match format {
        SourceFormat::Json => {
            serde_json::from_str(contents).map_err(|err| parse_error(format, err))?
        }
        SourceFormat::Yaml => {
            serde_yaml::from_str(contents).map_err(|err| parse_error(format, err))?
        }
        SourceFormat::Toml => toml::from_str(contents).map_err(|err| parse_error(format, err))?,
    };

    Ok(match value {
        Value::Null => Value::Object(Map::new()),
        value => value,
    })
}

fn parse_error(
    format: SourceFormat,
    source: impl std::error::Error + Send + Sync + 'static,
) -> ConfigError {
    ConfigError::Parse {
        format,
        source: Box::new(source),
    }
}
