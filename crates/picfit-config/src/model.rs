//! Configuration schema for picfit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default image output format.
pub const DEFAULT_FORMAT: &str = "png";
/// Default quality for processed images.
pub const DEFAULT_QUALITY: u8 = 85;
/// Default port for the application server.
pub const DEFAULT_PORT: u16 = 3001;
/// Default shard width for generated file paths.
pub const DEFAULT_SHARD_WIDTH: usize = 0;
/// Default shard depth for generated file paths.
pub const DEFAULT_SHARD_DEPTH: usize = 0;
/// Default shard rest-only behavior.
pub const DEFAULT_SHARD_REST_ONLY: bool = true;
/// Base user agent; the default instance reports `picfit/<version>`.
pub const DEFAULT_USER_AGENT: &str = "picfit";
/// Default mimetype detection strategy.
pub const DEFAULT_MIMETYPE_DETECTOR: &str = "extension";
/// Logger level used when none is configured.
pub const DEFAULT_LOGGER_LEVEL: &str = "info";

/// Root config for the picfit service.
///
/// `Config::default()` is the baseline instance the resolver uses as its
/// precedence floor; after resolution `options`, `shard`, `port` and
/// `kvstore` are always populated, while `storage`, `sentry`, the CORS
/// lists and `logger.level` may stay absent or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub sentry: Option<Sentry>,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub shard: Shard,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub options: Options,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub allowed_methods: Vec<String>,
    #[serde(default)]
    pub allowed_headers: Vec<String>,
    #[serde(default)]
    pub storage: Option<Storages>,
    #[serde(default)]
    pub kvstore: KVStore,
    #[serde(default)]
    pub logger: Logger,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            sentry: None,
            secret_key: String::new(),
            shard: Shard::default(),
            port: default_port(),
            options: Options::default(),
            allowed_origins: Vec::new(),
            allowed_methods: Vec::new(),
            allowed_headers: Vec::new(),
            storage: None,
            kvstore: KVStore::default(),
            logger: Logger::default(),
        }
    }
}

/// Behavioral flags and tunables for image processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub enable_upload: bool,
    #[serde(default)]
    pub enable_delete: bool,
    #[serde(default)]
    pub enable_stats: bool,
    /// Format used when a request names none; empty reads as "unset".
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Format forced onto every response; empty means "keep the source's".
    #[serde(default)]
    pub format: String,
    /// Output quality, conceptually 0-100; zero reads as "unset".
    #[serde(default = "default_quality")]
    pub quality: u8,
    #[serde(default)]
    pub allowed_sizes: Vec<AllowedSize>,
    #[serde(default = "default_user_agent")]
    pub default_user_agent: String,
    #[serde(default = "default_mimetype_detector")]
    pub mimetype_detector: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enable_upload: false,
            enable_delete: false,
            enable_stats: false,
            default_format: default_format(),
            format: String::new(),
            quality: default_quality(),
            allowed_sizes: Vec::new(),
            default_user_agent: default_user_agent(),
            mimetype_detector: default_mimetype_detector(),
        }
    }
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

/// Default user agent with the crate version embedded.
fn default_user_agent() -> String {
    format!("{DEFAULT_USER_AGENT}/{}", env!("CARGO_PKG_VERSION"))
}

fn default_mimetype_detector() -> String {
    DEFAULT_MIMETYPE_DETECTOR.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// A single permitted output size; sequence order is caller-significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AllowedSize {
    pub width: u32,
    pub height: u32,
}

/// Key/value store used for image metadata and caches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KVStore {
    /// Backend type ("dummy", "redis", ...), an open enumeration.
    #[serde(rename = "type", default = "default_kvstore_type")]
    pub store_type: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub db: u32,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub max_entries: usize,
}

impl Default for KVStore {
    fn default() -> Self {
        Self {
            store_type: default_kvstore_type(),
            host: String::new(),
            port: 0,
            password: String::new(),
            db: 0,
            prefix: String::new(),
            max_entries: 0,
        }
    }
}

fn default_kvstore_type() -> String {
    "dummy".to_string()
}

/// A single storage backend descriptor (fs, s3, ...).
///
/// No cross-field validation happens here; backend-specific fields are
/// carried verbatim for the storage subsystem to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Storage {
    /// Backend type.
    #[serde(rename = "type", default)]
    pub storage_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub acl: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub bucket_name: String,
    #[serde(default)]
    pub secret_access_key: String,
}

/// Source and destination storage backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Storages {
    #[serde(default)]
    pub src: Option<Storage>,
    #[serde(default)]
    pub dst: Option<Storage>,
}

/// Error reporting sink settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Sentry {
    #[serde(default)]
    pub dsn: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Sharding geometry for generated file paths.
///
/// Consumed by the path sharding layer; this crate only carries the values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shard {
    /// Characters consumed per directory level.
    #[serde(default = "default_shard_width")]
    pub width: usize,
    /// Number of directory levels.
    #[serde(default = "default_shard_depth")]
    pub depth: usize,
    /// Whether the final level takes all remaining characters.
    #[serde(default = "default_shard_rest_only")]
    pub rest_only: bool,
}

impl Default for Shard {
    fn default() -> Self {
        Self {
            width: default_shard_width(),
            depth: default_shard_depth(),
            rest_only: default_shard_rest_only(),
        }
    }
}

fn default_shard_width() -> usize {
    DEFAULT_SHARD_WIDTH
}

fn default_shard_depth() -> usize {
    DEFAULT_SHARD_DEPTH
}

fn default_shard_rest_only() -> bool {
    DEFAULT_SHARD_REST_ONLY
}

/// Logger settings for the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Logger {
    #[serde(default)]
    pub level: String,
}

impl Logger {
    /// Configured level, or [`DEFAULT_LOGGER_LEVEL`] when unset.
    pub fn level(&self) -> &str {
        if self.level.is_empty() {
            DEFAULT_LOGGER_LEVEL
        } else {
            &self.level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// The baseline instance carries the documented default constants.
    #[test]
    fn default_config_baseline() {
        let config = Config::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.kvstore.store_type, "dummy");
        assert_eq!(config.shard.width, DEFAULT_SHARD_WIDTH);
        assert_eq!(config.shard.depth, DEFAULT_SHARD_DEPTH);
        assert_eq!(config.shard.rest_only, DEFAULT_SHARD_REST_ONLY);
        assert_eq!(config.options.quality, DEFAULT_QUALITY);
        assert_eq!(config.options.default_format, DEFAULT_FORMAT);
        assert_eq!(config.options.mimetype_detector, DEFAULT_MIMETYPE_DETECTOR);
        assert_eq!(config.storage, None);
        assert_eq!(config.sentry, None);
    }

    /// Constructing the baseline twice yields structurally equal values.
    #[test]
    fn default_config_is_idempotent() {
        assert_eq!(Config::default(), Config::default());
    }

    /// The default user agent embeds the crate version.
    #[test]
    fn default_user_agent_embeds_version() {
        let config = Config::default();
        assert_eq!(
            config.options.default_user_agent,
            format!("picfit/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    /// An unset logger level falls back to the module default.
    #[test]
    fn logger_level_falls_back_when_unset() {
        let logger = Logger {
            level: String::new(),
        };
        assert_eq!(logger.level(), DEFAULT_LOGGER_LEVEL);

        let logger = Logger {
            level: "debug".to_string(),
        };
        assert_eq!(logger.level(), "debug");
    }
}
