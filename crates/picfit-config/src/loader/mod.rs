//! Layered configuration resolution.
//!
//! Each load call layers the defaults floor, the environment overlay, and
//! the explicit source into one value tree, then decodes it once into
//! [`Config`].

mod env;
mod merge;
mod source;


use crate::{Config, ConfigError};
use log::{debug, info};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::Path;

pub use source::SourceFormat;

/// Isolated merge context for configuration resolution.
///
/// A resolver captures its environment once at construction and every load
/// call assembles its own merge tree, so concurrent loads never share
/// mutable state.
#[derive(Debug, Clone)]
pub struct Resolver {
    env: BTreeMap<String, String>,
}

impl Resolver {
    /// Create a resolver from a snapshot of the process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped; no
    /// tabled key has one.
    pub fn new() -> Self {
        Self::with_env(std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Create a resolver from explicit `(NAME, value)` variable pairs.
    ///
    /// Pairs are matched exactly as process variables would be
    /// (`PICFIT_PORT=8080`); names outside the override table are ignored.
    pub fn with_env<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            env: vars
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Resolve config from the file at `path`.
    ///
    /// The format is chosen by extension (`.json`, `.yaml`/`.yml`, `.toml`).
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let tree = source::read_file(path)?;
        self.resolve(tree)
    }

    /// Resolve config from an inline JSON payload.
    pub fn load_from_content(&self, content: &str) -> Result<Config, ConfigError> {
        debug!("loading config from raw contents (len={})", content.len());
        let tree = source::parse(SourceFormat::Json, content)?;
        self.resolve(tree)
    }

    /// Merge floor, environment overlay and source, then decode and
    /// normalize. Either every step succeeds or the error propagates; no
    /// partial config escapes.
    fn resolve(&self, source: Value) -> Result<Config, ConfigError> {
        let defaults = Config::default();
        let mut merged = default_floor(&defaults)?;
        merge::merge_values(&mut merged, &env::overlay(&self.env)?);
        merge::merge_values(&mut merged, &source);

        let mut config: Config = serde_json::from_value(merged)?;

        // A zero quality or empty default_format reads as "unset"; an
        // explicit zero from a source is indistinguishable from an absent
        // key here and is re-defaulted as well.
        if config.options.quality == 0 {
            config.options.quality = defaults.options.quality;
        }
        if config.options.default_format.is_empty() {
            config.options.default_format = defaults.options.default_format;
        }

        Ok(config)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load config from a file path, overlaying the process environment.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Resolver::new().load_from_path(path)
    }

    /// Load config from inline JSON, overlaying the process environment.
    pub fn load_from_content(content: &str) -> Result<Self, ConfigError> {
        Resolver::new().load_from_content(content)
    }
}

/// Default sections keyed by top-level name; any key set by neither the
/// environment nor the source resolves to these values.
fn default_floor(defaults: &Config) -> Result<Value, ConfigError> {
    Ok(json!({
        "options": serde_json::to_value(&defaults.options)?,
        "shard": serde_json::to_value(&defaults.shard)?,
        "port": defaults.port,
        "kvstore": serde_json::to_value(&defaults.kvstore)?,
    }))
}
