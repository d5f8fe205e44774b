//! Environment variable overlay for config resolution.
//!
//! Every scalar or string-list key is settable through a `PICFIT_*`
//! variable; the table below is the single authoritative mapping from key
//! paths to variables, so the derivation stays auditable without touching
//! the decode layer.

use crate::ConfigError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Namespace prefix for config environment variables.
const ENV_PREFIX: &str = "PICFIT";

/// Shape an override value is coerced into before merging.
#[derive(Debug, Clone, Copy)]
enum Kind {
    Str,
    Int,
    Bool,
    /// Comma-separated strings; entries are trimmed, empties dropped.
    List,
}

/// A single environment-settable config key.
struct EnvKey {
    /// Key path inside the config tree, in external (serialized) names.
    path: &'static [&'static str],
    kind: Kind,
}

const fn key(path: &'static [&'static str], kind: Kind) -> EnvKey {
    EnvKey { path, kind }
}

/// Environment-settable keys. Structured values (`options.allowed_sizes`,
/// `sentry.tags`) stay file/content-only.
const ENV_KEYS: &[EnvKey] = &[
    key(&["debug"], Kind::Bool),
    key(&["secret_key"], Kind::Str),
    key(&["port"], Kind::Int),
    key(&["allowed_origins"], Kind::List),
    key(&["allowed_methods"], Kind::List),
    key(&["allowed_headers"], Kind::List),
    key(&["options", "enable_upload"], Kind::Bool),
    key(&["options", "enable_delete"], Kind::Bool),
    key(&["options", "enable_stats"], Kind::Bool),
    key(&["options", "default_format"], Kind::Str),
    key(&["options", "format"], Kind::Str),
    key(&["options", "quality"], Kind::Int),
    key(&["options", "default_user_agent"], Kind::Str),
    key(&["options", "mimetype_detector"], Kind::Str),
    key(&["shard", "width"], Kind::Int),
    key(&["shard", "depth"], Kind::Int),
    key(&["shard", "rest_only"], Kind::Bool),
    key(&["kvstore", "type"], Kind::Str),
    key(&["kvstore", "host"], Kind::Str),
    key(&["kvstore", "port"], Kind::Int),
    key(&["kvstore", "password"], Kind::Str),
    key(&["kvstore", "db"], Kind::Int),
    key(&["kvstore", "prefix"], Kind::Str),
    key(&["kvstore", "max_entries"], Kind::Int),
    key(&["logger", "level"], Kind::Str),
    key(&["sentry", "dsn"], Kind::Str),
    key(&["storage", "src", "type"], Kind::Str),
    key(&["storage", "src", "location"], Kind::Str),
    key(&["storage", "src", "base_url"], Kind::Str),
    key(&["storage", "src", "region"], Kind::Str),
    key(&["storage", "src", "acl"], Kind::Str),
    key(&["storage", "src", "access_key_id"], Kind::Str),
    key(&["storage", "src", "bucket_name"], Kind::Str),
    key(&["storage", "src", "secret_access_key"], Kind::Str),
    key(&["storage", "dst", "type"], Kind::Str),
    key(&["storage", "dst", "location"], Kind::Str),
    key(&["storage", "dst", "base_url"], Kind::Str),
    key(&["storage", "dst", "region"], Kind::Str),
    key(&["storage", "dst", "acl"], Kind::Str),
    key(&["storage", "dst", "access_key_id"], Kind::Str),
    key(&["storage", "dst", "bucket_name"], Kind::Str),
    key(&["storage", "dst", "secret_access_key"], Kind::Str),
];

/// Build the environment overlay tree from a variable snapshot.
///
/// Variables outside the table are ignored; a tabled variable holding a
/// value of the wrong shape aborts resolution.
pub(super) fn overlay(vars: &BTreeMap<String, String>) -> Result<Value, ConfigError> {
    let mut tree = Value::Object(Map::new());
    for key in ENV_KEYS {
        let name = var_name(key.path);
        let Some(raw) = vars.get(&name) else {
            continue;
        };
        let value = coerce(key.kind, raw).map_err(|message| ConfigError::InvalidField {
            path: key.path.join("."),
            message: format!("{name}: {message}"),
        })?;
        insert(&mut tree, key.path, value);
    }
    Ok(tree)
}

/// Environment variable name for a key path: the uppercased segments joined
/// with underscores behind the namespace prefix.
fn var_name(path: &[&str]) -> String {
    let mut name = String::from(ENV_PREFIX);
    for segment in path {
        name.push('_');
        name.push_str(&segment.to_ascii_uppercase());
    }
    name
}

fn coerce(kind: Kind, raw: &str) -> Result<Value, String> {
    match kind {
        Kind::Str => Ok(Value::String(raw.to_string())),
        Kind::Int => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("expected an integer, got {raw:?}")),
        Kind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(Value::Bool(true)),
            "0" | "false" => Ok(Value::Bool(false)),
            _ => Err(format!("expected a boolean, got {raw:?}")),
        },
        Kind::List => Ok(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(|entry| Value::String(entry.to_string()))
                .collect(),
        )),
    }
}

/// Insert a value at a nested key path, creating intermediate objects.
fn insert(tree: &mut Value, path: &[&str], value: Value) {
    let Some((leaf, parents)) = path.split_last() else {
        return;
    };
    let mut node = tree;
    for segment in parents {
        let Value::Object(map) = node else {
            return;
        };
        node = map
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if let Value::Object(map) = node {
        map.insert((*leaf).to_string(), value);
    }
}
