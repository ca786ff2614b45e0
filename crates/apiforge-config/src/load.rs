// crates/apiforge-config/src/load.rs
// ============================================================================
// Module: API Forge Configuration Loading
// Description: File loading, format detection, and structural pruning.
// Purpose: Turn a declared YAML/JSON/TOML document into a typed config tree.
// Dependencies: serde_json, serde_yaml, toml, tracing
// ============================================================================

//! ## Overview
//! Configuration is loaded from disk with strict size and path limits. The
//! document is parsed into an order-preserving JSON value, pruned of
//! segment, collection and endpoint entries that are not maps, and only then
//! deserialized into [`ApiConfig`]. Pruned entries are logged and skipped so
//! one malformed entry never blocks the rest of the tree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::model::ApiConfig;
use crate::model::Segment;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "apiforge.yaml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "APIFORGE_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Selects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(ConfigError::Invalid(format!("unsupported config extension: '{other}'"))),
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl ApiConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading or parsing fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let format = ConfigFormat::from_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content, format)
    }

    /// Parses configuration text in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let mut document = parse_document(content, format)?;
        prune_document(&mut document);
        serde_json::from_value(document).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}

/// Parses text into an order-preserving JSON value.
fn parse_document(content: &str, format: ConfigFormat) -> Result<Value, ConfigError> {
    let parsed = match format {
        ConfigFormat::Yaml => serde_yaml::from_str::<serde_yaml::Value>(content)
            .map_err(|err| err.to_string())
            .and_then(|value| serde_json::to_value(value).map_err(|err| err.to_string())),
        ConfigFormat::Json => serde_json::from_str::<Value>(content).map_err(|err| err.to_string()),
        ConfigFormat::Toml => toml::from_str::<toml::Value>(content)
            .map_err(|err| err.to_string())
            .and_then(|mut value| {
                stringify_datetimes(&mut value);
                serde_json::to_value(value).map_err(|err| err.to_string())
            }),
    };
    match parsed.map_err(ConfigError::Parse)? {
        Value::Null => Ok(Value::Object(Map::new())),
        value @ Value::Object(_) => Ok(value),
        _ => Err(ConfigError::Parse("config root must be a map".to_string())),
    }
}

/// Replaces native TOML datetimes with their RFC 3339 text.
fn stringify_datetimes(value: &mut toml::Value) {
    match value {
        toml::Value::Datetime(datetime) => *value = toml::Value::String(datetime.to_string()),
        toml::Value::Array(items) => items.iter_mut().for_each(stringify_datetimes),
        toml::Value::Table(table) => table.iter_mut().for_each(|(_, item)| stringify_datetimes(item)),
        _ => {}
    }
}

// ============================================================================
// SECTION: Pruning
// ============================================================================

/// Drops provider, segment, collection and endpoint entries that are not maps.
fn prune_document(document: &mut Value) {
    let Some(providers) = document.get_mut("providers") else {
        return;
    };
    let Some(providers) = as_map_or_reset(providers, "providers") else {
        return;
    };
    retain_maps(providers, "provider");
    for (provider_name, provider) in providers.iter_mut() {
        let Value::Object(provider) = provider else {
            continue;
        };
        for segment in Segment::ALL {
            let Some(collections) = provider.get_mut(segment.as_str()) else {
                continue;
            };
            let Some(collections) = as_map_or_reset(collections, segment.as_str()) else {
                continue;
            };
            retain_maps(collections, "collection");
            for (collection_name, collection) in collections.iter_mut() {
                let Some(endpoints) = collection.get_mut("endpoints") else {
                    continue;
                };
                let Some(endpoints) = as_map_or_reset(endpoints, "endpoints") else {
                    tracing::debug!(
                        provider = %provider_name,
                        collection = %collection_name,
                        "endpoints reset to empty map"
                    );
                    continue;
                };
                retain_maps(endpoints, "endpoint");
            }
        }
    }
}

/// Returns the map behind `value`, replacing non-map values with an empty map.
fn as_map_or_reset<'a>(value: &'a mut Value, label: &str) -> Option<&'a mut Map<String, Value>> {
    if !value.is_object() {
        if !value.is_null() {
            tracing::warn!(section = label, "skipping non-map config section");
        }
        *value = Value::Object(Map::new());
        return None;
    }
    value.as_object_mut()
}

/// Removes entries whose value is not a map (null entries become empty maps).
fn retain_maps(entries: &mut Map<String, Value>, label: &str) {
    entries.retain(|name, entry| match entry {
        Value::Object(_) => true,
        Value::Null => {
            *entry = Value::Object(Map::new());
            true
        }
        _ => {
            tracing::warn!(kind = label, name = %name, "skipping non-map config entry");
            false
        }
    });
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// Document parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let path_str = path.to_string_lossy();
    if path_str.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if let Component::Normal(value) = component
            && value.len() > MAX_PATH_COMPONENT_LENGTH
        {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
