//! Sharding configuration: the algorithm property bag and rule files.

use crate::error::{ConfigError, Result, ShardingError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::path::Path;

/// Scalar property value as written in a TOML/YAML rule file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PropertyValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    fn into_text(self) -> String {
        match self {
            PropertyValue::Integer(v) => v.to_string(),
            // Debug keeps the fraction/exponent (`16.0`), so integer parsing rejects it.
            PropertyValue::Float(v) => format!("{:?}", v),
            PropertyValue::Bool(v) => v.to_string(),
            PropertyValue::Text(v) => v,
        }
    }
}

/// String-keyed algorithm properties (`sharding-count`, `table-sharding-count`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, PropertyValue>")]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl From<BTreeMap<String, PropertyValue>> for Properties {
    fn from(raw: BTreeMap<String, PropertyValue>) -> Self {
        Self {
            entries: raw.into_iter().map(|(k, v)| (k, v.into_text())).collect(),
        }
    }
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read a mandatory positive integer property.
    ///
    /// Missing keys and values that are not integers `>= 1` both fail with a
    /// configuration error naming `key`.
    pub fn require_positive(&self, algorithm: &str, key: &'static str) -> Result<NonZeroU32> {
        let raw = self.get(key).ok_or_else(|| {
            ShardingError::configuration(algorithm, ConfigError::MissingProperty(key))
        })?;

        raw.trim()
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| {
                ShardingError::configuration(
                    algorithm,
                    ConfigError::InvalidProperty {
                        key,
                        value: raw.to_string(),
                    },
                )
            })
    }
}

/// Algorithm section of a rule: type tag plus its properties
#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmConfig {
    #[serde(rename = "type")]
    pub algorithm_type: String,
    #[serde(default)]
    pub props: Properties,
}

/// Sharding rule for one logic table.
///
/// ```toml
/// logic-table = "t_order"
/// sharding-column = "user_id"
/// actual-data-nodes = ["ds_0", "ds_1"]
///
/// [algorithm]
/// type = "CLASS_BASED"
///
/// [algorithm.props]
/// sharding-count = 16
/// table-sharding-count = 8
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShardingRuleConfig {
    pub logic_table: String,
    pub sharding_column: String,
    pub actual_data_nodes: Vec<String>,
    pub algorithm: AlgorithmConfig,
}

const RULE_SCOPE: &str = "sharding rule";

impl ShardingRuleConfig {
    /// Load a rule file; the format follows the extension (`.toml`, `.yaml`, `.yml`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ShardingError::configuration(RULE_SCOPE, ConfigError::Io(e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Err(ShardingError::configuration(
                RULE_SCOPE,
                ConfigError::Parse(format!("unsupported rule file format: {}", path.display())),
            )),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ShardingError::configuration(RULE_SCOPE, ConfigError::Parse(e.to_string())))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| ShardingError::configuration(RULE_SCOPE, ConfigError::Parse(e.to_string())))
    }
}
