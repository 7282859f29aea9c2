use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::ConfigError;

/// An entity record as it appears in the input file, before resolution.
pub type RawRecord = Map<String, Value>;

/// Parsed shape of the bus description file. Entity records stay as raw JSON
/// maps so the resolver can do schema-checked two-level lookup over them.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBusConfig {
    pub default: RawRecord,
    pub clients: Vec<RawRecord>,
    pub groups: Vec<RawRecord>,
}

pub fn from_str(raw: &str) -> Result<RawBusConfig, ConfigError> {
    serde_json::from_str::<RawBusConfig>(raw).map_err(Into::into)
}
