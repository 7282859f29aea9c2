use std::fmt;

use thiserror::Error;

/// Which part of the bus description an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Bus,
    Default,
    Client,
    Group,
    Server,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Bus => "bus",
            EntityKind::Default => "default record",
            EntityKind::Client => "client",
            EntityKind::Group => "group",
            EntityKind::Server => "server",
        };
        f.write_str(label)
    }
}

/// Everything that can go wrong between a parsed bus description and the
/// emitted artifacts. All variants abort the whole run; no partial output
/// is written.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse bus description JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("{kind} '{entity}' is missing field '{field}', which the default record does not supply either")]
    MissingField {
        kind: EntityKind,
        entity: String,
        field: &'static str,
    },

    #[error("{kind} '{entity}' declares unrecognized field '{field}'")]
    UnknownField {
        kind: EntityKind,
        entity: String,
        field: String,
    },

    #[error("{kind} '{entity}' field '{field}' is not a valid {expected}")]
    FieldType {
        kind: EntityKind,
        entity: String,
        field: &'static str,
        expected: &'static str,
    },

    #[error("duplicate {kind} identifier '{id}'")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("client '{entity}' references group '{reference}', which is not declared")]
    DanglingReference { entity: String, reference: String },

    #[error("{kind} '{entity}' field '{field}' is {value}, allowed range is {min}..={max}")]
    Range {
        kind: EntityKind,
        entity: String,
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("{kind} '{entity}' key '{field}' is {actual} bytes long, expected exactly {expected}")]
    KeyLength {
        kind: EntityKind,
        entity: String,
        field: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("cannot render {kind} '{entity}' field '{field}': value {value} does not fit the target width")]
    Render {
        kind: EntityKind,
        entity: String,
        field: &'static str,
        value: u64,
    },
}
