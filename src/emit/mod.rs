//! Artifact emission
//!
//! Every emitter is a pure function from a derived bus to text or bytes;
//! `emit_bus` fans out over the entities and materializes the complete
//! artifact set in memory. Nothing here touches the filesystem.

mod render;

pub mod binary;
pub mod c_source;

use crate::bus_mgmt::error::{ConfigError, EntityKind};
use crate::bus_mgmt::model::DerivedBus;
use crate::constants::{ARTIFACT_PREFIX, SERVER_NAME};

/// A fully-materialized output file, not yet written anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    fn text(file_name: String, text: String) -> Self {
        Artifact {
            file_name,
            bytes: text.into_bytes(),
        }
    }
}

/// One C and one binary artifact per client, the same pair for the server,
/// plus the two shared C headers.
pub fn emit_bus(bus: &DerivedBus) -> Result<Vec<Artifact>, ConfigError> {
    let mut artifacts = Vec::with_capacity(2 * bus.clients.len() + 4);
    for client in &bus.clients {
        let name = &client.record.name;
        artifacts.push(Artifact::text(
            format!("{ARTIFACT_PREFIX}{name}.c"),
            c_source::client_c_source(bus, client)?,
        ));
        artifacts.push(Artifact {
            file_name: format!("{ARTIFACT_PREFIX}{name}.bin"),
            bytes: binary::client_binary(bus, client)?,
        });
    }
    artifacts.push(Artifact::text(
        format!("{ARTIFACT_PREFIX}{SERVER_NAME}.c"),
        c_source::server_c_source(bus)?,
    ));
    artifacts.push(Artifact {
        file_name: format!("{ARTIFACT_PREFIX}{SERVER_NAME}.bin"),
        bytes: binary::server_binary(bus)?,
    });
    artifacts.push(Artifact::text(
        format!("{ARTIFACT_PREFIX}Client.h"),
        c_source::client_header(),
    ));
    artifacts.push(Artifact::text(
        format!("{ARTIFACT_PREFIX}{SERVER_NAME}.h"),
        c_source::server_header(),
    ));
    Ok(artifacts)
}

fn narrow_u8(
    kind: EntityKind,
    entity: &str,
    field: &'static str,
    value: u64,
) -> Result<u8, ConfigError> {
    u8::try_from(value).map_err(|_| render_error(kind, entity, field, value))
}

fn narrow_u16(
    kind: EntityKind,
    entity: &str,
    field: &'static str,
    value: u64,
) -> Result<u16, ConfigError> {
    u16::try_from(value).map_err(|_| render_error(kind, entity, field, value))
}

fn narrow_u32(
    kind: EntityKind,
    entity: &str,
    field: &'static str,
    value: u64,
) -> Result<u32, ConfigError> {
    u32::try_from(value).map_err(|_| render_error(kind, entity, field, value))
}

fn render_error(kind: EntityKind, entity: &str, field: &'static str, value: u64) -> ConfigError {
    ConfigError::Render {
        kind,
        entity: entity.to_string(),
        field,
        value,
    }
}
