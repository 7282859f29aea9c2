//! Default-fallback resolution
//!
//! Each entity record is merged with the bus-wide default record over a fixed
//! schema: a field missing from the entity is taken from the default, a field
//! missing from both fails, and a field outside the schema is rejected.
//! Resolution is per-field independent and pure over its inputs.

use serde_json::Value;

use crate::constants::SERVER_NAME;

use super::error::{ConfigError, EntityKind};
use super::model::{BusConfig, ResolvedClient, ResolvedGroup, ResolvedServer};
use super::raw::{RawBusConfig, RawRecord};
use super::schema::{
    self, FieldSpec, CLIENT_SCHEMA, GROUP_SCHEMA, SERVER_SCHEMA,
};

pub fn resolve_bus(raw: &RawBusConfig) -> Result<BusConfig, ConfigError> {
    check_default_record(&raw.default)?;
    let clients = raw
        .clients
        .iter()
        .enumerate()
        .map(|(i, c)| resolve_client(c, &raw.default, i))
        .collect::<Result<Vec<_>, _>>()?;
    let groups = raw
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| resolve_group(g, &raw.default, i))
        .collect::<Result<Vec<_>, _>>()?;
    let server = resolve_server(&raw.default)?;
    Ok(BusConfig {
        clients,
        groups,
        server,
    })
}

/// The default record has no schema of its own: every field in it must be
/// recognized by at least one entity schema.
fn check_default_record(default: &RawRecord) -> Result<(), ConfigError> {
    for key in default.keys() {
        let known = [CLIENT_SCHEMA, GROUP_SCHEMA, SERVER_SCHEMA]
            .iter()
            .any(|s| schema::field_spec(s, key).is_some());
        if !known {
            return Err(ConfigError::UnknownField {
                kind: EntityKind::Default,
                entity: "default".to_string(),
                field: key.clone(),
            });
        }
    }
    Ok(())
}

fn resolve_client(
    raw: &RawRecord,
    default: &RawRecord,
    index: usize,
) -> Result<ResolvedClient, ConfigError> {
    let entity = entity_label(raw, default, EntityKind::Client, index);
    let ctx = FieldCtx {
        kind: EntityKind::Client,
        entity: &entity,
        raw,
        default,
    };
    ctx.reject_unknown(CLIENT_SCHEMA)?;
    Ok(ResolvedClient {
        name: ctx.text("name")?,
        sid: ctx.uint("sid")?,
        ltk: ctx.key("ltk")?,
        timeout_req_to_res_millis: ctx.uint("timeoutReqToResMillis")?,
        header_type: ctx.uint("headerType")?,
        groups: ctx.text_list("groups")?,
    })
}

fn resolve_group(
    raw: &RawRecord,
    default: &RawRecord,
    index: usize,
) -> Result<ResolvedGroup, ConfigError> {
    let entity = entity_label(raw, default, EntityKind::Group, index);
    let ctx = FieldCtx {
        kind: EntityKind::Group,
        entity: &entity,
        raw,
        default,
    };
    ctx.reject_unknown(GROUP_SCHEMA)?;
    Ok(ResolvedGroup {
        name: ctx.text("name")?,
        gid: ctx.uint("gid")?,
        max_ctrnonce_delay_msgs: ctx.uint("maxCtrnonceDelayMsgs")?,
        max_silence_interval_millis: ctx.uint("maxSilenceIntervalMillis")?,
        session_renewal_duration_millis: ctx.uint("sessionRenewalDurationMillis")?,
        ctr_nonce_upper_limit: ctx.uint("ctrNonceUpperLimit")?,
        session_duration_millis: ctx.uint("sessionDurationMillis")?,
        delay_between_ren_notifications_millis: ctx.uint("delayBetweenRenNotificationsMillis")?,
    })
}

/// The server has no record of its own in the input; it resolves entirely
/// from the default record.
fn resolve_server(default: &RawRecord) -> Result<ResolvedServer, ConfigError> {
    let empty = RawRecord::new();
    let ctx = FieldCtx {
        kind: EntityKind::Server,
        entity: SERVER_NAME,
        raw: &empty,
        default,
    };
    Ok(ResolvedServer {
        header_type: ctx.uint("headerType")?,
    })
}

/// Error-context label for an entity: its declared (or defaulted) name where
/// one exists, its collection position otherwise.
fn entity_label(raw: &RawRecord, default: &RawRecord, kind: EntityKind, index: usize) -> String {
    raw.get("name")
        .or_else(|| default.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| match kind {
            EntityKind::Client => format!("clients[{index}]"),
            _ => format!("groups[{index}]"),
        })
}

struct FieldCtx<'a> {
    kind: EntityKind,
    entity: &'a str,
    raw: &'a RawRecord,
    default: &'a RawRecord,
}

impl FieldCtx<'_> {
    fn reject_unknown(&self, schema: &'static [FieldSpec]) -> Result<(), ConfigError> {
        for key in self.raw.keys() {
            if schema::field_spec(schema, key).is_none() {
                return Err(ConfigError::UnknownField {
                    kind: self.kind,
                    entity: self.entity.to_string(),
                    field: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Two-level lookup: entity record first, then the default record.
    fn lookup(&self, field: &'static str) -> Result<&Value, ConfigError> {
        self.raw
            .get(field)
            .or_else(|| self.default.get(field))
            .ok_or_else(|| ConfigError::MissingField {
                kind: self.kind,
                entity: self.entity.to_string(),
                field,
            })
    }

    fn type_error(&self, field: &'static str, expected: &'static str) -> ConfigError {
        ConfigError::FieldType {
            kind: self.kind,
            entity: self.entity.to_string(),
            field,
            expected,
        }
    }

    fn uint(&self, field: &'static str) -> Result<u64, ConfigError> {
        self.lookup(field)?
            .as_u64()
            .ok_or_else(|| self.type_error(field, "unsigned integer"))
    }

    fn text(&self, field: &'static str) -> Result<String, ConfigError> {
        self.lookup(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.type_error(field, "string"))
    }

    fn key(&self, field: &'static str) -> Result<Vec<u8>, ConfigError> {
        let text = self
            .lookup(field)?
            .as_str()
            .ok_or_else(|| self.type_error(field, "hex string"))?;
        hex::decode(text).map_err(|_| self.type_error(field, "hex string"))
    }

    fn text_list(&self, field: &'static str) -> Result<Vec<String>, ConfigError> {
        let items = self
            .lookup(field)?
            .as_array()
            .ok_or_else(|| self.type_error(field, "array of strings"))?;
        items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.type_error(field, "array of strings"))
            })
            .collect()
    }
}
