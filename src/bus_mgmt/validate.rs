//! Cross-reference and range validation
//!
//! Checks run in a fixed order over a fixed traversal (groups in declaration
//! order, then clients, then the server) and stop at the first violation, so
//! repeated runs over unchanged input always report the same error.

use super::error::{ConfigError, EntityKind};
use super::model::{BusConfig, ResolvedClient, ResolvedGroup};
use super::schema::{
    self, FieldTy, CLIENT_SCHEMA, GROUP_SCHEMA, LTK_LEN, MAX_CLIENTS, MAX_GROUPS, SERVER_SCHEMA,
};

pub fn validate(bus: &BusConfig) -> Result<(), ConfigError> {
    check_collection_sizes(bus)?;
    check_unique_groups(bus)?;
    check_unique_clients(bus)?;
    check_group_references(bus)?;
    check_numeric_ranges(bus)?;
    check_key_lengths(bus)?;
    Ok(())
}

fn range_error(
    kind: EntityKind,
    entity: &str,
    field: &'static str,
    value: u64,
    min: u64,
    max: u64,
) -> ConfigError {
    ConfigError::Range {
        kind,
        entity: entity.to_string(),
        field,
        value,
        min,
        max,
    }
}

/// Bus-level cardinality: artifacts are meaningless without at least one
/// group and one client, and the wire format caps both collections.
fn check_collection_sizes(bus: &BusConfig) -> Result<(), ConfigError> {
    let groups = bus.groups.len() as u64;
    if !(1..=MAX_GROUPS).contains(&groups) {
        return Err(range_error(EntityKind::Bus, "bus", "groups", groups, 1, MAX_GROUPS));
    }
    let clients = bus.clients.len() as u64;
    if !(1..=MAX_CLIENTS).contains(&clients) {
        return Err(range_error(EntityKind::Bus, "bus", "clients", clients, 1, MAX_CLIENTS));
    }
    Ok(())
}

/// Names are compared case-insensitively: they become file names on
/// case-insensitive filesystems.
fn check_unique_groups(bus: &BusConfig) -> Result<(), ConfigError> {
    let mut seen_names: Vec<String> = Vec::new();
    for group in &bus.groups {
        let lowered = group.name.to_lowercase();
        if seen_names.contains(&lowered) {
            return Err(ConfigError::DuplicateId {
                kind: EntityKind::Group,
                id: group.name.clone(),
            });
        }
        seen_names.push(lowered);
    }
    let mut seen_gids: Vec<u64> = Vec::new();
    for group in &bus.groups {
        if seen_gids.contains(&group.gid) {
            return Err(ConfigError::DuplicateId {
                kind: EntityKind::Group,
                id: group.gid.to_string(),
            });
        }
        seen_gids.push(group.gid);
    }
    Ok(())
}

fn check_unique_clients(bus: &BusConfig) -> Result<(), ConfigError> {
    let mut seen_names: Vec<String> = Vec::new();
    for client in &bus.clients {
        let lowered = client.name.to_lowercase();
        if seen_names.contains(&lowered) {
            return Err(ConfigError::DuplicateId {
                kind: EntityKind::Client,
                id: client.name.clone(),
            });
        }
        seen_names.push(lowered);
    }
    let mut seen_sids: Vec<u64> = Vec::new();
    for client in &bus.clients {
        if seen_sids.contains(&client.sid) {
            return Err(ConfigError::DuplicateId {
                kind: EntityKind::Client,
                id: client.sid.to_string(),
            });
        }
        seen_sids.push(client.sid);
    }
    Ok(())
}

/// Every referenced group must exist, and a client may not list the same
/// group twice: its emitted group count equals the number of group records.
fn check_group_references(bus: &BusConfig) -> Result<(), ConfigError> {
    for client in &bus.clients {
        let mut seen: Vec<&str> = Vec::new();
        for reference in &client.groups {
            if bus.group(reference).is_none() {
                return Err(ConfigError::DanglingReference {
                    entity: client.name.clone(),
                    reference: reference.clone(),
                });
            }
            if seen.contains(&reference.as_str()) {
                return Err(ConfigError::DuplicateId {
                    kind: EntityKind::Group,
                    id: reference.clone(),
                });
            }
            seen.push(reference);
        }
    }
    Ok(())
}

/// Walks every entity's schema in declared field order and checks each
/// numeric value against the bounds of its wire representation. List fields
/// are checked by length.
fn check_numeric_ranges(bus: &BusConfig) -> Result<(), ConfigError> {
    for group in &bus.groups {
        check_group_ranges(group)?;
    }
    for client in &bus.clients {
        check_client_ranges(client)?;
    }
    check_entity_field(
        EntityKind::Server,
        "Server",
        SERVER_SCHEMA,
        "headerType",
        bus.server.header_type,
    )?;
    Ok(())
}

fn check_entity_field(
    kind: EntityKind,
    entity: &str,
    schema_table: &'static [schema::FieldSpec],
    field: &'static str,
    value: u64,
) -> Result<(), ConfigError> {
    // Only Uint fields carry bounds; the schema table is the single source.
    if let Some(spec) = schema::field_spec(schema_table, field) {
        if let FieldTy::Uint { min, max, .. } = spec.ty {
            if !(min..=max).contains(&value) {
                return Err(range_error(kind, entity, field, value, min, max));
            }
        }
    }
    Ok(())
}

fn check_client_ranges(client: &ResolvedClient) -> Result<(), ConfigError> {
    for spec in CLIENT_SCHEMA {
        let value = match spec.name {
            "sid" => client.sid,
            "timeoutReqToResMillis" => client.timeout_req_to_res_millis,
            "headerType" => client.header_type,
            "groups" => {
                let count = client.groups.len() as u64;
                if !(1..=MAX_GROUPS).contains(&count) {
                    return Err(range_error(
                        EntityKind::Client,
                        &client.name,
                        "groups",
                        count,
                        1,
                        MAX_GROUPS,
                    ));
                }
                continue;
            }
            _ => continue,
        };
        check_entity_field(EntityKind::Client, &client.name, CLIENT_SCHEMA, spec.name, value)?;
    }
    Ok(())
}

fn check_group_ranges(group: &ResolvedGroup) -> Result<(), ConfigError> {
    for spec in GROUP_SCHEMA {
        let value = match spec.name {
            "gid" => group.gid,
            "maxCtrnonceDelayMsgs" => group.max_ctrnonce_delay_msgs,
            "maxSilenceIntervalMillis" => group.max_silence_interval_millis,
            "sessionRenewalDurationMillis" => group.session_renewal_duration_millis,
            "ctrNonceUpperLimit" => group.ctr_nonce_upper_limit,
            "sessionDurationMillis" => group.session_duration_millis,
            "delayBetweenRenNotificationsMillis" => group.delay_between_ren_notifications_millis,
            _ => continue,
        };
        check_entity_field(EntityKind::Group, &group.name, GROUP_SCHEMA, spec.name, value)?;
    }
    Ok(())
}

fn check_key_lengths(bus: &BusConfig) -> Result<(), ConfigError> {
    for client in &bus.clients {
        if client.ltk.len() != LTK_LEN {
            return Err(ConfigError::KeyLength {
                kind: EntityKind::Client,
                entity: client.name.clone(),
                field: "ltk",
                actual: client.ltk.len(),
                expected: LTK_LEN,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus_mgmt::model::ResolvedServer;

    fn client(name: &str, sid: u64, groups: &[&str]) -> ResolvedClient {
        ResolvedClient {
            name: name.to_string(),
            sid,
            ltk: vec![0u8; LTK_LEN],
            timeout_req_to_res_millis: 100,
            header_type: 0,
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn group(name: &str, gid: u64) -> ResolvedGroup {
        ResolvedGroup {
            name: name.to_string(),
            gid,
            max_ctrnonce_delay_msgs: 20,
            max_silence_interval_millis: 5000,
            session_renewal_duration_millis: 2000,
            ctr_nonce_upper_limit: 0xFF_0000,
            session_duration_millis: 60000,
            delay_between_ren_notifications_millis: 500,
        }
    }

    fn bus() -> BusConfig {
        BusConfig {
            clients: vec![client("Alice", 1, &["G1"]), client("Bob", 2, &["G1"])],
            groups: vec![group("G1", 0)],
            server: ResolvedServer { header_type: 0 },
        }
    }

    #[test]
    fn test_valid_bus_passes() {
        assert!(validate(&bus()).is_ok());
    }

    #[test]
    fn test_duplicate_group_name_case_insensitive() {
        let mut b = bus();
        b.groups.push(group("g1", 1));
        let err = validate(&b).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateId { kind: EntityKind::Group, ref id } if id == "g1"));
    }

    #[test]
    fn test_duplicate_client_sid() {
        let mut b = bus();
        b.clients.push(client("Carol", 1, &["G1"]));
        let err = validate(&b).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateId { kind: EntityKind::Client, ref id } if id == "1"));
    }

    #[test]
    fn test_dangling_group_reference() {
        let mut b = bus();
        b.clients.push(client("C2", 3, &["G2"]));
        let err = validate(&b).unwrap_err();
        match err {
            ConfigError::DanglingReference { entity, reference } => {
                assert_eq!(entity, "C2");
                assert_eq!(reference, "G2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_group_reference_within_client() {
        let mut b = bus();
        b.clients[0].groups = vec!["G1".to_string(), "G1".to_string()];
        let err = validate(&b).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateId { kind: EntityKind::Group, ref id } if id == "G1"));
    }

    #[test]
    fn test_dangling_reference_wins_over_later_range_violation() {
        // The reference check runs before the range pass, and within a pass
        // earlier declarations win: deterministic first error.
        let mut b = bus();
        b.clients.push(client("C2", 3, &["G2"]));
        b.groups[0].ctr_nonce_upper_limit = 0x0100_0000;
        assert!(matches!(validate(&b).unwrap_err(), ConfigError::DanglingReference { .. }));
    }

    #[test]
    fn test_sid_out_of_range() {
        let mut b = bus();
        b.clients[0].sid = 0;
        let err = validate(&b).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Range { field: "sid", value: 0, min: 1, max: MAX_CLIENTS, .. }
        ));

        let mut b = bus();
        b.clients[1].sid = 33;
        assert!(matches!(validate(&b).unwrap_err(), ConfigError::Range { field: "sid", .. }));
    }

    #[test]
    fn test_ctr_nonce_upper_limit_is_24_bit() {
        let mut b = bus();
        b.groups[0].ctr_nonce_upper_limit = 0x0100_0000;
        let err = validate(&b).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Range { field: "ctrNonceUpperLimit", max: 0xFF_FFFF, .. }
        ));
    }

    #[test]
    fn test_client_without_groups() {
        let mut b = bus();
        b.clients[0].groups.clear();
        let err = validate(&b).unwrap_err();
        assert!(matches!(err, ConfigError::Range { field: "groups", value: 0, min: 1, .. }));
    }

    #[test]
    fn test_empty_bus_collections() {
        let mut b = bus();
        b.groups.clear();
        assert!(matches!(
            validate(&b).unwrap_err(),
            ConfigError::Range { kind: EntityKind::Bus, field: "groups", .. }
        ));

        let mut b = bus();
        b.clients.clear();
        assert!(matches!(
            validate(&b).unwrap_err(),
            ConfigError::Range { kind: EntityKind::Bus, field: "clients", .. }
        ));
    }

    #[test]
    fn test_short_key() {
        let mut b = bus();
        b.clients[0].ltk = vec![0u8; 8];
        let err = validate(&b).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::KeyLength { field: "ltk", actual: 8, expected: LTK_LEN, .. }
        ));
    }
}
