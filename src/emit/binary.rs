//! Packed binary emission
//!
//! Records are serialized field by field in the fixed layout order from
//! `bus_mgmt::schema`, little-endian, with alignment slots filled by the
//! padding byte. Each artifact starts with a 5-byte magic so the consuming
//! library can tell client and server files apart.

use crate::bus_mgmt::error::{ConfigError, EntityKind};
use crate::bus_mgmt::model::{DerivedBus, DerivedClient, DerivedGroup};
use crate::bus_mgmt::schema::{
    record_size, CLIENT_GROUP_RECORD, CLIENT_RECORD, LTK_LEN, SERVER_CLIENT_RECORD,
    SERVER_GROUP_RECORD, SERVER_RECORD,
};
use crate::constants::{MAGIC_CLIENT, MAGIC_SERVER, PADDING_VALUE, SERVER_NAME};

use super::{narrow_u16, narrow_u32, narrow_u8};

pub fn client_binary(bus: &DerivedBus, client: &DerivedClient) -> Result<Vec<u8>, ConfigError> {
    let groups = bus.groups_of(&client.record);
    let mut out = Vec::with_capacity(
        MAGIC_CLIENT.len()
            + record_size(CLIENT_RECORD)
            + record_size(CLIENT_GROUP_RECORD) * groups.len(),
    );
    out.extend_from_slice(MAGIC_CLIENT);
    out.extend(client_record(client)?);
    for group in groups {
        out.extend(client_group_record(group)?);
    }
    Ok(out)
}

pub fn server_binary(bus: &DerivedBus) -> Result<Vec<u8>, ConfigError> {
    let mut out = Vec::with_capacity(
        MAGIC_SERVER.len()
            + record_size(SERVER_RECORD)
            + record_size(SERVER_CLIENT_RECORD) * bus.clients.len()
            + record_size(SERVER_GROUP_RECORD) * bus.groups.len(),
    );
    out.extend_from_slice(MAGIC_SERVER);
    out.extend(server_record(bus)?);
    for client in &bus.clients {
        out.extend(server_client_record(client)?);
    }
    for group in &bus.groups {
        out.extend(server_group_record(group)?);
    }
    Ok(out)
}

fn key_bytes<'a>(entity: &str, ltk: &'a [u8]) -> Result<&'a [u8], ConfigError> {
    if ltk.len() != LTK_LEN {
        return Err(ConfigError::Render {
            kind: EntityKind::Client,
            entity: entity.to_string(),
            field: "ltk",
            value: ltk.len() as u64,
        });
    }
    Ok(ltk)
}

fn client_record(client: &DerivedClient) -> Result<Vec<u8>, ConfigError> {
    let kind = EntityKind::Client;
    let entity = &client.record.name;
    let mut rec = Vec::with_capacity(record_size(CLIENT_RECORD));
    rec.extend_from_slice(
        &narrow_u16(kind, entity, "timeoutReqToResMillis", client.record.timeout_req_to_res_millis)?
            .to_le_bytes(),
    );
    rec.extend_from_slice(key_bytes(entity, &client.record.ltk)?);
    rec.push(narrow_u8(kind, entity, "sid", client.record.sid)?);
    rec.push(narrow_u8(kind, entity, "headerType", client.record.header_type)?);
    rec.push(narrow_u8(kind, entity, "amountOfGroups", client.group_count as u64)?);
    rec.push(PADDING_VALUE);
    debug_assert_eq!(rec.len(), record_size(CLIENT_RECORD));
    Ok(rec)
}

fn client_group_record(group: &DerivedGroup) -> Result<Vec<u8>, ConfigError> {
    let kind = EntityKind::Group;
    let entity = &group.record.name;
    let mut rec = Vec::with_capacity(record_size(CLIENT_GROUP_RECORD));
    rec.extend_from_slice(
        &narrow_u32(kind, entity, "maxCtrnonceDelayMsgs", group.record.max_ctrnonce_delay_msgs)?
            .to_le_bytes(),
    );
    rec.extend_from_slice(
        &narrow_u16(kind, entity, "maxSilenceIntervalMillis", group.record.max_silence_interval_millis)?
            .to_le_bytes(),
    );
    rec.extend_from_slice(
        &narrow_u16(
            kind,
            entity,
            "sessionRenewalDurationMillis",
            group.record.session_renewal_duration_millis,
        )?
        .to_le_bytes(),
    );
    rec.push(narrow_u8(kind, entity, "gid", group.record.gid)?);
    rec.extend_from_slice(&[PADDING_VALUE; 3]);
    debug_assert_eq!(rec.len(), record_size(CLIENT_GROUP_RECORD));
    Ok(rec)
}

fn server_record(bus: &DerivedBus) -> Result<Vec<u8>, ConfigError> {
    let kind = EntityKind::Server;
    let mut rec = Vec::with_capacity(record_size(SERVER_RECORD));
    rec.push(narrow_u8(kind, SERVER_NAME, "amountOfGroups", bus.groups.len() as u64)?);
    rec.push(narrow_u8(kind, SERVER_NAME, "amountOfClients", bus.clients.len() as u64)?);
    rec.push(narrow_u8(kind, SERVER_NAME, "headerType", bus.server.header_type)?);
    Ok(rec)
}

fn server_client_record(client: &DerivedClient) -> Result<Vec<u8>, ConfigError> {
    let entity = &client.record.name;
    let mut rec = Vec::with_capacity(record_size(SERVER_CLIENT_RECORD));
    rec.push(narrow_u8(EntityKind::Client, entity, "sid", client.record.sid)?);
    rec.extend_from_slice(key_bytes(entity, &client.record.ltk)?);
    Ok(rec)
}

fn server_group_record(group: &DerivedGroup) -> Result<Vec<u8>, ConfigError> {
    let kind = EntityKind::Group;
    let entity = &group.record.name;
    let mut rec = Vec::with_capacity(record_size(SERVER_GROUP_RECORD));
    rec.extend_from_slice(
        &narrow_u32(kind, entity, "maxCtrnonceDelayMsgs", group.record.max_ctrnonce_delay_msgs)?
            .to_le_bytes(),
    );
    rec.extend_from_slice(
        &narrow_u32(kind, entity, "ctrNonceUpperLimit", group.record.ctr_nonce_upper_limit)?
            .to_le_bytes(),
    );
    rec.extend_from_slice(
        &narrow_u32(kind, entity, "sessionDurationMillis", group.record.session_duration_millis)?
            .to_le_bytes(),
    );
    rec.extend_from_slice(
        &narrow_u32(
            kind,
            entity,
            "delayBetweenRenNotificationsMillis",
            group.record.delay_between_ren_notifications_millis,
        )?
        .to_le_bytes(),
    );
    rec.extend_from_slice(&group.sid_bitmap.to_le_bytes());
    rec.extend_from_slice(
        &narrow_u16(kind, entity, "maxSilenceIntervalMillis", group.record.max_silence_interval_millis)?
            .to_le_bytes(),
    );
    rec.push(narrow_u8(kind, entity, "gid", group.record.gid)?);
    rec.push(PADDING_VALUE);
    debug_assert_eq!(rec.len(), record_size(SERVER_GROUP_RECORD));
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus_mgmt::derive;
    use crate::bus_mgmt::model::{BusConfig, ResolvedClient, ResolvedGroup, ResolvedServer};

    fn derived() -> DerivedBus {
        derive(BusConfig {
            clients: vec![
                ResolvedClient {
                    name: "Alice".to_string(),
                    sid: 1,
                    ltk: (0u8..16).collect(),
                    timeout_req_to_res_millis: 75,
                    header_type: 0,
                    groups: vec!["Everyone".to_string(), "Ops".to_string()],
                },
                ResolvedClient {
                    name: "Bob".to_string(),
                    sid: 2,
                    ltk: (16u8..32).collect(),
                    timeout_req_to_res_millis: 100,
                    header_type: 0,
                    groups: vec!["Everyone".to_string()],
                },
            ],
            groups: vec![
                ResolvedGroup {
                    name: "Everyone".to_string(),
                    gid: 0,
                    max_ctrnonce_delay_msgs: 20,
                    max_silence_interval_millis: 5000,
                    session_renewal_duration_millis: 2000,
                    ctr_nonce_upper_limit: 0xFFE4D0,
                    session_duration_millis: 60000,
                    delay_between_ren_notifications_millis: 500,
                },
                ResolvedGroup {
                    name: "Ops".to_string(),
                    gid: 1,
                    max_ctrnonce_delay_msgs: 20,
                    max_silence_interval_millis: 3000,
                    session_renewal_duration_millis: 2000,
                    ctr_nonce_upper_limit: 0xFFE4D0,
                    session_duration_millis: 60000,
                    delay_between_ren_notifications_millis: 500,
                },
            ],
            server: ResolvedServer { header_type: 0 },
        })
    }

    #[test]
    fn test_client_binary_layout() {
        let bus = derived();
        let bin = client_binary(&bus, &bus.clients[0]).unwrap();
        assert_eq!(bin.len(), 5 + 22 + 2 * 12);
        assert_eq!(&bin[..5], b"BUSc\0");
        // Client record: timeout 75 LE, then the key.
        assert_eq!(&bin[5..7], &[75, 0]);
        assert_eq!(&bin[7..23], &(0u8..16).collect::<Vec<_>>()[..]);
        assert_eq!(bin[23], 1); // sid
        assert_eq!(bin[24], 0); // headerType
        assert_eq!(bin[25], 2); // amountOfGroups
        assert_eq!(bin[26], 0xAA);
        // First group record starts right after: maxCtrnonceDelayMsgs = 20.
        assert_eq!(&bin[27..31], &[20, 0, 0, 0]);
        // Its gid and padding close the 12-byte record.
        assert_eq!(&bin[35..39], &[0, 0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn test_server_binary_layout() {
        let bus = derived();
        let bin = server_binary(&bus).unwrap();
        assert_eq!(bin.len(), 5 + 3 + 2 * 17 + 2 * 24);
        assert_eq!(&bin[..5], b"BUSs\0");
        assert_eq!(&bin[5..8], &[2, 2, 0]); // groups, clients, headerType
        // First server-side client record.
        assert_eq!(bin[8], 1);
        assert_eq!(&bin[9..25], &(0u8..16).collect::<Vec<_>>()[..]);
        // First group record: bitmap covers both clients.
        let group0 = &bin[8 + 2 * 17..];
        assert_eq!(&group0[..4], &[20, 0, 0, 0]);
        assert_eq!(&group0[4..8], &[0xD0, 0xE4, 0xFF, 0x00]); // ctrNonceUpperLimit LE
        assert_eq!(&group0[16..20], &[0b11, 0, 0, 0]); // clientSidsInGroupBitmap
        assert_eq!(group0[22], 0); // gid
        assert_eq!(group0[23], 0xAA);
    }

    #[test]
    fn test_render_error_on_wrong_key_length() {
        let mut bus = derived();
        bus.clients[0].record.ltk.truncate(8);
        let client = bus.clients[0].clone();
        let err = client_binary(&bus, &client).unwrap_err();
        assert!(matches!(err, ConfigError::Render { field: "ltk", value: 8, .. }));
    }

    #[test]
    fn test_render_error_on_overflow() {
        let mut bus = derived();
        bus.groups[1].record.gid = 300;
        let err = server_binary(&bus).unwrap_err();
        assert!(matches!(err, ConfigError::Render { field: "gid", value: 300, .. }));
    }
}
