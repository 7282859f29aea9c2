//! C constant-initializer emission
//!
//! Each resolved record maps onto a designated-initializer literal whose
//! field order is fixed by the external struct layouts, regardless of the
//! field order in the input file. Values are narrowed to their wire widths
//! first; the validator should have excluded anything that cannot fit, so a
//! failure here is defensive.

use itertools::Itertools;

use crate::bus_mgmt::error::{ConfigError, EntityKind};
use crate::bus_mgmt::model::{DerivedBus, DerivedClient, DerivedGroup};
use crate::constants::{PADDING_VALUE, SERVER_NAME};
use crate::helpers;

use super::render::{render, Values};
use super::{narrow_u16, narrow_u32, narrow_u8};

const CLIENT_TEMPLATE: &str = include_str!("templates/client.c");
const SERVER_TEMPLATE: &str = include_str!("templates/server.c");
const CLIENT_HEADER_TEMPLATE: &str = include_str!("templates/client.h");
const SERVER_HEADER_TEMPLATE: &str = include_str!("templates/server.h");

pub fn client_c_source(
    bus: &DerivedBus,
    client: &DerivedClient,
) -> Result<String, ConfigError> {
    let group_configs: Vec<String> = bus
        .groups_of(&client.record)
        .into_iter()
        .map(client_group_initializer)
        .collect::<Result<_, _>>()?;

    let mut values = Values::new();
    values.insert("timestamp", helpers::now_iso());
    values.insert("year", helpers::current_year().to_string());
    values.insert("client_name", client.record.name.clone());
    values.insert("amount_of_groups", client.group_count.to_string());
    values.insert("client_config", client_config_initializer(client)?);
    values.insert("group_configs", group_configs.iter().join(",\n"));
    Ok(render(CLIENT_TEMPLATE, &values))
}

pub fn server_c_source(bus: &DerivedBus) -> Result<String, ConfigError> {
    let client_configs: Vec<String> = bus
        .clients
        .iter()
        .map(server_client_initializer)
        .collect::<Result<_, _>>()?;
    let group_configs: Vec<String> = bus
        .groups
        .iter()
        .map(server_group_initializer)
        .collect::<Result<_, _>>()?;

    let mut values = Values::new();
    values.insert("timestamp", helpers::now_iso());
    values.insert("year", helpers::current_year().to_string());
    values.insert("amount_of_clients", bus.clients.len().to_string());
    values.insert("amount_of_groups", bus.groups.len().to_string());
    values.insert("server_config", server_config_initializer(bus)?);
    values.insert("client_configs", client_configs.iter().join(",\n"));
    values.insert("group_configs", group_configs.iter().join(",\n"));
    Ok(render(SERVER_TEMPLATE, &values))
}

pub fn client_header() -> String {
    let mut values = Values::new();
    values.insert("timestamp", helpers::now_iso());
    values.insert("year", helpers::current_year().to_string());
    render(CLIENT_HEADER_TEMPLATE, &values)
}

pub fn server_header() -> String {
    let mut values = Values::new();
    values.insert("timestamp", helpers::now_iso());
    values.insert("year", helpers::current_year().to_string());
    render(SERVER_HEADER_TEMPLATE, &values)
}

/// Multi-line hex byte array literal, as the external headers format them.
fn hex_byte_array(bytes: &[u8]) -> String {
    let body: String = bytes
        .iter()
        .map(|b| format!("        0x{b:02X},\n"))
        .collect();
    format!("\n    {{\n{body}    }}")
}

fn padding_array(len: usize) -> String {
    hex_byte_array(&vec![PADDING_VALUE; len])
}

fn client_config_initializer(client: &DerivedClient) -> Result<String, ConfigError> {
    let kind = EntityKind::Client;
    let entity = &client.record.name;
    let timeout = narrow_u16(kind, entity, "timeoutReqToResMillis", client.record.timeout_req_to_res_millis)?;
    let sid = narrow_u8(kind, entity, "sid", client.record.sid)?;
    let header_type = narrow_u8(kind, entity, "headerType", client.record.header_type)?;
    let amount_of_groups = narrow_u8(kind, entity, "amountOfGroups", client.group_count as u64)?;
    Ok(format!(
        "{{
    .timeoutReqToResMillis = {timeout},
    .ltk = {ltk},
    .sid = {sid},
    .headerType = {header_type},
    .amountOfGroups = {amount_of_groups},
    .unusedPadding = {padding},
}}",
        ltk = hex_byte_array(&client.record.ltk),
        padding = padding_array(1),
    ))
}

fn client_group_initializer(group: &DerivedGroup) -> Result<String, ConfigError> {
    let kind = EntityKind::Group;
    let entity = &group.record.name;
    let max_delay = narrow_u32(kind, entity, "maxCtrnonceDelayMsgs", group.record.max_ctrnonce_delay_msgs)?;
    let max_silence = narrow_u16(kind, entity, "maxSilenceIntervalMillis", group.record.max_silence_interval_millis)?;
    let renewal = narrow_u16(kind, entity, "sessionRenewalDurationMillis", group.record.session_renewal_duration_millis)?;
    let gid = narrow_u8(kind, entity, "gid", group.record.gid)?;
    Ok(format!(
        "{{
    .maxCtrnonceDelayMsgs = {max_delay},
    .maxSilenceIntervalMillis = {max_silence},
    .sessionRenewalDurationMillis = {renewal},
    .gid = {gid},
    .unusedPadding = {padding},
}}",
        padding = padding_array(3),
    ))
}

fn server_config_initializer(bus: &DerivedBus) -> Result<String, ConfigError> {
    let kind = EntityKind::Server;
    let amount_of_groups = narrow_u8(kind, SERVER_NAME, "amountOfGroups", bus.groups.len() as u64)?;
    let amount_of_clients = narrow_u8(kind, SERVER_NAME, "amountOfClients", bus.clients.len() as u64)?;
    let header_type = narrow_u8(kind, SERVER_NAME, "headerType", bus.server.header_type)?;
    Ok(format!(
        "{{
    .amountOfGroups = {amount_of_groups},
    .amountOfClients = {amount_of_clients},
    .headerType = {header_type},
}}"
    ))
}

fn server_client_initializer(client: &DerivedClient) -> Result<String, ConfigError> {
    let sid = narrow_u8(EntityKind::Client, &client.record.name, "sid", client.record.sid)?;
    Ok(format!(
        "{{
    .sid = {sid},
    .ltk = {ltk},
}}",
        ltk = hex_byte_array(&client.record.ltk),
    ))
}

fn server_group_initializer(group: &DerivedGroup) -> Result<String, ConfigError> {
    let kind = EntityKind::Group;
    let entity = &group.record.name;
    let max_delay = narrow_u32(kind, entity, "maxCtrnonceDelayMsgs", group.record.max_ctrnonce_delay_msgs)?;
    let ctr_limit = narrow_u32(kind, entity, "ctrNonceUpperLimit", group.record.ctr_nonce_upper_limit)?;
    let session = narrow_u32(kind, entity, "sessionDurationMillis", group.record.session_duration_millis)?;
    let ren_delay = narrow_u32(kind, entity, "delayBetweenRenNotificationsMillis", group.record.delay_between_ren_notifications_millis)?;
    let max_silence = narrow_u16(kind, entity, "maxSilenceIntervalMillis", group.record.max_silence_interval_millis)?;
    let gid = narrow_u8(kind, entity, "gid", group.record.gid)?;
    Ok(format!(
        "{{
    .maxCtrnonceDelayMsgs = {max_delay},
    .ctrNonceUpperLimit = 0x{ctr_limit:06X},
    .sessionDurationMillis = {session},
    .delayBetweenRenNotificationsMillis = {ren_delay},
    .clientSidsInGroupBitmap = 0x{bitmap:08X},
    .maxSilenceIntervalMillis = {max_silence},
    .gid = {gid},
    .unusedPadding = {padding},
}}",
        bitmap = group.sid_bitmap,
        padding = padding_array(1),
    ))
}
