//! Derived fields
//!
//! Everything here is computed purely from the resolved bus: declaration-order
//! indices, membership counts, the per-group sid bitmap, and the byte offsets
//! of each record layout. None of it can be supplied in the input (the names
//! are reserved), and it is recomputed on every run.
//!
//! Must run on a validated bus: the bitmap shift assumes sids are in range.

use super::model::{
    BusConfig, DerivedBus, DerivedClient, DerivedGroup, FieldSlot, RecordLayouts,
};
use super::schema::{
    RecordFields, CLIENT_GROUP_RECORD, CLIENT_RECORD, SERVER_CLIENT_RECORD, SERVER_GROUP_RECORD,
    SERVER_RECORD,
};

pub fn derive(bus: BusConfig) -> DerivedBus {
    let groups = bus
        .groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let member_sids: Vec<u64> = bus
                .clients
                .iter()
                .filter(|c| c.groups.iter().any(|name| *name == group.name))
                .map(|c| c.sid)
                .collect();
            let sid_bitmap = member_sids
                .iter()
                .fold(0u32, |bitmap, sid| bitmap | 1 << (sid - 1));
            DerivedGroup {
                record: group.clone(),
                index,
                member_count: member_sids.len(),
                member_sids,
                sid_bitmap,
            }
        })
        .collect();

    let clients = bus
        .clients
        .into_iter()
        .enumerate()
        .map(|(index, record)| DerivedClient {
            index,
            group_count: record.groups.len(),
            record,
        })
        .collect();

    DerivedBus {
        clients,
        groups,
        server: bus.server,
        layouts: record_layouts(),
    }
}

fn record_layouts() -> RecordLayouts {
    RecordLayouts {
        client: layout(CLIENT_RECORD),
        client_group: layout(CLIENT_GROUP_RECORD),
        server: layout(SERVER_RECORD),
        server_client: layout(SERVER_CLIENT_RECORD),
        server_group: layout(SERVER_GROUP_RECORD),
    }
}

/// Offsets as a running cumulative sum of the preceding field sizes.
fn layout(fields: RecordFields) -> Vec<FieldSlot> {
    let mut offset = 0;
    fields
        .iter()
        .map(|&(name, size)| {
            let slot = FieldSlot { name, offset, size };
            offset += size;
            slot
        })
        .collect()
}
