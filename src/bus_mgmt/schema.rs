//! Recognized field sets and binary record layouts
//!
//! The tables here are the external contract of the bus description file:
//! the resolver accepts exactly these field names, the validator enforces the
//! ranges declared on them, and the emitters serialize records in exactly the
//! order of the layout tables.

use super::error::EntityKind;

/// Byte length of a client long-term key.
pub const LTK_LEN: usize = 16;

/// The group membership bitmap is a u32, so sids run 1..=32.
pub const MAX_CLIENTS: u64 = 32;

/// The per-client group counter is a u8.
pub const MAX_GROUPS: u64 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldTy {
    /// Unsigned integer. `min`/`max` bound the accepted value; `size` is its
    /// width in bytes in the binary record.
    Uint { min: u64, max: u64, size: usize },
    /// Hex-encoded key material of exactly `len` decoded bytes.
    Key { len: usize },
    /// Entity name.
    Text,
    /// List of names referencing another entity collection.
    TextList,
}

pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldTy,
}

const U8: FieldTy = FieldTy::Uint { min: 0, max: 0xFF, size: 1 };
const U16: FieldTy = FieldTy::Uint { min: 0, max: 0xFFFF, size: 2 };
// 24-bit counter nonce, stored in a 4-byte slot.
const U24: FieldTy = FieldTy::Uint { min: 0, max: 0xFF_FFFF, size: 4 };
const U32: FieldTy = FieldTy::Uint { min: 0, max: 0xFFFF_FFFF, size: 4 };
const SID: FieldTy = FieldTy::Uint { min: 1, max: MAX_CLIENTS, size: 1 };

pub const CLIENT_SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "name", ty: FieldTy::Text },
    FieldSpec { name: "sid", ty: SID },
    FieldSpec { name: "ltk", ty: FieldTy::Key { len: LTK_LEN } },
    FieldSpec { name: "timeoutReqToResMillis", ty: U16 },
    FieldSpec { name: "headerType", ty: U8 },
    FieldSpec { name: "groups", ty: FieldTy::TextList },
];

pub const GROUP_SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "name", ty: FieldTy::Text },
    FieldSpec { name: "gid", ty: U8 },
    FieldSpec { name: "maxCtrnonceDelayMsgs", ty: U32 },
    FieldSpec { name: "maxSilenceIntervalMillis", ty: U16 },
    FieldSpec { name: "sessionRenewalDurationMillis", ty: U16 },
    FieldSpec { name: "ctrNonceUpperLimit", ty: U24 },
    FieldSpec { name: "sessionDurationMillis", ty: U32 },
    FieldSpec { name: "delayBetweenRenNotificationsMillis", ty: U32 },
];

/// The server is implicit in the bus description; its only resolvable field
/// comes from the default record. Counts are derived.
pub const SERVER_SCHEMA: &[FieldSpec] = &[FieldSpec { name: "headerType", ty: U8 }];

/// Derived field names. Reserved: supplying them in the input is an
/// unknown-field error, since they are computed from the resolved bus.
pub const RESERVED_FIELDS: &[&str] = &[
    "amountOfGroups",
    "amountOfClients",
    "clientSidsInGroupBitmap",
];

pub fn schema_for(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Client => CLIENT_SCHEMA,
        EntityKind::Group => GROUP_SCHEMA,
        EntityKind::Server => SERVER_SCHEMA,
        EntityKind::Bus | EntityKind::Default => &[],
    }
}

pub fn field_spec(schema: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    schema.iter().find(|f| f.name == name)
}

/// Binary record layouts, in emission order: (field, size in bytes).
/// `unusedPadding` slots are filled with the padding byte.
pub type RecordFields = &'static [(&'static str, usize)];

pub const CLIENT_RECORD: RecordFields = &[
    ("timeoutReqToResMillis", 2),
    ("ltk", LTK_LEN),
    ("sid", 1),
    ("headerType", 1),
    ("amountOfGroups", 1),
    ("unusedPadding", 1),
];

pub const CLIENT_GROUP_RECORD: RecordFields = &[
    ("maxCtrnonceDelayMsgs", 4),
    ("maxSilenceIntervalMillis", 2),
    ("sessionRenewalDurationMillis", 2),
    ("gid", 1),
    ("unusedPadding", 3),
];

pub const SERVER_RECORD: RecordFields = &[
    ("amountOfGroups", 1),
    ("amountOfClients", 1),
    ("headerType", 1),
];

pub const SERVER_CLIENT_RECORD: RecordFields = &[("sid", 1), ("ltk", LTK_LEN)];

pub const SERVER_GROUP_RECORD: RecordFields = &[
    ("maxCtrnonceDelayMsgs", 4),
    ("ctrNonceUpperLimit", 4),
    ("sessionDurationMillis", 4),
    ("delayBetweenRenNotificationsMillis", 4),
    ("clientSidsInGroupBitmap", 4),
    ("maxSilenceIntervalMillis", 2),
    ("gid", 1),
    ("unusedPadding", 1),
];

pub fn record_size(fields: RecordFields) -> usize {
    fields.iter().map(|(_, size)| size).sum()
}
