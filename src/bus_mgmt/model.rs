/// A client record after default-fallback merge: every schema field present
/// and typed. Immutable for the rest of the run.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedClient {
    pub name: String,
    pub sid: u64,
    pub ltk: Vec<u8>,
    pub timeout_req_to_res_millis: u64,
    pub header_type: u64,
    /// Names of the groups this client belongs to, as declared.
    pub groups: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedGroup {
    pub name: String,
    pub gid: u64,
    pub max_ctrnonce_delay_msgs: u64,
    pub max_silence_interval_millis: u64,
    pub session_renewal_duration_millis: u64,
    pub ctr_nonce_upper_limit: u64,
    pub session_duration_millis: u64,
    pub delay_between_ren_notifications_millis: u64,
}

/// The implicit server entity; only its header type is configurable,
/// everything else about it is derived.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedServer {
    pub header_type: u64,
}

/// The whole bus after resolution, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct BusConfig {
    pub clients: Vec<ResolvedClient>,
    pub groups: Vec<ResolvedGroup>,
    pub server: ResolvedServer,
}

impl BusConfig {
    pub fn group(&self, name: &str) -> Option<&ResolvedGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// A field's place within a binary record: offset is the cumulative sum of
/// all preceding field sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

/// Computed byte layouts of every emitted record kind.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordLayouts {
    pub client: Vec<FieldSlot>,
    pub client_group: Vec<FieldSlot>,
    pub server: Vec<FieldSlot>,
    pub server_client: Vec<FieldSlot>,
    pub server_group: Vec<FieldSlot>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DerivedClient {
    pub record: ResolvedClient,
    /// Zero-based position in declaration order.
    pub index: usize,
    pub group_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DerivedGroup {
    pub record: ResolvedGroup,
    /// Zero-based position in declaration order.
    pub index: usize,
    pub member_count: usize,
    /// Sids of the clients referencing this group, in client declaration order.
    pub member_sids: Vec<u64>,
    /// Bit `sid - 1` set per member.
    pub sid_bitmap: u32,
}

/// The fully-resolved bus with all derived fields attached; the emitters'
/// only input.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedBus {
    pub clients: Vec<DerivedClient>,
    pub groups: Vec<DerivedGroup>,
    pub server: ResolvedServer,
    pub layouts: RecordLayouts,
}

impl DerivedBus {
    /// The groups a client belongs to, in group declaration order.
    pub fn groups_of(&self, client: &ResolvedClient) -> Vec<&DerivedGroup> {
        self.groups
            .iter()
            .filter(|g| client.groups.iter().any(|name| *name == g.record.name))
            .collect()
    }
}
