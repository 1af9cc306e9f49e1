use super::flow_match::{Match, MatchV10};

/// Flow removed notification, OpenFlow 1.3 shape.
#[derive(Debug, PartialEq, Clone)]
pub struct FlowRemoved {
    pub cookie: u64,
    pub priority: u16,
    pub reason: FlowRemovedReason,
    pub table_id: u8,
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    pub packet_count: u64,
    pub byte_count: u64,
    pub mmatch: Match,
}

/// OpenFlow 1.0 flow removed. Leads with the fixed match and has no
/// table id or hard timeout.
#[derive(Debug, PartialEq, Clone)]
pub struct FlowRemovedV10 {
    pub mmatch: MatchV10,
    pub cookie: u64,
    pub priority: u16,
    pub reason: FlowRemovedReason,
    //pad 1 byte
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub idle_timeout: u16,
    //pad 2 bytes
    pub packet_count: u64,
    pub byte_count: u64,
}

/// Why the flow was removed.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum FlowRemovedReason {
    /// Flow idle time exceeded idle_timeout.
    IdleTimeout = 0,
    /// Time exceeded hard_timeout.
    HardTimeout = 1,
    /// Evicted by a DELETE flow mod.
    Delete = 2,
    /// Group was removed (1.3).
    GroupDelete = 3,
}
