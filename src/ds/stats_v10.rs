//! OpenFlow 1.0 statistics messages, the predecessor of multipart.

use super::actions::ActionV10;
use super::flow_match::MatchV10;
use super::multipart::{AggregateStats, Desc, MultipartFlags, PortCounters};
use super::ports::PortNumberV10;

/// Stats header after the common header: type and flags, no padding.
pub const STATS_HEADER_LENGTH: usize = 4;

#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum StatsTypeV10 {
    Desc = 0,
    Flow = 1,
    Aggregate = 2,
    Table = 3,
    Port = 4,
    Queue = 5,
    Vendor = 0xffff,
}

#[derive(Debug, PartialEq, Clone)]
pub struct StatsRequestV10 {
    pub flags: MultipartFlags,
    pub body: StatsRequestBodyV10,
}

#[derive(Debug, PartialEq, Clone)]
pub enum StatsRequestBodyV10 {
    Desc,
    Flow(FlowStatsRequestV10),
    Aggregate(FlowStatsRequestV10),
    Table,
    /// `NoPort` for all ports.
    Port(PortNumberV10),
    Queue(QueueStatsRequestV10),
    Vendor(VendorStats),
}

impl StatsRequestBodyV10 {
    pub fn stats_type(&self) -> StatsTypeV10 {
        match *self {
            StatsRequestBodyV10::Desc => StatsTypeV10::Desc,
            StatsRequestBodyV10::Flow(_) => StatsTypeV10::Flow,
            StatsRequestBodyV10::Aggregate(_) => StatsTypeV10::Aggregate,
            StatsRequestBodyV10::Table => StatsTypeV10::Table,
            StatsRequestBodyV10::Port(_) => StatsTypeV10::Port,
            StatsRequestBodyV10::Queue(_) => StatsTypeV10::Queue,
            StatsRequestBodyV10::Vendor(_) => StatsTypeV10::Vendor,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct StatsReplyV10 {
    pub flags: MultipartFlags,
    pub body: StatsReplyBodyV10,
}

#[derive(Debug, PartialEq, Clone)]
pub enum StatsReplyBodyV10 {
    Desc(Desc),
    Flow(Vec<FlowStatsV10>),
    Aggregate(AggregateStats),
    Table(Vec<TableStatsV10>),
    Port(Vec<PortStatsV10>),
    Queue(Vec<QueueStatsV10>),
    Vendor(VendorStats),
}

impl StatsReplyBodyV10 {
    pub fn stats_type(&self) -> StatsTypeV10 {
        match *self {
            StatsReplyBodyV10::Desc(_) => StatsTypeV10::Desc,
            StatsReplyBodyV10::Flow(_) => StatsTypeV10::Flow,
            StatsReplyBodyV10::Aggregate(_) => StatsTypeV10::Aggregate,
            StatsReplyBodyV10::Table(_) => StatsTypeV10::Table,
            StatsReplyBodyV10::Port(_) => StatsTypeV10::Port,
            StatsReplyBodyV10::Queue(_) => StatsTypeV10::Queue,
            StatsReplyBodyV10::Vendor(_) => StatsTypeV10::Vendor,
        }
    }
}

/// Vendor stats body, written by the plugin registered for `vendor_id`.
#[derive(Debug, PartialEq, Clone)]
pub struct VendorStats {
    pub vendor_id: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FlowStatsRequestV10 {
    pub mmatch: MatchV10,
    /// 0xff for all tables.
    pub table_id: u8,
    //pad 1 byte
    pub out_port: PortNumberV10,
}

#[derive(Debug, PartialEq, Clone)]
pub struct QueueStatsRequestV10 {
    pub port_no: PortNumberV10,
    //pad 2 bytes
    pub queue_id: u32,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FlowStatsV10 {
    //length 2 bytes
    pub table_id: u8,
    //pad 1 byte
    pub mmatch: MatchV10,
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub priority: u16,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    //pad 6 bytes
    pub cookie: u64,
    pub packet_count: u64,
    pub byte_count: u64,
    pub actions: Vec<ActionV10>,
}

/// 64 bytes on the wire.
#[derive(Debug, PartialEq, Clone)]
pub struct TableStatsV10 {
    pub table_id: u8,
    //pad 3 bytes
    pub name: String,
    /// Raw OFPFW_* bits the table supports, prefix counts included.
    pub wildcards: u32,
    pub max_entries: u32,
    pub active_count: u32,
    pub lookup_count: u64,
    pub matched_count: u64,
}

#[derive(Debug, PartialEq, Clone)]
pub struct PortStatsV10 {
    pub port_no: PortNumberV10,
    //pad 6 bytes
    pub counters: PortCounters,
}

#[derive(Debug, PartialEq, Clone)]
pub struct QueueStatsV10 {
    pub port_no: PortNumberV10,
    //pad 2 bytes
    pub queue_id: u32,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errors: u64,
}
