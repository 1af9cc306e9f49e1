use super::actions::ActionTypes;
use super::flow_instructions::Instruction;
use super::flow_match::Match;
use super::flow_mod::FlowModFlags;
use super::group_mod::{Bucket, GroupCapabilities, GroupType, GroupTypes};
use super::meter_mod::{MeterBand, MeterBandTypes, MeterFlags};
use super::ports::{Port, PortNumber};
use super::table_features::TableFeatures;

/// Multipart header after the common header: type, flags and padding.
pub const MULTIPART_HEADER_LENGTH: usize = 8;
/// Queue id wildcard for queue stats requests.
pub const QUEUE_ALL: u32 = 0xffff_ffff;
/// Group and meter id wildcard for stats requests.
pub const ALL: u32 = 0xffff_ffff;

/// Kind of a multipart exchange. Request and reply share the code, the
/// body shapes are `MultipartRequestBody` and `MultipartReplyBody`.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum MultipartType {
    /// Switch description, empty request.
    Desc = 0,
    /// Per flow counters, filtered by a flow stats request.
    Flow = 1,
    /// Summed flow counters, same filter as `Flow`.
    Aggregate = 2,
    Table = 3,
    /// Counters of one port or of `PortNo::Any`.
    PortStats = 4,
    Queue = 5,
    /// Group counters, requested by group id or `ALL`.
    Group = 6,
    GroupDesc = 7,
    GroupFeatures = 8,
    /// Meter counters, requested by meter id or `ALL`.
    Meter = 9,
    MeterConfig = 10,
    MeterFeatures = 11,
    /// A request with table bodies asks the switch to adopt that view of
    /// its tables; an empty one only queries it.
    TableFeatures = 12,
    /// The `Port` list, empty request.
    PortDesc = 13,
    /// Experimenter id and subtype, then a vendor defined body.
    Experimenter = 0xffff,
}

bitflags! {
    #[derive(Default)]
    pub struct MultipartFlags: u16 {
        /// More requests or replies to follow.
        const MORE = 1 << 0;
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct MultipartRequest {
    pub flags: MultipartFlags,
    // pad 4 bytes
    pub body: MultipartRequestBody,
}

#[derive(Debug, PartialEq, Clone)]
pub enum MultipartRequestBody {
    Desc,
    Flow(FlowStatsRequest),
    Aggregate(FlowStatsRequest),
    Table,
    PortStats(PortNumber),
    Queue(QueueStatsRequest),
    /// Group id, `ALL` for every group.
    Group(u32),
    GroupDesc,
    GroupFeatures,
    /// Meter id, `ALL` for every meter.
    Meter(u32),
    MeterConfig(u32),
    MeterFeatures,
    /// Empty to query, non-empty to set the pipeline.
    TableFeatures(Vec<TableFeatures>),
    PortDesc,
    Experimenter(ExperimenterMultipart),
}

impl MultipartRequestBody {
    pub fn multipart_type(&self) -> MultipartType {
        use self::MultipartRequestBody as B;
        match *self {
            B::Desc => MultipartType::Desc,
            B::Flow(_) => MultipartType::Flow,
            B::Aggregate(_) => MultipartType::Aggregate,
            B::Table => MultipartType::Table,
            B::PortStats(_) => MultipartType::PortStats,
            B::Queue(_) => MultipartType::Queue,
            B::Group(_) => MultipartType::Group,
            B::GroupDesc => MultipartType::GroupDesc,
            B::GroupFeatures => MultipartType::GroupFeatures,
            B::Meter(_) => MultipartType::Meter,
            B::MeterConfig(_) => MultipartType::MeterConfig,
            B::MeterFeatures => MultipartType::MeterFeatures,
            B::TableFeatures(_) => MultipartType::TableFeatures,
            B::PortDesc => MultipartType::PortDesc,
            B::Experimenter(_) => MultipartType::Experimenter,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct MultipartReply {
    pub flags: MultipartFlags,
    // pad 4 bytes
    pub body: MultipartReplyBody,
}

#[derive(Debug, PartialEq, Clone)]
pub enum MultipartReplyBody {
    Desc(Desc),
    Flow(Vec<FlowStats>),
    Aggregate(AggregateStats),
    Table(Vec<TableStats>),
    PortStats(Vec<PortStats>),
    Queue(Vec<QueueStats>),
    Group(Vec<GroupStats>),
    GroupDesc(Vec<GroupDesc>),
    GroupFeatures(GroupFeatures),
    Meter(Vec<MeterStats>),
    MeterConfig(Vec<MeterConfig>),
    MeterFeatures(MeterFeatures),
    TableFeatures(Vec<TableFeatures>),
    PortDesc(Vec<Port>),
    Experimenter(ExperimenterMultipart),
}

impl MultipartReplyBody {
    pub fn multipart_type(&self) -> MultipartType {
        use self::MultipartReplyBody as B;
        match *self {
            B::Desc(_) => MultipartType::Desc,
            B::Flow(_) => MultipartType::Flow,
            B::Aggregate(_) => MultipartType::Aggregate,
            B::Table(_) => MultipartType::Table,
            B::PortStats(_) => MultipartType::PortStats,
            B::Queue(_) => MultipartType::Queue,
            B::Group(_) => MultipartType::Group,
            B::GroupDesc(_) => MultipartType::GroupDesc,
            B::GroupFeatures(_) => MultipartType::GroupFeatures,
            B::Meter(_) => MultipartType::Meter,
            B::MeterConfig(_) => MultipartType::MeterConfig,
            B::MeterFeatures(_) => MultipartType::MeterFeatures,
            B::TableFeatures(_) => MultipartType::TableFeatures,
            B::PortDesc(_) => MultipartType::PortDesc,
            B::Experimenter(_) => MultipartType::Experimenter,
        }
    }
}

/// Experimenter multipart body. `data` is written by the plugin registered
/// for `(experimenter_id, exp_type)`.
#[derive(Debug, PartialEq, Clone)]
pub struct ExperimenterMultipart {
    pub experimenter_id: u32,
    pub exp_type: u32,
    pub data: Vec<u8>,
}

/// Body of flow and aggregate stats requests.
#[derive(Debug, PartialEq, Clone)]
pub struct FlowStatsRequest {
    /// `TABLE_ALL` for all tables.
    pub table_id: u8,
    // pad 3 bytes
    pub out_port: PortNumber,
    pub out_group: u32,
    // pad 4 bytes
    pub cookie: u64,
    pub cookie_mask: u64,
    pub mmatch: Match,
}

#[derive(Debug, PartialEq, Clone)]
pub struct QueueStatsRequest {
    pub port_no: PortNumber,
    pub queue_id: u32,
}

/// Switch description, null-padded strings.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Desc {
    /// Manufacturer description, up to 256 bytes.
    pub mfr_desc: String,
    pub hw_desc: String,
    pub sw_desc: String,
    /// Serial number, up to 32 bytes.
    pub serial_num: String,
    /// Human readable description of datapath.
    pub dp_desc: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FlowStats {
    //length 2 bytes
    pub table_id: u8,
    //pad 1 byte
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub priority: u16,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    pub flags: FlowModFlags,
    //pad 4 bytes
    pub cookie: u64,
    pub packet_count: u64,
    pub byte_count: u64,
    pub mmatch: Match,
    pub instructions: Vec<Instruction>,
}

/// Aggregate stats reply, identical in 1.0 and 1.3.
#[derive(Debug, PartialEq, Clone)]
pub struct AggregateStats {
    pub packet_count: u64,
    pub byte_count: u64,
    pub flow_count: u32,
    //pad 4 bytes
}

#[derive(Debug, PartialEq, Clone)]
pub struct TableStats {
    pub table_id: u8,
    //pad 3 bytes
    pub active_count: u32,
    pub lookup_count: u64,
    pub matched_count: u64,
}

/// The twelve port counters, identical in 1.0 and 1.3.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct PortCounters {
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_dropped: u64,
    pub tx_dropped: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    pub rx_frame_err: u64,
    pub rx_over_err: u64,
    pub rx_crc_err: u64,
    pub collisions: u64,
}

#[derive(Debug, PartialEq, Clone)]
pub struct PortStats {
    pub port_no: PortNumber,
    //pad 4 bytes
    pub counters: PortCounters,
    pub duration_sec: u32,
    pub duration_nsec: u32,
}

#[derive(Debug, PartialEq, Clone)]
pub struct QueueStats {
    pub port_no: PortNumber,
    pub queue_id: u32,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errors: u64,
    pub duration_sec: u32,
    pub duration_nsec: u32,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BucketCounter {
    pub packet_count: u64,
    pub byte_count: u64,
}

#[derive(Debug, PartialEq, Clone)]
pub struct GroupStats {
    //length 2 bytes
    //pad 2 bytes
    pub group_id: u32,
    pub ref_count: u32,
    //pad 4 bytes
    pub packet_count: u64,
    pub byte_count: u64,
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub bucket_stats: Vec<BucketCounter>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct GroupDesc {
    //length 2 bytes
    pub ttype: GroupType,
    //pad 1 byte
    pub group_id: u32,
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct GroupFeatures {
    pub types: GroupTypes,
    pub capabilities: GroupCapabilities,
    /// Maximum number of groups for each type.
    pub max_groups: [u32; 4],
    /// Supported actions for each group type.
    pub actions: [ActionTypes; 4],
}

#[derive(Debug, PartialEq, Clone)]
pub struct MeterBandStats {
    pub packet_band_count: u64,
    pub byte_band_count: u64,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MeterStats {
    pub meter_id: u32,
    //len 2 bytes
    //pad 6 bytes
    pub flow_count: u32,
    pub packet_in_count: u64,
    pub byte_in_count: u64,
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub band_stats: Vec<MeterBandStats>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MeterConfig {
    //length 2 bytes
    pub flags: MeterFlags,
    pub meter_id: u32,
    pub bands: Vec<MeterBand>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MeterFeatures {
    pub max_meter: u32,
    pub band_types: MeterBandTypes,
    pub capabilities: MeterFlags,
    pub max_bands: u8,
    pub max_color: u8,
    //pad 2 bytes
}
