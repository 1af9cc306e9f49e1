use super::actions::ActionTypes;
use super::ports::PortV10;

/// Features reply body from 1.3 on. Ports moved to the port description
/// multipart, so only datapath identity and sizing remain.
#[derive(Debug, PartialEq, Clone)]
pub struct SwitchFeatures {
    pub datapath_id: u64,
    pub n_buffers: u32,
    pub n_tables: u8,
    /// Non zero on auxiliary connections.
    pub auxiliary_id: u8,
    pub capabilities: Capabilities,
    pub reserved: u32,
}

/// OpenFlow 1.0 features reply. Lists the actions the switch supports and
/// all of its physical ports.
#[derive(Debug, PartialEq, Clone)]
pub struct SwitchFeaturesV10 {
    pub datapath_id: u64,
    pub n_buffers: u32,
    pub n_tables: u8,
    pub capabilities: Capabilities,
    pub actions: ActionTypes,
    pub ports: Vec<PortV10>,
}

bitflags! {
    /// `ofp_capabilities`. Wire positions differ between 1.0 and 1.3, see
    /// `bits::tables::capabilities`.
    #[derive(Default)]
    pub struct Capabilities: u32 {
        const FLOW_STATS = 1 << 0;
        const TABLE_STATS = 1 << 1;
        const PORT_STATS = 1 << 2;
        const GROUP_STATS = 1 << 3;
        const STP = 1 << 4;
        const IP_REASM = 1 << 5;
        const QUEUE_STATS = 1 << 6;
        const ARP_MATCH_IP = 1 << 7;
        const PORT_BLOCKED = 1 << 8;
    }
}
