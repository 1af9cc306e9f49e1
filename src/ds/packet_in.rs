use super::flow_match::Match;
use super::ports::PortNumberV10;

/// A packet handed to the controller by the datapath.
#[derive(Debug, PartialEq, Clone)]
pub struct PacketIn {
    pub buffer_id: u32,
    pub total_len: u16,
    pub reason: PacketInReason,
    pub table_id: u8,
    pub cookie: u64,
    /// Pipeline fields at the time of the punt, always OXM.
    pub mmatch: Match,
    pub data: Vec<u8>,
}

/// 1.0 packet in. Only the ingress port is reported, there is no
/// table, cookie or match.
#[derive(Debug, PartialEq, Clone)]
pub struct PacketInV10 {
    pub buffer_id: u32,
    pub total_len: u16,
    pub in_port: PortNumberV10,
    pub reason: PacketInReason,
    pub data: Vec<u8>,
}

#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum PacketInReason {
    /// Hit the table-miss entry.
    NoMatch = 0,
    /// An output action targeted the controller port.
    Action = 1,
    /// Not defined before 1.1.
    InvalidTtl = 2,
}
