use super::actions::{Action, ActionV10};
use super::ports::{PortNumber, PortNumberV10};

/// Fixed part of a 1.3 packet out, header included.
pub const PACKET_OUT_LEN: usize = 24;

/// Send a packet out of the datapath (OpenFlow 1.3). The actions length is
/// computed while encoding.
#[derive(Debug, PartialEq, Clone)]
pub struct PacketOut {
    pub buffer_id: u32,
    pub in_port: PortNumber,
    //actions_len 2 bytes
    //pad 6 bytes
    pub actions: Vec<Action>,
    pub data: Vec<u8>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct PacketOutV10 {
    pub buffer_id: u32,
    pub in_port: PortNumberV10,
    pub actions: Vec<ActionV10>,
    pub data: Vec<u8>,
}
