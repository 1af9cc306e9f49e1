use super::packet_queue::{PacketQueue, PacketQueueV10};
use super::ports::{PortNumber, PortNumberV10};

#[derive(Debug, PartialEq, Clone)]
pub struct QueueGetConfigRequest {
    /// Port to be queried, `Any` for all configured queues.
    pub port: PortNumber,
    // pad 4 bytes
}

#[derive(Debug, PartialEq, Clone)]
pub struct QueueGetConfigRequestV10 {
    pub port: PortNumberV10,
    // pad 2 bytes
}

#[derive(Debug, PartialEq, Clone)]
pub struct QueueGetConfigReply {
    pub port: PortNumber,
    // pad 4 bytes
    pub queues: Vec<PacketQueue>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct QueueGetConfigReplyV10 {
    pub port: PortNumberV10,
    // pad 6 bytes
    pub queues: Vec<PacketQueueV10>,
}
