use super::ports::PortNumber;

/// Fixed part of a 1.3 PacketQueue struct is 16 bytes.
pub const PACKET_QUEUE_LENGTH: usize = 16;
/// Fixed part of a 1.0 PacketQueue struct is 8 bytes.
pub const PACKET_QUEUE_V10_LENGTH: usize = 8;
/// Min and max rate properties are 16 bytes.
pub const QUEUE_PROP_RATE_LENGTH: u16 = 16;

/// OpenFlow full description for a queue.
#[derive(Debug, PartialEq, Clone)]
pub struct PacketQueue {
    /// id for the specific queue.
    pub queue_id: u32,
    /// Port this queue is attached to.
    pub port: PortNumber,
    //len 2 bytes
    // pad 6 bytes
    pub properties: Vec<QueueProperty>,
}

/// OpenFlow 1.0 queue, without the port.
#[derive(Debug, PartialEq, Clone)]
pub struct PacketQueueV10 {
    pub queue_id: u32,
    //len 2 bytes
    // pad 2 bytes
    pub properties: Vec<QueueProperty>,
}

#[derive(Primitive, Debug, PartialEq, Eq, Clone, Copy)]
pub enum QueuePropertyType {
    /// Minimum datarate guaranteed.
    MinRate = 1,
    /// Maximum datarate (1.2+).
    MaxRate = 2,
    /// Experimenter defined property (1.2+).
    Experimenter = 0xffff,
}

/// Rates are in 1/10 of a percent; values above 1000 disable the limit.
#[derive(Debug, PartialEq, Clone)]
pub enum QueueProperty {
    MinRate(u16),
    MaxRate(u16),
    Experimenter { experimenter_id: u32, data: Vec<u8> },
}

impl QueueProperty {
    pub fn property_type(&self) -> QueuePropertyType {
        match *self {
            QueueProperty::MinRate(_) => QueuePropertyType::MinRate,
            QueueProperty::MaxRate(_) => QueuePropertyType::MaxRate,
            QueueProperty::Experimenter { .. } => QueuePropertyType::Experimenter,
        }
    }
}
