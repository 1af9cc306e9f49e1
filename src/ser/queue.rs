//! Queue configuration requests and replies.

use byteorder::{BigEndian, WriteBytesExt};

use crate::buf::WireBuf;
use crate::ds::packet_queue::{PacketQueue, PacketQueueV10};
use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::registry::*;
use crate::ser::action_codec::write_queue_properties;
use crate::ser::start_message;

pub fn write_packet_queue(
    queue: &PacketQueue,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    let start = out.position();
    out.write_u32::<BigEndian>(queue.queue_id)?;
    out.write_u32::<BigEndian>(queue.port.wire())?;
    let mark = out.reserve_length(start);
    out.write_zeros(6);
    write_queue_properties(&queue.properties, version, registry, out)?;
    out.patch_length(mark)?;
    Ok(())
}

pub fn write_packet_queue_v10(
    queue: &PacketQueueV10,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    let start = out.position();
    out.write_u32::<BigEndian>(queue.queue_id)?;
    let mark = out.reserve_length(start);
    out.write_zeros(2);
    write_queue_properties(&queue.properties, Version::V1_0, registry, out)?;
    out.patch_length(mark)?;
    Ok(())
}

pub struct QueueGetConfigRequestSerializer;

impl OfSerializer<OfMsg> for QueueGetConfigRequestSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let request = expect_payload!(msg, QueueGetConfigRequest);
        let start = start_message(Type::QueueGetConfigRequest, msg, out)?;
        out.write_u32::<BigEndian>(request.port.wire())?;
        out.write_zeros(4);
        update_header_length(out, start)
    }
}

pub struct QueueGetConfigRequestV10Serializer;

impl OfSerializer<OfMsg> for QueueGetConfigRequestV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let request = expect_payload!(msg, QueueGetConfigRequestV10);
        let start = start_message(Type::QueueGetConfigRequest, msg, out)?;
        out.write_u16::<BigEndian>(request.port.wire())?;
        out.write_zeros(2);
        update_header_length(out, start)
    }
}

pub struct QueueGetConfigReplySerializer;

impl OfSerializer<OfMsg> for QueueGetConfigReplySerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let reply = expect_payload!(msg, QueueGetConfigReply);
        let start = start_message(Type::QueueGetConfigReply, msg, out)?;
        out.write_u32::<BigEndian>(reply.port.wire())?;
        out.write_zeros(4);
        for queue in &reply.queues {
            write_packet_queue(queue, *msg.version(), registry, out)?;
        }
        update_header_length(out, start)
    }
}

pub struct QueueGetConfigReplyV10Serializer;

impl OfSerializer<OfMsg> for QueueGetConfigReplyV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let reply = expect_payload!(msg, QueueGetConfigReplyV10);
        let start = start_message(Type::QueueGetConfigReply, msg, out)?;
        out.write_u16::<BigEndian>(reply.port.wire())?;
        out.write_zeros(6);
        for queue in &reply.queues {
            write_packet_queue_v10(queue, registry, out)?;
        }
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    let v10 = Version::V1_0;
    let v13 = Version::V1_3;
    builder
        .register_message(v13, Type::QueueGetConfigRequest, QueueGetConfigRequestSerializer)
        .register_message(v10, Type::QueueGetConfigRequest, QueueGetConfigRequestV10Serializer)
        .register_message(v13, Type::QueueGetConfigReply, QueueGetConfigReplySerializer)
        .register_message(v10, Type::QueueGetConfigReply, QueueGetConfigReplyV10Serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::packet_queue::*;
    use crate::ds::ports::{PortNo, PortNumber, PortNumberV10};
    use crate::ds::queue_config::*;
    use crate::ds::OfPayload;
    use crate::ser::default_registry;

    #[test]
    fn requests() {
        let registry = default_registry();
        let request = QueueGetConfigRequest {
            port: PortNumber::Reserved(PortNo::Any),
        };
        let bytes = registry
            .encode(&OfMsg::new(Version::V1_3, 1, OfPayload::QueueGetConfigRequest(request)))
            .unwrap();
        assert_eq!(bytes, vec![4, 22, 0, 16, 0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0]);

        let request = QueueGetConfigRequestV10 {
            port: PortNumberV10::NormalPort(1),
        };
        let bytes = registry
            .encode(&OfMsg::new(Version::V1_0, 1, OfPayload::QueueGetConfigRequestV10(request)))
            .unwrap();
        assert_eq!(bytes, vec![1, 20, 0, 12, 0, 0, 0, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn reply_queues_carry_lengths() {
        let reply = QueueGetConfigReply {
            port: PortNumber::NormalPort(1),
            queues: vec![PacketQueue {
                queue_id: 7,
                port: PortNumber::NormalPort(1),
                properties: vec![QueueProperty::MinRate(100), QueueProperty::MaxRate(900)],
            }],
        };
        let bytes = default_registry()
            .encode(&OfMsg::new(Version::V1_3, 1, OfPayload::QueueGetConfigReply(reply)))
            .unwrap();
        assert_eq!(bytes.len(), 16 + PACKET_QUEUE_LENGTH + 2 * QUEUE_PROP_RATE_LENGTH as usize);
        assert_eq!(&bytes[24..26], &[0, 48]);
    }

    #[test]
    fn v10_reply() {
        let reply = QueueGetConfigReplyV10 {
            port: PortNumberV10::NormalPort(2),
            queues: vec![PacketQueueV10 {
                queue_id: 1,
                properties: vec![QueueProperty::MinRate(10)],
            }],
        };
        let bytes = default_registry()
            .encode(&OfMsg::new(Version::V1_0, 1, OfPayload::QueueGetConfigReplyV10(reply)))
            .unwrap();
        assert_eq!(bytes.len(), 16 + PACKET_QUEUE_V10_LENGTH + QUEUE_PROP_RATE_LENGTH as usize);
        assert_eq!(&bytes[20..22], &[0, 24]);
    }
}
