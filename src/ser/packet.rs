//! Packet in and packet out.

use byteorder::{BigEndian, WriteBytesExt};

use crate::buf::{LengthMark, WireBuf};
use crate::ds::packet_in::PacketInReason;
use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::registry::*;
use crate::ser::action_codec::{write_actions, write_actions_v10};
use crate::ser::match_codec::write_match;
use crate::ser::start_message;

/// Reserves the `actions_len` field and returns its offset.
fn reserve_actions_len(out: &mut Vec<u8>) -> usize {
    let field = out.position();
    out.write_zeros(2);
    field
}

pub struct PacketInSerializer;

impl OfSerializer<OfMsg> for PacketInSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let packet_in = expect_payload!(msg, PacketIn);
        let version = *msg.version();
        let start = start_message(Type::PacketIn, msg, out)?;
        out.write_u32::<BigEndian>(packet_in.buffer_id)?;
        out.write_u16::<BigEndian>(packet_in.total_len)?;
        out.write_u8(packet_in.reason as u8)?;
        out.write_u8(packet_in.table_id)?;
        out.write_u64::<BigEndian>(packet_in.cookie)?;
        write_match(&packet_in.mmatch, version, registry, out)?;
        out.write_zeros(2);
        out.extend_from_slice(&packet_in.data);
        update_header_length(out, start)
    }
}

pub struct PacketInV10Serializer;

impl OfSerializer<OfMsg> for PacketInV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let packet_in = expect_payload!(msg, PacketInV10);
        if packet_in.reason == PacketInReason::InvalidTtl {
            bail!(ErrorKind::IllegalValue(
                packet_in.reason as u64,
                stringify!(PacketInReason)
            ));
        }
        let start = start_message(Type::PacketIn, msg, out)?;
        out.write_u32::<BigEndian>(packet_in.buffer_id)?;
        out.write_u16::<BigEndian>(packet_in.total_len)?;
        out.write_u16::<BigEndian>(packet_in.in_port.wire())?;
        out.write_u8(packet_in.reason as u8)?;
        out.write_zeros(1);
        out.extend_from_slice(&packet_in.data);
        update_header_length(out, start)
    }
}

pub struct PacketOutSerializer;

impl OfSerializer<OfMsg> for PacketOutSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let packet_out = expect_payload!(msg, PacketOut);
        let start = start_message(Type::PacketOut, msg, out)?;
        out.write_u32::<BigEndian>(packet_out.buffer_id)?;
        out.write_u32::<BigEndian>(packet_out.in_port.wire())?;
        let field = reserve_actions_len(out);
        out.write_zeros(6);
        let actions_start = out.position();
        write_actions(&packet_out.actions, *msg.version(), registry, out)?;
        out.patch_length(LengthMark::new(actions_start, field))?;
        out.extend_from_slice(&packet_out.data);
        update_header_length(out, start)
    }
}

pub struct PacketOutV10Serializer;

impl OfSerializer<OfMsg> for PacketOutV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let packet_out = expect_payload!(msg, PacketOutV10);
        let start = start_message(Type::PacketOut, msg, out)?;
        out.write_u32::<BigEndian>(packet_out.buffer_id)?;
        out.write_u16::<BigEndian>(packet_out.in_port.wire())?;
        let field = reserve_actions_len(out);
        let actions_start = out.position();
        write_actions_v10(&packet_out.actions, registry, out)?;
        out.patch_length(LengthMark::new(actions_start, field))?;
        out.extend_from_slice(&packet_out.data);
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register_message(Version::V1_3, Type::PacketIn, PacketInSerializer)
        .register_message(Version::V1_0, Type::PacketIn, PacketInV10Serializer)
        .register_message(Version::V1_3, Type::PacketOut, PacketOutSerializer)
        .register_message(Version::V1_0, Type::PacketOut, PacketOutV10Serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::actions::{Action, ActionV10};
    use crate::ds::flow_match::{Match, MatchField};
    use crate::ds::packet_in::{PacketIn, PacketInV10};
    use crate::ds::packet_out::{PacketOut, PacketOutV10, PACKET_OUT_LEN};
    use crate::ds::ports::{PortNo, PortNoV10, PortNumber, PortNumberV10};
    use crate::ds::OfPayload;
    use crate::ser::default_registry;

    #[test]
    fn packet_in_pads_after_match() {
        let packet_in = PacketIn {
            buffer_id: 0xffffffff,
            total_len: 2,
            reason: PacketInReason::Action,
            table_id: 0,
            cookie: 0,
            mmatch: Match::new(vec![MatchField::InPort(PortNumber::NormalPort(1))]),
            data: vec![0xab, 0xcd],
        };
        let bytes = default_registry()
            .encode(&OfMsg::new(Version::V1_3, 1, OfPayload::PacketIn(packet_in)))
            .unwrap();
        // header 8, fixed 16, match 16, pad 2, data 2
        assert_eq!(bytes.len(), 44);
        assert_eq!(&bytes[40..], &[0, 0, 0xab, 0xcd]);
    }

    #[test]
    fn v10_packet_in_rejects_invalid_ttl() {
        let packet_in = PacketInV10 {
            buffer_id: 1,
            total_len: 0,
            in_port: PortNumberV10::NormalPort(1),
            reason: PacketInReason::InvalidTtl,
            data: Vec::new(),
        };
        let registry = default_registry();
        let msg = OfMsg::new(Version::V1_0, 1, OfPayload::PacketInV10(packet_in.clone()));
        assert!(registry.encode(&msg).is_err());

        let packet_in = PacketInV10 {
            reason: PacketInReason::NoMatch,
            ..packet_in
        };
        let msg = OfMsg::new(Version::V1_0, 1, OfPayload::PacketInV10(packet_in));
        assert_eq!(registry.encode(&msg).unwrap().len(), 18);
    }

    #[test]
    fn packet_out_backpatches_actions_len() {
        let packet_out = PacketOut {
            buffer_id: 0xffffffff,
            in_port: PortNumber::Reserved(PortNo::Controller),
            actions: vec![Action::Output {
                port: PortNumber::Reserved(PortNo::Flood),
                max_len: 0,
            }],
            data: vec![1, 2, 3],
        };
        let bytes = default_registry()
            .encode(&OfMsg::new(Version::V1_3, 1, OfPayload::PacketOut(packet_out)))
            .unwrap();
        assert_eq!(bytes.len(), PACKET_OUT_LEN + 16 + 3);
        assert_eq!(&bytes[16..18], &[0, 16]);
        assert_eq!(&bytes[40..], &[1, 2, 3]);
    }

    #[test]
    fn v10_packet_out() {
        let packet_out = PacketOutV10 {
            buffer_id: 7,
            in_port: PortNumberV10::Reserved(PortNoV10::NoPort),
            actions: vec![
                ActionV10::Output {
                    port: PortNumberV10::NormalPort(2),
                    max_len: 0,
                },
                ActionV10::StripVlan,
            ],
            data: Vec::new(),
        };
        let bytes = default_registry()
            .encode(&OfMsg::new(Version::V1_0, 1, OfPayload::PacketOutV10(packet_out)))
            .unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[12..16], &[0xff, 0xff, 0, 16]);
    }
}
