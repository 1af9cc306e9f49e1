//! Flow table messages: flow mod, flow removed and table mod.

use byteorder::{BigEndian, WriteBytesExt};

use crate::bits::{pack, tables};
use crate::buf::WireBuf;
use crate::ds::flow_removed::FlowRemovedReason;
use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::registry::*;
use crate::ser::action_codec::{write_actions_v10, write_instructions};
use crate::ser::match_codec::{write_match, write_match_v10};
use crate::ser::start_message;

pub struct FlowModSerializer;

impl OfSerializer<OfMsg> for FlowModSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let flow_mod = expect_payload!(msg, FlowMod);
        let version = *msg.version();
        let start = start_message(Type::FlowMod, msg, out)?;
        out.write_u64::<BigEndian>(flow_mod.cookie)?;
        out.write_u64::<BigEndian>(flow_mod.cookie_mask)?;
        out.write_u8(flow_mod.table_id)?;
        out.write_u8(flow_mod.command as u8)?;
        out.write_u16::<BigEndian>(flow_mod.idle_timeout)?;
        out.write_u16::<BigEndian>(flow_mod.hard_timeout)?;
        out.write_u16::<BigEndian>(flow_mod.priority)?;
        out.write_u32::<BigEndian>(flow_mod.buffer_id)?;
        out.write_u32::<BigEndian>(flow_mod.out_port.wire())?;
        out.write_u32::<BigEndian>(flow_mod.out_group)?;
        out.write_u16::<BigEndian>(pack(tables::flow_mod_flags(version), flow_mod.flags) as u16)?;
        out.write_zeros(2);
        write_match(&flow_mod.mmatch, version, registry, out)?;
        write_instructions(&flow_mod.instructions, version, registry, out)?;
        update_header_length(out, start)
    }
}

pub struct FlowModV10Serializer;

impl OfSerializer<OfMsg> for FlowModV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let flow_mod = expect_payload!(msg, FlowModV10);
        let start = start_message(Type::FlowMod, msg, out)?;
        write_match_v10(&flow_mod.mmatch, registry, out)?;
        out.write_u64::<BigEndian>(flow_mod.cookie)?;
        out.write_u16::<BigEndian>(flow_mod.command as u16)?;
        out.write_u16::<BigEndian>(flow_mod.idle_timeout)?;
        out.write_u16::<BigEndian>(flow_mod.hard_timeout)?;
        out.write_u16::<BigEndian>(flow_mod.priority)?;
        out.write_u32::<BigEndian>(flow_mod.buffer_id)?;
        out.write_u16::<BigEndian>(flow_mod.out_port.wire())?;
        out.write_u16::<BigEndian>(pack(tables::FLOW_MOD_FLAGS_V10, flow_mod.flags) as u16)?;
        write_actions_v10(&flow_mod.actions, registry, out)?;
        update_header_length(out, start)
    }
}

pub struct FlowRemovedSerializer;

impl OfSerializer<OfMsg> for FlowRemovedSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let removed = expect_payload!(msg, FlowRemoved);
        let start = start_message(Type::FlowRemoved, msg, out)?;
        out.write_u64::<BigEndian>(removed.cookie)?;
        out.write_u16::<BigEndian>(removed.priority)?;
        out.write_u8(removed.reason as u8)?;
        out.write_u8(removed.table_id)?;
        out.write_u32::<BigEndian>(removed.duration_sec)?;
        out.write_u32::<BigEndian>(removed.duration_nsec)?;
        out.write_u16::<BigEndian>(removed.idle_timeout)?;
        out.write_u16::<BigEndian>(removed.hard_timeout)?;
        out.write_u64::<BigEndian>(removed.packet_count)?;
        out.write_u64::<BigEndian>(removed.byte_count)?;
        write_match(&removed.mmatch, *msg.version(), registry, out)?;
        update_header_length(out, start)
    }
}

pub struct FlowRemovedV10Serializer;

impl OfSerializer<OfMsg> for FlowRemovedV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let removed = expect_payload!(msg, FlowRemovedV10);
        if removed.reason == FlowRemovedReason::GroupDelete {
            bail!(ErrorKind::IllegalValue(
                removed.reason as u64,
                stringify!(FlowRemovedReason)
            ));
        }
        let start = start_message(Type::FlowRemoved, msg, out)?;
        write_match_v10(&removed.mmatch, registry, out)?;
        out.write_u64::<BigEndian>(removed.cookie)?;
        out.write_u16::<BigEndian>(removed.priority)?;
        out.write_u8(removed.reason as u8)?;
        out.write_zeros(1);
        out.write_u32::<BigEndian>(removed.duration_sec)?;
        out.write_u32::<BigEndian>(removed.duration_nsec)?;
        out.write_u16::<BigEndian>(removed.idle_timeout)?;
        out.write_zeros(2);
        out.write_u64::<BigEndian>(removed.packet_count)?;
        out.write_u64::<BigEndian>(removed.byte_count)?;
        update_header_length(out, start)
    }
}

pub struct TableModSerializer;

impl OfSerializer<OfMsg> for TableModSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let table_mod = expect_payload!(msg, TableMod);
        let start = start_message(Type::TableMod, msg, out)?;
        out.write_u8(table_mod.table_id)?;
        out.write_zeros(3);
        out.write_u32::<BigEndian>(pack(tables::TABLE_CONFIG, table_mod.config))?;
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register_message(Version::V1_3, Type::FlowMod, FlowModSerializer)
        .register_message(Version::V1_0, Type::FlowMod, FlowModV10Serializer)
        .register_message(Version::V1_3, Type::FlowRemoved, FlowRemovedSerializer)
        .register_message(Version::V1_0, Type::FlowRemoved, FlowRemovedV10Serializer)
        .register_message(Version::V1_3, Type::TableMod, TableModSerializer)
}
