//! Group mod and meter mod, plus the bucket codec shared with group
//! description replies.

use byteorder::{BigEndian, WriteBytesExt};

use crate::bits::{pack, tables};
use crate::buf::WireBuf;
use crate::ds::group_mod::Bucket;
use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::registry::*;
use crate::ser::action_codec::{write_actions, write_meter_bands};
use crate::ser::start_message;

/// `ofp_bucket` with its length backpatched.
pub fn write_bucket(
    bucket: &Bucket,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    let start = out.position();
    let mark = out.reserve_length(start);
    out.write_u16::<BigEndian>(bucket.weight)?;
    out.write_u32::<BigEndian>(bucket.watch_port.wire())?;
    out.write_u32::<BigEndian>(bucket.watch_group)?;
    out.write_zeros(4);
    write_actions(&bucket.actions, version, registry, out)?;
    out.patch_length(mark)?;
    Ok(())
}

pub fn write_buckets(
    buckets: &[Bucket],
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    for bucket in buckets {
        write_bucket(bucket, version, registry, out)?;
    }
    Ok(())
}

pub struct GroupModSerializer;

impl OfSerializer<OfMsg> for GroupModSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let group_mod = expect_payload!(msg, GroupMod);
        let start = start_message(Type::GroupMod, msg, out)?;
        out.write_u16::<BigEndian>(group_mod.command as u16)?;
        out.write_u8(group_mod.ttype as u8)?;
        out.write_zeros(1);
        out.write_u32::<BigEndian>(group_mod.group_id)?;
        write_buckets(&group_mod.buckets, *msg.version(), registry, out)?;
        update_header_length(out, start)
    }
}

pub struct MeterModSerializer;

impl OfSerializer<OfMsg> for MeterModSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let meter_mod = expect_payload!(msg, MeterMod);
        let start = start_message(Type::MeterMod, msg, out)?;
        out.write_u16::<BigEndian>(meter_mod.command as u16)?;
        out.write_u16::<BigEndian>(pack(tables::METER_FLAGS, meter_mod.flags) as u16)?;
        out.write_u32::<BigEndian>(meter_mod.meter_id)?;
        write_meter_bands(&meter_mod.bands, *msg.version(), registry, out)?;
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register_message(Version::V1_3, Type::GroupMod, GroupModSerializer)
        .register_message(Version::V1_3, Type::MeterMod, MeterModSerializer)
}
