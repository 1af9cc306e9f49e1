//! Controller role and asynchronous message configuration.

use byteorder::{BigEndian, WriteBytesExt};

use crate::bits::{pack, tables};
use crate::buf::WireBuf;
use crate::ds::{OfMsg, OfPayload};
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::registry::*;
use crate::ser::{start_message, unexpected_payload};

/// Role request or reply.
pub struct RoleSerializer {
    pub ttype: Type,
}

impl OfSerializer<OfMsg> for RoleSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let role = match (self.ttype, msg.payload()) {
            (Type::RoleRequest, OfPayload::RoleRequest(role))
            | (Type::RoleReply, OfPayload::RoleReply(role)) => role,
            _ => return Err(unexpected_payload("Role", msg)),
        };
        let start = start_message(self.ttype, msg, out)?;
        out.write_u32::<BigEndian>(role.role as u32)?;
        out.write_zeros(4);
        out.write_u64::<BigEndian>(role.generation_id)?;
        update_header_length(out, start)
    }
}

/// Get-async reply or set-async.
pub struct AsyncConfigSerializer {
    pub ttype: Type,
}

impl OfSerializer<OfMsg> for AsyncConfigSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let config = match (self.ttype, msg.payload()) {
            (Type::GetAsyncReply, OfPayload::GetAsyncReply(config))
            | (Type::SetAsync, OfPayload::SetAsync(config)) => config,
            _ => return Err(unexpected_payload("AsyncConfig", msg)),
        };
        let start = start_message(self.ttype, msg, out)?;
        for mask in &config.packet_in_mask {
            out.write_u32::<BigEndian>(pack(tables::PACKET_IN_REASONS, *mask))?;
        }
        for mask in &config.port_status_mask {
            out.write_u32::<BigEndian>(pack(tables::PORT_REASONS, *mask))?;
        }
        for mask in &config.flow_removed_mask {
            out.write_u32::<BigEndian>(pack(tables::FLOW_REMOVED_REASONS, *mask))?;
        }
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    let mut builder = builder;
    for ttype in [Type::RoleRequest, Type::RoleReply] {
        builder = builder.register_message(Version::V1_3, ttype, RoleSerializer { ttype });
    }
    for ttype in [Type::GetAsyncReply, Type::SetAsync] {
        builder = builder.register_message(Version::V1_3, ttype, AsyncConfigSerializer { ttype });
    }
    builder
}
