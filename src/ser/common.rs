//! Symmetric and switch-configuration messages: hello, error, echo,
//! experimenter, features, switch config and the header-only requests.

use byteorder::{BigEndian, WriteBytesExt};

use crate::bits::{pack, tables};
use crate::buf::WireBuf;
use crate::ds::symmetric::{ErrorMsg, HelloElement, ERROR_TYPE_EXPERIMENTER, HELLO_ELEM_VERSIONBITMAP};
use crate::ds::{OfMsg, OfPayload};
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::ofp_err::{ErrorType, VersionedCode};
use crate::registry::*;
use crate::ser::port::write_port_v10;
use crate::ser::{start_message, unexpected_payload, write_experimenter_body};

pub struct HelloSerializer;

impl OfSerializer<OfMsg> for HelloSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let hello = expect_payload!(msg, Hello);
        let version = *msg.version();
        if version < Version::V1_3 && !hello.elements.is_empty() {
            warn!("Hello elements are not supported by {:?}", version);
            bail!(ErrorKind::VersionMismatch(version, Version::V1_3, "hello elements"));
        }
        let start = start_message(Type::Hello, msg, out)?;
        for element in &hello.elements {
            let element_start = out.position();
            match element {
                HelloElement::VersionBitmap(bitmaps) => {
                    out.write_u16::<BigEndian>(HELLO_ELEM_VERSIONBITMAP)?;
                    let mark = out.reserve_length(element_start);
                    for bitmap in bitmaps {
                        out.write_u32::<BigEndian>(*bitmap)?;
                    }
                    // length excludes the padding
                    out.patch_length(mark)?;
                }
            }
            out.pad_to_multiple(element_start, 8);
        }
        update_header_length(out, start)
    }
}

pub struct ErrorSerializer;

impl OfSerializer<OfMsg> for ErrorSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let error = expect_payload!(msg, Error);
        let version = *msg.version();
        let start = start_message(Type::Error, msg, out)?;
        match error {
            ErrorMsg::Standard { code, data } => {
                let (ttype, code) = code.encode(version)?;
                out.write_u16::<BigEndian>(ttype)?;
                out.write_u16::<BigEndian>(code)?;
                out.extend_from_slice(data);
            }
            ErrorMsg::Experimenter {
                exp_type,
                experimenter_id,
                ..
            } => {
                ErrorType::Experimenter.validate(version)?;
                out.write_u16::<BigEndian>(ERROR_TYPE_EXPERIMENTER)?;
                out.write_u16::<BigEndian>(*exp_type)?;
                out.write_u32::<BigEndian>(*experimenter_id)?;
                let key = ExperimenterKey::new(
                    version,
                    ExperimenterSpace::Error,
                    *experimenter_id,
                    Some(u32::from(*exp_type)),
                );
                write_experimenter_body(error, key, registry, out)?;
            }
        }
        update_header_length(out, start)
    }
}

/// Echo request or reply, the body is copied unchanged.
pub struct EchoSerializer {
    pub ttype: Type,
}

impl OfSerializer<OfMsg> for EchoSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let data = match (self.ttype, msg.payload()) {
            (Type::EchoRequest, OfPayload::EchoRequest(data))
            | (Type::EchoReply, OfPayload::EchoReply(data)) => data,
            _ => return Err(unexpected_payload("echo data", msg)),
        };
        let start = start_message(self.ttype, msg, out)?;
        out.extend_from_slice(data);
        update_header_length(out, start)
    }
}

/// Messages that are just the header.
pub struct EmptySerializer {
    pub ttype: Type,
}

impl OfSerializer<OfMsg> for EmptySerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        if msg.message_type() != self.ttype {
            return Err(unexpected_payload("empty", msg));
        }
        let start = start_message(self.ttype, msg, out)?;
        update_header_length(out, start)
    }
}

/// Experimenter message, or vendor message in OpenFlow 1.0 where there is
/// no experimenter type on the wire. A 1.0 vendor message must leave
/// `exp_type` at 0.
pub struct ExperimenterSerializer;

impl OfSerializer<OfMsg> for ExperimenterSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let experimenter = expect_payload!(msg, Experimenter);
        let version = *msg.version();
        if version == Version::V1_0 && experimenter.exp_type != 0 {
            warn!(
                "Experimenter type {} cannot be encoded in {:?}",
                experimenter.exp_type, version
            );
            bail!(ErrorKind::VersionMismatch(version, Version::V1_1, "experimenter type"));
        }
        let start = start_message(Type::Experimenter, msg, out)?;
        out.write_u32::<BigEndian>(experimenter.experimenter_id)?;
        let subtype = if version == Version::V1_0 {
            None
        } else {
            out.write_u32::<BigEndian>(experimenter.exp_type)?;
            Some(experimenter.exp_type)
        };
        let key = ExperimenterKey::new(
            version,
            ExperimenterSpace::Message,
            experimenter.experimenter_id,
            subtype,
        );
        write_experimenter_body(experimenter, key, registry, out)?;
        update_header_length(out, start)
    }
}

pub struct FeaturesReplySerializer;

impl OfSerializer<OfMsg> for FeaturesReplySerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let features = expect_payload!(msg, FeaturesReply);
        let start = start_message(Type::FeaturesReply, msg, out)?;
        out.write_u64::<BigEndian>(features.datapath_id)?;
        out.write_u32::<BigEndian>(features.n_buffers)?;
        out.write_u8(features.n_tables)?;
        out.write_u8(features.auxiliary_id)?;
        out.write_zeros(2);
        out.write_u32::<BigEndian>(pack(
            tables::capabilities(*msg.version()),
            features.capabilities,
        ))?;
        out.write_u32::<BigEndian>(features.reserved)?;
        update_header_length(out, start)
    }
}

pub struct FeaturesReplyV10Serializer;

impl OfSerializer<OfMsg> for FeaturesReplyV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let features = expect_payload!(msg, FeaturesReplyV10);
        let start = start_message(Type::FeaturesReply, msg, out)?;
        out.write_u64::<BigEndian>(features.datapath_id)?;
        out.write_u32::<BigEndian>(features.n_buffers)?;
        out.write_u8(features.n_tables)?;
        out.write_zeros(3);
        out.write_u32::<BigEndian>(pack(tables::CAPABILITIES_V10, features.capabilities))?;
        out.write_u32::<BigEndian>(pack(tables::ACTION_TYPES_V10, features.actions))?;
        for port in &features.ports {
            write_port_v10(port, out)?;
        }
        update_header_length(out, start)
    }
}

/// Get-config reply or set-config.
pub struct SwitchConfigSerializer {
    pub ttype: Type,
}

impl OfSerializer<OfMsg> for SwitchConfigSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let config = match (self.ttype, msg.payload()) {
            (Type::GetConfigReply, OfPayload::GetConfigReply(config))
            | (Type::SetConfig, OfPayload::SetConfig(config)) => config,
            _ => return Err(unexpected_payload("SwitchConfig", msg)),
        };
        let start = start_message(self.ttype, msg, out)?;
        out.write_u16::<BigEndian>(config.flags as u16)?;
        out.write_u16::<BigEndian>(config.miss_send_len)?;
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    let mut builder = builder;
    for version in [Version::V1_0, Version::V1_3] {
        builder = builder
            .register_message(version, Type::Hello, HelloSerializer)
            .register_message(version, Type::Error, ErrorSerializer)
            .register_message(version, Type::Experimenter, ExperimenterSerializer);
        for ttype in [Type::EchoRequest, Type::EchoReply] {
            builder = builder.register_message(version, ttype, EchoSerializer { ttype });
        }
        for ttype in [Type::GetConfigReply, Type::SetConfig] {
            builder = builder.register_message(version, ttype, SwitchConfigSerializer { ttype });
        }
        for ttype in [
            Type::FeaturesRequest,
            Type::GetConfigRequest,
            Type::BarrierRequest,
            Type::BarrierReply,
        ] {
            builder = builder.register_message(version, ttype, EmptySerializer { ttype });
        }
    }
    builder
        .register_message(
            Version::V1_3,
            Type::GetAsyncRequest,
            EmptySerializer {
                ttype: Type::GetAsyncRequest,
            },
        )
        .register_message(Version::V1_3, Type::FeaturesReply, FeaturesReplySerializer)
        .register_message(Version::V1_0, Type::FeaturesReply, FeaturesReplyV10Serializer)
}
