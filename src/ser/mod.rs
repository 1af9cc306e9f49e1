//! Message factories and sub-structure codecs for OpenFlow 1.0 and 1.3.
//!
//! Every factory writes the common header with its own type code, the fixed
//! fields in wire order, delegates nested lists to the registry and patches
//! the header length last. [`registry_builder`] wires all of them up.

use crate::ds::flow_match::ExperimenterField;
use crate::ds::meter_mod::MeterBand;
use crate::ds::multipart::ExperimenterMultipart;
use crate::ds::packet_queue::QueueProperty;
use crate::ds::stats_v10::VendorStats;
use crate::ds::symmetric::{ErrorMsg, ExperimenterMsg};
use crate::ds::table_features::ExperimenterProperty;
use crate::ds::actions::ExperimenterAction;
use crate::ds::flow_instructions::ExperimenterInstruction;
use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{write_header, Type};
use crate::registry::{ExperimenterKey, OfSerializer, RegistryBuilder, SerializerRegistry};

/// Borrows the body of `$msg` if it is the `$variant` shape, otherwise
/// returns `UnexpectedPayload` from the enclosing factory.
macro_rules! expect_payload {
    ($msg:expr, $variant:ident) => {
        match $msg.payload() {
            crate::ds::OfPayload::$variant(body) => body,
            _ => return Err(crate::ser::unexpected_payload(stringify!($variant), $msg)),
        }
    };
}

pub mod action_codec;
pub mod common;
pub mod flow;
pub mod group_meter;
pub mod match_codec;
pub mod multipart;
pub mod packet;
pub mod port;
pub mod queue;
pub mod role_async;
pub mod stats_v10;
pub mod table_features;

/// Builder holding every standard factory and codec. Vendor plugins are
/// added on top before `build()`.
pub fn registry_builder() -> RegistryBuilder {
    let builder = RegistryBuilder::new();
    let builder = match_codec::register(builder);
    let builder = action_codec::register(builder);
    let builder = table_features::register(builder);
    let builder = common::register(builder);
    let builder = flow::register(builder);
    let builder = packet::register(builder);
    let builder = port::register(builder);
    let builder = group_meter::register(builder);
    let builder = queue::register(builder);
    let builder = role_async::register(builder);
    let builder = multipart::register(builder);
    stats_v10::register(builder)
}

pub fn default_registry() -> SerializerRegistry {
    registry_builder().build()
}

pub(crate) fn unexpected_payload(expected: &'static str, msg: &OfMsg) -> Error {
    error!(
        "{:?} factory for {:?} got a body of another shape",
        msg.message_type(),
        msg.version()
    );
    ErrorKind::UnexpectedPayload(expected, msg.message_type()).into()
}

/// Writes the header for `ttype` and returns the message start.
pub(crate) fn start_message(ttype: Type, msg: &OfMsg, out: &mut Vec<u8>) -> Result<usize> {
    let version = *msg.version();
    let code = ttype.code(version).ok_or_else(|| {
        warn!("{:?} does not exist in {:?}", ttype, version);
        Error::from(ErrorKind::VersionMismatch(version, ttype.since(), "message type"))
    })?;
    write_header(code, msg, out)
}

/// Hands a vendor body to the plugin registered under `key`.
pub(crate) fn write_experimenter_body<T: 'static>(
    item: &T,
    key: ExperimenterKey,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    registry.lookup::<T>(key)?.serialize(item, out, registry)
}

/// Vendor plugin that writes the `data` of an experimenter structure as is.
///
/// Register it under the experimenter key of a vendor whose bodies are
/// already encoded by the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpaqueExperimenterSerializer;

macro_rules! opaque_struct_body {
    ($($t:ty),+) => {
        $(
            impl OfSerializer<$t> for OpaqueExperimenterSerializer {
                fn serialize(
                    &self,
                    item: &$t,
                    out: &mut Vec<u8>,
                    _: &SerializerRegistry,
                ) -> Result<()> {
                    out.extend_from_slice(&item.data);
                    Ok(())
                }
            }
        )+
    };
}

opaque_struct_body!(
    ExperimenterMsg,
    ExperimenterAction,
    ExperimenterInstruction,
    ExperimenterField,
    ExperimenterProperty,
    ExperimenterMultipart,
    VendorStats
);

impl OfSerializer<MeterBand> for OpaqueExperimenterSerializer {
    fn serialize(&self, item: &MeterBand, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        match item {
            MeterBand::Experimenter { data, .. } => {
                out.extend_from_slice(data);
                Ok(())
            }
            _ => bail!(ErrorKind::IllegalValue(
                item.band_type() as u64,
                "experimenter meter band"
            )),
        }
    }
}

impl OfSerializer<QueueProperty> for OpaqueExperimenterSerializer {
    fn serialize(
        &self,
        item: &QueueProperty,
        out: &mut Vec<u8>,
        _: &SerializerRegistry,
    ) -> Result<()> {
        match item {
            QueueProperty::Experimenter { data, .. } => {
                out.extend_from_slice(data);
                Ok(())
            }
            _ => bail!(ErrorKind::IllegalValue(
                item.property_type() as u64,
                "experimenter queue property"
            )),
        }
    }
}

impl OfSerializer<ErrorMsg> for OpaqueExperimenterSerializer {
    fn serialize(&self, item: &ErrorMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        match item {
            ErrorMsg::Experimenter { data, .. } => {
                out.extend_from_slice(data);
                Ok(())
            }
            ErrorMsg::Standard { .. } => {
                bail!(ErrorKind::IllegalValue(0, "experimenter error"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::OfPayload;
    use crate::header::Version;

    #[test]
    fn standard_registry_covers_both_versions() {
        let registry = default_registry();
        for ttype in [Type::Hello, Type::FlowMod, Type::MultipartReply, Type::PortMod] {
            for version in [Version::V1_0, Version::V1_3] {
                assert!(registry.contains(crate::registry::MessageTypeKey::new(version, ttype)));
            }
        }
        assert!(registry.contains(crate::registry::MessageTypeKey::new(
            Version::V1_3,
            Type::MeterMod
        )));
        assert!(!registry.contains(crate::registry::MessageTypeKey::new(
            Version::V1_0,
            Type::MeterMod
        )));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let registry = default_registry();
        let msg = OfMsg::new(
            Version::V1_0,
            1,
            OfPayload::GetConfigReply(crate::ds::switch_config::SwitchConfig {
                flags: crate::ds::switch_config::FragHandling::Normal,
                miss_send_len: 128,
            }),
        );
        assert!(registry.encode(&msg).is_ok());
        let features = OfMsg::new(
            Version::V1_0,
            1,
            OfPayload::FeaturesReply(crate::ds::features::SwitchFeatures {
                datapath_id: 1,
                n_buffers: 0,
                n_tables: 1,
                auxiliary_id: 0,
                capabilities: Default::default(),
                reserved: 0,
            }),
        );
        match registry.encode(&features) {
            Err(Error(ErrorKind::UnexpectedPayload(expected, ttype), _)) => {
                assert_eq!(expected, "FeaturesReplyV10");
                assert_eq!(ttype, Type::FeaturesReply);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn opaque_plugin_copies_data() {
        let registry = RegistryBuilder::new().build();
        let mut out = Vec::new();
        let band = MeterBand::Experimenter {
            rate: 1,
            burst_size: 2,
            experimenter_id: 3,
            data: vec![7, 8],
        };
        OpaqueExperimenterSerializer
            .serialize(&band, &mut out, &registry)
            .unwrap();
        assert_eq!(out, vec![7, 8]);
        let drop = MeterBand::Drop {
            rate: 1,
            burst_size: 2,
        };
        assert!(OfSerializer::<MeterBand>::serialize(
            &OpaqueExperimenterSerializer,
            &drop,
            &mut out,
            &registry
        )
        .is_err());
    }
}
