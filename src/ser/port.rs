//! Port descriptions, port status and port mod.

use byteorder::{BigEndian, WriteBytesExt};

use crate::bits::{pack, tables};
use crate::buf::{WireBuf, PORT_NAME_LEN};
use crate::ds::ports::{Port, PortV10, STP_STATE_SHIFT};
use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::registry::*;
use crate::ser::start_message;

/// `ofp_port`, 64 bytes.
pub fn write_port(port: &Port, out: &mut Vec<u8>) -> Result<()> {
    let v13 = Version::V1_3;
    out.write_u32::<BigEndian>(port.port_no.wire())?;
    out.write_zeros(4);
    out.extend_from_slice(&port.hw_addr);
    out.write_zeros(2);
    out.write_fixed_str(&port.name, PORT_NAME_LEN)?;
    out.write_u32::<BigEndian>(pack(tables::port_config(v13), port.config))?;
    out.write_u32::<BigEndian>(pack(tables::port_state(v13), port.state))?;
    for features in &[port.curr, port.advertised, port.supported, port.peer] {
        out.write_u32::<BigEndian>(pack(tables::port_features(v13), *features))?;
    }
    out.write_u32::<BigEndian>(port.curr_speed)?;
    out.write_u32::<BigEndian>(port.max_speed)?;
    Ok(())
}

/// `ofp_phy_port`, 48 bytes. The STP state shares the state field.
pub fn write_port_v10(port: &PortV10, out: &mut Vec<u8>) -> Result<()> {
    out.write_u16::<BigEndian>(port.port_no.wire())?;
    out.extend_from_slice(&port.hw_addr);
    out.write_fixed_str(&port.name, PORT_NAME_LEN)?;
    out.write_u32::<BigEndian>(pack(tables::PORT_CONFIG_V10, port.config))?;
    let state = pack(tables::PORT_STATE_V10, port.state)
        | (port.stp_state as u32) << STP_STATE_SHIFT;
    out.write_u32::<BigEndian>(state)?;
    for features in &[port.curr, port.advertised, port.supported, port.peer] {
        out.write_u32::<BigEndian>(pack(tables::PORT_FEATURES_V10, *features))?;
    }
    Ok(())
}

pub struct PortStatusSerializer;

impl OfSerializer<OfMsg> for PortStatusSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let status = expect_payload!(msg, PortStatus);
        let start = start_message(Type::PortStatus, msg, out)?;
        out.write_u8(status.reason as u8)?;
        out.write_zeros(7);
        write_port(&status.desc, out)?;
        update_header_length(out, start)
    }
}

pub struct PortStatusV10Serializer;

impl OfSerializer<OfMsg> for PortStatusV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let status = expect_payload!(msg, PortStatusV10);
        let start = start_message(Type::PortStatus, msg, out)?;
        out.write_u8(status.reason as u8)?;
        out.write_zeros(7);
        write_port_v10(&status.desc, out)?;
        update_header_length(out, start)
    }
}

pub struct PortModSerializer;

impl OfSerializer<OfMsg> for PortModSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let port_mod = expect_payload!(msg, PortMod);
        let version = *msg.version();
        let start = start_message(Type::PortMod, msg, out)?;
        out.write_u32::<BigEndian>(port_mod.port_no.wire())?;
        out.write_zeros(4);
        out.extend_from_slice(&port_mod.hw_addr);
        out.write_zeros(2);
        out.write_u32::<BigEndian>(pack(tables::port_config(version), port_mod.config))?;
        out.write_u32::<BigEndian>(pack(tables::port_config(version), port_mod.mask))?;
        out.write_u32::<BigEndian>(pack(tables::port_features(version), port_mod.advertise))?;
        out.write_zeros(4);
        update_header_length(out, start)
    }
}

pub struct PortModV10Serializer;

impl OfSerializer<OfMsg> for PortModV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let port_mod = expect_payload!(msg, PortModV10);
        let start = start_message(Type::PortMod, msg, out)?;
        out.write_u16::<BigEndian>(port_mod.port_no.wire())?;
        out.extend_from_slice(&port_mod.hw_addr);
        out.write_u32::<BigEndian>(pack(tables::PORT_CONFIG_V10, port_mod.config))?;
        out.write_u32::<BigEndian>(pack(tables::PORT_CONFIG_V10, port_mod.mask))?;
        out.write_u32::<BigEndian>(pack(tables::PORT_FEATURES_V10, port_mod.advertise))?;
        out.write_zeros(4);
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register_message(Version::V1_3, Type::PortStatus, PortStatusSerializer)
        .register_message(Version::V1_0, Type::PortStatus, PortStatusV10Serializer)
        .register_message(Version::V1_3, Type::PortMod, PortModSerializer)
        .register_message(Version::V1_0, Type::PortMod, PortModV10Serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::port_mod::{PortMod, PortModV10};
    use crate::ds::port_status::{PortReason, PortStatus, PortStatusV10};
    use crate::ds::ports::*;
    use crate::ds::OfPayload;
    use crate::ser::default_registry;

    fn port() -> Port {
        Port {
            port_no: PortNumber::NormalPort(1),
            hw_addr: [0, 1, 2, 3, 4, 5],
            name: "eth1".to_string(),
            config: PortConfig::NO_FWD,
            state: PortState::LIVE,
            curr: PortFeatures::RATE_10GB_FD | PortFeatures::FIBER,
            advertised: PortFeatures::empty(),
            supported: PortFeatures::empty(),
            peer: PortFeatures::empty(),
            curr_speed: 10_000_000,
            max_speed: 10_000_000,
        }
    }

    #[test]
    fn port_is_64_bytes() {
        let mut out = Vec::new();
        write_port(&port(), &mut out).unwrap();
        assert_eq!(out.len(), PORT_LEN);
        assert_eq!(&out[16..20], b"eth1");
        assert_eq!(&out[32..40], &[0, 0, 0, 0x20, 0, 0, 0, 4]);
        assert_eq!(&out[40..44], &[0, 0, 0x10, 0x40]);
    }

    #[test]
    fn long_port_name_is_rejected() {
        let mut port = port();
        port.name = "a-very-long-interface-name".to_string();
        let mut out = Vec::new();
        assert!(write_port(&port, &mut out).is_err());
    }

    #[test]
    fn v10_port_carries_stp_state() {
        let port = PortV10 {
            port_no: PortNumberV10::Reserved(PortNoV10::Local),
            hw_addr: [0; 6],
            name: "br0".to_string(),
            config: PortConfig::NO_STP,
            state: PortState::LINK_DOWN,
            stp_state: StpState::Block,
            curr: PortFeatures::COPPER,
            advertised: PortFeatures::empty(),
            supported: PortFeatures::empty(),
            peer: PortFeatures::empty(),
        };
        let mut out = Vec::new();
        write_port_v10(&port, &mut out).unwrap();
        assert_eq!(out.len(), PORT_V10_LEN);
        assert_eq!(&out[..2], &[0xff, 0xfe]);
        assert_eq!(&out[24..28], &[0, 0, 0, 2]);
        assert_eq!(&out[28..32], &[0, 0, 3, 1]);
        assert_eq!(&out[32..36], &[0, 0, 0, 0x80]);
    }

    #[test]
    fn port_status_lengths() {
        let registry = default_registry();
        let status = PortStatus {
            reason: PortReason::Modify,
            desc: port(),
        };
        let bytes = registry
            .encode(&OfMsg::new(Version::V1_3, 1, OfPayload::PortStatus(status)))
            .unwrap();
        assert_eq!(bytes.len(), 80);
        assert_eq!(bytes[8], 2);

        let status = PortStatusV10 {
            reason: PortReason::Add,
            desc: PortV10 {
                port_no: PortNumberV10::NormalPort(3),
                hw_addr: [0; 6],
                name: String::new(),
                config: PortConfig::empty(),
                state: PortState::empty(),
                stp_state: StpState::Listen,
                curr: PortFeatures::empty(),
                advertised: PortFeatures::empty(),
                supported: PortFeatures::empty(),
                peer: PortFeatures::empty(),
            },
        };
        let bytes = registry
            .encode(&OfMsg::new(Version::V1_0, 1, OfPayload::PortStatusV10(status)))
            .unwrap();
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn port_mod_both_versions() {
        let registry = default_registry();
        let port_mod = PortMod {
            port_no: PortNumber::NormalPort(2),
            hw_addr: [1, 2, 3, 4, 5, 6],
            config: PortConfig::PORT_DOWN,
            mask: PortConfig::PORT_DOWN,
            advertise: PortFeatures::empty(),
        };
        let bytes = registry
            .encode(&OfMsg::new(Version::V1_3, 1, OfPayload::PortMod(port_mod)))
            .unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(bytes[1], 16);

        let port_mod = PortModV10 {
            port_no: PortNumberV10::NormalPort(2),
            hw_addr: [1, 2, 3, 4, 5, 6],
            config: PortConfig::NO_FLOOD,
            mask: PortConfig::NO_FLOOD,
            advertise: PortFeatures::empty(),
        };
        let bytes = registry
            .encode(&OfMsg::new(Version::V1_0, 1, OfPayload::PortModV10(port_mod)))
            .unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[1], 15);
        assert_eq!(&bytes[16..20], &[0, 0, 0, 0x10]);
    }
}
