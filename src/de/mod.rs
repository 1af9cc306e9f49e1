//! Decoding of the messages a controller receives: the handshake and
//! keepalive set plus 1.3 multipart and 1.0 stats replies.
//!
//! Each body reader mirrors the factory in `ser` that writes the same kind,
//! so everything accepted here encodes back to the same bytes, with one
//! exception: experimenter actions, instructions and meter bands keep their
//! envelope padding in `data`. Kinds outside that set are reported as
//! `UnsupportedValue`.

use byteorder::{BigEndian, ReadBytesExt};
use num_traits::FromPrimitive;
use std::convert::TryFrom;
use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::bits::{tables, unpack};
use crate::buf::{padding_for, PORT_NAME_LEN};
use crate::ds::async_config::AsyncConfig;
use crate::ds::features::{SwitchFeatures, SwitchFeaturesV10};
use crate::ds::hw_addr::{from_slice_eth, EthernetAddress, ETHERNET_ADDRESS_LENGTH};
use crate::ds::ports::{
    PortFeatures, PortNumberV10, PortV10, StpState, PORT_V10_LEN, STP_STATE_SHIFT,
};
use crate::ds::role::{ControllerRole, Role};
use crate::ds::switch_config::{FragHandling, SwitchConfig, FRAG_MASK};
use crate::ds::symmetric::{
    ErrorMsg, ExperimenterMsg, Hello, HelloElement, ERROR_TYPE_EXPERIMENTER,
    HELLO_ELEM_VERSIONBITMAP,
};
use crate::ds::{OfMsg, OfPayload};
use crate::err::*;
use crate::header::{Header, Type, Version, HEADER_LENGTH};
use crate::ofp_err::ErrorCode;

mod elements;
mod multipart;
mod stats_v10;

use self::multipart::read_multipart_reply;
use self::stats_v10::read_stats_reply_v10;

type BodyCursor<'a> = Cursor<&'a [u8]>;

/// Decodes one complete message from the front of `bytes`.
///
/// `bytes` may hold more data after the message, only the length announced
/// in the header is consumed.
pub fn decode_message(bytes: &[u8]) -> Result<OfMsg> {
    let header = Header::try_from(bytes)?;
    let length = *header.length() as usize;
    if length < HEADER_LENGTH || bytes.len() < length {
        bail!(ErrorKind::InvalidSliceLength(length, bytes.len(), stringify!(OfMsg)));
    }
    let version = *header.version();
    let body = &bytes[HEADER_LENGTH..length];
    let payload = decode_payload(*header.ttype(), version, body)?;
    trace!(
        "Decoded {:?} for {:?} with {} bytes",
        header.ttype(),
        version,
        length
    );
    Ok(OfMsg::new(version, *header.xid(), payload))
}

fn decode_payload(ttype: Type, version: Version, body: &[u8]) -> Result<OfPayload> {
    let payload = match ttype {
        Type::Hello => OfPayload::Hello(read_hello(version, body)?),
        Type::Error => OfPayload::Error(read_error(version, body)?),
        Type::EchoRequest => OfPayload::EchoRequest(body.to_vec()),
        Type::EchoReply => OfPayload::EchoReply(body.to_vec()),
        Type::Experimenter => OfPayload::Experimenter(read_experimenter(version, body)?),
        Type::FeaturesRequest => empty(OfPayload::FeaturesRequest, body)?,
        Type::FeaturesReply if version == Version::V1_0 => {
            OfPayload::FeaturesReplyV10(read_features_v10(body)?)
        }
        Type::FeaturesReply => OfPayload::FeaturesReply(read_features(version, body)?),
        Type::GetConfigRequest => empty(OfPayload::GetConfigRequest, body)?,
        Type::GetConfigReply => OfPayload::GetConfigReply(read_switch_config(body)?),
        Type::SetConfig => OfPayload::SetConfig(read_switch_config(body)?),
        Type::BarrierRequest => empty(OfPayload::BarrierRequest, body)?,
        Type::BarrierReply => empty(OfPayload::BarrierReply, body)?,
        Type::RoleRequest => OfPayload::RoleRequest(read_role(body)?),
        Type::RoleReply => OfPayload::RoleReply(read_role(body)?),
        Type::GetAsyncRequest => empty(OfPayload::GetAsyncRequest, body)?,
        Type::GetAsyncReply => OfPayload::GetAsyncReply(read_async_config(body)?),
        Type::SetAsync => OfPayload::SetAsync(read_async_config(body)?),
        Type::MultipartReply if version == Version::V1_0 => {
            OfPayload::StatsReplyV10(read_stats_reply_v10(body)?)
        }
        Type::MultipartReply if version == Version::V1_3 => {
            OfPayload::MultipartReply(read_multipart_reply(body)?)
        }
        other => {
            debug!("No decoder for {:?} in {:?}", other, version);
            let code = other.code(version).unwrap_or_default();
            bail!(ErrorKind::UnsupportedValue(code as u64, stringify!(Type)))
        }
    };
    Ok(payload)
}

fn expect_len(body: &[u8], expected: usize, ttype: &'static str) -> Result<()> {
    if body.len() < expected {
        bail!(ErrorKind::InvalidSliceLength(expected, body.len(), ttype));
    }
    Ok(())
}

fn empty(payload: OfPayload, body: &[u8]) -> Result<OfPayload> {
    if !body.is_empty() {
        warn!(
            "Ignoring {} trailing bytes of {:?}",
            body.len(),
            payload.message_type()
        );
    }
    Ok(payload)
}

fn remaining<'a>(cursor: &BodyCursor<'a>) -> &'a [u8] {
    let bytes: &'a [u8] = *cursor.get_ref();
    bytes.get(cursor.position() as usize..).unwrap_or(&[])
}

fn rest(cursor: &BodyCursor) -> Vec<u8> {
    remaining(cursor).to_vec()
}

fn read_fixed_str(cursor: &mut BodyCursor, size: usize) -> Result<String> {
    let mut raw = vec![0u8; size];
    cursor.read_exact(&mut raw)?;
    let end = raw.iter().position(|b| *b == 0).unwrap_or(size);
    raw.truncate(end);
    String::from_utf8(raw).map_err(|_| ErrorKind::IllegalValue(size as u64, "fixed string").into())
}

fn read_eth(cursor: &mut BodyCursor) -> Result<EthernetAddress> {
    let addr = from_slice_eth(remaining(cursor))?;
    cursor.seek(SeekFrom::Current(ETHERNET_ADDRESS_LENGTH as i64))?;
    Ok(addr)
}

/// Elements other than the version bitmap are skipped.
fn read_hello(version: Version, body: &[u8]) -> Result<Hello> {
    let mut hello = Hello::default();
    if version < Version::V1_3 {
        if !body.is_empty() {
            debug!("Ignoring hello body of {:?}", version);
        }
        return Ok(hello);
    }
    let mut cursor = Cursor::new(body);
    while body.len() - cursor.position() as usize >= 4 {
        let element_start = cursor.position() as usize;
        let element_type = cursor.read_u16::<BigEndian>()?;
        let length = cursor.read_u16::<BigEndian>()? as usize;
        if length < 4 || element_start + length > body.len() {
            bail!(ErrorKind::InvalidSliceLength(
                length,
                body.len() - element_start,
                stringify!(HelloElement)
            ));
        }
        if element_type == HELLO_ELEM_VERSIONBITMAP {
            let mut bitmaps = Vec::with_capacity((length - 4) / 4);
            for _ in 0..(length - 4) / 4 {
                bitmaps.push(cursor.read_u32::<BigEndian>()?);
            }
            hello.elements.push(HelloElement::VersionBitmap(bitmaps));
        } else {
            debug!("Skipping unknown hello element {}", element_type);
        }
        let next = element_start + length + padding_for(length, 8);
        cursor.seek(SeekFrom::Start(next.min(body.len()) as u64))?;
    }
    Ok(hello)
}

fn read_error(version: Version, body: &[u8]) -> Result<ErrorMsg> {
    expect_len(body, 4, stringify!(ErrorMsg))?;
    let mut cursor = Cursor::new(body);
    let ttype = cursor.read_u16::<BigEndian>()?;
    let code = cursor.read_u16::<BigEndian>()?;
    if ttype == ERROR_TYPE_EXPERIMENTER && version >= Version::V1_2 {
        expect_len(body, 8, stringify!(ErrorMsg))?;
        let experimenter_id = cursor.read_u32::<BigEndian>()?;
        return Ok(ErrorMsg::Experimenter {
            exp_type: code,
            experimenter_id,
            data: rest(&cursor),
        });
    }
    Ok(ErrorMsg::Standard {
        code: ErrorCode::decode(ttype, code, version)?,
        data: rest(&cursor),
    })
}

fn read_experimenter(version: Version, body: &[u8]) -> Result<ExperimenterMsg> {
    let mut cursor = Cursor::new(body);
    let experimenter_id = cursor.read_u32::<BigEndian>()?;
    let exp_type = if version == Version::V1_0 {
        0
    } else {
        cursor.read_u32::<BigEndian>()?
    };
    Ok(ExperimenterMsg {
        experimenter_id,
        exp_type,
        data: rest(&cursor),
    })
}

fn read_features(version: Version, body: &[u8]) -> Result<SwitchFeatures> {
    expect_len(body, 24, stringify!(SwitchFeatures))?;
    let mut cursor = Cursor::new(body);
    let datapath_id = cursor.read_u64::<BigEndian>()?;
    let n_buffers = cursor.read_u32::<BigEndian>()?;
    let n_tables = cursor.read_u8()?;
    let auxiliary_id = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(2))?;
    let capabilities = unpack(tables::capabilities(version), cursor.read_u32::<BigEndian>()?);
    Ok(SwitchFeatures {
        datapath_id,
        n_buffers,
        n_tables,
        auxiliary_id,
        capabilities,
        reserved: cursor.read_u32::<BigEndian>()?,
    })
}

fn read_features_v10(body: &[u8]) -> Result<SwitchFeaturesV10> {
    expect_len(body, 24, stringify!(SwitchFeaturesV10))?;
    let ports_len = body.len() - 24;
    if ports_len % PORT_V10_LEN != 0 {
        bail!(ErrorKind::InvalidSliceLength(
            ports_len - ports_len % PORT_V10_LEN + PORT_V10_LEN,
            ports_len,
            stringify!(PortV10)
        ));
    }
    let mut cursor = Cursor::new(body);
    let datapath_id = cursor.read_u64::<BigEndian>()?;
    let n_buffers = cursor.read_u32::<BigEndian>()?;
    let n_tables = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(3))?;
    let capabilities = unpack(tables::CAPABILITIES_V10, cursor.read_u32::<BigEndian>()?);
    let actions = unpack(tables::ACTION_TYPES_V10, cursor.read_u32::<BigEndian>()?);
    let mut ports = Vec::with_capacity(ports_len / PORT_V10_LEN);
    for _ in 0..ports_len / PORT_V10_LEN {
        ports.push(read_port_v10(&mut cursor)?);
    }
    Ok(SwitchFeaturesV10 {
        datapath_id,
        n_buffers,
        n_tables,
        capabilities,
        actions,
        ports,
    })
}

fn read_port_v10(cursor: &mut BodyCursor) -> Result<PortV10> {
    let port_no = PortNumberV10::try_from(cursor.read_u16::<BigEndian>()?)?;
    let hw_addr = read_eth(cursor)?;
    let name = read_fixed_str(cursor, PORT_NAME_LEN)?;
    let config = unpack(tables::PORT_CONFIG_V10, cursor.read_u32::<BigEndian>()?);
    let raw_state = cursor.read_u32::<BigEndian>()?;
    let stp_raw = (raw_state >> STP_STATE_SHIFT) & 3;
    let stp_state = StpState::from_u32(stp_raw)
        .ok_or_else(|| Error::from(ErrorKind::UnknownValue(stp_raw as u64, stringify!(StpState))))?;
    let mut features = [PortFeatures::empty(); 4];
    for slot in features.iter_mut() {
        *slot = unpack(tables::PORT_FEATURES_V10, cursor.read_u32::<BigEndian>()?);
    }
    let [curr, advertised, supported, peer] = features;
    Ok(PortV10 {
        port_no,
        hw_addr,
        name,
        config,
        state: unpack(tables::PORT_STATE_V10, raw_state),
        stp_state,
        curr,
        advertised,
        supported,
        peer,
    })
}

fn read_switch_config(body: &[u8]) -> Result<SwitchConfig> {
    expect_len(body, 4, stringify!(SwitchConfig))?;
    let mut cursor = Cursor::new(body);
    let raw_flags = cursor.read_u16::<BigEndian>()?;
    let flags = FragHandling::from_u16(raw_flags & FRAG_MASK).ok_or_else(|| {
        Error::from(ErrorKind::UnknownValue(raw_flags as u64, stringify!(FragHandling)))
    })?;
    Ok(SwitchConfig {
        flags,
        miss_send_len: cursor.read_u16::<BigEndian>()?,
    })
}

fn read_role(body: &[u8]) -> Result<Role> {
    expect_len(body, 16, stringify!(Role))?;
    let mut cursor = Cursor::new(body);
    let raw_role = cursor.read_u32::<BigEndian>()?;
    let role = ControllerRole::from_u32(raw_role).ok_or_else(|| {
        Error::from(ErrorKind::UnknownValue(raw_role as u64, stringify!(ControllerRole)))
    })?;
    cursor.seek(SeekFrom::Current(4))?;
    Ok(Role {
        role,
        generation_id: cursor.read_u64::<BigEndian>()?,
    })
}

fn read_async_config(body: &[u8]) -> Result<AsyncConfig> {
    expect_len(body, 24, stringify!(AsyncConfig))?;
    let mut cursor = Cursor::new(body);
    let mut config = AsyncConfig::default();
    for mask in config.packet_in_mask.iter_mut() {
        *mask = unpack(tables::PACKET_IN_REASONS, cursor.read_u32::<BigEndian>()?);
    }
    for mask in config.port_status_mask.iter_mut() {
        *mask = unpack(tables::PORT_REASONS, cursor.read_u32::<BigEndian>()?);
    }
    for mask in config.flow_removed_mask.iter_mut() {
        *mask = unpack(tables::FLOW_REMOVED_REASONS, cursor.read_u32::<BigEndian>()?);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::actions::ActionTypes;
    use crate::ds::async_config::{FlowRemovedReasons, PacketInReasons, PortReasons};
    use crate::ds::features::Capabilities;
    use crate::ds::ports::{PortConfig, PortState};
    use crate::ofp_err::{BadRequest, HelloFailed};
    use crate::ser::default_registry;

    fn round_trip(version: Version, payload: OfPayload) {
        let msg = OfMsg::new(version, 0x42, payload);
        let bytes = default_registry().encode(&msg).unwrap();
        assert_eq!(decode_message(&bytes).unwrap(), msg);
    }

    #[test]
    fn symmetric_messages() {
        round_trip(
            Version::V1_3,
            OfPayload::Hello(Hello::with_versions(&[Version::V1_0, Version::V1_3])),
        );
        round_trip(Version::V1_0, OfPayload::Hello(Hello::default()));
        round_trip(Version::V1_0, OfPayload::EchoRequest(vec![1, 2, 3]));
        round_trip(Version::V1_3, OfPayload::EchoReply(Vec::new()));
    }

    #[test]
    fn experimenter_messages() {
        let bytes = [4u8, 4, 0, 18, 0, 0, 0, 3, 0, 0, 0x23, 0x20, 0, 0, 0, 7, 1, 2];
        let expected = ExperimenterMsg {
            experimenter_id: 0x2320,
            exp_type: 7,
            data: vec![1, 2],
        };
        assert_eq!(
            decode_message(&bytes).unwrap().into_payload(),
            OfPayload::Experimenter(expected)
        );
        // vendor messages have no subtype
        let bytes = [1u8, 4, 0, 13, 0, 0, 0, 3, 0, 0, 0x23, 0x20, 5];
        match decode_message(&bytes).unwrap().into_payload() {
            OfPayload::Experimenter(vendor) => {
                assert_eq!(vendor.exp_type, 0);
                assert_eq!(vendor.data, vec![5]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn errors_per_version() {
        for version in [Version::V1_0, Version::V1_3] {
            round_trip(
                version,
                OfPayload::Error(ErrorMsg::Standard {
                    code: ErrorCode::BadRequest(BadRequest::BadType),
                    data: vec![1, 0, 0, 8, 0, 0, 0, 1],
                }),
            );
        }
        round_trip(
            Version::V1_3,
            OfPayload::Error(ErrorMsg::Standard {
                code: ErrorCode::HelloFailed(HelloFailed::Incompatible),
                data: b"no common version".to_vec(),
            }),
        );
        let experimenter = [4u8, 1, 0, 17, 0, 0, 0, 1, 0xff, 0xff, 0, 3, 0, 0, 0x23, 0x20, 9];
        match decode_message(&experimenter).unwrap().into_payload() {
            OfPayload::Error(ErrorMsg::Experimenter {
                exp_type,
                experimenter_id,
                data,
            }) => {
                assert_eq!(exp_type, 3);
                assert_eq!(experimenter_id, 0x2320);
                assert_eq!(data, vec![9]);
            }
            other => panic!("unexpected {:?}", other),
        }
        // no experimenter errors before 1.2
        let v10 = [1u8, 1, 0, 12, 0, 0, 0, 1, 0xff, 0xff, 0, 3];
        assert!(decode_message(&v10).is_err());
    }

    #[test]
    fn features_replies() {
        round_trip(
            Version::V1_3,
            OfPayload::FeaturesReply(SwitchFeatures {
                datapath_id: 0x0000_0a0b_0c0d_0e0f,
                n_buffers: 256,
                n_tables: 254,
                auxiliary_id: 1,
                capabilities: Capabilities::FLOW_STATS | Capabilities::PORT_BLOCKED,
                reserved: 0,
            }),
        );
        round_trip(
            Version::V1_0,
            OfPayload::FeaturesReplyV10(SwitchFeaturesV10 {
                datapath_id: 1,
                n_buffers: 0,
                n_tables: 1,
                capabilities: Capabilities::STP | Capabilities::ARP_MATCH_IP,
                actions: ActionTypes::OUTPUT | ActionTypes::SET_VLAN_VID,
                ports: vec![PortV10 {
                    port_no: PortNumberV10::NormalPort(1),
                    hw_addr: [0, 1, 2, 3, 4, 5],
                    name: "eth0".to_string(),
                    config: PortConfig::empty(),
                    state: PortState::LINK_DOWN,
                    stp_state: StpState::Block,
                    curr: PortFeatures::COPPER,
                    advertised: PortFeatures::empty(),
                    supported: PortFeatures::empty(),
                    peer: PortFeatures::AUTONEG,
                }],
            }),
        );
        round_trip(Version::V1_0, OfPayload::FeaturesRequest);
    }

    #[test]
    fn config_role_and_async() {
        let config = SwitchConfig {
            flags: FragHandling::Reasm,
            miss_send_len: 0xffff,
        };
        round_trip(Version::V1_0, OfPayload::SetConfig(config.clone()));
        round_trip(Version::V1_3, OfPayload::GetConfigReply(config));
        round_trip(Version::V1_3, OfPayload::GetConfigRequest);
        round_trip(Version::V1_0, OfPayload::BarrierRequest);
        round_trip(Version::V1_3, OfPayload::BarrierReply);
        round_trip(
            Version::V1_3,
            OfPayload::RoleReply(Role {
                role: ControllerRole::Slave,
                generation_id: u64::MAX,
            }),
        );
        round_trip(Version::V1_3, OfPayload::GetAsyncRequest);
        round_trip(
            Version::V1_3,
            OfPayload::GetAsyncReply(AsyncConfig {
                packet_in_mask: [PacketInReasons::all(), PacketInReasons::NO_MATCH],
                port_status_mask: [PortReasons::MODIFY, PortReasons::empty()],
                flow_removed_mask: [FlowRemovedReasons::DELETE, FlowRemovedReasons::all()],
            }),
        );
    }

    #[test]
    fn unknown_hello_elements_are_skipped() {
        let bytes = [
            4u8, 0, 0, 32, 0, 0, 0, 1, // header
            0, 9, 0, 6, 1, 2, 0, 0, // unknown element, padded
            0, 1, 0, 8, 0, 0, 0, 0x10, // version bitmap
            0, 1, 0, 4, 0, 0, 0, 0, // empty bitmap element
        ];
        let hello = match decode_message(&bytes).unwrap().into_payload() {
            OfPayload::Hello(hello) => hello,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(
            hello.elements,
            vec![
                HelloElement::VersionBitmap(vec![0x10]),
                HelloElement::VersionBitmap(Vec::new())
            ]
        );
    }

    #[test]
    fn only_announced_length_is_read() {
        let bytes = [1u8, 2, 0, 9, 0, 0, 0, 5, 0xaa, 0xbb, 0xcc];
        let msg = decode_message(&bytes).unwrap();
        assert_eq!(*msg.xid(), 5);
        assert_eq!(msg.into_payload(), OfPayload::EchoRequest(vec![0xaa]));
    }

    #[test]
    fn malformed_input() {
        match decode_message(&[4u8, 2, 0, 16, 0, 0, 0, 1]) {
            Err(Error(ErrorKind::InvalidSliceLength(16, 8, _), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match decode_message(&[4u8, 24, 0, 12, 0, 0, 0, 1, 0, 0, 0, 2]) {
            Err(Error(ErrorKind::InvalidSliceLength(16, 4, _), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match decode_message(&[4u8, 24, 0, 24, 0, 0, 0, 1, 0, 0, 0, 9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]) {
            Err(Error(ErrorKind::UnknownValue(9, _), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stats_and_multipart_replies() {
        use crate::ds::actions::{Action, ActionV10};
        use crate::ds::flow_match::{Match, MatchField, MatchV10};
        use crate::ds::flow_mod::FlowModFlags;
        use crate::ds::multipart::*;
        use crate::ds::ports::PortNumber;
        use crate::ds::stats_v10::*;
        use crate::ds::flow_instructions::Instruction;

        round_trip(
            Version::V1_0,
            OfPayload::StatsReplyV10(StatsReplyV10 {
                flags: MultipartFlags::MORE,
                body: StatsReplyBodyV10::Flow(vec![FlowStatsV10 {
                    table_id: 0,
                    mmatch: MatchV10::any(),
                    duration_sec: 10,
                    duration_nsec: 500,
                    priority: 0x8000,
                    idle_timeout: 60,
                    hard_timeout: 0,
                    cookie: 7,
                    packet_count: 3,
                    byte_count: 180,
                    actions: vec![ActionV10::Output {
                        port: PortNumberV10::NormalPort(2),
                        max_len: 0,
                    }],
                }]),
            }),
        );
        round_trip(
            Version::V1_3,
            OfPayload::MultipartReply(MultipartReply {
                flags: MultipartFlags::empty(),
                body: MultipartReplyBody::Flow(vec![FlowStats {
                    table_id: 1,
                    duration_sec: 1,
                    duration_nsec: 2,
                    priority: 100,
                    idle_timeout: 0,
                    hard_timeout: 30,
                    flags: FlowModFlags::SEND_FLOW_REM | FlowModFlags::NO_BYT_COUNTS,
                    cookie: u64::MAX,
                    packet_count: 4,
                    byte_count: 5,
                    mmatch: Match::new(vec![
                        MatchField::InPort(PortNumber::NormalPort(1)),
                        MatchField::EthType(0x0800),
                    ]),
                    instructions: vec![Instruction::ApplyActions(vec![Action::Output {
                        port: PortNumber::NormalPort(2),
                        max_len: 0,
                    }])],
                }]),
            }),
        );
    }

    #[test]
    fn other_kinds_are_unsupported() {
        // 1.0 flow mod header, body irrelevant
        match decode_message(&[1u8, 14, 0, 8, 0, 0, 0, 1]) {
            Err(Error(ErrorKind::UnsupportedValue(14, _), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
