extern crate ofwire;

use std::convert::TryFrom;

use ofwire::de::decode_message;
use ofwire::ds::actions::{Action, ActionId, ActionType, ActionTypes, ActionV10};
use ofwire::ds::async_config::{AsyncConfig, PacketInReasons, PortReasons};
use ofwire::ds::features::{Capabilities, SwitchFeatures};
use ofwire::ds::flow_instructions::{Instruction, InstructionId, InstructionType};
use ofwire::ds::flow_match::{Match, MatchField, MatchV10, OfbMatchFields, OxmId};
use ofwire::ds::flow_mod::FlowModFlags;
use ofwire::ds::group_mod::{Bucket, GroupCapabilities, GroupType, GroupTypes};
use ofwire::ds::meter_mod::{MeterBand, MeterBandTypes, MeterFlags};
use ofwire::ds::multipart::*;
use ofwire::ds::ports::{
    Port, PortConfig, PortFeatures, PortNo, PortNoV10, PortNumber, PortNumberV10, PortState,
};
use ofwire::ds::role::{ControllerRole, Role};
use ofwire::ds::stats_v10::*;
use ofwire::ds::switch_config::{FragHandling, SwitchConfig};
use ofwire::ds::symmetric::{ErrorMsg, Hello};
use ofwire::ds::table_features::{TableFeatureProperty, TableFeatures};
use ofwire::ds::table_mod::TableConfig;
use ofwire::ds::{OfMsg, OfPayload};
use ofwire::header::Header;
use ofwire::ofp_err::{ErrorCode, RoleRequestFailed};
use ofwire::ser::default_registry;
use ofwire::Version;

fn session(version: Version) -> Vec<OfMsg> {
    let mut payloads = vec![
        OfPayload::Hello(if version == Version::V1_0 {
            Hello::default()
        } else {
            Hello::with_versions(&[Version::V1_0, version])
        }),
        OfPayload::FeaturesRequest,
        OfPayload::SetConfig(SwitchConfig {
            flags: FragHandling::Drop,
            miss_send_len: 128,
        }),
        OfPayload::GetConfigRequest,
        OfPayload::GetConfigReply(SwitchConfig {
            flags: FragHandling::Drop,
            miss_send_len: 128,
        }),
        OfPayload::EchoRequest(b"ping".to_vec()),
        OfPayload::EchoReply(b"ping".to_vec()),
        OfPayload::BarrierRequest,
        OfPayload::BarrierReply,
    ];
    if version == Version::V1_3 {
        payloads.push(OfPayload::FeaturesReply(SwitchFeatures {
            datapath_id: 0xdead_beef,
            n_buffers: 0,
            n_tables: 4,
            auxiliary_id: 0,
            capabilities: Capabilities::FLOW_STATS | Capabilities::GROUP_STATS,
            reserved: 0,
        }));
        payloads.push(OfPayload::RoleRequest(Role {
            role: ControllerRole::Equal,
            generation_id: 0,
        }));
        payloads.push(OfPayload::Error(ErrorMsg::Standard {
            code: ErrorCode::RoleRequestFailed(RoleRequestFailed::Stale),
            data: vec![4, 24, 0, 24, 0, 0, 0, 11],
        }));
        payloads.push(OfPayload::SetAsync(AsyncConfig {
            packet_in_mask: [PacketInReasons::NO_MATCH, PacketInReasons::empty()],
            port_status_mask: [PortReasons::all(), PortReasons::all()],
            ..Default::default()
        }));
    }
    payloads
        .into_iter()
        .enumerate()
        .map(|(xid, payload)| OfMsg::new(version, xid as u32, payload))
        .collect()
}

fn multipart_replies() -> Vec<MultipartReplyBody> {
    let counters = PortCounters {
        rx_packets: 1,
        tx_packets: 2,
        rx_bytes: 3,
        tx_bytes: 4,
        collisions: 12,
        ..Default::default()
    };
    vec![
        MultipartReplyBody::Desc(Desc {
            mfr_desc: "Acme".to_string(),
            hw_desc: "x86".to_string(),
            sw_desc: "2.1".to_string(),
            serial_num: "A-1".to_string(),
            dp_desc: "edge".to_string(),
        }),
        MultipartReplyBody::Flow(vec![FlowStats {
            table_id: 0,
            duration_sec: 61,
            duration_nsec: 0,
            priority: 10,
            idle_timeout: 0,
            hard_timeout: 0,
            flags: FlowModFlags::SEND_FLOW_REM,
            cookie: 0x1234,
            packet_count: 9,
            byte_count: 900,
            mmatch: Match::new(vec![
                MatchField::EthType(0x0800),
                MatchField::IPv4Dst(
                    "10.0.0.0".parse().unwrap(),
                    Some("255.0.0.0".parse().unwrap()),
                ),
                MatchField::VlanVid(0x1001, Some(0x1fff)),
            ]),
            instructions: vec![
                Instruction::WriteActions(vec![
                    Action::SetField(MatchField::EthSrc([2, 0, 0, 0, 0, 1], None)),
                    Action::Group(3),
                ]),
                Instruction::GotoTable(2),
            ],
        }]),
        MultipartReplyBody::Aggregate(AggregateStats {
            packet_count: 10,
            byte_count: 1000,
            flow_count: 2,
        }),
        MultipartReplyBody::Table(vec![TableStats {
            table_id: 0,
            active_count: 2,
            lookup_count: 50,
            matched_count: 40,
        }]),
        MultipartReplyBody::PortStats(vec![PortStats {
            port_no: PortNumber::NormalPort(1),
            counters,
            duration_sec: 5,
            duration_nsec: 6,
        }]),
        MultipartReplyBody::Queue(vec![QueueStats {
            port_no: PortNumber::NormalPort(1),
            queue_id: 0,
            tx_bytes: 1,
            tx_packets: 1,
            tx_errors: 0,
            duration_sec: 1,
            duration_nsec: 0,
        }]),
        MultipartReplyBody::Group(vec![GroupStats {
            group_id: 3,
            ref_count: 1,
            packet_count: 2,
            byte_count: 3,
            duration_sec: 4,
            duration_nsec: 5,
            bucket_stats: vec![
                BucketCounter {
                    packet_count: 1,
                    byte_count: 2,
                },
                BucketCounter {
                    packet_count: 3,
                    byte_count: 4,
                },
            ],
        }]),
        MultipartReplyBody::GroupDesc(vec![GroupDesc {
            ttype: GroupType::Ff,
            group_id: 3,
            buckets: vec![Bucket {
                weight: 0,
                watch_port: PortNumber::NormalPort(1),
                watch_group: 0xffff_ffff,
                actions: vec![
                    Action::PopVlan,
                    Action::Output {
                        port: PortNumber::Reserved(PortNo::InPort),
                        max_len: 0,
                    },
                ],
            }],
        }]),
        MultipartReplyBody::GroupFeatures(GroupFeatures {
            types: GroupTypes::ALL | GroupTypes::SELECT,
            capabilities: GroupCapabilities::SELECT_WEIGHT,
            max_groups: [16, 16, 0, 0],
            actions: [
                ActionTypes::OUTPUT,
                ActionTypes::OUTPUT | ActionTypes::SET_FIELD,
                ActionTypes::empty(),
                ActionTypes::empty(),
            ],
        }),
        MultipartReplyBody::Meter(vec![MeterStats {
            meter_id: 1,
            flow_count: 1,
            packet_in_count: 2,
            byte_in_count: 3,
            duration_sec: 4,
            duration_nsec: 5,
            band_stats: vec![MeterBandStats {
                packet_band_count: 6,
                byte_band_count: 7,
            }],
        }]),
        MultipartReplyBody::MeterConfig(vec![MeterConfig {
            flags: MeterFlags::KBPS | MeterFlags::STATS,
            meter_id: 1,
            bands: vec![
                MeterBand::Drop {
                    rate: 1000,
                    burst_size: 0,
                },
                MeterBand::DscpRemark {
                    rate: 500,
                    burst_size: 0,
                    prec_level: 1,
                },
            ],
        }]),
        MultipartReplyBody::MeterFeatures(MeterFeatures {
            max_meter: 64,
            band_types: MeterBandTypes::DROP,
            capabilities: MeterFlags::KBPS | MeterFlags::BURST,
            max_bands: 2,
            max_color: 0,
        }),
        MultipartReplyBody::TableFeatures(vec![TableFeatures {
            table_id: 0,
            name: "acl".to_string(),
            metadata_match: 0,
            metadata_write: 0,
            config: TableConfig::empty(),
            max_entries: 128,
            properties: vec![
                TableFeatureProperty::Instructions(vec![
                    InstructionId::Standard(InstructionType::GotoTable),
                    InstructionId::Standard(InstructionType::ApplyActions),
                ]),
                TableFeatureProperty::NextTables(vec![1, 2, 3]),
                TableFeatureProperty::ApplyActions(vec![ActionId::Standard(ActionType::Output)]),
                TableFeatureProperty::Match(vec![
                    OxmId::basic(OfbMatchFields::InPort),
                    OxmId::masked(OfbMatchFields::IPv4Src),
                ]),
            ],
        }]),
        MultipartReplyBody::PortDesc(vec![Port {
            port_no: PortNumber::NormalPort(1),
            hw_addr: [2, 0, 0, 0, 0, 1],
            name: "eth1".to_string(),
            config: PortConfig::NO_PACKET_IN,
            state: PortState::LIVE,
            curr: PortFeatures::RATE_10GB_FD | PortFeatures::FIBER,
            advertised: PortFeatures::empty(),
            supported: PortFeatures::RATE_10GB_FD | PortFeatures::RATE_40GB_FD,
            peer: PortFeatures::empty(),
            curr_speed: 10_000_000,
            max_speed: 40_000_000,
        }]),
    ]
}

fn stats_replies() -> Vec<StatsReplyBodyV10> {
    vec![
        StatsReplyBodyV10::Desc(Desc::default()),
        StatsReplyBodyV10::Flow(vec![FlowStatsV10 {
            table_id: 0,
            mmatch: MatchV10::any(),
            duration_sec: 1,
            duration_nsec: 2,
            priority: 3,
            idle_timeout: 4,
            hard_timeout: 5,
            cookie: 6,
            packet_count: 7,
            byte_count: 8,
            actions: vec![
                ActionV10::SetDlSrc([2, 0, 0, 0, 0, 9]),
                ActionV10::SetNwDst("192.168.0.1".parse().unwrap()),
                ActionV10::Enqueue {
                    port: PortNumberV10::NormalPort(3),
                    queue_id: 1,
                },
            ],
        }]),
        StatsReplyBodyV10::Aggregate(AggregateStats {
            packet_count: 1,
            byte_count: 2,
            flow_count: 3,
        }),
        StatsReplyBodyV10::Table(vec![TableStatsV10 {
            table_id: 0,
            name: "classifier".to_string(),
            wildcards: 0x003f_ffff,
            max_entries: 1024,
            active_count: 1,
            lookup_count: 2,
            matched_count: 1,
        }]),
        StatsReplyBodyV10::Port(vec![PortStatsV10 {
            port_no: PortNumberV10::Reserved(PortNoV10::Local),
            counters: PortCounters::default(),
        }]),
        StatsReplyBodyV10::Queue(vec![QueueStatsV10 {
            port_no: PortNumberV10::NormalPort(1),
            queue_id: 2,
            tx_bytes: 3,
            tx_packets: 4,
            tx_errors: 5,
        }]),
    ]
}

fn replies(version: Version) -> Vec<OfMsg> {
    let payloads: Vec<OfPayload> = if version == Version::V1_0 {
        stats_replies()
            .into_iter()
            .map(|body| {
                OfPayload::StatsReplyV10(StatsReplyV10 {
                    flags: MultipartFlags::empty(),
                    body,
                })
            })
            .collect()
    } else {
        multipart_replies()
            .into_iter()
            .map(|body| {
                OfPayload::MultipartReply(MultipartReply {
                    flags: MultipartFlags::MORE,
                    body,
                })
            })
            .collect()
    };
    payloads
        .into_iter()
        .enumerate()
        .map(|(xid, payload)| OfMsg::new(version, 100 + xid as u32, payload))
        .collect()
}

fn split(mut stream: &[u8]) -> Vec<&[u8]> {
    let mut frames = Vec::new();
    while !stream.is_empty() {
        let header = Header::try_from(stream).unwrap();
        let (frame, tail) = stream.split_at(*header.length() as usize);
        frames.push(frame);
        stream = tail;
    }
    frames
}

#[test]
fn handshake_stream_round_trips() {
    let registry = default_registry();
    for version in [Version::V1_0, Version::V1_3] {
        let messages = session(version);
        let mut stream = Vec::new();
        for msg in &messages {
            registry.serialize(msg, &mut stream).unwrap();
        }
        let decoded: Vec<OfMsg> = split(&stream)
            .into_iter()
            .map(|frame| decode_message(frame).unwrap())
            .collect();
        assert_eq!(decoded, messages);
    }
}

#[test]
fn re_encoding_is_byte_identical() {
    let registry = default_registry();
    for msg in session(Version::V1_3) {
        let bytes = registry.encode(&msg).unwrap();
        let again = registry.encode(&decode_message(&bytes).unwrap()).unwrap();
        assert_eq!(again, bytes);
    }
}

#[test]
fn reply_stream_round_trips() {
    let registry = default_registry();
    for version in [Version::V1_0, Version::V1_3] {
        let messages = replies(version);
        let mut stream = Vec::new();
        for msg in &messages {
            registry.serialize(msg, &mut stream).unwrap();
        }
        let decoded: Vec<OfMsg> = split(&stream)
            .into_iter()
            .map(|frame| decode_message(frame).unwrap())
            .collect();
        assert_eq!(decoded, messages);
    }
}

#[test]
fn replies_re_encode_byte_identical() {
    let registry = default_registry();
    for version in [Version::V1_0, Version::V1_3] {
        for msg in replies(version) {
            let bytes = registry.encode(&msg).unwrap();
            let again = registry.encode(&decode_message(&bytes).unwrap()).unwrap();
            assert_eq!(again, bytes);
        }
    }
}
