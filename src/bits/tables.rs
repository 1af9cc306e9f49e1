//! Wire bit positions of every flag group, per protocol version.
//!
//! Positions are part of the wire contract. A flag missing from a table has
//! no representation in that version.

use crate::ds::actions::ActionTypes;
use crate::ds::async_config::{FlowRemovedReasons, PacketInReasons, PortReasons};
use crate::ds::features::Capabilities;
use crate::ds::flow_match::WildcardsV10;
use crate::ds::flow_mod::FlowModFlags;
use crate::ds::group_mod::{GroupCapabilities, GroupTypes};
use crate::ds::meter_mod::{MeterBandTypes, MeterFlags};
use crate::ds::multipart::MultipartFlags;
use crate::ds::ports::{PortConfig, PortFeatures, PortState};
use crate::ds::table_mod::TableConfig;
use crate::header::Version;

pub static CAPABILITIES_V10: &[(Capabilities, u8)] = &[
    (Capabilities::FLOW_STATS, 0),
    (Capabilities::TABLE_STATS, 1),
    (Capabilities::PORT_STATS, 2),
    (Capabilities::STP, 3),
    (Capabilities::IP_REASM, 5),
    (Capabilities::QUEUE_STATS, 6),
    (Capabilities::ARP_MATCH_IP, 7),
];

pub static CAPABILITIES_V13: &[(Capabilities, u8)] = &[
    (Capabilities::FLOW_STATS, 0),
    (Capabilities::TABLE_STATS, 1),
    (Capabilities::PORT_STATS, 2),
    (Capabilities::GROUP_STATS, 3),
    (Capabilities::IP_REASM, 5),
    (Capabilities::QUEUE_STATS, 6),
    (Capabilities::PORT_BLOCKED, 8),
];

pub static PORT_CONFIG_V10: &[(PortConfig, u8)] = &[
    (PortConfig::PORT_DOWN, 0),
    (PortConfig::NO_STP, 1),
    (PortConfig::NO_RECV, 2),
    (PortConfig::NO_RECV_STP, 3),
    (PortConfig::NO_FLOOD, 4),
    (PortConfig::NO_FWD, 5),
    (PortConfig::NO_PACKET_IN, 6),
];

pub static PORT_CONFIG_V13: &[(PortConfig, u8)] = &[
    (PortConfig::PORT_DOWN, 0),
    (PortConfig::NO_RECV, 2),
    (PortConfig::NO_FWD, 5),
    (PortConfig::NO_PACKET_IN, 6),
];

/// The STP state of 1.0 is not a flag, see `ports::STP_STATE_SHIFT`.
pub static PORT_STATE_V10: &[(PortState, u8)] = &[(PortState::LINK_DOWN, 0)];

pub static PORT_STATE_V13: &[(PortState, u8)] = &[
    (PortState::LINK_DOWN, 0),
    (PortState::BLOCKED, 1),
    (PortState::LIVE, 2),
];

pub static PORT_FEATURES_V10: &[(PortFeatures, u8)] = &[
    (PortFeatures::RATE_10MB_HD, 0),
    (PortFeatures::RATE_10MB_FD, 1),
    (PortFeatures::RATE_100MB_HD, 2),
    (PortFeatures::RATE_100MB_FD, 3),
    (PortFeatures::RATE_1GB_HD, 4),
    (PortFeatures::RATE_1GB_FD, 5),
    (PortFeatures::RATE_10GB_FD, 6),
    (PortFeatures::COPPER, 7),
    (PortFeatures::FIBER, 8),
    (PortFeatures::AUTONEG, 9),
    (PortFeatures::PAUSE, 10),
    (PortFeatures::PAUSE_ASYM, 11),
];

pub static PORT_FEATURES_V13: &[(PortFeatures, u8)] = &[
    (PortFeatures::RATE_10MB_HD, 0),
    (PortFeatures::RATE_10MB_FD, 1),
    (PortFeatures::RATE_100MB_HD, 2),
    (PortFeatures::RATE_100MB_FD, 3),
    (PortFeatures::RATE_1GB_HD, 4),
    (PortFeatures::RATE_1GB_FD, 5),
    (PortFeatures::RATE_10GB_FD, 6),
    (PortFeatures::RATE_40GB_FD, 7),
    (PortFeatures::RATE_100GB_FD, 8),
    (PortFeatures::RATE_1TB_FD, 9),
    (PortFeatures::OTHER, 10),
    (PortFeatures::COPPER, 11),
    (PortFeatures::FIBER, 12),
    (PortFeatures::AUTONEG, 13),
    (PortFeatures::PAUSE, 14),
    (PortFeatures::PAUSE_ASYM, 15),
];

pub static FLOW_MOD_FLAGS_V10: &[(FlowModFlags, u8)] = &[
    (FlowModFlags::SEND_FLOW_REM, 0),
    (FlowModFlags::CHECK_OVERLAP, 1),
    (FlowModFlags::EMERG, 2),
];

pub static FLOW_MOD_FLAGS_V13: &[(FlowModFlags, u8)] = &[
    (FlowModFlags::SEND_FLOW_REM, 0),
    (FlowModFlags::CHECK_OVERLAP, 1),
    (FlowModFlags::RESET_COUNTS, 2),
    (FlowModFlags::NO_PKT_COUNTS, 3),
    (FlowModFlags::NO_BYT_COUNTS, 4),
];

/// Bit i is set when `OFPAT_*` code i is supported.
pub static ACTION_TYPES_V10: &[(ActionTypes, u8)] = &[
    (ActionTypes::OUTPUT, 0),
    (ActionTypes::SET_VLAN_VID, 1),
    (ActionTypes::SET_VLAN_PCP, 2),
    (ActionTypes::STRIP_VLAN, 3),
    (ActionTypes::SET_DL_SRC, 4),
    (ActionTypes::SET_DL_DST, 5),
    (ActionTypes::SET_NW_SRC, 6),
    (ActionTypes::SET_NW_DST, 7),
    (ActionTypes::SET_NW_TOS, 8),
    (ActionTypes::SET_TP_SRC, 9),
    (ActionTypes::SET_TP_DST, 10),
    (ActionTypes::ENQUEUE, 11),
];

pub static ACTION_TYPES_V13: &[(ActionTypes, u8)] = &[
    (ActionTypes::OUTPUT, 0),
    (ActionTypes::COPY_TTL_OUT, 11),
    (ActionTypes::COPY_TTL_IN, 12),
    (ActionTypes::SET_MPLS_TTL, 15),
    (ActionTypes::DEC_MPLS_TTL, 16),
    (ActionTypes::PUSH_VLAN, 17),
    (ActionTypes::POP_VLAN, 18),
    (ActionTypes::PUSH_MPLS, 19),
    (ActionTypes::POP_MPLS, 20),
    (ActionTypes::SET_QUEUE, 21),
    (ActionTypes::GROUP, 22),
    (ActionTypes::SET_NW_TTL, 23),
    (ActionTypes::DEC_NW_TTL, 24),
    (ActionTypes::SET_FIELD, 25),
    (ActionTypes::PUSH_PBB, 26),
    (ActionTypes::POP_PBB, 27),
];

pub static METER_FLAGS: &[(MeterFlags, u8)] = &[
    (MeterFlags::KBPS, 0),
    (MeterFlags::PKTPS, 1),
    (MeterFlags::BURST, 2),
    (MeterFlags::STATS, 3),
];

/// Bit i is set when `OFPMBT_*` code i is supported.
pub static METER_BAND_TYPES: &[(MeterBandTypes, u8)] = &[
    (MeterBandTypes::DROP, 1),
    (MeterBandTypes::DSCP_REMARK, 2),
];

pub static GROUP_TYPES: &[(GroupTypes, u8)] = &[
    (GroupTypes::ALL, 0),
    (GroupTypes::SELECT, 1),
    (GroupTypes::INDIRECT, 2),
    (GroupTypes::FF, 3),
];

pub static GROUP_CAPABILITIES: &[(GroupCapabilities, u8)] = &[
    (GroupCapabilities::SELECT_WEIGHT, 0),
    (GroupCapabilities::SELECT_LIVENESS, 1),
    (GroupCapabilities::CHAINING, 2),
    (GroupCapabilities::CHAINING_CHECKS, 3),
];

/// The deprecated mask covers two bits.
pub static TABLE_CONFIG: &[(TableConfig, u8)] = &[
    (TableConfig::DEPRECATED_MASK, 0),
    (TableConfig::DEPRECATED_MASK, 1),
];

/// Prefix counts of nw_src/nw_dst are not flags, see `flow_match::NW_SRC_SHIFT`.
pub static WILDCARDS_V10: &[(WildcardsV10, u8)] = &[
    (WildcardsV10::IN_PORT, 0),
    (WildcardsV10::DL_VLAN, 1),
    (WildcardsV10::DL_SRC, 2),
    (WildcardsV10::DL_DST, 3),
    (WildcardsV10::DL_TYPE, 4),
    (WildcardsV10::NW_PROTO, 5),
    (WildcardsV10::TP_SRC, 6),
    (WildcardsV10::TP_DST, 7),
    (WildcardsV10::DL_VLAN_PCP, 20),
    (WildcardsV10::NW_TOS, 21),
];

pub static PACKET_IN_REASONS: &[(PacketInReasons, u8)] = &[
    (PacketInReasons::NO_MATCH, 0),
    (PacketInReasons::ACTION, 1),
    (PacketInReasons::INVALID_TTL, 2),
];

pub static PORT_REASONS: &[(PortReasons, u8)] = &[
    (PortReasons::ADD, 0),
    (PortReasons::DELETE, 1),
    (PortReasons::MODIFY, 2),
];

pub static FLOW_REMOVED_REASONS: &[(FlowRemovedReasons, u8)] = &[
    (FlowRemovedReasons::IDLE_TIMEOUT, 0),
    (FlowRemovedReasons::HARD_TIMEOUT, 1),
    (FlowRemovedReasons::DELETE, 2),
    (FlowRemovedReasons::GROUP_DELETE, 3),
];

pub static MULTIPART_FLAGS: &[(MultipartFlags, u8)] = &[(MultipartFlags::MORE, 0)];

pub fn capabilities(version: Version) -> &'static [(Capabilities, u8)] {
    if version == Version::V1_0 {
        CAPABILITIES_V10
    } else {
        CAPABILITIES_V13
    }
}

pub fn port_config(version: Version) -> &'static [(PortConfig, u8)] {
    if version == Version::V1_0 {
        PORT_CONFIG_V10
    } else {
        PORT_CONFIG_V13
    }
}

pub fn port_state(version: Version) -> &'static [(PortState, u8)] {
    if version == Version::V1_0 {
        PORT_STATE_V10
    } else {
        PORT_STATE_V13
    }
}

pub fn port_features(version: Version) -> &'static [(PortFeatures, u8)] {
    if version == Version::V1_0 {
        PORT_FEATURES_V10
    } else {
        PORT_FEATURES_V13
    }
}

pub fn flow_mod_flags(version: Version) -> &'static [(FlowModFlags, u8)] {
    if version == Version::V1_0 {
        FLOW_MOD_FLAGS_V10
    } else {
        FLOW_MOD_FLAGS_V13
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{pack, unpack};

    fn positions_are_unique<F: Copy + PartialEq>(table: &[(F, u8)]) -> bool {
        table
            .iter()
            .enumerate()
            .all(|(i, (flag, bit))| table[..i].iter().all(|(f, b)| b != bit || f == flag))
    }

    #[test]
    fn no_bit_is_shared_between_flags() {
        assert!(positions_are_unique(CAPABILITIES_V10));
        assert!(positions_are_unique(CAPABILITIES_V13));
        assert!(positions_are_unique(PORT_CONFIG_V10));
        assert!(positions_are_unique(PORT_FEATURES_V10));
        assert!(positions_are_unique(PORT_FEATURES_V13));
        assert!(positions_are_unique(FLOW_MOD_FLAGS_V10));
        assert!(positions_are_unique(FLOW_MOD_FLAGS_V13));
        assert!(positions_are_unique(ACTION_TYPES_V10));
        assert!(positions_are_unique(ACTION_TYPES_V13));
        assert!(positions_are_unique(WILDCARDS_V10));
    }

    #[test]
    fn empty_sets_pack_to_zero() {
        assert_eq!(pack(PORT_FEATURES_V13, PortFeatures::empty()), 0);
        assert_eq!(pack(CAPABILITIES_V10, Capabilities::empty()), 0);
        assert_eq!(pack(METER_FLAGS, MeterFlags::empty()), 0);
    }

    #[test]
    fn single_flag_packs_to_its_position() {
        for (flag, bit) in PORT_FEATURES_V10 {
            assert_eq!(pack(PORT_FEATURES_V10, *flag), 1u32 << *bit);
        }
        for (flag, bit) in FLOW_MOD_FLAGS_V13 {
            assert_eq!(pack(FLOW_MOD_FLAGS_V13, *flag), 1u32 << *bit);
        }
        for (flag, bit) in ACTION_TYPES_V13 {
            assert_eq!(pack(ACTION_TYPES_V13, *flag), 1u32 << *bit);
        }
    }

    #[test]
    fn port_features_differ_between_versions() {
        assert_eq!(pack(PORT_FEATURES_V10, PortFeatures::COPPER), 1 << 7);
        assert_eq!(pack(PORT_FEATURES_V13, PortFeatures::COPPER), 1 << 11);
        // 40 Gb/s does not exist in 1.0
        assert_eq!(pack(PORT_FEATURES_V10, PortFeatures::RATE_40GB_FD), 0);
    }

    #[test]
    fn emergency_and_reset_counts_share_bit_two() {
        assert_eq!(pack(FLOW_MOD_FLAGS_V10, FlowModFlags::EMERG), 4);
        assert_eq!(pack(FLOW_MOD_FLAGS_V13, FlowModFlags::RESET_COUNTS), 4);
        assert_eq!(pack(FLOW_MOD_FLAGS_V13, FlowModFlags::EMERG), 0);
    }

    #[test]
    fn table_config_mask_is_three() {
        assert_eq!(pack(TABLE_CONFIG, TableConfig::DEPRECATED_MASK), 3);
        assert_eq!(unpack::<TableConfig>(TABLE_CONFIG, 1), TableConfig::DEPRECATED_MASK);
    }

    #[test]
    fn wildcards_use_the_high_bits() {
        assert_eq!(pack(WILDCARDS_V10, WildcardsV10::NW_TOS), 1 << 21);
        assert_eq!(pack(WILDCARDS_V10, WildcardsV10::DL_VLAN_PCP), 1 << 20);
    }

    #[test]
    fn pack_unpack_round_trip() {
        let features = PortFeatures::RATE_1GB_FD | PortFeatures::COPPER | PortFeatures::AUTONEG;
        for table in [PORT_FEATURES_V10, PORT_FEATURES_V13].iter().copied() {
            assert_eq!(unpack::<PortFeatures>(table, pack(table, features)), features);
        }
        let capabilities = Capabilities::FLOW_STATS | Capabilities::GROUP_STATS;
        assert_eq!(
            unpack::<Capabilities>(CAPABILITIES_V13, pack(CAPABILITIES_V13, capabilities)),
            capabilities
        );
        let bands = MeterBandTypes::DROP | MeterBandTypes::DSCP_REMARK;
        assert_eq!(pack(METER_BAND_TYPES, bands), 0b110);
        assert_eq!(unpack::<MeterBandTypes>(METER_BAND_TYPES, 0b110), bands);
    }

    #[test]
    fn version_selectors() {
        assert_eq!(capabilities(Version::V1_0).len(), CAPABILITIES_V10.len());
        assert_eq!(port_features(Version::V1_2).len(), PORT_FEATURES_V13.len());
        assert_eq!(flow_mod_flags(Version::V1_3).len(), 5);
    }
}
