use std::net::{Ipv4Addr, Ipv6Addr};

use super::hw_addr::EthernetAddress;
use super::ports::PortNumber;

/// Fixed part of an OXM match: type and length, 4 bytes.
pub const MATCH_HEADER_LENGTH: usize = 4;

/// The match type indicates the match structure (set of fields that compose the
/// match) in use. The match type is placed in the type field at the beginning
/// of all match structures. The "OpenFlow Extensible Match" type corresponds
/// to OXM TLV format described below and must be supported by all OpenFlow
/// switches.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum MatchType {
    /// Deprecated, the fixed OpenFlow 1.0 layout.
    Standard = 0,
    /// OpenFlow Extensible Match
    OXM = 1,
}

/// Fields to match against flows (OXM match, OpenFlow 1.2+).
///
/// On the wire: type, length excluding the trailing padding, the OXM TLVs,
/// then zero padding to a multiple of 8.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Match {
    pub entries: Vec<MatchField>,
}

impl Match {
    pub fn new(entries: Vec<MatchField>) -> Self {
        Match { entries }
    }

    /// Matches every packet.
    pub fn any() -> Self {
        Match::default()
    }
}

bitfield! {
    pub struct OxmTlvHeader(u32);
    impl Debug;

    u32;
    pub get_length, set_length: 7, 0;
    pub get_hasmask, set_hasmask: 8, 8;
    pub get_oxm_field, set_oxm_field: 15, 9;
    pub get_oxm_class, set_oxm_class: 31, 16;
}

impl OxmTlvHeader {
    pub fn build(class: u16, field: u8, has_mask: bool, length: u8) -> Self {
        let mut header = OxmTlvHeader(0);
        header.set_oxm_class(class as u32);
        header.set_oxm_field(field as u32);
        header.set_hasmask(has_mask as u32);
        header.set_length(length as u32);
        header
    }
}

impl Clone for OxmTlvHeader {
    fn clone(&self) -> Self {
        OxmTlvHeader(self.0)
    }
}

impl PartialEq for OxmTlvHeader {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// OXM Class IDs.
/// The high order bit differentiate reserved classes from member classes.
/// Classes 0x0000 to 0x7FFF are member classes, allocated by ONF.
/// Classes 0x8000 to 0xFFFE are reserved classes, reserved for standardisation.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum OxmClass {
    /// Backward compatibility with NXM
    Nxm0 = 0x0000,
    /// Backward compatibility with NXM
    Nxm1 = 0x0001,
    /// Basic class for OpenFlow
    OpenFlowBasic = 0x8000,
    /// Experimenter class
    Experimenter = 0xFFFF,
}

/// OXM Flow match field types for OpenFlow basic class.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum OfbMatchFields {
    /// Switch input port.
    InPort = 0,
    /// Switch physical input port.
    InPhyPort = 1,
    /// Metadata passed between tables.
    Metadata = 2,
    /// Ethernet destination address.
    EthDst = 3,
    /// Ethernet source address.
    EthSrc = 4,
    /// Ethernet frame type.
    EthType = 5,
    /// VLAN id.
    VlanVid = 6,
    /// VLAN priority.
    VlanPcp = 7,
    /// IP DSCP (6 bits in ToS field).
    IpDscp = 8,
    /// IP ECN (2 bits in ToS field).
    IpEcn = 9,
    /// IP protocol.
    IpProto = 10,
    /// IPv4 source address.
    IPv4Src = 11,
    /// IPv4 destination address.
    IPv4Dst = 12,
    /// TCP source port.
    TcpSrc = 13,
    /// TCP destination port.
    TcpDst = 14,
    /// UDP source port.
    UdpSrc = 15,
    /// UDP destination port.
    UdpDst = 16,
    /// SCTP source port.
    SctpSrc = 17,
    /// SCTP destination port.
    SctpDst = 18,
    /// ICMP type.
    IcmpV4Type = 19,
    /// ICMP code.
    IcmpV4Code = 20,
    /// ARP opcode.
    ArpOp = 21,
    /// ARP source IPv4 address.
    ArpSpa = 22,
    /// ARP target IPv4 address.
    ArpTpa = 23,
    /// ARP source hardware address.
    ArpSha = 24,
    /// ARP target hardware address.
    ArpTha = 25,
    /// IPv6 source address.
    IPv6Src = 26,
    /// IPv6 destination address.
    IPv6Dst = 27,
    /// IPv6 Flow Label
    IPv6FLabel = 28,
    /// ICMPv6 type.
    IcmpV6Type = 29,
    /// ICMPv6 code.
    IcmpV6Code = 30,
    /// Target address for ND.
    IPv6NdTarget = 31,
    /// Source link-layer for ND.
    IPv6NdSll = 32,
    /// Target link-layer for ND.
    IPv6NdTll = 33,
    /// MPLS label.
    MplsLabel = 34,
    /// MPLS TC.
    MplsTc = 35,
    /// MPLS BoS bit.
    MplsBos = 36,
    /// PBB I-SID.
    PbbISid = 37,
    /// Logical Port Metadata.
    TunnelId = 38,
    /// IPv6 Extension Header pseudo-field
    IPv6ExtHdr = 39,
}

impl OfbMatchFields {
    pub const ALL: [OfbMatchFields; 40] = [
        OfbMatchFields::InPort,
        OfbMatchFields::InPhyPort,
        OfbMatchFields::Metadata,
        OfbMatchFields::EthDst,
        OfbMatchFields::EthSrc,
        OfbMatchFields::EthType,
        OfbMatchFields::VlanVid,
        OfbMatchFields::VlanPcp,
        OfbMatchFields::IpDscp,
        OfbMatchFields::IpEcn,
        OfbMatchFields::IpProto,
        OfbMatchFields::IPv4Src,
        OfbMatchFields::IPv4Dst,
        OfbMatchFields::TcpSrc,
        OfbMatchFields::TcpDst,
        OfbMatchFields::UdpSrc,
        OfbMatchFields::UdpDst,
        OfbMatchFields::SctpSrc,
        OfbMatchFields::SctpDst,
        OfbMatchFields::IcmpV4Type,
        OfbMatchFields::IcmpV4Code,
        OfbMatchFields::ArpOp,
        OfbMatchFields::ArpSpa,
        OfbMatchFields::ArpTpa,
        OfbMatchFields::ArpSha,
        OfbMatchFields::ArpTha,
        OfbMatchFields::IPv6Src,
        OfbMatchFields::IPv6Dst,
        OfbMatchFields::IPv6FLabel,
        OfbMatchFields::IcmpV6Type,
        OfbMatchFields::IcmpV6Code,
        OfbMatchFields::IPv6NdTarget,
        OfbMatchFields::IPv6NdSll,
        OfbMatchFields::IPv6NdTll,
        OfbMatchFields::MplsLabel,
        OfbMatchFields::MplsTc,
        OfbMatchFields::MplsBos,
        OfbMatchFields::PbbISid,
        OfbMatchFields::TunnelId,
        OfbMatchFields::IPv6ExtHdr,
    ];

    /// Length of the unmasked value in bytes.
    pub fn value_len(self) -> u8 {
        use self::OfbMatchFields::*;
        match self {
            VlanPcp | IpDscp | IpEcn | IpProto | IcmpV4Type | IcmpV4Code | IcmpV6Type
            | IcmpV6Code | MplsTc | MplsBos => 1,
            EthType | VlanVid | TcpSrc | TcpDst | UdpSrc | UdpDst | SctpSrc | SctpDst | ArpOp
            | IPv6ExtHdr => 2,
            PbbISid => 3,
            InPort | InPhyPort | IPv4Src | IPv4Dst | ArpSpa | ArpTpa | IPv6FLabel | MplsLabel => 4,
            EthDst | EthSrc | ArpSha | ArpTha | IPv6NdSll | IPv6NdTll => 6,
            Metadata | TunnelId => 8,
            IPv6Src | IPv6Dst | IPv6NdTarget => 16,
        }
    }

    /// Payload length announced in the OXM header.
    pub fn oxm_len(self, has_mask: bool) -> u8 {
        if has_mask {
            self.value_len() * 2
        } else {
            self.value_len()
        }
    }
}

/// A single OXM TLV of a match or a set-field action.
///
/// Maskable fields carry the mask as an `Option`; the mask bit of the OXM
/// header follows from it.
#[derive(Debug, PartialEq, Clone)]
pub enum MatchField {
    InPort(PortNumber),
    InPhyPort(PortNumber),
    Metadata(u64, Option<u64>),
    EthDst(EthernetAddress, Option<EthernetAddress>),
    EthSrc(EthernetAddress, Option<EthernetAddress>),
    EthType(u16),
    /// Includes the OFPVID_PRESENT bit.
    VlanVid(u16, Option<u16>),
    VlanPcp(u8),
    IpDscp(u8),
    IpEcn(u8),
    IpProto(u8),
    IPv4Src(Ipv4Addr, Option<Ipv4Addr>),
    IPv4Dst(Ipv4Addr, Option<Ipv4Addr>),
    TcpSrc(u16),
    TcpDst(u16),
    UdpSrc(u16),
    UdpDst(u16),
    SctpSrc(u16),
    SctpDst(u16),
    IcmpV4Type(u8),
    IcmpV4Code(u8),
    ArpOp(u16),
    ArpSpa(Ipv4Addr, Option<Ipv4Addr>),
    ArpTpa(Ipv4Addr, Option<Ipv4Addr>),
    ArpSha(EthernetAddress, Option<EthernetAddress>),
    ArpTha(EthernetAddress, Option<EthernetAddress>),
    IPv6Src(Ipv6Addr, Option<Ipv6Addr>),
    IPv6Dst(Ipv6Addr, Option<Ipv6Addr>),
    IPv6FLabel(u32, Option<u32>),
    IcmpV6Type(u8),
    IcmpV6Code(u8),
    IPv6NdTarget(Ipv6Addr),
    IPv6NdSll(EthernetAddress),
    IPv6NdTll(EthernetAddress),
    MplsLabel(u32),
    MplsTc(u8),
    MplsBos(bool),
    /// 24 bit service instance id.
    PbbISid(u32, Option<u32>),
    TunnelId(u64, Option<u64>),
    IPv6ExtHdr(u16, Option<u16>),
    Experimenter(ExperimenterField),
}

/// OXM field of the experimenter class. `data` is the vendor payload after
/// the experimenter id.
#[derive(Debug, PartialEq, Clone)]
pub struct ExperimenterField {
    pub experimenter_id: u32,
    pub field: u8,
    pub has_mask: bool,
    pub data: Vec<u8>,
}

impl MatchField {
    /// OpenFlow basic field, `None` for experimenter fields.
    pub fn field(&self) -> Option<OfbMatchFields> {
        use self::MatchField as M;
        use self::OfbMatchFields as F;
        Some(match *self {
            M::InPort(..) => F::InPort,
            M::InPhyPort(..) => F::InPhyPort,
            M::Metadata(..) => F::Metadata,
            M::EthDst(..) => F::EthDst,
            M::EthSrc(..) => F::EthSrc,
            M::EthType(..) => F::EthType,
            M::VlanVid(..) => F::VlanVid,
            M::VlanPcp(..) => F::VlanPcp,
            M::IpDscp(..) => F::IpDscp,
            M::IpEcn(..) => F::IpEcn,
            M::IpProto(..) => F::IpProto,
            M::IPv4Src(..) => F::IPv4Src,
            M::IPv4Dst(..) => F::IPv4Dst,
            M::TcpSrc(..) => F::TcpSrc,
            M::TcpDst(..) => F::TcpDst,
            M::UdpSrc(..) => F::UdpSrc,
            M::UdpDst(..) => F::UdpDst,
            M::SctpSrc(..) => F::SctpSrc,
            M::SctpDst(..) => F::SctpDst,
            M::IcmpV4Type(..) => F::IcmpV4Type,
            M::IcmpV4Code(..) => F::IcmpV4Code,
            M::ArpOp(..) => F::ArpOp,
            M::ArpSpa(..) => F::ArpSpa,
            M::ArpTpa(..) => F::ArpTpa,
            M::ArpSha(..) => F::ArpSha,
            M::ArpTha(..) => F::ArpTha,
            M::IPv6Src(..) => F::IPv6Src,
            M::IPv6Dst(..) => F::IPv6Dst,
            M::IPv6FLabel(..) => F::IPv6FLabel,
            M::IcmpV6Type(..) => F::IcmpV6Type,
            M::IcmpV6Code(..) => F::IcmpV6Code,
            M::IPv6NdTarget(..) => F::IPv6NdTarget,
            M::IPv6NdSll(..) => F::IPv6NdSll,
            M::IPv6NdTll(..) => F::IPv6NdTll,
            M::MplsLabel(..) => F::MplsLabel,
            M::MplsTc(..) => F::MplsTc,
            M::MplsBos(..) => F::MplsBos,
            M::PbbISid(..) => F::PbbISid,
            M::TunnelId(..) => F::TunnelId,
            M::IPv6ExtHdr(..) => F::IPv6ExtHdr,
            M::Experimenter(..) => return None,
        })
    }

    pub fn has_mask(&self) -> bool {
        use self::MatchField as M;
        match self {
            M::Metadata(_, mask) | M::TunnelId(_, mask) => mask.is_some(),
            M::EthDst(_, mask) | M::EthSrc(_, mask) | M::ArpSha(_, mask) | M::ArpTha(_, mask) => {
                mask.is_some()
            }
            M::IPv4Src(_, mask) | M::IPv4Dst(_, mask) | M::ArpSpa(_, mask) | M::ArpTpa(_, mask) => {
                mask.is_some()
            }
            M::IPv6Src(_, mask) | M::IPv6Dst(_, mask) => mask.is_some(),
            M::VlanVid(_, mask) | M::IPv6ExtHdr(_, mask) => mask.is_some(),
            M::IPv6FLabel(_, mask) | M::PbbISid(_, mask) => mask.is_some(),
            M::Experimenter(field) => field.has_mask,
            _ => false,
        }
    }
}

/// OXM field id without a value, as listed in table features.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OxmId {
    Basic {
        field: OfbMatchFields,
        has_mask: bool,
    },
    Experimenter {
        experimenter_id: u32,
        field: u8,
        has_mask: bool,
        /// Payload length announced in the header, experimenter id included.
        length: u8,
    },
}

impl OxmId {
    pub fn basic(field: OfbMatchFields) -> Self {
        OxmId::Basic {
            field,
            has_mask: false,
        }
    }

    pub fn masked(field: OfbMatchFields) -> Self {
        OxmId::Basic {
            field,
            has_mask: true,
        }
    }
}

/// OpenFlow 1.0 match is always 40 bytes.
pub const MATCH_V10_LENGTH: usize = 40;
/// Shift of the nw_src wildcard bit count.
pub const NW_SRC_SHIFT: u32 = 8;
/// Shift of the nw_dst wildcard bit count.
pub const NW_DST_SHIFT: u32 = 14;
/// Wildcard bit counts are 6 bits wide; 32 and above wildcard the address.
pub const NW_WILDCARD_ALL: u8 = 32;

bitflags! {
    /// Fields ignored by an OpenFlow 1.0 match.
    #[derive(Default)]
    pub struct WildcardsV10: u32 {
        const IN_PORT = 1 << 0;
        const DL_VLAN = 1 << 1;
        const DL_SRC = 1 << 2;
        const DL_DST = 1 << 3;
        const DL_TYPE = 1 << 4;
        const NW_PROTO = 1 << 5;
        const TP_SRC = 1 << 6;
        const TP_DST = 1 << 7;
        const DL_VLAN_PCP = 1 << 8;
        const NW_TOS = 1 << 9;
    }
}

/// Fixed-layout OpenFlow 1.0 match (`ofp_match`).
#[derive(Debug, PartialEq, Clone)]
pub struct MatchV10 {
    pub wildcards: WildcardsV10,
    /// Number of low bits of `nw_src` to ignore.
    pub nw_src_wildcard: u8,
    /// Number of low bits of `nw_dst` to ignore.
    pub nw_dst_wildcard: u8,
    pub in_port: u16,
    pub dl_src: EthernetAddress,
    pub dl_dst: EthernetAddress,
    pub dl_vlan: u16,
    pub dl_vlan_pcp: u8,
    //pad 1 byte
    pub dl_type: u16,
    pub nw_tos: u8,
    pub nw_proto: u8,
    //pad 2 bytes
    pub nw_src: Ipv4Addr,
    pub nw_dst: Ipv4Addr,
    pub tp_src: u16,
    pub tp_dst: u16,
}

impl MatchV10 {
    /// Every field wildcarded.
    pub fn any() -> Self {
        MatchV10 {
            wildcards: WildcardsV10::all(),
            nw_src_wildcard: NW_WILDCARD_ALL,
            nw_dst_wildcard: NW_WILDCARD_ALL,
            in_port: 0,
            dl_src: [0; 6],
            dl_dst: [0; 6],
            dl_vlan: 0,
            dl_vlan_pcp: 0,
            dl_type: 0,
            nw_tos: 0,
            nw_proto: 0,
            nw_src: Ipv4Addr::UNSPECIFIED,
            nw_dst: Ipv4Addr::UNSPECIFIED,
            tp_src: 0,
            tp_dst: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oxm_header_layout() {
        let header = OxmTlvHeader::build(0x8000, OfbMatchFields::IpEcn as u8, false, 1);
        assert_eq!(header.0, 0x8000_1201);
        let masked = OxmTlvHeader::build(0x8000, OfbMatchFields::Metadata as u8, true, 16);
        assert_eq!(masked.0, 0x8000_0510);
        assert_eq!(masked.get_oxm_field(), 2);
        assert_eq!(masked.get_hasmask(), 1);
    }

    #[test]
    fn masked_fields_double_their_length() {
        assert_eq!(OfbMatchFields::IPv6Src.oxm_len(false), 16);
        assert_eq!(OfbMatchFields::IPv6Src.oxm_len(true), 32);
        assert_eq!(OfbMatchFields::PbbISid.oxm_len(true), 6);
    }

    #[test]
    fn mask_presence_follows_option() {
        assert!(!MatchField::Metadata(1, None).has_mask());
        assert!(MatchField::Metadata(1, Some(0xff)).has_mask());
        assert!(!MatchField::TcpDst(80).has_mask());
        assert_eq!(MatchField::TcpDst(80).field(), Some(OfbMatchFields::TcpDst));
    }
}
