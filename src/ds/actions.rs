use std::net::Ipv4Addr;

use super::flow_match::MatchField;
use super::hw_addr::EthernetAddress;
use super::ports::{PortNumber, PortNumberV10};

/// Type code and length of every action.
pub const ACTION_HEADER_LEN: u16 = 4;
/// Experimenter actions carry the experimenter id after the header.
pub const ACTION_EXPERIMENTER_HEADER_LEN: u16 = 8;
/// Type code shared by experimenter (1.3) and vendor (1.0) actions.
pub const ACTION_EXPERIMENTER: u16 = 0xffff;
/// `max_len` asking the switch to send the whole packet to the controller.
pub const CONTROLLER_MAX_LEN_NO_BUFFER: u16 = 0xffff;

#[derive(Primitive, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ActionType {
    /// Output to switch port.
    Output = 0,
    /// Copy TTL "outwards" -- from next-to-outermost to outermost
    CopyTtlOut = 11,
    /// Copy TTL "inwards" -- from outermost to next-to-outermost
    CopyTtlIn = 12,
    /// MPLS TTL
    SetMplsTtl = 15,
    /// Decrement MPLS TTL
    DecMplsTtl = 16,
    /// Push a new VLAN tag
    PushVlan = 17,
    /// Pop the outer VLAN tag
    PopVlan = 18,
    /// Push a new MPLS tag
    PushMpls = 19,
    /// Pop the outer MPLS tag
    PopMpls = 20,
    /// Set queue id when outputting to a port
    SetQueue = 21,
    /// Apply group.
    Group = 22,
    /// IP TTL.
    SetNwTtl = 23,
    /// Decrement IP TTL.
    DecNwTtl = 24,
    /// Set a header field using OXM TLV format.
    SetField = 25,
    /// Push a new PBB service tag (I-TAG)
    PushPbb = 26,
    /// Pop the outer PBB service tag (I-TAG)
    PopPbb = 27,
    Experimenter = 0xffff,
}

/// An OpenFlow 1.3 action.
#[derive(Debug, PartialEq, Clone)]
pub enum Action {
    Output {
        port: PortNumber,
        /// Max bytes to send to the controller.
        max_len: u16,
    },
    CopyTtlOut,
    CopyTtlIn,
    SetMplsTtl(u8),
    DecMplsTtl,
    PushVlan(u16),
    PopVlan,
    PushMpls(u16),
    /// Ethertype of the payload after popping.
    PopMpls(u16),
    SetQueue(u32),
    Group(u32),
    SetNwTtl(u8),
    DecNwTtl,
    SetField(MatchField),
    PushPbb(u16),
    PopPbb,
    Experimenter(ExperimenterAction),
}

/// Vendor action. `data` is written by the plugin registered for
/// `experimenter_id`.
#[derive(Debug, PartialEq, Clone)]
pub struct ExperimenterAction {
    pub experimenter_id: u32,
    pub data: Vec<u8>,
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match *self {
            Action::Output { .. } => ActionType::Output,
            Action::CopyTtlOut => ActionType::CopyTtlOut,
            Action::CopyTtlIn => ActionType::CopyTtlIn,
            Action::SetMplsTtl(_) => ActionType::SetMplsTtl,
            Action::DecMplsTtl => ActionType::DecMplsTtl,
            Action::PushVlan(_) => ActionType::PushVlan,
            Action::PopVlan => ActionType::PopVlan,
            Action::PushMpls(_) => ActionType::PushMpls,
            Action::PopMpls(_) => ActionType::PopMpls,
            Action::SetQueue(_) => ActionType::SetQueue,
            Action::Group(_) => ActionType::Group,
            Action::SetNwTtl(_) => ActionType::SetNwTtl,
            Action::DecNwTtl => ActionType::DecNwTtl,
            Action::SetField(_) => ActionType::SetField,
            Action::PushPbb(_) => ActionType::PushPbb,
            Action::PopPbb => ActionType::PopPbb,
            Action::Experimenter(_) => ActionType::Experimenter,
        }
    }
}

/// OpenFlow 1.0 action type codes.
#[derive(Primitive, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ActionTypeV10 {
    Output = 0,
    SetVlanVid = 1,
    SetVlanPcp = 2,
    StripVlan = 3,
    SetDlSrc = 4,
    SetDlDst = 5,
    SetNwSrc = 6,
    SetNwDst = 7,
    SetNwTos = 8,
    SetTpSrc = 9,
    SetTpDst = 10,
    Enqueue = 11,
    Vendor = 0xffff,
}

/// An OpenFlow 1.0 action.
#[derive(Debug, PartialEq, Clone)]
pub enum ActionV10 {
    Output { port: PortNumberV10, max_len: u16 },
    SetVlanVid(u16),
    SetVlanPcp(u8),
    StripVlan,
    SetDlSrc(EthernetAddress),
    SetDlDst(EthernetAddress),
    SetNwSrc(Ipv4Addr),
    SetNwDst(Ipv4Addr),
    SetNwTos(u8),
    SetTpSrc(u16),
    SetTpDst(u16),
    Enqueue { port: PortNumberV10, queue_id: u32 },
    Vendor(ExperimenterAction),
}

impl ActionV10 {
    pub fn action_type(&self) -> ActionTypeV10 {
        match *self {
            ActionV10::Output { .. } => ActionTypeV10::Output,
            ActionV10::SetVlanVid(_) => ActionTypeV10::SetVlanVid,
            ActionV10::SetVlanPcp(_) => ActionTypeV10::SetVlanPcp,
            ActionV10::StripVlan => ActionTypeV10::StripVlan,
            ActionV10::SetDlSrc(_) => ActionTypeV10::SetDlSrc,
            ActionV10::SetDlDst(_) => ActionTypeV10::SetDlDst,
            ActionV10::SetNwSrc(_) => ActionTypeV10::SetNwSrc,
            ActionV10::SetNwDst(_) => ActionTypeV10::SetNwDst,
            ActionV10::SetNwTos(_) => ActionTypeV10::SetNwTos,
            ActionV10::SetTpSrc(_) => ActionTypeV10::SetTpSrc,
            ActionV10::SetTpDst(_) => ActionTypeV10::SetTpDst,
            ActionV10::Enqueue { .. } => ActionTypeV10::Enqueue,
            ActionV10::Vendor(_) => ActionTypeV10::Vendor,
        }
    }
}

/// Action listed by type only, as in table features.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ActionId {
    Standard(ActionType),
    Experimenter(u32),
}

bitflags! {
    /// Set of supported action types, used by the 1.0 features reply and
    /// 1.3 group features. Wire positions are per version.
    #[derive(Default)]
    pub struct ActionTypes: u32 {
        const OUTPUT = 1 << 0;
        const SET_VLAN_VID = 1 << 1;
        const SET_VLAN_PCP = 1 << 2;
        const STRIP_VLAN = 1 << 3;
        const SET_DL_SRC = 1 << 4;
        const SET_DL_DST = 1 << 5;
        const SET_NW_SRC = 1 << 6;
        const SET_NW_DST = 1 << 7;
        const SET_NW_TOS = 1 << 8;
        const SET_TP_SRC = 1 << 9;
        const SET_TP_DST = 1 << 10;
        const ENQUEUE = 1 << 11;
        const COPY_TTL_OUT = 1 << 12;
        const COPY_TTL_IN = 1 << 13;
        const SET_MPLS_TTL = 1 << 14;
        const DEC_MPLS_TTL = 1 << 15;
        const PUSH_VLAN = 1 << 16;
        const POP_VLAN = 1 << 17;
        const PUSH_MPLS = 1 << 18;
        const POP_MPLS = 1 << 19;
        const SET_QUEUE = 1 << 20;
        const GROUP = 1 << 21;
        const SET_NW_TTL = 1 << 22;
        const DEC_NW_TTL = 1 << 23;
        const SET_FIELD = 1 << 24;
        const PUSH_PBB = 1 << 25;
        const POP_PBB = 1 << 26;
    }
}
