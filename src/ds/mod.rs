//! In-memory model of every OpenFlow message the codec handles.
//!
//! Messages whose wire layout changed between 1.0 and 1.3 have one shape per
//! layout (`FlowMod`/`FlowModV10`, ...). Both shapes map to the same
//! [`Type`], the registered factory for the target version decides which
//! shape it accepts.

use crate::header::{Type, Version};

pub mod actions;
pub mod async_config;
pub mod features;
pub mod flow_instructions;
pub mod flow_match;
pub mod flow_mod;
pub mod flow_removed;
pub mod group_mod;
pub mod hw_addr;
pub mod meter_mod;
pub mod multipart;
pub mod packet_in;
pub mod packet_out;
pub mod packet_queue;
pub mod port_mod;
pub mod port_status;
pub mod ports;
pub mod queue_config;
pub mod role;
pub mod stats_v10;
pub mod switch_config;
pub mod symmetric;
pub mod table_features;
pub mod table_mod;

pub use self::flow_mod::FlowModView;

/// defines an OpenFlow message
/// version + xid + payload, the header is derived while encoding
#[derive(Getters, Debug, PartialEq, Clone)]
pub struct OfMsg {
    #[get = "pub"]
    version: Version,
    #[get = "pub"]
    xid: u32,
    #[get = "pub"]
    payload: OfPayload,
}

impl OfMsg {
    pub fn new(version: Version, xid: u32, payload: OfPayload) -> Self {
        OfMsg {
            version,
            xid,
            payload,
        }
    }

    pub fn message_type(&self) -> Type {
        self.payload.message_type()
    }

    pub fn into_payload(self) -> OfPayload {
        self.payload
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum OfPayload {
    Hello(symmetric::Hello),
    Error(symmetric::ErrorMsg),
    EchoRequest(Vec<u8>),
    EchoReply(Vec<u8>),
    Experimenter(symmetric::ExperimenterMsg),

    FeaturesRequest,
    FeaturesReply(features::SwitchFeatures),
    FeaturesReplyV10(features::SwitchFeaturesV10),
    GetConfigRequest,
    GetConfigReply(switch_config::SwitchConfig),
    SetConfig(switch_config::SwitchConfig),

    PacketIn(packet_in::PacketIn),
    PacketInV10(packet_in::PacketInV10),
    FlowRemoved(flow_removed::FlowRemoved),
    FlowRemovedV10(flow_removed::FlowRemovedV10),
    PortStatus(port_status::PortStatus),
    PortStatusV10(port_status::PortStatusV10),

    PacketOut(packet_out::PacketOut),
    PacketOutV10(packet_out::PacketOutV10),
    FlowMod(flow_mod::FlowMod),
    FlowModV10(flow_mod::FlowModV10),
    GroupMod(group_mod::GroupMod),
    PortMod(port_mod::PortMod),
    PortModV10(port_mod::PortModV10),
    TableMod(table_mod::TableMod),

    MultipartRequest(multipart::MultipartRequest),
    MultipartReply(multipart::MultipartReply),
    StatsRequestV10(stats_v10::StatsRequestV10),
    StatsReplyV10(stats_v10::StatsReplyV10),

    BarrierRequest,
    BarrierReply,

    QueueGetConfigRequest(queue_config::QueueGetConfigRequest),
    QueueGetConfigRequestV10(queue_config::QueueGetConfigRequestV10),
    QueueGetConfigReply(queue_config::QueueGetConfigReply),
    QueueGetConfigReplyV10(queue_config::QueueGetConfigReplyV10),

    RoleRequest(role::Role),
    RoleReply(role::Role),

    GetAsyncRequest,
    GetAsyncReply(async_config::AsyncConfig),
    SetAsync(async_config::AsyncConfig),

    MeterMod(meter_mod::MeterMod),
}

impl OfPayload {
    pub fn message_type(&self) -> Type {
        use self::OfPayload as P;
        match *self {
            P::Hello(_) => Type::Hello,
            P::Error(_) => Type::Error,
            P::EchoRequest(_) => Type::EchoRequest,
            P::EchoReply(_) => Type::EchoReply,
            P::Experimenter(_) => Type::Experimenter,
            P::FeaturesRequest => Type::FeaturesRequest,
            P::FeaturesReply(_) | P::FeaturesReplyV10(_) => Type::FeaturesReply,
            P::GetConfigRequest => Type::GetConfigRequest,
            P::GetConfigReply(_) => Type::GetConfigReply,
            P::SetConfig(_) => Type::SetConfig,
            P::PacketIn(_) | P::PacketInV10(_) => Type::PacketIn,
            P::FlowRemoved(_) | P::FlowRemovedV10(_) => Type::FlowRemoved,
            P::PortStatus(_) | P::PortStatusV10(_) => Type::PortStatus,
            P::PacketOut(_) | P::PacketOutV10(_) => Type::PacketOut,
            P::FlowMod(_) | P::FlowModV10(_) => Type::FlowMod,
            P::GroupMod(_) => Type::GroupMod,
            P::PortMod(_) | P::PortModV10(_) => Type::PortMod,
            P::TableMod(_) => Type::TableMod,
            P::MultipartRequest(_) | P::StatsRequestV10(_) => Type::MultipartRequest,
            P::MultipartReply(_) | P::StatsReplyV10(_) => Type::MultipartReply,
            P::BarrierRequest => Type::BarrierRequest,
            P::BarrierReply => Type::BarrierReply,
            P::QueueGetConfigRequest(_) | P::QueueGetConfigRequestV10(_) => {
                Type::QueueGetConfigRequest
            }
            P::QueueGetConfigReply(_) | P::QueueGetConfigReplyV10(_) => Type::QueueGetConfigReply,
            P::RoleRequest(_) => Type::RoleRequest,
            P::RoleReply(_) => Type::RoleReply,
            P::GetAsyncRequest => Type::GetAsyncRequest,
            P::GetAsyncReply(_) => Type::GetAsyncReply,
            P::SetAsync(_) => Type::SetAsync,
            P::MeterMod(_) => Type::MeterMod,
        }
    }

    /// Common view of either flow mod shape.
    pub fn as_flow_mod(&self) -> Option<&dyn FlowModView> {
        match self {
            OfPayload::FlowMod(flow_mod) => Some(flow_mod),
            OfPayload::FlowModV10(flow_mod) => Some(flow_mod),
            _ => None,
        }
    }
}
