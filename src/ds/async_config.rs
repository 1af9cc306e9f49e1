bitflags! {
    /// Packet-in reasons a controller wants to receive.
    #[derive(Default)]
    pub struct PacketInReasons: u32 {
        const NO_MATCH = 1 << 0;
        const ACTION = 1 << 1;
        const INVALID_TTL = 1 << 2;
    }
}

bitflags! {
    /// Port-status reasons a controller wants to receive.
    #[derive(Default)]
    pub struct PortReasons: u32 {
        const ADD = 1 << 0;
        const DELETE = 1 << 1;
        const MODIFY = 1 << 2;
    }
}

bitflags! {
    /// Flow-removed reasons a controller wants to receive.
    #[derive(Default)]
    pub struct FlowRemovedReasons: u32 {
        const IDLE_TIMEOUT = 1 << 0;
        const HARD_TIMEOUT = 1 << 1;
        const DELETE = 1 << 2;
        const GROUP_DELETE = 1 << 3;
    }
}

/// Asynchronous message filter, the body of get-async reply and set-async.
/// Index 0 applies in master or equal role, index 1 in slave role.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct AsyncConfig {
    pub packet_in_mask: [PacketInReasons; 2],
    pub port_status_mask: [PortReasons; 2],
    pub flow_removed_mask: [FlowRemovedReasons; 2],
}
