use num_traits::FromPrimitive;
use std::convert::TryFrom;

use super::hw_addr::EthernetAddress;
use crate::err::*;

/// OpenFlow 1.1+ port number: a physical port or one of the reserved ports.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PortNumber {
    Reserved(PortNo),
    NormalPort(u32),
}

impl PortNumber {
    pub fn wire(&self) -> u32 {
        match *self {
            PortNumber::Reserved(port_no) => port_no as u32,
            PortNumber::NormalPort(port_no) => port_no,
        }
    }
}

impl TryFrom<u32> for PortNumber {
    type Error = Error;
    fn try_from(port_no: u32) -> Result<Self> {
        if port_no == 0 {
            bail!(ErrorKind::IllegalValue(0, stringify!(PortNumber)));
        }
        Ok(match PortNo::from_u32(port_no) {
            Some(port) => PortNumber::Reserved(port),
            None => PortNumber::NormalPort(port_no),
        })
    }
}

/// Port numbering. Ports are numbered starting from 1.
#[repr(u32)]
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum PortNo {
    /* Maximum number of physical and logical switch ports. */
    Max = 0xffffff00u32,
    /* Reserved OpenFlow Port (fake output "ports"). */
    /// Send the packet out the input port. This
    /// reserved port must be explicitly used
    /// in order to send back out of the input
    /// port.
    InPort = 0xfffffff8u32,
    /// Submit the packet to the first flow table
    /// NB: This destination port can only be
    /// used in packet-out messages.
    Table = 0xfffffff9u32,
    /// Process with normal L2/L3 switching.
    Normal = 0xfffffffau32,
    /// All physical ports in VLAN, except input
    /// port and those blocked or link down.
    Flood = 0xfffffffbu32,
    /// All physical ports except input port.
    All = 0xfffffffcu32,
    /// Send to controller.
    Controller = 0xfffffffdu32,
    /// Local openflow "port".
    Local = 0xfffffffeu32,
    /// Wildcard port used only for flow mod
    /// (delete) and flow stats requests. Selects
    /// all flows regardless of output port
    /// (including flows with no output port).
    Any = 0xffffffffu32,
}

/// OpenFlow 1.0 port number, 16 bits wide on the wire.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PortNumberV10 {
    Reserved(PortNoV10),
    NormalPort(u16),
}

impl PortNumberV10 {
    pub fn wire(&self) -> u16 {
        match *self {
            PortNumberV10::Reserved(port_no) => port_no as u16,
            PortNumberV10::NormalPort(port_no) => port_no,
        }
    }
}

impl TryFrom<u16> for PortNumberV10 {
    type Error = Error;
    fn try_from(port_no: u16) -> Result<Self> {
        if port_no == 0 {
            bail!(ErrorKind::IllegalValue(0, stringify!(PortNumberV10)));
        }
        Ok(match PortNoV10::from_u16(port_no) {
            Some(port) => PortNumberV10::Reserved(port),
            None => PortNumberV10::NormalPort(port_no),
        })
    }
}

/// Reserved OpenFlow 1.0 ports.
#[repr(u16)]
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum PortNoV10 {
    Max = 0xff00,
    InPort = 0xfff8,
    Table = 0xfff9,
    Normal = 0xfffa,
    Flood = 0xfffb,
    All = 0xfffc,
    Controller = 0xfffd,
    Local = 0xfffe,
    /// OFPP_NONE, not associated with a physical port.
    NoPort = 0xffff,
}

bitflags! {
    /// Behaviour of a physical port. Bit positions on the wire differ per
    /// version, see `bits::tables`.
    #[derive(Default)]
    pub struct PortConfig: u32 {
        /// Port is administratively down.
        const PORT_DOWN = 1 << 0;
        /// Disable 802.1D spanning tree (1.0 only).
        const NO_STP = 1 << 1;
        /// Drop all packets received by port.
        const NO_RECV = 1 << 2;
        /// Drop received 802.1D STP packets (1.0 only).
        const NO_RECV_STP = 1 << 3;
        /// Do not include this port when flooding (1.0 only).
        const NO_FLOOD = 1 << 4;
        /// Drop packets forwarded to port.
        const NO_FWD = 1 << 5;
        /// Do not send packet-in msgs for port.
        const NO_PACKET_IN = 1 << 6;
    }
}

bitflags! {
    /// Current state of a physical port.
    #[derive(Default)]
    pub struct PortState: u32 {
        /// No physical link present.
        const LINK_DOWN = 1 << 0;
        /// Port is blocked (1.3).
        const BLOCKED = 1 << 1;
        /// Live for Fast Failover Group (1.3).
        const LIVE = 1 << 2;
    }
}

/// OpenFlow 1.0 spanning tree state, bits 8-9 of the port state.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum StpState {
    Listen = 0,
    Learn = 1,
    Forward = 2,
    Block = 3,
}

impl Default for StpState {
    fn default() -> Self {
        StpState::Listen
    }
}

/// Shift of the STP state inside the OpenFlow 1.0 port state.
pub const STP_STATE_SHIFT: u32 = 8;

bitflags! {
    /// Features of ports available in a datapath.
    #[derive(Default)]
    pub struct PortFeatures: u32 {
        const RATE_10MB_HD = 1 << 0;
        const RATE_10MB_FD = 1 << 1;
        const RATE_100MB_HD = 1 << 2;
        const RATE_100MB_FD = 1 << 3;
        const RATE_1GB_HD = 1 << 4;
        const RATE_1GB_FD = 1 << 5;
        const RATE_10GB_FD = 1 << 6;
        /// 1.3 only, as are the two below.
        const RATE_40GB_FD = 1 << 7;
        const RATE_100GB_FD = 1 << 8;
        const RATE_1TB_FD = 1 << 9;
        /// Other rate, not in the list.
        const OTHER = 1 << 10;
        const COPPER = 1 << 11;
        const FIBER = 1 << 12;
        const AUTONEG = 1 << 13;
        const PAUSE = 1 << 14;
        const PAUSE_ASYM = 1 << 15;
    }
}

/// Description of a port (`ofp_port`, 64 bytes).
#[derive(Debug, PartialEq, Clone)]
pub struct Port {
    pub port_no: PortNumber,
    //pad 4 bytes
    pub hw_addr: EthernetAddress,
    //pad 2 bytes
    pub name: String,
    pub config: PortConfig,
    pub state: PortState,
    pub curr: PortFeatures,
    pub advertised: PortFeatures,
    pub supported: PortFeatures,
    pub peer: PortFeatures,
    /// Current port bitrate in kbps.
    pub curr_speed: u32,
    /// Max port bitrate in kbps.
    pub max_speed: u32,
}

/// OpenFlow 1.0 physical port (`ofp_phy_port`, 48 bytes).
#[derive(Debug, PartialEq, Clone)]
pub struct PortV10 {
    pub port_no: PortNumberV10,
    pub hw_addr: EthernetAddress,
    pub name: String,
    pub config: PortConfig,
    pub state: PortState,
    pub stp_state: StpState,
    pub curr: PortFeatures,
    pub advertised: PortFeatures,
    pub supported: PortFeatures,
    pub peer: PortFeatures,
}

pub const PORT_LEN: usize = 64;
pub const PORT_V10_LEN: usize = 48;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_ports_are_recognized() {
        assert_eq!(
            PortNumber::try_from(0xfffffffd).unwrap(),
            PortNumber::Reserved(PortNo::Controller)
        );
        assert_eq!(PortNumber::try_from(7).unwrap(), PortNumber::NormalPort(7));
        assert!(PortNumber::try_from(0).is_err());
        assert_eq!(PortNumber::Reserved(PortNo::Any).wire(), 0xffffffff);
    }

    #[test]
    fn v10_ports_are_16_bit() {
        assert_eq!(PortNumberV10::Reserved(PortNoV10::Flood).wire(), 0xfffb);
        assert_eq!(
            PortNumberV10::try_from(0xffff).unwrap(),
            PortNumberV10::Reserved(PortNoV10::NoPort)
        );
    }
}
