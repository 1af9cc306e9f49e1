use super::hw_addr::EthernetAddress;
use super::ports::{PortConfig, PortFeatures, PortNumber, PortNumberV10};

/// Modify the behavior of a port (OpenFlow 1.3).
#[derive(Debug, PartialEq, Clone)]
pub struct PortMod {
    pub port_no: PortNumber,
    // pad 4 bytes
    pub hw_addr: EthernetAddress,
    //pad 2 bytes,
    pub config: PortConfig,
    /// Bits of config to change.
    pub mask: PortConfig,
    /// Features to advertise, empty to leave unchanged.
    pub advertise: PortFeatures,
    //pad 4 bytes
}

#[derive(Debug, PartialEq, Clone)]
pub struct PortModV10 {
    pub port_no: PortNumberV10,
    pub hw_addr: EthernetAddress,
    pub config: PortConfig,
    pub mask: PortConfig,
    pub advertise: PortFeatures,
    //pad 4 bytes
}
