use super::ports::{Port, PortV10};

/// Asynchronous notice that a port was added, removed or changed.
#[derive(Debug, PartialEq, Clone)]
pub struct PortStatus {
    pub reason: PortReason,
    pub desc: Port,
}

/// 1.0 form of [`PortStatus`], carrying the 48 byte port description.
#[derive(Debug, PartialEq, Clone)]
pub struct PortStatusV10 {
    pub reason: PortReason,
    pub desc: PortV10,
}

#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum PortReason {
    Add = 0,
    Delete = 1,
    /// Config or state of an existing port changed.
    Modify = 2,
}
