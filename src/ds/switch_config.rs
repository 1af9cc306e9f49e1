/// Switch configuration, the body of get-config reply and set-config.
#[derive(Debug, PartialEq, Clone)]
pub struct SwitchConfig {
    pub flags: FragHandling,
    /// Max bytes of a new flow the datapath sends to the controller.
    pub miss_send_len: u16,
    // no padding, since there are no data after this
}

/// Handling of IP fragments.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum FragHandling {
    /// No special handling for fragments.
    Normal = 0,
    /// Drop fragments.
    Drop = 1,
    /// Reassemble (only if OFPC_IP_REASM set).
    Reasm = 2,
}

/// Mask of the fragment handling bits in the flags field.
pub const FRAG_MASK: u16 = 3;
/// Default `miss_send_len`.
pub const DEFAULT_MISS_SEND_LEN: u16 = 128;
