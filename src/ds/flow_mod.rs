use super::actions::ActionV10;
use super::flow_instructions::Instruction;
use super::flow_match::{Match, MatchV10};
use super::ports::{PortNumber, PortNumberV10};

/// Buffer id meaning "no buffered packet".
pub const NO_BUFFER: u32 = 0xffff_ffff;
/// Wildcard group for delete commands and flow stats requests.
pub const GROUP_ANY: u32 = 0xffff_ffff;

/// Flow modification, OpenFlow 1.3 shape.
#[derive(Debug, PartialEq, Clone)]
pub struct FlowMod {
    pub cookie: u64,
    pub cookie_mask: u64,
    pub table_id: u8,
    pub command: FlowModCommand,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    pub priority: u16,
    pub buffer_id: u32,
    pub out_port: PortNumber,
    pub out_group: u32,
    pub flags: FlowModFlags,
    //pad 2 bytes
    pub mmatch: Match,
    pub instructions: Vec<Instruction>,
}

/// Flow modification, OpenFlow 1.0 shape. There is no cookie mask, no
/// table id and no out group, the match comes first and actions replace
/// instructions.
#[derive(Debug, PartialEq, Clone)]
pub struct FlowModV10 {
    pub mmatch: MatchV10,
    pub cookie: u64,
    pub command: FlowModCommand,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    pub priority: u16,
    pub buffer_id: u32,
    pub out_port: PortNumberV10,
    pub flags: FlowModFlags,
    pub actions: Vec<ActionV10>,
}

/// Fields both flow mod shapes share.
pub trait FlowModView {
    fn cookie(&self) -> u64;
    fn command(&self) -> FlowModCommand;
    fn idle_timeout(&self) -> u16;
    fn hard_timeout(&self) -> u16;
    fn priority(&self) -> u16;
    fn buffer_id(&self) -> u32;
    fn flags(&self) -> FlowModFlags;
}

macro_rules! impl_flow_mod_view {
    ($t:ty) => {
        impl FlowModView for $t {
            fn cookie(&self) -> u64 {
                self.cookie
            }
            fn command(&self) -> FlowModCommand {
                self.command
            }
            fn idle_timeout(&self) -> u16 {
                self.idle_timeout
            }
            fn hard_timeout(&self) -> u16 {
                self.hard_timeout
            }
            fn priority(&self) -> u16 {
                self.priority
            }
            fn buffer_id(&self) -> u32 {
                self.buffer_id
            }
            fn flags(&self) -> FlowModFlags {
                self.flags
            }
        }
    };
}

impl_flow_mod_view!(FlowMod);
impl_flow_mod_view!(FlowModV10);

#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum FlowModCommand {
    ///  New flow.
    Add = 0,
    /// Modify all matching flows.
    Modify = 1,
    ///  Modify entry strictly matching wildcards and
    /// priority.
    ModifyStrict = 2,
    /// Delete all matching flows.
    Delete = 3,
    /// Delete entry strictly matching wildcards and
    /// priority.
    DeleteStrict = 4,
}

bitflags! {
    #[derive(Default)]
    pub struct FlowModFlags: u16 {
        /// Send flow removed message when flow
        /// expires or is deleted.
        const SEND_FLOW_REM = 1 << 0;
        /// Check for overlapping entries first.
        const CHECK_OVERLAP = 1 << 1;
        /// Reset flow packet and byte counts (1.3).
        const RESET_COUNTS = 1 << 2;
        /// Don't keep track of packet count (1.3).
        const NO_PKT_COUNTS = 1 << 3;
        /// Don't keep track of byte count (1.3).
        const NO_BYT_COUNTS = 1 << 4;
        /// Remark this is for emergency (1.0).
        const EMERG = 1 << 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::ports::PortNoV10;

    #[test]
    fn view_reads_either_shape() {
        let v10 = FlowModV10 {
            mmatch: MatchV10::any(),
            cookie: 7,
            command: FlowModCommand::Delete,
            idle_timeout: 1,
            hard_timeout: 2,
            priority: 3,
            buffer_id: NO_BUFFER,
            out_port: PortNumberV10::Reserved(PortNoV10::NoPort),
            flags: FlowModFlags::EMERG,
            actions: vec![],
        };
        let view: &dyn FlowModView = &v10;
        assert_eq!(view.cookie(), 7);
        assert_eq!(view.command(), FlowModCommand::Delete);
        assert_eq!(view.flags(), FlowModFlags::EMERG);
    }
}
