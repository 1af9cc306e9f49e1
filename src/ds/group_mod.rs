use super::actions::Action;
use super::ports::PortNumber;

/// Fixed part of a bucket.
pub const BUCKET_LEN: usize = 16;
/// Wildcard for `watch_group`.
pub const WATCH_GROUP_ANY: u32 = 0xffff_ffff;

/// Group setup and teardown (OpenFlow 1.1+).
#[derive(Debug, PartialEq, Clone)]
pub struct GroupMod {
    pub command: GroupModCommand,
    pub ttype: GroupType,
    //pad 1 bytes
    pub group_id: u32,
    pub buckets: Vec<Bucket>,
}

/// Group commands
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum GroupModCommand {
    /// New group.
    Add = 0,
    /// Modify all matching groups.
    Modify = 1,
    /// Delete all matching groups.
    Delete = 2,
}

/// Group types. Values in the range [128, 255] are reserved for experimental
/// use.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum GroupType {
    /// All (multicast/broadcast) group.
    All = 0,
    /// Select group.
    Select = 1,
    /// Indirect group.
    Indirect = 2,
    /// Fast failover group.
    Ff = 3,
}

/// Bucket for use in groups. Its length is computed while encoding.
#[derive(Debug, PartialEq, Clone)]
pub struct Bucket {
    //len 2 bytes
    /// Relative weight of bucket, select groups only.
    pub weight: u16,
    /// Port whose state affects whether this bucket is live.
    pub watch_port: PortNumber,
    pub watch_group: u32,
    //pad 4 bytes
    pub actions: Vec<Action>,
}

bitflags! {
    /// Group types supported by the switch, in group features.
    #[derive(Default)]
    pub struct GroupTypes: u32 {
        const ALL = 1 << 0;
        const SELECT = 1 << 1;
        const INDIRECT = 1 << 2;
        const FF = 1 << 3;
    }
}

bitflags! {
    /// Group configuration flags.
    #[derive(Default)]
    pub struct GroupCapabilities: u32 {
        /// Support weight for select groups.
        const SELECT_WEIGHT = 1 << 0;
        /// Support liveness for select groups.
        const SELECT_LIVENESS = 1 << 1;
        /// Support chaining groups.
        const CHAINING = 1 << 2;
        /// Check chaining for loops and delete.
        const CHAINING_CHECKS = 1 << 3;
    }
}
