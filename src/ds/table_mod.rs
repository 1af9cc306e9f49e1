/// Table id addressing every table in a table mod.
pub const TABLE_ALL: u8 = 0xff;

/// Configure a flow table (OpenFlow 1.1+).
#[derive(Debug, PartialEq, Clone)]
pub struct TableMod {
    pub table_id: u8,
    // pad 3 bytes
    pub config: TableConfig,
}

bitflags! {
    /// Table configuration. OpenFlow 1.3 only keeps the deprecated miss
    /// behaviour bits.
    #[derive(Default)]
    pub struct TableConfig: u32 {
        /// Deprecated bits 0 and 1 of the 1.1 miss configuration.
        const DEPRECATED_MASK = 1 << 0;
    }
}
