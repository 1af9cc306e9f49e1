use super::actions::ActionId;
use super::flow_instructions::InstructionId;
use super::flow_match::OxmId;
use super::table_mod::TableConfig;

/// Fixed part of `ofp_table_features`.
pub const TABLE_FEATURES_LENGTH: usize = 64;
/// Type and length of every property.
pub const TABLE_FEATURE_PROP_HEADER_LENGTH: usize = 4;

/// Body of a table features multipart element.
#[derive(Debug, PartialEq, Clone)]
pub struct TableFeatures {
    //length 2 bytes
    pub table_id: u8,
    //pad 5 bytes
    pub name: String,
    /// Bits of metadata the table can match.
    pub metadata_match: u64,
    /// Bits of metadata the table can write.
    pub metadata_write: u64,
    pub config: TableConfig,
    /// Max number of entries supported.
    pub max_entries: u32,
    pub properties: Vec<TableFeatureProperty>,
}

/// Table feature property types.
#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum TableFeaturePropType {
    Instructions = 0,
    InstructionsMiss = 1,
    NextTables = 2,
    NextTablesMiss = 3,
    WriteActions = 4,
    WriteActionsMiss = 5,
    ApplyActions = 6,
    ApplyActionsMiss = 7,
    Match = 8,
    Wildcards = 10,
    WriteSetfield = 12,
    WriteSetfieldMiss = 13,
    ApplySetfield = 14,
    ApplySetfieldMiss = 15,
    Experimenter = 0xFFFE,
    ExperimenterMiss = 0xFFFF,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TableFeatureProperty {
    Instructions(Vec<InstructionId>),
    InstructionsMiss(Vec<InstructionId>),
    NextTables(Vec<u8>),
    NextTablesMiss(Vec<u8>),
    WriteActions(Vec<ActionId>),
    WriteActionsMiss(Vec<ActionId>),
    ApplyActions(Vec<ActionId>),
    ApplyActionsMiss(Vec<ActionId>),
    Match(Vec<OxmId>),
    Wildcards(Vec<OxmId>),
    WriteSetfield(Vec<OxmId>),
    WriteSetfieldMiss(Vec<OxmId>),
    ApplySetfield(Vec<OxmId>),
    ApplySetfieldMiss(Vec<OxmId>),
    Experimenter(ExperimenterProperty),
    ExperimenterMiss(ExperimenterProperty),
}

/// Experimenter property, `data` is written by the plugin registered for
/// `experimenter_id`.
#[derive(Debug, PartialEq, Clone)]
pub struct ExperimenterProperty {
    pub experimenter_id: u32,
    pub exp_type: u32,
    pub data: Vec<u8>,
}

impl TableFeatureProperty {
    pub fn prop_type(&self) -> TableFeaturePropType {
        use self::TableFeaturePropType as T;
        use self::TableFeatureProperty as P;
        match *self {
            P::Instructions(_) => T::Instructions,
            P::InstructionsMiss(_) => T::InstructionsMiss,
            P::NextTables(_) => T::NextTables,
            P::NextTablesMiss(_) => T::NextTablesMiss,
            P::WriteActions(_) => T::WriteActions,
            P::WriteActionsMiss(_) => T::WriteActionsMiss,
            P::ApplyActions(_) => T::ApplyActions,
            P::ApplyActionsMiss(_) => T::ApplyActionsMiss,
            P::Match(_) => T::Match,
            P::Wildcards(_) => T::Wildcards,
            P::WriteSetfield(_) => T::WriteSetfield,
            P::WriteSetfieldMiss(_) => T::WriteSetfieldMiss,
            P::ApplySetfield(_) => T::ApplySetfield,
            P::ApplySetfieldMiss(_) => T::ApplySetfieldMiss,
            P::Experimenter(_) => T::Experimenter,
            P::ExperimenterMiss(_) => T::ExperimenterMiss,
        }
    }
}
