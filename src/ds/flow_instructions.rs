use super::actions::Action;

#[derive(Primitive, Debug, PartialEq, Eq, Clone, Copy)]
pub enum InstructionType {
    /// Setup the next table in the lookup pipeline
    GotoTable = 1,
    /// Setup the metadata field for use later in pipeline
    WriteMetadata = 2,
    /// Write the action(s) onto the datapath action set
    WriteActions = 3,
    /// Applies the action(s) immediately
    ApplyActions = 4,
    /// Clears all actions from the datapath
    /// action set
    ClearActions = 5,
    /// Apply meter (rate limiter)
    Meter = 6,
    /// Experimenter instruction
    Experimenter = 0xFFFF,
}

/// Instructions of a 1.3 flow entry.
#[derive(Debug, PartialEq, Clone)]
pub enum Instruction {
    GotoTable(u8),
    WriteMetadata { metadata: u64, metadata_mask: u64 },
    WriteActions(Vec<Action>),
    ApplyActions(Vec<Action>),
    ClearActions,
    Meter(u32),
    Experimenter(ExperimenterInstruction),
}

#[derive(Debug, PartialEq, Clone)]
pub struct ExperimenterInstruction {
    pub experimenter_id: u32,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn instruction_type(&self) -> InstructionType {
        match *self {
            Instruction::GotoTable(_) => InstructionType::GotoTable,
            Instruction::WriteMetadata { .. } => InstructionType::WriteMetadata,
            Instruction::WriteActions(_) => InstructionType::WriteActions,
            Instruction::ApplyActions(_) => InstructionType::ApplyActions,
            Instruction::ClearActions => InstructionType::ClearActions,
            Instruction::Meter(_) => InstructionType::Meter,
            Instruction::Experimenter(_) => InstructionType::Experimenter,
        }
    }
}

/// Instruction listed by type only, as in table features.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InstructionId {
    Standard(InstructionType),
    Experimenter(u32),
}
