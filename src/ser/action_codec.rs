//! Actions (1.3 and 1.0), instructions, meter bands and queue properties.
//!
//! All of them share one envelope: a 16 bit type, a 16 bit self-inclusive
//! length and a body padded to a multiple of 8. Experimenter variants write
//! their experimenter id and leave the rest to the plugin registered under
//! the matching `ExperimenterKey`.

use byteorder::{BigEndian, WriteBytesExt};
use num_traits::FromPrimitive;
use std::iter::once;
use std::sync::Arc;

use crate::buf::{LengthMark, WireBuf};
use crate::ds::actions::*;
use crate::ds::flow_instructions::*;
use crate::ds::flow_match::MatchField;
use crate::ds::meter_mod::{MeterBand, MeterBandType};
use crate::ds::packet_queue::{QueueProperty, QueuePropertyType};
use crate::err::*;
use crate::header::Version;
use crate::list::serialize_list;
use crate::registry::*;
use crate::ser::match_codec::entry_key;
use crate::ser::write_experimenter_body;

pub fn action_key(version: Version) -> impl Fn(&Action) -> SerializerKey {
    move |action| CodecKey::new(version, CodecKind::Action, action.action_type() as u32).into()
}

pub fn action_v10_key(action: &ActionV10) -> SerializerKey {
    CodecKey::new(Version::V1_0, CodecKind::Action, action.action_type() as u32).into()
}

pub fn instruction_key(version: Version) -> impl Fn(&Instruction) -> SerializerKey {
    move |instruction| {
        CodecKey::new(
            version,
            CodecKind::Instruction,
            instruction.instruction_type() as u32,
        )
        .into()
    }
}

pub fn meter_band_key(version: Version) -> impl Fn(&MeterBand) -> SerializerKey {
    move |band| CodecKey::new(version, CodecKind::MeterBand, band.band_type() as u32).into()
}

pub fn queue_property_key(version: Version) -> impl Fn(&QueueProperty) -> SerializerKey {
    move |property| {
        CodecKey::new(
            version,
            CodecKind::QueueProperty,
            property.property_type() as u32,
        )
        .into()
    }
}

pub fn write_actions(
    actions: &[Action],
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    serialize_list(actions, action_key(version), registry, out)
}

pub fn write_actions_v10(
    actions: &[ActionV10],
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    serialize_list(actions, action_v10_key, registry, out)
}

pub fn write_instructions(
    instructions: &[Instruction],
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    serialize_list(instructions, instruction_key(version), registry, out)
}

pub fn write_meter_bands(
    bands: &[MeterBand],
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    serialize_list(bands, meter_band_key(version), registry, out)
}

pub fn write_queue_properties(
    properties: &[QueueProperty],
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    serialize_list(properties, queue_property_key(version), registry, out)
}

/// Type and length placeholder of an element starting at the current
/// position.
fn open_element(ttype: u16, out: &mut Vec<u8>) -> Result<LengthMark> {
    let start = out.position();
    out.write_u16::<BigEndian>(ttype)?;
    Ok(out.reserve_length(start))
}

/// Pads the element to 8 bytes and patches its length, padding included.
fn close_element(mark: LengthMark, out: &mut Vec<u8>) -> Result<()> {
    out.pad_to_multiple(mark.start(), 8);
    out.patch_length(mark)?;
    Ok(())
}

pub struct ActionSerializer {
    pub version: Version,
}

impl OfSerializer<Action> for ActionSerializer {
    fn serialize(&self, action: &Action, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let mark = open_element(action.action_type() as u16, out)?;
        match action {
            Action::Output { port, max_len } => {
                out.write_u32::<BigEndian>(port.wire())?;
                out.write_u16::<BigEndian>(*max_len)?;
                out.write_zeros(6);
            }
            Action::CopyTtlOut
            | Action::CopyTtlIn
            | Action::DecMplsTtl
            | Action::PopVlan
            | Action::DecNwTtl
            | Action::PopPbb => out.write_zeros(4),
            Action::SetMplsTtl(ttl) | Action::SetNwTtl(ttl) => {
                out.write_u8(*ttl)?;
                out.write_zeros(3);
            }
            Action::PushVlan(ethertype)
            | Action::PushMpls(ethertype)
            | Action::PopMpls(ethertype)
            | Action::PushPbb(ethertype) => {
                out.write_u16::<BigEndian>(*ethertype)?;
                out.write_zeros(2);
            }
            Action::SetQueue(id) | Action::Group(id) => out.write_u32::<BigEndian>(*id)?,
            Action::SetField(field) => {
                registry
                    .lookup::<MatchField>(entry_key(self.version)(field))?
                    .serialize(field, out, registry)?;
            }
            Action::Experimenter(experimenter) => {
                out.write_u32::<BigEndian>(experimenter.experimenter_id)?;
                let key = ExperimenterKey::new(
                    self.version,
                    ExperimenterSpace::Action,
                    experimenter.experimenter_id,
                    None,
                );
                write_experimenter_body(experimenter, key, registry, out)?;
            }
        }
        close_element(mark, out)
    }
}

pub struct ActionV10Serializer;

impl OfSerializer<ActionV10> for ActionV10Serializer {
    fn serialize(
        &self,
        action: &ActionV10,
        out: &mut Vec<u8>,
        registry: &SerializerRegistry,
    ) -> Result<()> {
        let mark = open_element(action.action_type() as u16, out)?;
        match action {
            ActionV10::Output { port, max_len } => {
                out.write_u16::<BigEndian>(port.wire())?;
                out.write_u16::<BigEndian>(*max_len)?;
            }
            ActionV10::SetVlanVid(value) | ActionV10::SetTpSrc(value) | ActionV10::SetTpDst(value) => {
                out.write_u16::<BigEndian>(*value)?;
                out.write_zeros(2);
            }
            ActionV10::SetVlanPcp(value) | ActionV10::SetNwTos(value) => {
                out.write_u8(*value)?;
                out.write_zeros(3);
            }
            ActionV10::StripVlan => out.write_zeros(4),
            ActionV10::SetDlSrc(addr) | ActionV10::SetDlDst(addr) => {
                out.extend_from_slice(addr);
                out.write_zeros(6);
            }
            ActionV10::SetNwSrc(addr) | ActionV10::SetNwDst(addr) => {
                out.write_u32::<BigEndian>(u32::from(*addr))?
            }
            ActionV10::Enqueue { port, queue_id } => {
                out.write_u16::<BigEndian>(port.wire())?;
                out.write_zeros(6);
                out.write_u32::<BigEndian>(*queue_id)?;
            }
            ActionV10::Vendor(vendor) => {
                out.write_u32::<BigEndian>(vendor.experimenter_id)?;
                let key = ExperimenterKey::new(
                    Version::V1_0,
                    ExperimenterSpace::Action,
                    vendor.experimenter_id,
                    None,
                );
                write_experimenter_body(vendor, key, registry, out)?;
            }
        }
        close_element(mark, out)
    }
}

pub struct InstructionSerializer {
    pub version: Version,
}

impl OfSerializer<Instruction> for InstructionSerializer {
    fn serialize(
        &self,
        instruction: &Instruction,
        out: &mut Vec<u8>,
        registry: &SerializerRegistry,
    ) -> Result<()> {
        let mark = open_element(instruction.instruction_type() as u16, out)?;
        match instruction {
            Instruction::GotoTable(table_id) => {
                out.write_u8(*table_id)?;
                out.write_zeros(3);
            }
            Instruction::WriteMetadata {
                metadata,
                metadata_mask,
            } => {
                out.write_zeros(4);
                out.write_u64::<BigEndian>(*metadata)?;
                out.write_u64::<BigEndian>(*metadata_mask)?;
            }
            Instruction::WriteActions(actions) | Instruction::ApplyActions(actions) => {
                out.write_zeros(4);
                write_actions(actions, self.version, registry, out)?;
            }
            Instruction::ClearActions => out.write_zeros(4),
            Instruction::Meter(meter_id) => out.write_u32::<BigEndian>(*meter_id)?,
            Instruction::Experimenter(experimenter) => {
                out.write_u32::<BigEndian>(experimenter.experimenter_id)?;
                let key = ExperimenterKey::new(
                    self.version,
                    ExperimenterSpace::Instruction,
                    experimenter.experimenter_id,
                    None,
                );
                write_experimenter_body(experimenter, key, registry, out)?;
            }
        }
        close_element(mark, out)
    }
}

pub struct MeterBandSerializer {
    pub version: Version,
}

impl OfSerializer<MeterBand> for MeterBandSerializer {
    fn serialize(&self, band: &MeterBand, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let mark = open_element(band.band_type() as u16, out)?;
        match band {
            MeterBand::Drop { rate, burst_size } => {
                out.write_u32::<BigEndian>(*rate)?;
                out.write_u32::<BigEndian>(*burst_size)?;
                out.write_zeros(4);
            }
            MeterBand::DscpRemark {
                rate,
                burst_size,
                prec_level,
            } => {
                out.write_u32::<BigEndian>(*rate)?;
                out.write_u32::<BigEndian>(*burst_size)?;
                out.write_u8(*prec_level)?;
                out.write_zeros(3);
            }
            MeterBand::Experimenter {
                rate,
                burst_size,
                experimenter_id,
                ..
            } => {
                out.write_u32::<BigEndian>(*rate)?;
                out.write_u32::<BigEndian>(*burst_size)?;
                out.write_u32::<BigEndian>(*experimenter_id)?;
                let key = ExperimenterKey::new(
                    self.version,
                    ExperimenterSpace::MeterBand,
                    *experimenter_id,
                    None,
                );
                write_experimenter_body(band, key, registry, out)?;
            }
        }
        close_element(mark, out)
    }
}

/// `ofp_queue_prop_*`. OpenFlow 1.0 knows only the minimum rate.
pub struct QueuePropertySerializer {
    pub version: Version,
}

impl OfSerializer<QueueProperty> for QueuePropertySerializer {
    fn serialize(
        &self,
        property: &QueueProperty,
        out: &mut Vec<u8>,
        registry: &SerializerRegistry,
    ) -> Result<()> {
        if self.version < Version::V1_2 && property.property_type() != QueuePropertyType::MinRate {
            warn!(
                "Queue property {:?} requires {:?}, got {:?}",
                property.property_type(),
                Version::V1_2,
                self.version
            );
            bail!(ErrorKind::VersionMismatch(
                self.version,
                Version::V1_2,
                stringify!(QueueProperty)
            ));
        }
        let mark = open_element(property.property_type() as u16, out)?;
        out.write_zeros(4);
        match property {
            QueueProperty::MinRate(rate) | QueueProperty::MaxRate(rate) => {
                out.write_u16::<BigEndian>(*rate)?;
                out.write_zeros(6);
            }
            QueueProperty::Experimenter {
                experimenter_id, ..
            } => {
                out.write_u32::<BigEndian>(*experimenter_id)?;
                out.write_zeros(4);
                let key = ExperimenterKey::new(
                    self.version,
                    ExperimenterSpace::QueueProperty,
                    *experimenter_id,
                    None,
                );
                write_experimenter_body(property, key, registry, out)?;
            }
        }
        close_element(mark, out)
    }
}

/// Wire codes `0..=last` that exist, plus the experimenter code.
pub(crate) fn codes<T: FromPrimitive>(last: u16) -> impl Iterator<Item = u32> {
    (0..=last)
        .chain(once(0xffff))
        .filter(|code| T::from_u16(*code).is_some())
        .map(u32::from)
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    let mut builder = builder;
    let v13 = Version::V1_3;

    let actions: Arc<dyn OfSerializer<Action>> = Arc::new(ActionSerializer { version: v13 });
    for code in codes::<ActionType>(ActionType::PopPbb as u16) {
        builder = builder.register_shared(CodecKey::new(v13, CodecKind::Action, code), actions.clone());
    }

    let actions_v10: Arc<dyn OfSerializer<ActionV10>> = Arc::new(ActionV10Serializer);
    for code in codes::<ActionTypeV10>(ActionTypeV10::Enqueue as u16) {
        builder = builder.register_shared(
            CodecKey::new(Version::V1_0, CodecKind::Action, code),
            actions_v10.clone(),
        );
    }

    let instructions: Arc<dyn OfSerializer<Instruction>> =
        Arc::new(InstructionSerializer { version: v13 });
    for code in codes::<InstructionType>(InstructionType::Meter as u16) {
        builder = builder.register_shared(
            CodecKey::new(v13, CodecKind::Instruction, code),
            instructions.clone(),
        );
    }

    let bands: Arc<dyn OfSerializer<MeterBand>> = Arc::new(MeterBandSerializer { version: v13 });
    for code in codes::<MeterBandType>(MeterBandType::DscpRemark as u16) {
        builder = builder.register_shared(CodecKey::new(v13, CodecKind::MeterBand, code), bands.clone());
    }

    for version in [Version::V1_0, v13] {
        let properties: Arc<dyn OfSerializer<QueueProperty>> =
            Arc::new(QueuePropertySerializer { version });
        for code in codes::<QueuePropertyType>(QueuePropertyType::MaxRate as u16) {
            builder = builder.register_shared(
                CodecKey::new(version, CodecKind::QueueProperty, code),
                properties.clone(),
            );
        }
    }
    builder
}
