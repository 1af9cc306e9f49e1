//! Table features bodies and their property list.
//!
//! Every property is type, length, payload and zero padding to 8 bytes.
//! The length covers type, length and payload but not the padding. Id lists
//! (instructions, actions, OXM fields) are written with header serializers
//! only.

use byteorder::{BigEndian, WriteBytesExt};

use crate::bits::{pack, tables};
use crate::buf::{WireBuf, TABLE_NAME_LEN};
use crate::ds::actions::{
    ActionId, ActionType, ACTION_EXPERIMENTER, ACTION_EXPERIMENTER_HEADER_LEN, ACTION_HEADER_LEN,
};
use crate::ds::flow_instructions::{InstructionId, InstructionType};
use crate::ds::table_features::{TableFeatureProperty, TableFeatures};
use crate::err::*;
use crate::header::Version;
use crate::list::serialize_header_list;
use crate::registry::*;
use crate::ser::action_codec::codes;
use crate::ser::match_codec::oxm_id_key;
use crate::ser::write_experimenter_body;

pub fn action_id_key(version: Version) -> impl Fn(&ActionId) -> SerializerKey {
    move |id| {
        let code = match *id {
            ActionId::Standard(ttype) => ttype as u32,
            ActionId::Experimenter(_) => ActionType::Experimenter as u32,
        };
        CodecKey::new(version, CodecKind::Action, code).into()
    }
}

pub fn instruction_id_key(version: Version) -> impl Fn(&InstructionId) -> SerializerKey {
    move |id| {
        let code = match *id {
            InstructionId::Standard(ttype) => ttype as u32,
            InstructionId::Experimenter(_) => InstructionType::Experimenter as u32,
        };
        CodecKey::new(version, CodecKind::Instruction, code).into()
    }
}

pub fn write_table_features(
    features: &TableFeatures,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    let start = out.position();
    let mark = out.reserve_length(start);
    out.write_u8(features.table_id)?;
    out.write_zeros(5);
    out.write_fixed_str(&features.name, TABLE_NAME_LEN)?;
    out.write_u64::<BigEndian>(features.metadata_match)?;
    out.write_u64::<BigEndian>(features.metadata_write)?;
    out.write_u32::<BigEndian>(pack(tables::TABLE_CONFIG, features.config))?;
    out.write_u32::<BigEndian>(features.max_entries)?;
    for property in &features.properties {
        write_property(property, version, registry, out)?;
    }
    out.patch_length(mark)?;
    Ok(())
}

pub fn write_property(
    property: &TableFeatureProperty,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    use crate::ds::table_features::TableFeatureProperty as P;

    let start = out.position();
    out.write_u16::<BigEndian>(property.prop_type() as u16)?;
    let mark = out.reserve_length(start);
    match property {
        P::Instructions(ids) | P::InstructionsMiss(ids) => {
            serialize_header_list(ids, instruction_id_key(version), registry, out)?
        }
        P::NextTables(table_ids) | P::NextTablesMiss(table_ids) => out.extend_from_slice(table_ids),
        P::WriteActions(ids)
        | P::WriteActionsMiss(ids)
        | P::ApplyActions(ids)
        | P::ApplyActionsMiss(ids) => serialize_header_list(ids, action_id_key(version), registry, out)?,
        P::Match(ids)
        | P::Wildcards(ids)
        | P::WriteSetfield(ids)
        | P::WriteSetfieldMiss(ids)
        | P::ApplySetfield(ids)
        | P::ApplySetfieldMiss(ids) => serialize_header_list(ids, oxm_id_key(version), registry, out)?,
        P::Experimenter(experimenter) | P::ExperimenterMiss(experimenter) => {
            out.write_u32::<BigEndian>(experimenter.experimenter_id)?;
            out.write_u32::<BigEndian>(experimenter.exp_type)?;
            let key = ExperimenterKey::new(
                version,
                ExperimenterSpace::TableFeatureProperty,
                experimenter.experimenter_id,
                None,
            );
            write_experimenter_body(experimenter, key, registry, out)?;
        }
    }
    out.patch_length(mark)?;
    out.pad_to_multiple(start, 8);
    Ok(())
}

/// Action id: type and length only, experimenter ids add the experimenter.
pub struct ActionIdSerializer;

impl HeaderSerializer<ActionId> for ActionIdSerializer {
    fn serialize_header(&self, id: &ActionId, out: &mut Vec<u8>) -> Result<()> {
        match *id {
            ActionId::Standard(ttype) => {
                out.write_u16::<BigEndian>(ttype as u16)?;
                out.write_u16::<BigEndian>(ACTION_HEADER_LEN)?;
            }
            ActionId::Experimenter(experimenter_id) => {
                out.write_u16::<BigEndian>(ACTION_EXPERIMENTER)?;
                out.write_u16::<BigEndian>(ACTION_EXPERIMENTER_HEADER_LEN)?;
                out.write_u32::<BigEndian>(experimenter_id)?;
            }
        }
        Ok(())
    }
}

pub struct InstructionIdSerializer;

impl HeaderSerializer<InstructionId> for InstructionIdSerializer {
    fn serialize_header(&self, id: &InstructionId, out: &mut Vec<u8>) -> Result<()> {
        match *id {
            InstructionId::Standard(ttype) => {
                out.write_u16::<BigEndian>(ttype as u16)?;
                out.write_u16::<BigEndian>(4)?;
            }
            InstructionId::Experimenter(experimenter_id) => {
                out.write_u16::<BigEndian>(InstructionType::Experimenter as u16)?;
                out.write_u16::<BigEndian>(8)?;
                out.write_u32::<BigEndian>(experimenter_id)?;
            }
        }
        Ok(())
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    let mut builder = builder;
    let v13 = Version::V1_3;
    for code in codes::<ActionType>(ActionType::PopPbb as u16) {
        builder = builder.register_header::<ActionId, _>(
            CodecKey::new(v13, CodecKind::Action, code),
            ActionIdSerializer,
        );
    }
    for code in codes::<InstructionType>(InstructionType::Meter as u16) {
        builder = builder.register_header::<InstructionId, _>(
            CodecKey::new(v13, CodecKind::Instruction, code),
            InstructionIdSerializer,
        );
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::flow_match::{OfbMatchFields, OxmId};
    use crate::ds::table_features::*;
    use crate::ds::table_mod::TableConfig;
    use crate::ser::{default_registry, registry_builder, OpaqueExperimenterSerializer};

    fn features(properties: Vec<TableFeatureProperty>) -> TableFeatures {
        TableFeatures {
            table_id: 0,
            name: "classifier".to_string(),
            metadata_match: u64::MAX,
            metadata_write: u64::MAX,
            config: TableConfig::empty(),
            max_entries: 1000,
            properties,
        }
    }

    #[test]
    fn next_tables_padding_is_not_counted() {
        let mut out = Vec::new();
        let property = TableFeatureProperty::NextTables((1..=9).collect());
        write_property(&property, Version::V1_3, &default_registry(), &mut out).unwrap();
        assert_eq!(out.len(), 16);
        assert_eq!(&out[..TABLE_FEATURE_PROP_HEADER_LENGTH], &[0, 2, 0, 13]);
        assert_eq!(&out[13..], &[0, 0, 0]);
    }

    #[test]
    fn id_lists_are_headers_only() {
        let mut out = Vec::new();
        let registry = default_registry();
        let actions = TableFeatureProperty::ApplyActions(vec![
            ActionId::Standard(ActionType::Output),
            ActionId::Experimenter(0x2320),
        ]);
        write_property(&actions, Version::V1_3, &registry, &mut out).unwrap();
        assert_eq!(
            out,
            vec![0, 6, 0, 16, 0, 0, 0, 4, 0xff, 0xff, 0, 8, 0, 0, 0x23, 0x20]
        );

        let mut out = Vec::new();
        let instructions = TableFeatureProperty::InstructionsMiss(vec![
            InstructionId::Standard(InstructionType::GotoTable),
            InstructionId::Standard(InstructionType::ApplyActions),
        ]);
        write_property(&instructions, Version::V1_3, &registry, &mut out).unwrap();
        assert_eq!(out, vec![0, 1, 0, 12, 0, 1, 0, 4, 0, 4, 0, 4, 0, 0, 0, 0]);

        let mut out = Vec::new();
        let fields = TableFeatureProperty::Match(vec![
            OxmId::basic(OfbMatchFields::InPort),
            OxmId::masked(OfbMatchFields::EthDst),
        ]);
        write_property(&fields, Version::V1_3, &registry, &mut out).unwrap();
        assert_eq!(
            out,
            vec![0, 8, 0, 12, 0x80, 0, 0, 4, 0x80, 0, 0x07, 12, 0, 0, 0, 0]
        );
    }

    #[test]
    fn table_features_length_includes_properties() {
        let mut out = Vec::new();
        let body = features(vec![
            TableFeatureProperty::NextTables(vec![1, 2, 3]),
            TableFeatureProperty::Wildcards(Vec::new()),
        ]);
        write_table_features(&body, Version::V1_3, &default_registry(), &mut out).unwrap();
        assert_eq!(out.len(), TABLE_FEATURES_LENGTH + 8 + 8);
        assert_eq!(&out[..2], &[0, 80]);
        assert_eq!(&out[8..18], b"classifier");
    }

    #[test]
    fn experimenter_property_uses_plugin() {
        let property = TableFeatureProperty::ExperimenterMiss(ExperimenterProperty {
            experimenter_id: 0xd0f0,
            exp_type: 1,
            data: vec![9, 9],
        });
        let mut out = Vec::new();
        assert!(write_property(&property, Version::V1_3, &default_registry(), &mut out).is_err());

        let registry = registry_builder()
            .register::<ExperimenterProperty, _>(
                ExperimenterKey::new(
                    Version::V1_3,
                    ExperimenterSpace::TableFeatureProperty,
                    0xd0f0,
                    None,
                ),
                OpaqueExperimenterSerializer,
            )
            .build();
        let mut out = Vec::new();
        write_property(&property, Version::V1_3, &registry, &mut out).unwrap();
        assert_eq!(
            out,
            vec![0xff, 0xff, 0, 14, 0, 0, 0xd0, 0xf0, 0, 0, 0, 1, 9, 9, 0, 0]
        );
    }
}
