//! Readers for the nested lists of reply bodies: OXM and 1.0 matches,
//! actions, instructions, buckets, meter bands, ports and table features.
//!
//! Experimenter elements keep everything after their fixed fields in
//! `data`. For actions, instructions and bands that includes the zero
//! padding the envelope carries.

use byteorder::{BigEndian, ReadBytesExt};
use num_traits::FromPrimitive;
use std::cmp::min;
use std::convert::TryFrom;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::net::{Ipv4Addr, Ipv6Addr};

use super::{expect_len, read_eth, read_fixed_str, rest, BodyCursor};
use crate::bits::{tables, unpack};
use crate::buf::{padding_for, PORT_NAME_LEN, TABLE_NAME_LEN};
use crate::ds::actions::{
    Action, ActionId, ActionType, ActionTypeV10, ActionV10, ExperimenterAction, ACTION_HEADER_LEN,
};
use crate::ds::flow_instructions::{
    ExperimenterInstruction, Instruction, InstructionId, InstructionType,
};
use crate::ds::flow_match::*;
use crate::ds::group_mod::{Bucket, BUCKET_LEN};
use crate::ds::meter_mod::{MeterBand, MeterBandType};
use crate::ds::ports::{PortFeatures, Port, PortNumber, PortNumberV10};
use crate::ds::table_features::{
    ExperimenterProperty, TableFeatureProperty, TableFeaturePropType, TableFeatures,
    TABLE_FEATURES_LENGTH, TABLE_FEATURE_PROP_HEADER_LENGTH,
};
use crate::err::*;
use crate::header::Version;

macro_rules! masked {
    ($has_mask:expr, $read:expr) => {
        if $has_mask {
            Some($read)
        } else {
            None
        }
    };
}

/// Front element of `bytes` whose 16 bit length sits at `len_offset`.
pub(super) fn next_element<'a>(
    bytes: &'a [u8],
    len_offset: usize,
    min_len: usize,
    name: &'static str,
) -> Result<&'a [u8]> {
    expect_len(bytes, len_offset + 2, name)?;
    let length = Cursor::new(&bytes[len_offset..]).read_u16::<BigEndian>()? as usize;
    if length < min_len {
        bail!(ErrorKind::InvalidSliceLength(min_len, length, name));
    }
    if length > bytes.len() {
        bail!(ErrorKind::InvalidSliceLength(length, bytes.len(), name));
    }
    Ok(&bytes[..length])
}

/// Reads back to back length-prefixed elements until `bytes` is used up.
pub(super) fn read_elements<T, F>(
    mut bytes: &[u8],
    len_offset: usize,
    min_len: usize,
    name: &'static str,
    mut read: F,
) -> Result<Vec<T>>
where
    F: FnMut(&[u8]) -> Result<T>,
{
    let mut items = Vec::new();
    while !bytes.is_empty() {
        let element = next_element(bytes, len_offset, min_len, name)?;
        items.push(read(element)?);
        bytes = &bytes[element.len()..];
    }
    Ok(items)
}

/// Fixed size records, one cursor each.
pub(super) fn records<'a>(
    bytes: &'a [u8],
    size: usize,
    name: &'static str,
) -> Result<impl Iterator<Item = BodyCursor<'a>>> {
    if bytes.len() % size != 0 {
        bail!(ErrorKind::InvalidSliceLength(
            bytes.len() - bytes.len() % size + size,
            bytes.len(),
            name
        ));
    }
    Ok(bytes.chunks(size).map(Cursor::new))
}

/// Type of a type-length element and a cursor behind its header.
fn open_tlv(element: &[u8]) -> Result<(u16, BodyCursor)> {
    let mut cursor = Cursor::new(element);
    let ttype = cursor.read_u16::<BigEndian>()?;
    cursor.seek(SeekFrom::Current(2))?;
    Ok((ttype, cursor))
}

fn tail(element: &[u8], from: usize) -> &[u8] {
    element.get(from..).unwrap_or(&[])
}

fn read_ipv4(cursor: &mut BodyCursor) -> Result<Ipv4Addr> {
    Ok(Ipv4Addr::from(cursor.read_u32::<BigEndian>()?))
}

fn read_ipv6(cursor: &mut BodyCursor) -> Result<Ipv6Addr> {
    let mut octets = [0u8; 16];
    cursor.read_exact(&mut octets)?;
    Ok(Ipv6Addr::from(octets))
}

/// OXM match at the front of `bytes` and the number of bytes it takes,
/// trailing padding included.
pub(super) fn read_match(bytes: &[u8]) -> Result<(Match, usize)> {
    expect_len(bytes, MATCH_HEADER_LENGTH, stringify!(Match))?;
    let mut cursor = Cursor::new(bytes);
    let raw_type = cursor.read_u16::<BigEndian>()?;
    if raw_type != MatchType::OXM as u16 {
        debug!("Match type {} is not OXM", raw_type);
        bail!(ErrorKind::UnsupportedValue(raw_type as u64, stringify!(MatchType)));
    }
    let length = cursor.read_u16::<BigEndian>()? as usize;
    if length < MATCH_HEADER_LENGTH {
        bail!(ErrorKind::InvalidSliceLength(MATCH_HEADER_LENGTH, length, stringify!(Match)));
    }
    let used = length + padding_for(length, 8);
    expect_len(bytes, used, stringify!(Match))?;
    let mut entries = Vec::new();
    let mut remaining = &bytes[MATCH_HEADER_LENGTH..length];
    while !remaining.is_empty() {
        let (entry, size) = read_entry(remaining)?;
        entries.push(entry);
        remaining = &remaining[size..];
    }
    Ok((Match::new(entries), used))
}

/// One OXM TLV and its size. Also the field of a set-field action.
pub(super) fn read_entry(bytes: &[u8]) -> Result<(MatchField, usize)> {
    expect_len(bytes, 4, stringify!(MatchField))?;
    let mut cursor = Cursor::new(bytes);
    let header = OxmTlvHeader(cursor.read_u32::<BigEndian>()?);
    let length = header.get_length() as usize;
    let size = 4 + length;
    expect_len(bytes, size, stringify!(MatchField))?;
    let has_mask = header.get_hasmask() == 1;
    let class = header.get_oxm_class();
    let entry = match OxmClass::from_u32(class) {
        Some(OxmClass::OpenFlowBasic) => {
            let raw_field = header.get_oxm_field();
            let field = OfbMatchFields::from_u32(raw_field).ok_or_else(|| {
                Error::from(ErrorKind::UnknownValue(raw_field as u64, stringify!(OfbMatchFields)))
            })?;
            let expected = field.oxm_len(has_mask) as usize;
            if length != expected {
                bail!(ErrorKind::InvalidSliceLength(expected, length, stringify!(MatchField)));
            }
            read_value(field, has_mask, &mut cursor)?
        }
        Some(OxmClass::Experimenter) => {
            if length < 4 {
                bail!(ErrorKind::InvalidSliceLength(4, length, stringify!(ExperimenterField)));
            }
            MatchField::Experimenter(ExperimenterField {
                experimenter_id: cursor.read_u32::<BigEndian>()?,
                field: header.get_oxm_field() as u8,
                has_mask,
                data: bytes[8..size].to_vec(),
            })
        }
        _ => {
            debug!("No reader for OXM class {:#x}", class);
            bail!(ErrorKind::UnsupportedValue(class as u64, stringify!(OxmClass)))
        }
    };
    if has_mask && !entry.has_mask() {
        bail!(ErrorKind::IllegalValue(header.get_oxm_field() as u64, "OXM mask"));
    }
    Ok((entry, size))
}

fn read_value(field: OfbMatchFields, has_mask: bool, cursor: &mut BodyCursor) -> Result<MatchField> {
    use crate::ds::flow_match::MatchField as M;
    use crate::ds::flow_match::OfbMatchFields as F;
    Ok(match field {
        F::InPort => M::InPort(PortNumber::try_from(cursor.read_u32::<BigEndian>()?)?),
        F::InPhyPort => M::InPhyPort(PortNumber::try_from(cursor.read_u32::<BigEndian>()?)?),
        F::Metadata => M::Metadata(
            cursor.read_u64::<BigEndian>()?,
            masked!(has_mask, cursor.read_u64::<BigEndian>()?),
        ),
        F::TunnelId => M::TunnelId(
            cursor.read_u64::<BigEndian>()?,
            masked!(has_mask, cursor.read_u64::<BigEndian>()?),
        ),
        F::EthDst => M::EthDst(read_eth(cursor)?, masked!(has_mask, read_eth(cursor)?)),
        F::EthSrc => M::EthSrc(read_eth(cursor)?, masked!(has_mask, read_eth(cursor)?)),
        F::ArpSha => M::ArpSha(read_eth(cursor)?, masked!(has_mask, read_eth(cursor)?)),
        F::ArpTha => M::ArpTha(read_eth(cursor)?, masked!(has_mask, read_eth(cursor)?)),
        F::EthType => M::EthType(cursor.read_u16::<BigEndian>()?),
        F::TcpSrc => M::TcpSrc(cursor.read_u16::<BigEndian>()?),
        F::TcpDst => M::TcpDst(cursor.read_u16::<BigEndian>()?),
        F::UdpSrc => M::UdpSrc(cursor.read_u16::<BigEndian>()?),
        F::UdpDst => M::UdpDst(cursor.read_u16::<BigEndian>()?),
        F::SctpSrc => M::SctpSrc(cursor.read_u16::<BigEndian>()?),
        F::SctpDst => M::SctpDst(cursor.read_u16::<BigEndian>()?),
        F::ArpOp => M::ArpOp(cursor.read_u16::<BigEndian>()?),
        F::VlanVid => M::VlanVid(
            cursor.read_u16::<BigEndian>()?,
            masked!(has_mask, cursor.read_u16::<BigEndian>()?),
        ),
        F::IPv6ExtHdr => M::IPv6ExtHdr(
            cursor.read_u16::<BigEndian>()?,
            masked!(has_mask, cursor.read_u16::<BigEndian>()?),
        ),
        F::VlanPcp => M::VlanPcp(cursor.read_u8()?),
        F::IpDscp => M::IpDscp(cursor.read_u8()?),
        F::IpEcn => M::IpEcn(cursor.read_u8()?),
        F::IpProto => M::IpProto(cursor.read_u8()?),
        F::IcmpV4Type => M::IcmpV4Type(cursor.read_u8()?),
        F::IcmpV4Code => M::IcmpV4Code(cursor.read_u8()?),
        F::IcmpV6Type => M::IcmpV6Type(cursor.read_u8()?),
        F::IcmpV6Code => M::IcmpV6Code(cursor.read_u8()?),
        F::MplsTc => M::MplsTc(cursor.read_u8()?),
        F::IPv4Src => M::IPv4Src(read_ipv4(cursor)?, masked!(has_mask, read_ipv4(cursor)?)),
        F::IPv4Dst => M::IPv4Dst(read_ipv4(cursor)?, masked!(has_mask, read_ipv4(cursor)?)),
        F::ArpSpa => M::ArpSpa(read_ipv4(cursor)?, masked!(has_mask, read_ipv4(cursor)?)),
        F::ArpTpa => M::ArpTpa(read_ipv4(cursor)?, masked!(has_mask, read_ipv4(cursor)?)),
        F::IPv6Src => M::IPv6Src(read_ipv6(cursor)?, masked!(has_mask, read_ipv6(cursor)?)),
        F::IPv6Dst => M::IPv6Dst(read_ipv6(cursor)?, masked!(has_mask, read_ipv6(cursor)?)),
        F::IPv6FLabel => M::IPv6FLabel(
            cursor.read_u32::<BigEndian>()?,
            masked!(has_mask, cursor.read_u32::<BigEndian>()?),
        ),
        F::IPv6NdTarget => M::IPv6NdTarget(read_ipv6(cursor)?),
        F::IPv6NdSll => M::IPv6NdSll(read_eth(cursor)?),
        F::IPv6NdTll => M::IPv6NdTll(read_eth(cursor)?),
        F::MplsLabel => M::MplsLabel(cursor.read_u32::<BigEndian>()?),
        F::MplsBos => M::MplsBos(cursor.read_u8()? != 0),
        F::PbbISid => M::PbbISid(
            cursor.read_u24::<BigEndian>()?,
            masked!(has_mask, cursor.read_u24::<BigEndian>()?),
        ),
    })
}

/// The 40 byte OpenFlow 1.0 match. Prefix counts above 32 read as 32.
pub(super) fn read_match_v10(cursor: &mut BodyCursor) -> Result<MatchV10> {
    let raw = cursor.read_u32::<BigEndian>()?;
    let prefix = |shift: u32| min(((raw >> shift) & 0x3f) as u8, NW_WILDCARD_ALL);
    let wildcards = unpack(tables::WILDCARDS_V10, raw);
    let nw_src_wildcard = prefix(NW_SRC_SHIFT);
    let nw_dst_wildcard = prefix(NW_DST_SHIFT);
    let in_port = cursor.read_u16::<BigEndian>()?;
    let dl_src = read_eth(cursor)?;
    let dl_dst = read_eth(cursor)?;
    let dl_vlan = cursor.read_u16::<BigEndian>()?;
    let dl_vlan_pcp = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(1))?;
    let dl_type = cursor.read_u16::<BigEndian>()?;
    let nw_tos = cursor.read_u8()?;
    let nw_proto = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(2))?;
    Ok(MatchV10 {
        wildcards,
        nw_src_wildcard,
        nw_dst_wildcard,
        in_port,
        dl_src,
        dl_dst,
        dl_vlan,
        dl_vlan_pcp,
        dl_type,
        nw_tos,
        nw_proto,
        nw_src: read_ipv4(cursor)?,
        nw_dst: read_ipv4(cursor)?,
        tp_src: cursor.read_u16::<BigEndian>()?,
        tp_dst: cursor.read_u16::<BigEndian>()?,
    })
}

pub(super) fn read_actions(bytes: &[u8]) -> Result<Vec<Action>> {
    read_elements(
        bytes,
        2,
        ACTION_HEADER_LEN as usize,
        stringify!(Action),
        read_action,
    )
}

fn read_action(element: &[u8]) -> Result<Action> {
    let (raw_type, mut cursor) = open_tlv(element)?;
    let ttype = ActionType::from_u16(raw_type).ok_or_else(|| {
        Error::from(ErrorKind::UnknownValue(raw_type as u64, stringify!(ActionType)))
    })?;
    Ok(match ttype {
        ActionType::Output => Action::Output {
            port: PortNumber::try_from(cursor.read_u32::<BigEndian>()?)?,
            max_len: cursor.read_u16::<BigEndian>()?,
        },
        ActionType::CopyTtlOut => Action::CopyTtlOut,
        ActionType::CopyTtlIn => Action::CopyTtlIn,
        ActionType::DecMplsTtl => Action::DecMplsTtl,
        ActionType::PopVlan => Action::PopVlan,
        ActionType::DecNwTtl => Action::DecNwTtl,
        ActionType::PopPbb => Action::PopPbb,
        ActionType::SetMplsTtl => Action::SetMplsTtl(cursor.read_u8()?),
        ActionType::SetNwTtl => Action::SetNwTtl(cursor.read_u8()?),
        ActionType::PushVlan => Action::PushVlan(cursor.read_u16::<BigEndian>()?),
        ActionType::PushMpls => Action::PushMpls(cursor.read_u16::<BigEndian>()?),
        ActionType::PopMpls => Action::PopMpls(cursor.read_u16::<BigEndian>()?),
        ActionType::PushPbb => Action::PushPbb(cursor.read_u16::<BigEndian>()?),
        ActionType::SetQueue => Action::SetQueue(cursor.read_u32::<BigEndian>()?),
        ActionType::Group => Action::Group(cursor.read_u32::<BigEndian>()?),
        ActionType::SetField => Action::SetField(read_entry(tail(element, 4))?.0),
        ActionType::Experimenter => Action::Experimenter(ExperimenterAction {
            experimenter_id: cursor.read_u32::<BigEndian>()?,
            data: rest(&cursor),
        }),
    })
}

pub(super) fn read_actions_v10(bytes: &[u8]) -> Result<Vec<ActionV10>> {
    read_elements(
        bytes,
        2,
        ACTION_HEADER_LEN as usize,
        stringify!(ActionV10),
        read_action_v10,
    )
}

fn read_action_v10(element: &[u8]) -> Result<ActionV10> {
    let (raw_type, mut cursor) = open_tlv(element)?;
    let ttype = ActionTypeV10::from_u16(raw_type).ok_or_else(|| {
        Error::from(ErrorKind::UnknownValue(raw_type as u64, stringify!(ActionTypeV10)))
    })?;
    Ok(match ttype {
        ActionTypeV10::Output => ActionV10::Output {
            port: PortNumberV10::try_from(cursor.read_u16::<BigEndian>()?)?,
            max_len: cursor.read_u16::<BigEndian>()?,
        },
        ActionTypeV10::SetVlanVid => ActionV10::SetVlanVid(cursor.read_u16::<BigEndian>()?),
        ActionTypeV10::SetTpSrc => ActionV10::SetTpSrc(cursor.read_u16::<BigEndian>()?),
        ActionTypeV10::SetTpDst => ActionV10::SetTpDst(cursor.read_u16::<BigEndian>()?),
        ActionTypeV10::SetVlanPcp => ActionV10::SetVlanPcp(cursor.read_u8()?),
        ActionTypeV10::SetNwTos => ActionV10::SetNwTos(cursor.read_u8()?),
        ActionTypeV10::StripVlan => ActionV10::StripVlan,
        ActionTypeV10::SetDlSrc => ActionV10::SetDlSrc(read_eth(&mut cursor)?),
        ActionTypeV10::SetDlDst => ActionV10::SetDlDst(read_eth(&mut cursor)?),
        ActionTypeV10::SetNwSrc => ActionV10::SetNwSrc(read_ipv4(&mut cursor)?),
        ActionTypeV10::SetNwDst => ActionV10::SetNwDst(read_ipv4(&mut cursor)?),
        ActionTypeV10::Enqueue => {
            let port = PortNumberV10::try_from(cursor.read_u16::<BigEndian>()?)?;
            cursor.seek(SeekFrom::Current(6))?;
            ActionV10::Enqueue {
                port,
                queue_id: cursor.read_u32::<BigEndian>()?,
            }
        }
        ActionTypeV10::Vendor => ActionV10::Vendor(ExperimenterAction {
            experimenter_id: cursor.read_u32::<BigEndian>()?,
            data: rest(&cursor),
        }),
    })
}

pub(super) fn read_instructions(bytes: &[u8]) -> Result<Vec<Instruction>> {
    read_elements(bytes, 2, 4, stringify!(Instruction), |element| {
        let (raw_type, mut cursor) = open_tlv(element)?;
        let ttype = InstructionType::from_u16(raw_type).ok_or_else(|| {
            Error::from(ErrorKind::UnknownValue(raw_type as u64, stringify!(InstructionType)))
        })?;
        Ok(match ttype {
            InstructionType::GotoTable => Instruction::GotoTable(cursor.read_u8()?),
            InstructionType::WriteMetadata => {
                cursor.seek(SeekFrom::Current(4))?;
                Instruction::WriteMetadata {
                    metadata: cursor.read_u64::<BigEndian>()?,
                    metadata_mask: cursor.read_u64::<BigEndian>()?,
                }
            }
            InstructionType::WriteActions => {
                Instruction::WriteActions(read_actions(tail(element, 8))?)
            }
            InstructionType::ApplyActions => {
                Instruction::ApplyActions(read_actions(tail(element, 8))?)
            }
            InstructionType::ClearActions => Instruction::ClearActions,
            InstructionType::Meter => Instruction::Meter(cursor.read_u32::<BigEndian>()?),
            InstructionType::Experimenter => Instruction::Experimenter(ExperimenterInstruction {
                experimenter_id: cursor.read_u32::<BigEndian>()?,
                data: rest(&cursor),
            }),
        })
    })
}

pub(super) fn read_meter_bands(bytes: &[u8]) -> Result<Vec<MeterBand>> {
    read_elements(bytes, 2, 4, stringify!(MeterBand), |element| {
        let (raw_type, mut cursor) = open_tlv(element)?;
        let ttype = MeterBandType::from_u16(raw_type).ok_or_else(|| {
            Error::from(ErrorKind::UnknownValue(raw_type as u64, stringify!(MeterBandType)))
        })?;
        let rate = cursor.read_u32::<BigEndian>()?;
        let burst_size = cursor.read_u32::<BigEndian>()?;
        Ok(match ttype {
            MeterBandType::Drop => MeterBand::Drop { rate, burst_size },
            MeterBandType::DscpRemark => MeterBand::DscpRemark {
                rate,
                burst_size,
                prec_level: cursor.read_u8()?,
            },
            MeterBandType::Experimenter => MeterBand::Experimenter {
                rate,
                burst_size,
                experimenter_id: cursor.read_u32::<BigEndian>()?,
                data: rest(&cursor),
            },
        })
    })
}

pub(super) fn read_buckets(bytes: &[u8]) -> Result<Vec<Bucket>> {
    read_elements(bytes, 0, BUCKET_LEN, stringify!(Bucket), |element| {
        let mut cursor = Cursor::new(element);
        cursor.seek(SeekFrom::Start(2))?;
        let weight = cursor.read_u16::<BigEndian>()?;
        let watch_port = PortNumber::try_from(cursor.read_u32::<BigEndian>()?)?;
        let watch_group = cursor.read_u32::<BigEndian>()?;
        Ok(Bucket {
            weight,
            watch_port,
            watch_group,
            actions: read_actions(tail(element, BUCKET_LEN))?,
        })
    })
}

/// `ofp_port`, 64 bytes.
pub(super) fn read_port(cursor: &mut BodyCursor) -> Result<Port> {
    let v13 = Version::V1_3;
    let port_no = PortNumber::try_from(cursor.read_u32::<BigEndian>()?)?;
    cursor.seek(SeekFrom::Current(4))?;
    let hw_addr = read_eth(cursor)?;
    cursor.seek(SeekFrom::Current(2))?;
    let name = read_fixed_str(cursor, PORT_NAME_LEN)?;
    let config = unpack(tables::port_config(v13), cursor.read_u32::<BigEndian>()?);
    let state = unpack(tables::port_state(v13), cursor.read_u32::<BigEndian>()?);
    let mut features = [PortFeatures::empty(); 4];
    for slot in features.iter_mut() {
        *slot = unpack(tables::port_features(v13), cursor.read_u32::<BigEndian>()?);
    }
    let [curr, advertised, supported, peer] = features;
    Ok(Port {
        port_no,
        hw_addr,
        name,
        config,
        state,
        curr,
        advertised,
        supported,
        peer,
        curr_speed: cursor.read_u32::<BigEndian>()?,
        max_speed: cursor.read_u32::<BigEndian>()?,
    })
}

pub(super) fn read_table_features(element: &[u8]) -> Result<TableFeatures> {
    let mut cursor = Cursor::new(element);
    cursor.seek(SeekFrom::Start(2))?;
    let table_id = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(5))?;
    let name = read_fixed_str(&mut cursor, TABLE_NAME_LEN)?;
    Ok(TableFeatures {
        table_id,
        name,
        metadata_match: cursor.read_u64::<BigEndian>()?,
        metadata_write: cursor.read_u64::<BigEndian>()?,
        config: unpack(tables::TABLE_CONFIG, cursor.read_u32::<BigEndian>()?),
        max_entries: cursor.read_u32::<BigEndian>()?,
        properties: read_properties(tail(element, TABLE_FEATURES_LENGTH))?,
    })
}

/// Property lengths leave out the padding to 8 bytes.
fn read_properties(mut bytes: &[u8]) -> Result<Vec<TableFeatureProperty>> {
    let mut properties = Vec::new();
    while !bytes.is_empty() {
        let element = next_element(
            bytes,
            2,
            TABLE_FEATURE_PROP_HEADER_LENGTH,
            stringify!(TableFeatureProperty),
        )?;
        properties.push(read_property(element)?);
        let next = element.len() + padding_for(element.len(), 8);
        bytes = tail(bytes, next);
    }
    Ok(properties)
}

fn read_property(element: &[u8]) -> Result<TableFeatureProperty> {
    use crate::ds::table_features::TableFeatureProperty as P;
    use crate::ds::table_features::TableFeaturePropType as T;

    let (raw_type, mut cursor) = open_tlv(element)?;
    let ttype = TableFeaturePropType::from_u16(raw_type).ok_or_else(|| {
        Error::from(ErrorKind::UnknownValue(raw_type as u64, stringify!(TableFeaturePropType)))
    })?;
    let ids = tail(element, TABLE_FEATURE_PROP_HEADER_LENGTH);
    Ok(match ttype {
        T::Instructions => P::Instructions(read_instruction_ids(ids)?),
        T::InstructionsMiss => P::InstructionsMiss(read_instruction_ids(ids)?),
        T::NextTables => P::NextTables(ids.to_vec()),
        T::NextTablesMiss => P::NextTablesMiss(ids.to_vec()),
        T::WriteActions => P::WriteActions(read_action_ids(ids)?),
        T::WriteActionsMiss => P::WriteActionsMiss(read_action_ids(ids)?),
        T::ApplyActions => P::ApplyActions(read_action_ids(ids)?),
        T::ApplyActionsMiss => P::ApplyActionsMiss(read_action_ids(ids)?),
        T::Match => P::Match(read_oxm_ids(ids)?),
        T::Wildcards => P::Wildcards(read_oxm_ids(ids)?),
        T::WriteSetfield => P::WriteSetfield(read_oxm_ids(ids)?),
        T::WriteSetfieldMiss => P::WriteSetfieldMiss(read_oxm_ids(ids)?),
        T::ApplySetfield => P::ApplySetfield(read_oxm_ids(ids)?),
        T::ApplySetfieldMiss => P::ApplySetfieldMiss(read_oxm_ids(ids)?),
        T::Experimenter | T::ExperimenterMiss => {
            let experimenter = ExperimenterProperty {
                experimenter_id: cursor.read_u32::<BigEndian>()?,
                exp_type: cursor.read_u32::<BigEndian>()?,
                data: rest(&cursor),
            };
            if ttype == T::Experimenter {
                P::Experimenter(experimenter)
            } else {
                P::ExperimenterMiss(experimenter)
            }
        }
    })
}

fn read_action_ids(bytes: &[u8]) -> Result<Vec<ActionId>> {
    read_elements(bytes, 2, 4, stringify!(ActionId), |element| {
        let (raw_type, mut cursor) = open_tlv(element)?;
        Ok(match ActionType::from_u16(raw_type) {
            Some(ActionType::Experimenter) => {
                ActionId::Experimenter(cursor.read_u32::<BigEndian>()?)
            }
            Some(ttype) => ActionId::Standard(ttype),
            None => bail!(ErrorKind::UnknownValue(raw_type as u64, stringify!(ActionType))),
        })
    })
}

fn read_instruction_ids(bytes: &[u8]) -> Result<Vec<InstructionId>> {
    read_elements(bytes, 2, 4, stringify!(InstructionId), |element| {
        let (raw_type, mut cursor) = open_tlv(element)?;
        Ok(match InstructionType::from_u16(raw_type) {
            Some(InstructionType::Experimenter) => {
                InstructionId::Experimenter(cursor.read_u32::<BigEndian>()?)
            }
            Some(ttype) => InstructionId::Standard(ttype),
            None => bail!(ErrorKind::UnknownValue(raw_type as u64, stringify!(InstructionType))),
        })
    })
}

/// OXM headers without values. Experimenter ids carry their experimenter.
fn read_oxm_ids(bytes: &[u8]) -> Result<Vec<OxmId>> {
    let mut cursor = Cursor::new(bytes);
    let mut ids = Vec::new();
    while (cursor.position() as usize) < bytes.len() {
        let header = OxmTlvHeader(cursor.read_u32::<BigEndian>()?);
        let has_mask = header.get_hasmask() == 1;
        let class = header.get_oxm_class();
        ids.push(match OxmClass::from_u32(class) {
            Some(OxmClass::OpenFlowBasic) => {
                let raw_field = header.get_oxm_field();
                let field = OfbMatchFields::from_u32(raw_field).ok_or_else(|| {
                    Error::from(ErrorKind::UnknownValue(raw_field as u64, stringify!(OfbMatchFields)))
                })?;
                OxmId::Basic { field, has_mask }
            }
            Some(OxmClass::Experimenter) => OxmId::Experimenter {
                experimenter_id: cursor.read_u32::<BigEndian>()?,
                field: header.get_oxm_field() as u8,
                has_mask,
                length: header.get_length() as u8,
            },
            _ => bail!(ErrorKind::UnsupportedValue(class as u64, stringify!(OxmClass))),
        });
    }
    Ok(ids)
}
