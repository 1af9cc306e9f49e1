//! OXM match (1.3), its entries and field ids, and the fixed 1.0 match.

use byteorder::{BigEndian, WriteBytesExt};
use std::cmp::min;
use std::sync::Arc;

use crate::bits::pack;
use crate::bits::tables::WILDCARDS_V10;
use crate::buf::WireBuf;
use crate::ds::flow_match::*;
use crate::err::*;
use crate::header::Version;
use crate::list::serialize_list;
use crate::registry::*;
use crate::ser::write_experimenter_body;

/// Codec key of an entry. Experimenter class entries share the key of the
/// experimenter class and dispatch on their experimenter id from there.
pub fn entry_key(version: Version) -> impl Fn(&MatchField) -> SerializerKey {
    move |entry| {
        let code = entry
            .field()
            .map(|field| field as u32)
            .unwrap_or(OxmClass::Experimenter as u32);
        CodecKey::new(version, CodecKind::MatchEntry, code).into()
    }
}

pub fn oxm_id_key(version: Version) -> impl Fn(&OxmId) -> SerializerKey {
    move |id| {
        let code = match *id {
            OxmId::Basic { field, .. } => field as u32,
            OxmId::Experimenter { .. } => OxmClass::Experimenter as u32,
        };
        CodecKey::new(version, CodecKind::MatchEntry, code).into()
    }
}

/// Writes `mmatch` with the match codec registered for `version`.
pub fn write_match(
    mmatch: &Match,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    registry
        .lookup::<Match>(CodecKey::new(version, CodecKind::Match, MatchType::OXM as u32))?
        .serialize(mmatch, out, registry)
}

pub fn write_match_v10(
    mmatch: &MatchV10,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    registry
        .lookup::<MatchV10>(CodecKey::new(
            Version::V1_0,
            CodecKind::Match,
            MatchType::Standard as u32,
        ))?
        .serialize(mmatch, out, registry)
}

/// `ofp_match` of type OXM. The length covers type, length and entries but
/// not the trailing padding.
pub struct OxmMatchSerializer {
    pub version: Version,
}

impl OfSerializer<Match> for OxmMatchSerializer {
    fn serialize(&self, mmatch: &Match, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        let start = out.position();
        out.write_u16::<BigEndian>(MatchType::OXM as u16)?;
        let mark = out.reserve_length(start);
        serialize_list(&mmatch.entries, entry_key(self.version), registry, out)?;
        out.patch_length(mark)?;
        out.pad_to_multiple(start, 8);
        Ok(())
    }
}

/// One OXM TLV. Also used for the field of a set-field action.
pub struct OxmEntrySerializer {
    pub version: Version,
}

impl OfSerializer<MatchField> for OxmEntrySerializer {
    fn serialize(
        &self,
        entry: &MatchField,
        out: &mut Vec<u8>,
        registry: &SerializerRegistry,
    ) -> Result<()> {
        match entry {
            MatchField::Experimenter(field) => {
                let start = out.position();
                let header =
                    OxmTlvHeader::build(OxmClass::Experimenter as u16, field.field, field.has_mask, 0);
                out.write_u32::<BigEndian>(header.0)?;
                out.write_u32::<BigEndian>(field.experimenter_id)?;
                let key = ExperimenterKey::new(
                    self.version,
                    ExperimenterSpace::MatchEntry,
                    field.experimenter_id,
                    None,
                );
                write_experimenter_body(field, key, registry, out)?;
                // 8 bit length after the 4 byte header, experimenter id included
                let len = out.position() - start - 4;
                if len > u8::MAX as usize {
                    bail!(ErrorKind::IllegalValue(len as u64, "OXM length"));
                }
                out[start + 3] = len as u8;
                Ok(())
            }
            _ => {
                let field = entry
                    .field()
                    .ok_or::<Error>(ErrorKind::IllegalValue(0, stringify!(MatchField)).into())?;
                let has_mask = entry.has_mask();
                let header = OxmTlvHeader::build(
                    OxmClass::OpenFlowBasic as u16,
                    field as u8,
                    has_mask,
                    field.oxm_len(has_mask),
                );
                out.write_u32::<BigEndian>(header.0)?;
                write_value(entry, out)
            }
        }
    }
}

fn write_value(entry: &MatchField, out: &mut Vec<u8>) -> Result<()> {
    use crate::ds::flow_match::MatchField as M;
    match entry {
        M::InPort(port) | M::InPhyPort(port) => out.write_u32::<BigEndian>(port.wire())?,
        M::Metadata(value, mask) | M::TunnelId(value, mask) => {
            out.write_u64::<BigEndian>(*value)?;
            if let Some(mask) = mask {
                out.write_u64::<BigEndian>(*mask)?;
            }
        }
        M::EthDst(addr, mask) | M::EthSrc(addr, mask) | M::ArpSha(addr, mask) | M::ArpTha(addr, mask) => {
            out.extend_from_slice(addr);
            if let Some(mask) = mask {
                out.extend_from_slice(mask);
            }
        }
        M::EthType(value)
        | M::TcpSrc(value)
        | M::TcpDst(value)
        | M::UdpSrc(value)
        | M::UdpDst(value)
        | M::SctpSrc(value)
        | M::SctpDst(value)
        | M::ArpOp(value) => out.write_u16::<BigEndian>(*value)?,
        M::VlanVid(value, mask) | M::IPv6ExtHdr(value, mask) => {
            out.write_u16::<BigEndian>(*value)?;
            if let Some(mask) = mask {
                out.write_u16::<BigEndian>(*mask)?;
            }
        }
        M::VlanPcp(value)
        | M::IpDscp(value)
        | M::IpEcn(value)
        | M::IpProto(value)
        | M::IcmpV4Type(value)
        | M::IcmpV4Code(value)
        | M::IcmpV6Type(value)
        | M::IcmpV6Code(value)
        | M::MplsTc(value) => out.write_u8(*value)?,
        M::IPv4Src(addr, mask) | M::IPv4Dst(addr, mask) | M::ArpSpa(addr, mask) | M::ArpTpa(addr, mask) => {
            out.write_u32::<BigEndian>(u32::from(*addr))?;
            if let Some(mask) = mask {
                out.write_u32::<BigEndian>(u32::from(*mask))?;
            }
        }
        M::IPv6Src(addr, mask) | M::IPv6Dst(addr, mask) => {
            out.extend_from_slice(&addr.octets());
            if let Some(mask) = mask {
                out.extend_from_slice(&mask.octets());
            }
        }
        M::IPv6FLabel(value, mask) => {
            out.write_u32::<BigEndian>(*value)?;
            if let Some(mask) = mask {
                out.write_u32::<BigEndian>(*mask)?;
            }
        }
        M::IPv6NdTarget(addr) => out.extend_from_slice(&addr.octets()),
        M::IPv6NdSll(addr) | M::IPv6NdTll(addr) => out.extend_from_slice(addr),
        M::MplsLabel(value) => out.write_u32::<BigEndian>(*value)?,
        M::MplsBos(value) => out.write_u8(*value as u8)?,
        M::PbbISid(value, mask) => {
            out.write_u24::<BigEndian>(*value)?;
            if let Some(mask) = mask {
                out.write_u24::<BigEndian>(*mask)?;
            }
        }
        M::Experimenter(field) => {
            bail!(ErrorKind::IllegalValue(field.experimenter_id as u64, "OXM basic field"))
        }
    }
    Ok(())
}

/// OXM header without value, as listed by table features.
pub struct OxmIdSerializer;

impl HeaderSerializer<OxmId> for OxmIdSerializer {
    fn serialize_header(&self, id: &OxmId, out: &mut Vec<u8>) -> Result<()> {
        match *id {
            OxmId::Basic { field, has_mask } => {
                let header = OxmTlvHeader::build(
                    OxmClass::OpenFlowBasic as u16,
                    field as u8,
                    has_mask,
                    field.oxm_len(has_mask),
                );
                out.write_u32::<BigEndian>(header.0)?;
            }
            OxmId::Experimenter {
                experimenter_id,
                field,
                has_mask,
                length,
            } => {
                let header =
                    OxmTlvHeader::build(OxmClass::Experimenter as u16, field, has_mask, length);
                out.write_u32::<BigEndian>(header.0)?;
                out.write_u32::<BigEndian>(experimenter_id)?;
            }
        }
        Ok(())
    }
}

/// The 40 byte OpenFlow 1.0 `ofp_match`.
pub struct MatchV10Serializer;

impl MatchV10Serializer {
    pub fn wildcards(mmatch: &MatchV10) -> u32 {
        pack(WILDCARDS_V10, mmatch.wildcards)
            | (min(mmatch.nw_src_wildcard, NW_WILDCARD_ALL) as u32) << NW_SRC_SHIFT
            | (min(mmatch.nw_dst_wildcard, NW_WILDCARD_ALL) as u32) << NW_DST_SHIFT
    }
}

impl OfSerializer<MatchV10> for MatchV10Serializer {
    fn serialize(&self, mmatch: &MatchV10, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        out.write_u32::<BigEndian>(MatchV10Serializer::wildcards(mmatch))?;
        out.write_u16::<BigEndian>(mmatch.in_port)?;
        out.extend_from_slice(&mmatch.dl_src);
        out.extend_from_slice(&mmatch.dl_dst);
        out.write_u16::<BigEndian>(mmatch.dl_vlan)?;
        out.write_u8(mmatch.dl_vlan_pcp)?;
        out.write_zeros(1);
        out.write_u16::<BigEndian>(mmatch.dl_type)?;
        out.write_u8(mmatch.nw_tos)?;
        out.write_u8(mmatch.nw_proto)?;
        out.write_zeros(2);
        out.write_u32::<BigEndian>(u32::from(mmatch.nw_src))?;
        out.write_u32::<BigEndian>(u32::from(mmatch.nw_dst))?;
        out.write_u16::<BigEndian>(mmatch.tp_src)?;
        out.write_u16::<BigEndian>(mmatch.tp_dst)?;
        Ok(())
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    let mut builder = builder
        .register::<Match, _>(
            CodecKey::new(Version::V1_3, CodecKind::Match, MatchType::OXM as u32),
            OxmMatchSerializer {
                version: Version::V1_3,
            },
        )
        .register::<MatchV10, _>(
            CodecKey::new(Version::V1_0, CodecKind::Match, MatchType::Standard as u32),
            MatchV10Serializer,
        );

    let entries: Arc<dyn OfSerializer<MatchField>> = Arc::new(OxmEntrySerializer {
        version: Version::V1_3,
    });
    let codes = OfbMatchFields::ALL
        .iter()
        .map(|field| *field as u32)
        .chain(Some(OxmClass::Experimenter as u32));
    for code in codes {
        let key = CodecKey::new(Version::V1_3, CodecKind::MatchEntry, code);
        builder = builder
            .register_shared(key, entries.clone())
            .register_header::<OxmId, _>(key, OxmIdSerializer);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::ports::PortNumber;
    use crate::ser::{default_registry, OpaqueExperimenterSerializer};
    use std::net::Ipv4Addr;

    fn encode(mmatch: &Match, registry: &SerializerRegistry) -> Vec<u8> {
        let mut out = Vec::new();
        write_match(mmatch, Version::V1_3, registry, &mut out).unwrap();
        out
    }

    #[test]
    fn empty_match_is_padded_to_eight() {
        let out = encode(&Match::any(), &default_registry());
        assert_eq!(out, vec![0, 1, 0, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn entries_in_order_with_padding() {
        let mmatch = Match::new(vec![
            MatchField::InPort(PortNumber::NormalPort(1)),
            MatchField::EthType(0x0800),
        ]);
        let out = encode(&mmatch, &default_registry());
        assert_eq!(
            out,
            vec![
                0, 1, 0, 18, // type, length
                0x80, 0, 0, 4, 0, 0, 0, 1, // in_port
                0x80, 0, 0x0a, 2, 0x08, 0, // eth_type
                0, 0, 0, 0, 0, 0, // pad
            ]
        );
    }

    #[test]
    fn masked_entry_carries_mask() {
        let mmatch = Match::new(vec![MatchField::IPv4Dst(
            Ipv4Addr::new(10, 0, 0, 0),
            Some(Ipv4Addr::new(255, 0, 0, 0)),
        )]);
        let out = encode(&mmatch, &default_registry());
        assert_eq!(&out[..4], &[0, 1, 0, 16]);
        assert_eq!(&out[4..8], &[0x80, 0, 0x19, 8]);
        assert_eq!(&out[8..16], &[10, 0, 0, 0, 255, 0, 0, 0]);
    }

    #[test]
    fn experimenter_entry_needs_plugin() {
        let field = ExperimenterField {
            experimenter_id: 0x00d0_f0f0,
            field: 3,
            has_mask: false,
            data: vec![0xaa, 0xbb],
        };
        let mmatch = Match::new(vec![MatchField::Experimenter(field)]);
        let mut out = Vec::new();
        assert!(write_match(&mmatch, Version::V1_3, &default_registry(), &mut out).is_err());

        let registry = crate::ser::registry_builder()
            .register::<ExperimenterField, _>(
                ExperimenterKey::new(
                    Version::V1_3,
                    ExperimenterSpace::MatchEntry,
                    0x00d0_f0f0,
                    None,
                ),
                OpaqueExperimenterSerializer,
            )
            .build();
        let out = encode(&mmatch, &registry);
        assert_eq!(&out[..MATCH_HEADER_LENGTH], &[0, 1, 0, 14]);
        assert_eq!(&out[4..14], &[0xff, 0xff, 6, 6, 0, 0xd0, 0xf0, 0xf0, 0xaa, 0xbb]);
        assert_eq!(out.len(), 16);
    }

    #[test]
    fn v10_match_wildcards_all() {
        let mut out = Vec::new();
        write_match_v10(&MatchV10::any(), &default_registry(), &mut out).unwrap();
        assert_eq!(out.len(), MATCH_V10_LENGTH);
        assert_eq!(&out[..4], &[0x00, 0x38, 0x20, 0xff]);
    }

    #[test]
    fn v10_prefix_counts_are_capped() {
        let mut mmatch = MatchV10::any();
        mmatch.wildcards = WildcardsV10::empty();
        mmatch.nw_src_wildcard = 8;
        mmatch.nw_dst_wildcard = 60;
        assert_eq!(MatchV10Serializer::wildcards(&mmatch), 8 << 8 | 32 << 14);
    }
}
