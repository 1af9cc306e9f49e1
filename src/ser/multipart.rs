//! OpenFlow 1.3 multipart requests and replies.
//!
//! The factory writes the multipart header and switches on the body shape.
//! Length-prefixed elements (flow stats, group stats, meter stats, ...)
//! backpatch their own length.

use byteorder::{BigEndian, WriteBytesExt};

use crate::bits::{pack, tables};
use crate::buf::{WireBuf, DESC_STR_LEN, SERIAL_NUM_LEN};
use crate::ds::multipart::*;
use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::registry::*;
use crate::ser::action_codec::{write_instructions, write_meter_bands};
use crate::ser::group_meter::write_buckets;
use crate::ser::match_codec::write_match;
use crate::ser::port::write_port;
use crate::ser::table_features::write_table_features;
use crate::ser::{start_message, write_experimenter_body};

/// `ofp_desc`, shared with OpenFlow 1.0.
pub fn write_desc(desc: &Desc, out: &mut Vec<u8>) -> Result<()> {
    out.write_fixed_str(&desc.mfr_desc, DESC_STR_LEN)?;
    out.write_fixed_str(&desc.hw_desc, DESC_STR_LEN)?;
    out.write_fixed_str(&desc.sw_desc, DESC_STR_LEN)?;
    out.write_fixed_str(&desc.serial_num, SERIAL_NUM_LEN)?;
    out.write_fixed_str(&desc.dp_desc, DESC_STR_LEN)?;
    Ok(())
}

pub fn write_aggregate(aggregate: &AggregateStats, out: &mut Vec<u8>) -> Result<()> {
    out.write_u64::<BigEndian>(aggregate.packet_count)?;
    out.write_u64::<BigEndian>(aggregate.byte_count)?;
    out.write_u32::<BigEndian>(aggregate.flow_count)?;
    out.write_zeros(4);
    Ok(())
}

pub fn write_port_counters(counters: &PortCounters, out: &mut Vec<u8>) -> Result<()> {
    for counter in &[
        counters.rx_packets,
        counters.tx_packets,
        counters.rx_bytes,
        counters.tx_bytes,
        counters.rx_dropped,
        counters.tx_dropped,
        counters.rx_errors,
        counters.tx_errors,
        counters.rx_frame_err,
        counters.rx_over_err,
        counters.rx_crc_err,
        counters.collisions,
    ] {
        out.write_u64::<BigEndian>(*counter)?;
    }
    Ok(())
}

fn write_multipart_header(
    ttype: MultipartType,
    flags: MultipartFlags,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.write_u16::<BigEndian>(ttype as u16)?;
    out.write_u16::<BigEndian>(pack(tables::MULTIPART_FLAGS, flags) as u16)?;
    out.write_zeros(4);
    Ok(())
}

fn write_experimenter_multipart(
    experimenter: &ExperimenterMultipart,
    space: ExperimenterSpace,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.write_u32::<BigEndian>(experimenter.experimenter_id)?;
    out.write_u32::<BigEndian>(experimenter.exp_type)?;
    let key = ExperimenterKey::new(
        version,
        space,
        experimenter.experimenter_id,
        Some(experimenter.exp_type),
    );
    write_experimenter_body(experimenter, key, registry, out)
}

fn write_flow_stats_request(
    request: &FlowStatsRequest,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.write_u8(request.table_id)?;
    out.write_zeros(3);
    out.write_u32::<BigEndian>(request.out_port.wire())?;
    out.write_u32::<BigEndian>(request.out_group)?;
    out.write_zeros(4);
    out.write_u64::<BigEndian>(request.cookie)?;
    out.write_u64::<BigEndian>(request.cookie_mask)?;
    write_match(&request.mmatch, version, registry, out)
}

pub struct MultipartRequestSerializer;

impl OfSerializer<OfMsg> for MultipartRequestSerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        use crate::ds::multipart::MultipartRequestBody as B;

        let request = expect_payload!(msg, MultipartRequest);
        let version = *msg.version();
        let start = start_message(Type::MultipartRequest, msg, out)?;
        write_multipart_header(request.body.multipart_type(), request.flags, out)?;
        match &request.body {
            B::Desc | B::Table | B::GroupDesc | B::GroupFeatures | B::MeterFeatures | B::PortDesc => {}
            B::Flow(flow) | B::Aggregate(flow) => {
                write_flow_stats_request(flow, version, registry, out)?
            }
            B::PortStats(port_no) => {
                out.write_u32::<BigEndian>(port_no.wire())?;
                out.write_zeros(4);
            }
            B::Queue(queue) => {
                out.write_u32::<BigEndian>(queue.port_no.wire())?;
                out.write_u32::<BigEndian>(queue.queue_id)?;
            }
            B::Group(id) | B::Meter(id) | B::MeterConfig(id) => {
                out.write_u32::<BigEndian>(*id)?;
                out.write_zeros(4);
            }
            B::TableFeatures(features) => {
                for table in features {
                    write_table_features(table, version, registry, out)?;
                }
            }
            B::Experimenter(experimenter) => write_experimenter_multipart(
                experimenter,
                ExperimenterSpace::MultipartRequest,
                version,
                registry,
                out,
            )?,
        }
        update_header_length(out, start)
    }
}

fn write_flow_stats(
    stats: &FlowStats,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    let start = out.position();
    let mark = out.reserve_length(start);
    out.write_u8(stats.table_id)?;
    out.write_zeros(1);
    out.write_u32::<BigEndian>(stats.duration_sec)?;
    out.write_u32::<BigEndian>(stats.duration_nsec)?;
    out.write_u16::<BigEndian>(stats.priority)?;
    out.write_u16::<BigEndian>(stats.idle_timeout)?;
    out.write_u16::<BigEndian>(stats.hard_timeout)?;
    out.write_u16::<BigEndian>(pack(tables::flow_mod_flags(version), stats.flags) as u16)?;
    out.write_zeros(4);
    out.write_u64::<BigEndian>(stats.cookie)?;
    out.write_u64::<BigEndian>(stats.packet_count)?;
    out.write_u64::<BigEndian>(stats.byte_count)?;
    write_match(&stats.mmatch, version, registry, out)?;
    write_instructions(&stats.instructions, version, registry, out)?;
    out.patch_length(mark)?;
    Ok(())
}

fn write_group_stats(stats: &GroupStats, out: &mut Vec<u8>) -> Result<()> {
    let start = out.position();
    let mark = out.reserve_length(start);
    out.write_zeros(2);
    out.write_u32::<BigEndian>(stats.group_id)?;
    out.write_u32::<BigEndian>(stats.ref_count)?;
    out.write_zeros(4);
    out.write_u64::<BigEndian>(stats.packet_count)?;
    out.write_u64::<BigEndian>(stats.byte_count)?;
    out.write_u32::<BigEndian>(stats.duration_sec)?;
    out.write_u32::<BigEndian>(stats.duration_nsec)?;
    for bucket in &stats.bucket_stats {
        out.write_u64::<BigEndian>(bucket.packet_count)?;
        out.write_u64::<BigEndian>(bucket.byte_count)?;
    }
    out.patch_length(mark)?;
    Ok(())
}

fn write_group_desc(
    desc: &GroupDesc,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    let start = out.position();
    let mark = out.reserve_length(start);
    out.write_u8(desc.ttype as u8)?;
    out.write_zeros(1);
    out.write_u32::<BigEndian>(desc.group_id)?;
    write_buckets(&desc.buckets, version, registry, out)?;
    out.patch_length(mark)?;
    Ok(())
}

fn write_group_features(features: &GroupFeatures, out: &mut Vec<u8>) -> Result<()> {
    out.write_u32::<BigEndian>(pack(tables::GROUP_TYPES, features.types))?;
    out.write_u32::<BigEndian>(pack(tables::GROUP_CAPABILITIES, features.capabilities))?;
    for max in &features.max_groups {
        out.write_u32::<BigEndian>(*max)?;
    }
    for actions in &features.actions {
        out.write_u32::<BigEndian>(pack(tables::ACTION_TYPES_V13, *actions))?;
    }
    Ok(())
}

fn write_meter_stats(stats: &MeterStats, out: &mut Vec<u8>) -> Result<()> {
    let start = out.position();
    out.write_u32::<BigEndian>(stats.meter_id)?;
    let mark = out.reserve_length(start);
    out.write_zeros(6);
    out.write_u32::<BigEndian>(stats.flow_count)?;
    out.write_u64::<BigEndian>(stats.packet_in_count)?;
    out.write_u64::<BigEndian>(stats.byte_in_count)?;
    out.write_u32::<BigEndian>(stats.duration_sec)?;
    out.write_u32::<BigEndian>(stats.duration_nsec)?;
    for band in &stats.band_stats {
        out.write_u64::<BigEndian>(band.packet_band_count)?;
        out.write_u64::<BigEndian>(band.byte_band_count)?;
    }
    out.patch_length(mark)?;
    Ok(())
}

fn write_meter_config(
    config: &MeterConfig,
    version: Version,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    let start = out.position();
    let mark = out.reserve_length(start);
    out.write_u16::<BigEndian>(pack(tables::METER_FLAGS, config.flags) as u16)?;
    out.write_u32::<BigEndian>(config.meter_id)?;
    write_meter_bands(&config.bands, version, registry, out)?;
    out.patch_length(mark)?;
    Ok(())
}

fn write_meter_features(features: &MeterFeatures, out: &mut Vec<u8>) -> Result<()> {
    out.write_u32::<BigEndian>(features.max_meter)?;
    out.write_u32::<BigEndian>(pack(tables::METER_BAND_TYPES, features.band_types))?;
    out.write_u32::<BigEndian>(pack(tables::METER_FLAGS, features.capabilities))?;
    out.write_u8(features.max_bands)?;
    out.write_u8(features.max_color)?;
    out.write_zeros(2);
    Ok(())
}

pub struct MultipartReplySerializer;

impl OfSerializer<OfMsg> for MultipartReplySerializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        use crate::ds::multipart::MultipartReplyBody as B;

        let reply = expect_payload!(msg, MultipartReply);
        let version = *msg.version();
        let start = start_message(Type::MultipartReply, msg, out)?;
        write_multipart_header(reply.body.multipart_type(), reply.flags, out)?;
        match &reply.body {
            B::Desc(desc) => write_desc(desc, out)?,
            B::Flow(flows) => {
                for stats in flows {
                    write_flow_stats(stats, version, registry, out)?;
                }
            }
            B::Aggregate(aggregate) => write_aggregate(aggregate, out)?,
            B::Table(table_stats) => {
                for stats in table_stats {
                    out.write_u8(stats.table_id)?;
                    out.write_zeros(3);
                    out.write_u32::<BigEndian>(stats.active_count)?;
                    out.write_u64::<BigEndian>(stats.lookup_count)?;
                    out.write_u64::<BigEndian>(stats.matched_count)?;
                }
            }
            B::PortStats(ports) => {
                for stats in ports {
                    out.write_u32::<BigEndian>(stats.port_no.wire())?;
                    out.write_zeros(4);
                    write_port_counters(&stats.counters, out)?;
                    out.write_u32::<BigEndian>(stats.duration_sec)?;
                    out.write_u32::<BigEndian>(stats.duration_nsec)?;
                }
            }
            B::Queue(queues) => {
                for stats in queues {
                    out.write_u32::<BigEndian>(stats.port_no.wire())?;
                    out.write_u32::<BigEndian>(stats.queue_id)?;
                    out.write_u64::<BigEndian>(stats.tx_bytes)?;
                    out.write_u64::<BigEndian>(stats.tx_packets)?;
                    out.write_u64::<BigEndian>(stats.tx_errors)?;
                    out.write_u32::<BigEndian>(stats.duration_sec)?;
                    out.write_u32::<BigEndian>(stats.duration_nsec)?;
                }
            }
            B::Group(groups) => {
                for stats in groups {
                    write_group_stats(stats, out)?;
                }
            }
            B::GroupDesc(descs) => {
                for desc in descs {
                    write_group_desc(desc, version, registry, out)?;
                }
            }
            B::GroupFeatures(features) => write_group_features(features, out)?,
            B::Meter(meters) => {
                for stats in meters {
                    write_meter_stats(stats, out)?;
                }
            }
            B::MeterConfig(configs) => {
                for config in configs {
                    write_meter_config(config, version, registry, out)?;
                }
            }
            B::MeterFeatures(features) => write_meter_features(features, out)?,
            B::TableFeatures(features) => {
                for table in features {
                    write_table_features(table, version, registry, out)?;
                }
            }
            B::PortDesc(ports) => {
                for port in ports {
                    write_port(port, out)?;
                }
            }
            B::Experimenter(experimenter) => write_experimenter_multipart(
                experimenter,
                ExperimenterSpace::MultipartReply,
                version,
                registry,
                out,
            )?,
        }
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register_message(Version::V1_3, Type::MultipartRequest, MultipartRequestSerializer)
        .register_message(Version::V1_3, Type::MultipartReply, MultipartReplySerializer)
}
