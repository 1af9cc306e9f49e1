//! OpenFlow 1.0 stats requests and replies.
//!
//! Same message codes as 1.3 multipart, but the stats header has no padding
//! and every body uses the fixed 1.0 match and 16 bit ports.

use byteorder::{BigEndian, WriteBytesExt};

use crate::bits::{pack, tables};
use crate::buf::{WireBuf, TABLE_NAME_LEN};
use crate::ds::multipart::MultipartFlags;
use crate::ds::stats_v10::*;
use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{update_header_length, Type, Version};
use crate::registry::*;
use crate::ser::action_codec::write_actions_v10;
use crate::ser::match_codec::write_match_v10;
use crate::ser::multipart::{write_aggregate, write_desc, write_port_counters};
use crate::ser::{start_message, write_experimenter_body};

fn write_stats_header(ttype: StatsTypeV10, flags: MultipartFlags, out: &mut Vec<u8>) -> Result<()> {
    out.write_u16::<BigEndian>(ttype as u16)?;
    out.write_u16::<BigEndian>(pack(tables::MULTIPART_FLAGS, flags) as u16)?;
    Ok(())
}

fn write_vendor(
    vendor: &VendorStats,
    space: ExperimenterSpace,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.write_u32::<BigEndian>(vendor.vendor_id)?;
    let key = ExperimenterKey::new(Version::V1_0, space, vendor.vendor_id, None);
    write_experimenter_body(vendor, key, registry, out)
}

pub struct StatsRequestV10Serializer;

impl OfSerializer<OfMsg> for StatsRequestV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        use crate::ds::stats_v10::StatsRequestBodyV10 as B;

        let request = expect_payload!(msg, StatsRequestV10);
        let start = start_message(Type::MultipartRequest, msg, out)?;
        write_stats_header(request.body.stats_type(), request.flags, out)?;
        match &request.body {
            B::Desc | B::Table => {}
            B::Flow(flow) | B::Aggregate(flow) => {
                write_match_v10(&flow.mmatch, registry, out)?;
                out.write_u8(flow.table_id)?;
                out.write_zeros(1);
                out.write_u16::<BigEndian>(flow.out_port.wire())?;
            }
            B::Port(port_no) => {
                out.write_u16::<BigEndian>(port_no.wire())?;
                out.write_zeros(6);
            }
            B::Queue(queue) => {
                out.write_u16::<BigEndian>(queue.port_no.wire())?;
                out.write_zeros(2);
                out.write_u32::<BigEndian>(queue.queue_id)?;
            }
            B::Vendor(vendor) => {
                write_vendor(vendor, ExperimenterSpace::MultipartRequest, registry, out)?
            }
        }
        update_header_length(out, start)
    }
}

fn write_flow_stats(stats: &FlowStatsV10, registry: &SerializerRegistry, out: &mut Vec<u8>) -> Result<()> {
    let start = out.position();
    let mark = out.reserve_length(start);
    out.write_u8(stats.table_id)?;
    out.write_zeros(1);
    write_match_v10(&stats.mmatch, registry, out)?;
    out.write_u32::<BigEndian>(stats.duration_sec)?;
    out.write_u32::<BigEndian>(stats.duration_nsec)?;
    out.write_u16::<BigEndian>(stats.priority)?;
    out.write_u16::<BigEndian>(stats.idle_timeout)?;
    out.write_u16::<BigEndian>(stats.hard_timeout)?;
    out.write_zeros(6);
    out.write_u64::<BigEndian>(stats.cookie)?;
    out.write_u64::<BigEndian>(stats.packet_count)?;
    out.write_u64::<BigEndian>(stats.byte_count)?;
    write_actions_v10(&stats.actions, registry, out)?;
    out.patch_length(mark)?;
    Ok(())
}

pub struct StatsReplyV10Serializer;

impl OfSerializer<OfMsg> for StatsReplyV10Serializer {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()> {
        use crate::ds::stats_v10::StatsReplyBodyV10 as B;

        let reply = expect_payload!(msg, StatsReplyV10);
        let start = start_message(Type::MultipartReply, msg, out)?;
        write_stats_header(reply.body.stats_type(), reply.flags, out)?;
        match &reply.body {
            B::Desc(desc) => write_desc(desc, out)?,
            B::Flow(flows) => {
                for stats in flows {
                    write_flow_stats(stats, registry, out)?;
                }
            }
            B::Aggregate(aggregate) => write_aggregate(aggregate, out)?,
            B::Table(table_stats) => {
                for stats in table_stats {
                    out.write_u8(stats.table_id)?;
                    out.write_zeros(3);
                    out.write_fixed_str(&stats.name, TABLE_NAME_LEN)?;
                    out.write_u32::<BigEndian>(stats.wildcards)?;
                    out.write_u32::<BigEndian>(stats.max_entries)?;
                    out.write_u32::<BigEndian>(stats.active_count)?;
                    out.write_u64::<BigEndian>(stats.lookup_count)?;
                    out.write_u64::<BigEndian>(stats.matched_count)?;
                }
            }
            B::Port(ports) => {
                for stats in ports {
                    out.write_u16::<BigEndian>(stats.port_no.wire())?;
                    out.write_zeros(6);
                    write_port_counters(&stats.counters, out)?;
                }
            }
            B::Queue(queues) => {
                for stats in queues {
                    out.write_u16::<BigEndian>(stats.port_no.wire())?;
                    out.write_zeros(2);
                    out.write_u32::<BigEndian>(stats.queue_id)?;
                    out.write_u64::<BigEndian>(stats.tx_bytes)?;
                    out.write_u64::<BigEndian>(stats.tx_packets)?;
                    out.write_u64::<BigEndian>(stats.tx_errors)?;
                }
            }
            B::Vendor(vendor) => write_vendor(vendor, ExperimenterSpace::MultipartReply, registry, out)?,
        }
        update_header_length(out, start)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register_message(Version::V1_0, Type::MultipartRequest, StatsRequestV10Serializer)
        .register_message(Version::V1_0, Type::MultipartReply, StatsReplyV10Serializer)
}
