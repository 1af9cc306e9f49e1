//! OpenFlow 1.3 multipart replies.
//!
//! Mirrors `ser::multipart`: the multipart header, then one body shape per
//! multipart type. Element lists run to the end of the message.

use byteorder::{BigEndian, ReadBytesExt};
use num_traits::FromPrimitive;
use std::convert::TryFrom;
use std::io::{Cursor, Seek, SeekFrom};

use super::elements::{
    read_buckets, read_elements, read_instructions, read_match, read_meter_bands, read_port,
    read_table_features, records,
};
use super::{expect_len, read_fixed_str, rest, BodyCursor};
use crate::bits::{tables, unpack};
use crate::buf::{DESC_STR_LEN, SERIAL_NUM_LEN};
use crate::ds::actions::ActionTypes;
use crate::ds::group_mod::GroupType;
use crate::ds::multipart::*;
use crate::ds::ports::{PortNumber, PORT_LEN};
use crate::ds::table_features::TABLE_FEATURES_LENGTH;
use crate::err::*;
use crate::header::Version;

pub(super) const DESC_LEN: usize = 4 * DESC_STR_LEN + SERIAL_NUM_LEN;
pub(super) const AGGREGATE_LEN: usize = 24;
const PORT_COUNTERS_LEN: usize = 96;
const FLOW_STATS_LEN: usize = 48;
const TABLE_STATS_LEN: usize = 24;
const PORT_STATS_LEN: usize = 8 + PORT_COUNTERS_LEN + 8;
const QUEUE_STATS_LEN: usize = 40;
const GROUP_STATS_LEN: usize = 40;
const GROUP_DESC_LEN: usize = 8;
const GROUP_FEATURES_LEN: usize = 40;
const METER_STATS_LEN: usize = 40;
const METER_CONFIG_LEN: usize = 8;
const METER_FEATURES_LEN: usize = 16;
const COUNTER_PAIR_LEN: usize = 16;

pub(super) fn read_desc(body: &[u8]) -> Result<Desc> {
    expect_len(body, DESC_LEN, stringify!(Desc))?;
    let mut cursor = Cursor::new(body);
    Ok(Desc {
        mfr_desc: read_fixed_str(&mut cursor, DESC_STR_LEN)?,
        hw_desc: read_fixed_str(&mut cursor, DESC_STR_LEN)?,
        sw_desc: read_fixed_str(&mut cursor, DESC_STR_LEN)?,
        serial_num: read_fixed_str(&mut cursor, SERIAL_NUM_LEN)?,
        dp_desc: read_fixed_str(&mut cursor, DESC_STR_LEN)?,
    })
}

pub(super) fn read_aggregate(body: &[u8]) -> Result<AggregateStats> {
    expect_len(body, AGGREGATE_LEN, stringify!(AggregateStats))?;
    let mut cursor = Cursor::new(body);
    Ok(AggregateStats {
        packet_count: cursor.read_u64::<BigEndian>()?,
        byte_count: cursor.read_u64::<BigEndian>()?,
        flow_count: cursor.read_u32::<BigEndian>()?,
    })
}

pub(super) fn read_port_counters(cursor: &mut BodyCursor) -> Result<PortCounters> {
    let mut counters = [0u64; 12];
    for counter in counters.iter_mut() {
        *counter = cursor.read_u64::<BigEndian>()?;
    }
    let [
        rx_packets,
        tx_packets,
        rx_bytes,
        tx_bytes,
        rx_dropped,
        tx_dropped,
        rx_errors,
        tx_errors,
        rx_frame_err,
        rx_over_err,
        rx_crc_err,
        collisions,
    ] = counters;
    Ok(PortCounters {
        rx_packets,
        tx_packets,
        rx_bytes,
        tx_bytes,
        rx_dropped,
        tx_dropped,
        rx_errors,
        tx_errors,
        rx_frame_err,
        rx_over_err,
        rx_crc_err,
        collisions,
    })
}

/// Reads a `MultipartReply` message body, multipart header included.
pub(super) fn read_multipart_reply(body: &[u8]) -> Result<MultipartReply> {
    use crate::ds::multipart::MultipartReplyBody as B;

    expect_len(body, MULTIPART_HEADER_LENGTH, stringify!(MultipartReply))?;
    let mut cursor = Cursor::new(body);
    let raw_type = cursor.read_u16::<BigEndian>()?;
    let ttype = MultipartType::from_u16(raw_type).ok_or_else(|| {
        Error::from(ErrorKind::UnknownValue(raw_type as u64, stringify!(MultipartType)))
    })?;
    let flags = unpack(tables::MULTIPART_FLAGS, cursor.read_u16::<BigEndian>()? as u32);
    let items = &body[MULTIPART_HEADER_LENGTH..];
    let body = match ttype {
        MultipartType::Desc => B::Desc(read_desc(items)?),
        MultipartType::Flow => B::Flow(read_elements(
            items,
            0,
            FLOW_STATS_LEN,
            stringify!(FlowStats),
            read_flow_stats,
        )?),
        MultipartType::Aggregate => B::Aggregate(read_aggregate(items)?),
        MultipartType::Table => B::Table(
            records(items, TABLE_STATS_LEN, stringify!(TableStats))?
                .map(|mut record| read_table_stats(&mut record))
                .collect::<Result<_>>()?,
        ),
        MultipartType::PortStats => B::PortStats(
            records(items, PORT_STATS_LEN, stringify!(PortStats))?
                .map(|mut record| read_port_stats(&mut record))
                .collect::<Result<_>>()?,
        ),
        MultipartType::Queue => B::Queue(
            records(items, QUEUE_STATS_LEN, stringify!(QueueStats))?
                .map(|mut record| read_queue_stats(&mut record))
                .collect::<Result<_>>()?,
        ),
        MultipartType::Group => B::Group(read_elements(
            items,
            0,
            GROUP_STATS_LEN,
            stringify!(GroupStats),
            read_group_stats,
        )?),
        MultipartType::GroupDesc => B::GroupDesc(read_elements(
            items,
            0,
            GROUP_DESC_LEN,
            stringify!(GroupDesc),
            read_group_desc,
        )?),
        MultipartType::GroupFeatures => B::GroupFeatures(read_group_features(items)?),
        MultipartType::Meter => B::Meter(read_elements(
            items,
            4,
            METER_STATS_LEN,
            stringify!(MeterStats),
            read_meter_stats,
        )?),
        MultipartType::MeterConfig => B::MeterConfig(read_elements(
            items,
            0,
            METER_CONFIG_LEN,
            stringify!(MeterConfig),
            read_meter_config,
        )?),
        MultipartType::MeterFeatures => B::MeterFeatures(read_meter_features(items)?),
        MultipartType::TableFeatures => B::TableFeatures(read_elements(
            items,
            0,
            TABLE_FEATURES_LENGTH,
            stringify!(TableFeatures),
            read_table_features,
        )?),
        MultipartType::PortDesc => B::PortDesc(
            records(items, PORT_LEN, stringify!(Port))?
                .map(|mut record| read_port(&mut record))
                .collect::<Result<_>>()?,
        ),
        MultipartType::Experimenter => {
            expect_len(items, 8, stringify!(ExperimenterMultipart))?;
            let mut cursor = Cursor::new(items);
            B::Experimenter(ExperimenterMultipart {
                experimenter_id: cursor.read_u32::<BigEndian>()?,
                exp_type: cursor.read_u32::<BigEndian>()?,
                data: rest(&cursor),
            })
        }
    };
    trace!("Read {:?} multipart reply, flags {:?}", ttype, flags);
    Ok(MultipartReply { flags, body })
}

fn read_flow_stats(element: &[u8]) -> Result<FlowStats> {
    let v13 = Version::V1_3;
    let mut cursor = Cursor::new(element);
    cursor.seek(SeekFrom::Start(2))?;
    let table_id = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(1))?;
    let duration_sec = cursor.read_u32::<BigEndian>()?;
    let duration_nsec = cursor.read_u32::<BigEndian>()?;
    let priority = cursor.read_u16::<BigEndian>()?;
    let idle_timeout = cursor.read_u16::<BigEndian>()?;
    let hard_timeout = cursor.read_u16::<BigEndian>()?;
    let flags = unpack(tables::flow_mod_flags(v13), cursor.read_u16::<BigEndian>()? as u32);
    cursor.seek(SeekFrom::Current(4))?;
    let cookie = cursor.read_u64::<BigEndian>()?;
    let packet_count = cursor.read_u64::<BigEndian>()?;
    let byte_count = cursor.read_u64::<BigEndian>()?;
    let (mmatch, match_len) = read_match(&element[FLOW_STATS_LEN..])?;
    Ok(FlowStats {
        table_id,
        duration_sec,
        duration_nsec,
        priority,
        idle_timeout,
        hard_timeout,
        flags,
        cookie,
        packet_count,
        byte_count,
        mmatch,
        instructions: read_instructions(&element[FLOW_STATS_LEN + match_len..])?,
    })
}

fn read_table_stats(cursor: &mut BodyCursor) -> Result<TableStats> {
    let table_id = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(3))?;
    Ok(TableStats {
        table_id,
        active_count: cursor.read_u32::<BigEndian>()?,
        lookup_count: cursor.read_u64::<BigEndian>()?,
        matched_count: cursor.read_u64::<BigEndian>()?,
    })
}

fn read_port_stats(cursor: &mut BodyCursor) -> Result<PortStats> {
    let port_no = PortNumber::try_from(cursor.read_u32::<BigEndian>()?)?;
    cursor.seek(SeekFrom::Current(4))?;
    Ok(PortStats {
        port_no,
        counters: read_port_counters(cursor)?,
        duration_sec: cursor.read_u32::<BigEndian>()?,
        duration_nsec: cursor.read_u32::<BigEndian>()?,
    })
}

fn read_queue_stats(cursor: &mut BodyCursor) -> Result<QueueStats> {
    Ok(QueueStats {
        port_no: PortNumber::try_from(cursor.read_u32::<BigEndian>()?)?,
        queue_id: cursor.read_u32::<BigEndian>()?,
        tx_bytes: cursor.read_u64::<BigEndian>()?,
        tx_packets: cursor.read_u64::<BigEndian>()?,
        tx_errors: cursor.read_u64::<BigEndian>()?,
        duration_sec: cursor.read_u32::<BigEndian>()?,
        duration_nsec: cursor.read_u32::<BigEndian>()?,
    })
}

fn read_group_stats(element: &[u8]) -> Result<GroupStats> {
    let mut cursor = Cursor::new(element);
    cursor.seek(SeekFrom::Start(4))?;
    let group_id = cursor.read_u32::<BigEndian>()?;
    let ref_count = cursor.read_u32::<BigEndian>()?;
    cursor.seek(SeekFrom::Current(4))?;
    Ok(GroupStats {
        group_id,
        ref_count,
        packet_count: cursor.read_u64::<BigEndian>()?,
        byte_count: cursor.read_u64::<BigEndian>()?,
        duration_sec: cursor.read_u32::<BigEndian>()?,
        duration_nsec: cursor.read_u32::<BigEndian>()?,
        bucket_stats: records(
            &element[GROUP_STATS_LEN..],
            COUNTER_PAIR_LEN,
            stringify!(BucketCounter),
        )?
        .map(|mut record| -> Result<BucketCounter> {
            Ok(BucketCounter {
                packet_count: record.read_u64::<BigEndian>()?,
                byte_count: record.read_u64::<BigEndian>()?,
            })
        })
        .collect::<Result<_>>()?,
    })
}

fn read_group_desc(element: &[u8]) -> Result<GroupDesc> {
    let mut cursor = Cursor::new(element);
    cursor.seek(SeekFrom::Start(2))?;
    let raw_type = cursor.read_u8()?;
    let ttype = GroupType::from_u8(raw_type).ok_or_else(|| {
        Error::from(ErrorKind::UnknownValue(raw_type as u64, stringify!(GroupType)))
    })?;
    cursor.seek(SeekFrom::Current(1))?;
    Ok(GroupDesc {
        ttype,
        group_id: cursor.read_u32::<BigEndian>()?,
        buckets: read_buckets(&element[GROUP_DESC_LEN..])?,
    })
}

fn read_group_features(body: &[u8]) -> Result<GroupFeatures> {
    expect_len(body, GROUP_FEATURES_LEN, stringify!(GroupFeatures))?;
    let mut cursor = Cursor::new(body);
    let types = unpack(tables::GROUP_TYPES, cursor.read_u32::<BigEndian>()?);
    let capabilities = unpack(tables::GROUP_CAPABILITIES, cursor.read_u32::<BigEndian>()?);
    let mut max_groups = [0u32; 4];
    for max in max_groups.iter_mut() {
        *max = cursor.read_u32::<BigEndian>()?;
    }
    let mut actions = [ActionTypes::empty(); 4];
    for slot in actions.iter_mut() {
        *slot = unpack(tables::ACTION_TYPES_V13, cursor.read_u32::<BigEndian>()?);
    }
    Ok(GroupFeatures {
        types,
        capabilities,
        max_groups,
        actions,
    })
}

fn read_meter_stats(element: &[u8]) -> Result<MeterStats> {
    let mut cursor = Cursor::new(element);
    let meter_id = cursor.read_u32::<BigEndian>()?;
    cursor.seek(SeekFrom::Current(8))?;
    Ok(MeterStats {
        meter_id,
        flow_count: cursor.read_u32::<BigEndian>()?,
        packet_in_count: cursor.read_u64::<BigEndian>()?,
        byte_in_count: cursor.read_u64::<BigEndian>()?,
        duration_sec: cursor.read_u32::<BigEndian>()?,
        duration_nsec: cursor.read_u32::<BigEndian>()?,
        band_stats: records(
            &element[METER_STATS_LEN..],
            COUNTER_PAIR_LEN,
            stringify!(MeterBandStats),
        )?
        .map(|mut record| -> Result<MeterBandStats> {
            Ok(MeterBandStats {
                packet_band_count: record.read_u64::<BigEndian>()?,
                byte_band_count: record.read_u64::<BigEndian>()?,
            })
        })
        .collect::<Result<_>>()?,
    })
}

fn read_meter_config(element: &[u8]) -> Result<MeterConfig> {
    let mut cursor = Cursor::new(element);
    cursor.seek(SeekFrom::Start(2))?;
    Ok(MeterConfig {
        flags: unpack(tables::METER_FLAGS, cursor.read_u16::<BigEndian>()? as u32),
        meter_id: cursor.read_u32::<BigEndian>()?,
        bands: read_meter_bands(&element[METER_CONFIG_LEN..])?,
    })
}

fn read_meter_features(body: &[u8]) -> Result<MeterFeatures> {
    expect_len(body, METER_FEATURES_LEN, stringify!(MeterFeatures))?;
    let mut cursor = Cursor::new(body);
    Ok(MeterFeatures {
        max_meter: cursor.read_u32::<BigEndian>()?,
        band_types: unpack(tables::METER_BAND_TYPES, cursor.read_u32::<BigEndian>()?),
        capabilities: unpack(tables::METER_FLAGS, cursor.read_u32::<BigEndian>()?),
        max_bands: cursor.read_u8()?,
        max_color: cursor.read_u8()?,
    })
}
