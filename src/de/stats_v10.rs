//! OpenFlow 1.0 stats replies. Desc, aggregate and port counters share the
//! 1.3 layouts.

use byteorder::{BigEndian, ReadBytesExt};
use num_traits::FromPrimitive;
use std::convert::TryFrom;
use std::io::{Cursor, Seek, SeekFrom};

use super::elements::{read_actions_v10, read_elements, read_match_v10, records};
use super::multipart::{read_aggregate, read_desc, read_port_counters};
use super::{expect_len, read_fixed_str, rest, BodyCursor};
use crate::bits::{tables, unpack};
use crate::buf::TABLE_NAME_LEN;
use crate::ds::ports::PortNumberV10;
use crate::ds::stats_v10::*;
use crate::err::*;

const FLOW_STATS_LEN: usize = 88;
const TABLE_STATS_LEN: usize = 64;
const PORT_STATS_LEN: usize = 104;
const QUEUE_STATS_LEN: usize = 32;

/// Reads a 1.0 stats reply body, stats header included.
pub(super) fn read_stats_reply_v10(body: &[u8]) -> Result<StatsReplyV10> {
    use crate::ds::stats_v10::StatsReplyBodyV10 as B;

    expect_len(body, STATS_HEADER_LENGTH, stringify!(StatsReplyV10))?;
    let mut cursor = Cursor::new(body);
    let raw_type = cursor.read_u16::<BigEndian>()?;
    let ttype = StatsTypeV10::from_u16(raw_type).ok_or_else(|| {
        Error::from(ErrorKind::UnknownValue(raw_type as u64, stringify!(StatsTypeV10)))
    })?;
    let flags = unpack(tables::MULTIPART_FLAGS, cursor.read_u16::<BigEndian>()? as u32);
    let items = &body[STATS_HEADER_LENGTH..];
    let body = match ttype {
        StatsTypeV10::Desc => B::Desc(read_desc(items)?),
        StatsTypeV10::Flow => B::Flow(read_elements(
            items,
            0,
            FLOW_STATS_LEN,
            stringify!(FlowStatsV10),
            read_flow_stats,
        )?),
        StatsTypeV10::Aggregate => B::Aggregate(read_aggregate(items)?),
        StatsTypeV10::Table => B::Table(
            records(items, TABLE_STATS_LEN, stringify!(TableStatsV10))?
                .map(|mut record| read_table_stats(&mut record))
                .collect::<Result<_>>()?,
        ),
        StatsTypeV10::Port => B::Port(
            records(items, PORT_STATS_LEN, stringify!(PortStatsV10))?
                .map(|mut record| read_port_stats(&mut record))
                .collect::<Result<_>>()?,
        ),
        StatsTypeV10::Queue => B::Queue(
            records(items, QUEUE_STATS_LEN, stringify!(QueueStatsV10))?
                .map(|mut record| read_queue_stats(&mut record))
                .collect::<Result<_>>()?,
        ),
        StatsTypeV10::Vendor => {
            expect_len(items, 4, stringify!(VendorStats))?;
            let mut cursor = Cursor::new(items);
            B::Vendor(VendorStats {
                vendor_id: cursor.read_u32::<BigEndian>()?,
                data: rest(&cursor),
            })
        }
    };
    trace!("Read {:?} stats reply, flags {:?}", ttype, flags);
    Ok(StatsReplyV10 { flags, body })
}

fn read_flow_stats(element: &[u8]) -> Result<FlowStatsV10> {
    let mut cursor = Cursor::new(element);
    cursor.seek(SeekFrom::Start(2))?;
    let table_id = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(1))?;
    let mmatch = read_match_v10(&mut cursor)?;
    let duration_sec = cursor.read_u32::<BigEndian>()?;
    let duration_nsec = cursor.read_u32::<BigEndian>()?;
    let priority = cursor.read_u16::<BigEndian>()?;
    let idle_timeout = cursor.read_u16::<BigEndian>()?;
    let hard_timeout = cursor.read_u16::<BigEndian>()?;
    cursor.seek(SeekFrom::Current(6))?;
    Ok(FlowStatsV10 {
        table_id,
        mmatch,
        duration_sec,
        duration_nsec,
        priority,
        idle_timeout,
        hard_timeout,
        cookie: cursor.read_u64::<BigEndian>()?,
        packet_count: cursor.read_u64::<BigEndian>()?,
        byte_count: cursor.read_u64::<BigEndian>()?,
        actions: read_actions_v10(&element[FLOW_STATS_LEN..])?,
    })
}

fn read_table_stats(cursor: &mut BodyCursor) -> Result<TableStatsV10> {
    let table_id = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(3))?;
    Ok(TableStatsV10 {
        table_id,
        name: read_fixed_str(cursor, TABLE_NAME_LEN)?,
        wildcards: cursor.read_u32::<BigEndian>()?,
        max_entries: cursor.read_u32::<BigEndian>()?,
        active_count: cursor.read_u32::<BigEndian>()?,
        lookup_count: cursor.read_u64::<BigEndian>()?,
        matched_count: cursor.read_u64::<BigEndian>()?,
    })
}

fn read_port_stats(cursor: &mut BodyCursor) -> Result<PortStatsV10> {
    let port_no = PortNumberV10::try_from(cursor.read_u16::<BigEndian>()?)?;
    cursor.seek(SeekFrom::Current(6))?;
    Ok(PortStatsV10 {
        port_no,
        counters: read_port_counters(cursor)?,
    })
}

fn read_queue_stats(cursor: &mut BodyCursor) -> Result<QueueStatsV10> {
    let port_no = PortNumberV10::try_from(cursor.read_u16::<BigEndian>()?)?;
    cursor.seek(SeekFrom::Current(2))?;
    Ok(QueueStatsV10 {
        port_no,
        queue_id: cursor.read_u32::<BigEndian>()?,
        tx_bytes: cursor.read_u64::<BigEndian>()?,
        tx_packets: cursor.read_u64::<BigEndian>()?,
        tx_errors: cursor.read_u64::<BigEndian>()?,
    })
}
