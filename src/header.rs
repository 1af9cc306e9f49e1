use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::io::Cursor;

use crate::buf::{LengthMark, WireBuf};
use crate::ds::OfMsg;
use crate::err::*;

/// OpenFlow message header length is 8 bytes.
pub const HEADER_LENGTH: usize = 8;

/// OpenFlow Version enum.
///
/// Declared in wire order, so the derived ordering doubles as "since"
/// comparisons (`V1_0 < V1_3`).
#[derive(Primitive, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Version {
    /// indicates OpenFlow version 1.0
    V1_0 = 0x01,
    /// indicates OpenFlow version 1.1
    V1_1 = 0x02,
    /// indicates OpenFlow version 1.2
    V1_2 = 0x03,
    /// indicates OpenFlow version 1.3
    V1_3 = 0x04,
}

impl Version {
    pub const ALL: [Version; 4] = [Version::V1_0, Version::V1_1, Version::V1_2, Version::V1_3];

    /// Wire byte of the version.
    pub fn wire(self) -> u8 {
        self as u8
    }
}

/// Enum of OpenFlow message types.
///
/// Discriminants are the OpenFlow 1.1+ codes; use [`Type::code`] for the
/// wire value of a given version.
#[derive(Primitive, PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Type {
    /* Immutable messages. */
    /// Hello message sent by switch and controller
    /// directly after establishing a connection.
    /// Symmetric message.
    Hello = 0,
    /// Symmetric message
    Error = 1,
    /// Symmetric message
    EchoRequest = 2,
    /// Symmetric message
    EchoReply = 3,
    /// Symmetric message, called vendor in OpenFlow 1.0
    Experimenter = 4,

    /* Switch configuration messages. */
    /// Controller/switch message
    FeaturesRequest = 5,
    /// Controller/switch message
    FeaturesReply = 6,
    /// Controller/switch message
    GetConfigRequest = 7,
    /// Controller/switch message
    GetConfigReply = 8,
    /// Controller/switch message
    SetConfig = 9,

    /* Asynchronous messages. */
    /// Async message
    PacketIn = 10,
    /// Async message
    FlowRemoved = 11,
    /// Async message
    PortStatus = 12,

    /* Controller command messages. */
    /// Controller/switch message
    PacketOut = 13,
    /// Controller/switch message
    FlowMod = 14,
    /// Controller/switch message
    GroupMod = 15,
    /// Controller/switch message
    PortMod = 16,
    /// Controller/switch message
    TableMod = 17,

    /* Multipart messages, stats messages in OpenFlow 1.0. */
    /// Controller/switch message
    MultipartRequest = 18,
    /// Controller/switch message
    MultipartReply = 19,

    /* Barrier messages. */
    /// Controller/switch message
    BarrierRequest = 20,
    /// Controller/switch message
    BarrierReply = 21,

    /* Queue Configuration messages. */
    /// Controller/switch message
    QueueGetConfigRequest = 22,
    /// Controller/switch message
    QueueGetConfigReply = 23,

    /* Controller role change request messages. */
    /// Controller/switch message
    RoleRequest = 24,
    /// Controller/switch message
    RoleReply = 25,

    /* Asynchronous message configuration.  */
    /// Controller/switch message
    GetAsyncRequest = 26,
    /// Controller/switch message
    GetAsyncReply = 27,
    /// Controller/switch message
    SetAsync = 28,

    /* Meters and rate limiters configuration messages. */
    /// Controller/switch message
    MeterMod = 29,
}

/// OpenFlow 1.0 message codes. Kinds missing here do not exist in 1.0.
static V1_0_CODES: &[(Type, u8)] = &[
    (Type::Hello, 0),
    (Type::Error, 1),
    (Type::EchoRequest, 2),
    (Type::EchoReply, 3),
    (Type::Experimenter, 4),
    (Type::FeaturesRequest, 5),
    (Type::FeaturesReply, 6),
    (Type::GetConfigRequest, 7),
    (Type::GetConfigReply, 8),
    (Type::SetConfig, 9),
    (Type::PacketIn, 10),
    (Type::FlowRemoved, 11),
    (Type::PortStatus, 12),
    (Type::PacketOut, 13),
    (Type::FlowMod, 14),
    (Type::PortMod, 15),
    (Type::MultipartRequest, 16),
    (Type::MultipartReply, 17),
    (Type::BarrierRequest, 18),
    (Type::BarrierReply, 19),
    (Type::QueueGetConfigRequest, 20),
    (Type::QueueGetConfigReply, 21),
];

impl Type {
    /// First protocol version that defines the message kind.
    pub fn since(self) -> Version {
        match self {
            Type::GroupMod | Type::TableMod => Version::V1_1,
            Type::RoleRequest | Type::RoleReply => Version::V1_2,
            Type::GetAsyncRequest | Type::GetAsyncReply | Type::SetAsync | Type::MeterMod => {
                Version::V1_3
            }
            _ => Version::V1_0,
        }
    }

    /// Wire code for `version`, `None` when the kind does not exist there.
    pub fn code(self, version: Version) -> Option<u8> {
        if version < self.since() {
            return None;
        }
        if version == Version::V1_0 {
            return V1_0_CODES
                .iter()
                .find(|(ttype, _)| *ttype == self)
                .map(|(_, code)| *code);
        }
        self.to_u8()
    }

    pub fn from_code(code: u8, version: Version) -> Option<Type> {
        if version == Version::V1_0 {
            return V1_0_CODES
                .iter()
                .find(|(_, wire)| *wire == code)
                .map(|(ttype, _)| *ttype);
        }
        Type::from_u8(code).filter(|ttype| ttype.since() <= version)
    }
}

/// OpenFlow header struct.
#[derive(Getters, Debug, PartialEq, Clone)]
pub struct Header {
    /// OpenFlow version identifier
    #[get = "pub"]
    version: Version,
    /// OpenFlow message  type
    #[get = "pub"]
    ttype: Type,
    /// length of message including this header
    #[get = "pub"]
    length: u16,
    /// Transaction id associated with this packet.
    /// Replies use the same id as was in the request
    /// to facilitate pairing.
    #[get = "pub"]
    xid: u32,
}

impl Header {
    pub fn new(version: Version, ttype: Type, length: u16, xid: u32) -> Self {
        Header {
            version,
            ttype,
            length,
            xid,
        }
    }

    /// returns the length of the payload in bytes
    /// equivalent to the length in the header - HEADER_LENGTH
    pub fn payload_length(&self) -> u16 {
        self.length.saturating_sub(HEADER_LENGTH as u16)
    }
}

impl<'a> TryFrom<&'a [u8]> for Header {
    type Error = Error;
    fn try_from(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            bail!(ErrorKind::InvalidSliceLength(
                HEADER_LENGTH,
                bytes.len(),
                stringify!(Header),
            ));
        }
        let mut cursor = Cursor::new(bytes);

        let version_raw = cursor.read_u8()?;
        let version = Version::from_u8(version_raw).ok_or::<Error>(
            ErrorKind::UnknownValue(version_raw as u64, stringify!(Version)).into(),
        )?;

        let ttype_raw = cursor.read_u8()?;
        let ttype = Type::from_code(ttype_raw, version).ok_or_else(|| {
            error!("Message type {} is unknown for {:?}", ttype_raw, version);
            Error::from(ErrorKind::UnknownValue(ttype_raw as u64, stringify!(Type)))
        })?;

        Ok(Header {
            version,
            ttype,
            length: cursor.read_u16::<BigEndian>()?,
            xid: cursor.read_u32::<BigEndian>()?,
        })
    }
}

/// Writes the common header with a placeholder length and returns the
/// offset the message starts at.
///
/// `ttype` is the factory's own wire code, never derived from the body.
pub fn write_header(ttype: u8, msg: &OfMsg, out: &mut Vec<u8>) -> Result<usize> {
    let start = out.position();
    out.write_u8(msg.version().wire())?;
    out.write_u8(ttype)?;
    out.write_u16::<BigEndian>(0)?; // length, patched last
    out.write_u32::<BigEndian>(*msg.xid())?;
    Ok(start)
}

/// Sets the header length of the message starting at `start` to the number
/// of bytes written since. Must run after the body is complete.
pub fn update_header_length(out: &mut Vec<u8>, start: usize) -> Result<()> {
    out.patch_length(LengthMark::new(start, start + 2))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::OfPayload;

    #[test]
    fn version_ordering_follows_wire_order() {
        assert!(Version::V1_0 < Version::V1_1);
        assert!(Version::V1_2 < Version::V1_3);
        assert_eq!(Version::V1_3.wire(), 0x04);
    }

    #[test]
    fn message_codes_differ_between_versions() {
        assert_eq!(Type::PortMod.code(Version::V1_0), Some(15));
        assert_eq!(Type::PortMod.code(Version::V1_3), Some(16));
        assert_eq!(Type::BarrierRequest.code(Version::V1_0), Some(18));
        assert_eq!(Type::BarrierRequest.code(Version::V1_3), Some(20));
        assert_eq!(Type::GroupMod.code(Version::V1_0), None);
        assert_eq!(Type::RoleRequest.code(Version::V1_1), None);
        assert_eq!(Type::MeterMod.code(Version::V1_2), None);
        assert_eq!(Type::MeterMod.code(Version::V1_3), Some(29));
    }

    #[test]
    fn codes_round_trip_per_version() {
        for version in Version::ALL.iter().copied() {
            for raw in 0..30u8 {
                if let Some(ttype) = Type::from_code(raw, version) {
                    assert_eq!(ttype.code(version), Some(raw));
                }
            }
        }
        assert_eq!(Type::from_code(16, Version::V1_0), Some(Type::MultipartRequest));
        assert_eq!(Type::from_code(22, Version::V1_0), None);
    }

    #[test]
    fn header_written_after_prior_bytes() {
        // parent structure already in the buffer
        let mut out = vec![0xff; 5];
        let msg = OfMsg::new(Version::V1_3, 0x0102_0304, OfPayload::BarrierRequest);
        let start = write_header(20, &msg, &mut out).unwrap();
        assert_eq!(start, 5);
        out.extend_from_slice(&[1, 2, 3, 4]);
        update_header_length(&mut out, start).unwrap();
        assert_eq!(&out[5..], &[4, 20, 0, 12, 1, 2, 3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn header_decode() {
        let header = Header::try_from(&[1u8, 18, 0, 8, 0, 0, 0, 9][..]).unwrap();
        assert_eq!(*header.version(), Version::V1_0);
        assert_eq!(*header.ttype(), Type::BarrierRequest);
        assert_eq!(*header.length(), 8);
        assert_eq!(*header.xid(), 9);
        assert_eq!(header.payload_length(), 0);
    }

    #[test]
    fn header_decode_rejects_short_input() {
        assert!(Header::try_from(&[4u8, 0, 0][..]).is_err());
        assert!(Header::try_from(&[9u8, 0, 0, 8, 0, 0, 0, 0][..]).is_err());
    }
}
