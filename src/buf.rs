//! Byte-sink primitives used by every encoder.
//!
//! Encoders write straight into a caller-owned `Vec<u8>`: integers go through
//! `byteorder::WriteBytesExt` in big endian, everything else (padding, fixed
//! strings, length backpatching) goes through [`WireBuf`].

use byteorder::{BigEndian, ByteOrder};

use crate::err::*;

/// Interface names (`ofp_port.name`).
pub const PORT_NAME_LEN: usize = 16;
/// Serial numbers in `ofp_desc`.
pub const SERIAL_NUM_LEN: usize = 32;
/// Table names in table features and OpenFlow 1.0 table stats.
pub const TABLE_NAME_LEN: usize = 32;
/// Descriptive strings in `ofp_desc`.
pub const DESC_STR_LEN: usize = 256;

/// A reserved 16-bit length field.
///
/// `start` is where the measured structure begins, `field` where its length
/// placeholder sits. The length written back is always self-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMark {
    start: usize,
    field: usize,
}

impl LengthMark {
    pub fn new(start: usize, field: usize) -> Self {
        LengthMark { start, field }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn field(&self) -> usize {
        self.field
    }
}

/// Zero bytes needed to bring `len` to a multiple of `align`.
pub fn padding_for(len: usize, align: usize) -> usize {
    (align - len % align) % align
}

pub trait WireBuf {
    /// Current write position.
    fn position(&self) -> usize;

    fn write_zeros(&mut self, count: usize);

    /// Writes `value` null-padded to exactly `size` bytes.
    fn write_fixed_str(&mut self, value: &str, size: usize) -> Result<()>;

    /// Writes a zero placeholder for a length field of the structure that
    /// began at `start`.
    fn reserve_length(&mut self, start: usize) -> LengthMark;

    /// Overwrites two bytes at a previously recorded position.
    fn patch_u16(&mut self, at: usize, value: u16) -> Result<()>;

    /// Backpatches `mark` with the bytes written since its structure started.
    fn patch_length(&mut self, mark: LengthMark) -> Result<u16>;

    /// Zero-pads the structure that began at `start` to a multiple of
    /// `align`, returning the number of padding bytes.
    fn pad_to_multiple(&mut self, start: usize, align: usize) -> usize;
}

impl WireBuf for Vec<u8> {
    fn position(&self) -> usize {
        self.len()
    }

    fn write_zeros(&mut self, count: usize) {
        let new_len = self.len() + count;
        self.resize(new_len, 0);
    }

    fn write_fixed_str(&mut self, value: &str, size: usize) -> Result<()> {
        let bytes = value.as_bytes();
        if bytes.len() > size {
            error!("String of {} bytes does not fit into {} bytes: {:?}", bytes.len(), size, value);
            bail!(ErrorKind::IllegalValue(bytes.len() as u64, "fixed-length string"));
        }
        self.extend_from_slice(bytes);
        self.write_zeros(size - bytes.len());
        Ok(())
    }

    fn reserve_length(&mut self, start: usize) -> LengthMark {
        let field = self.len();
        self.write_zeros(2);
        LengthMark { start, field }
    }

    fn patch_u16(&mut self, at: usize, value: u16) -> Result<()> {
        if at + 2 > self.len() {
            bail!(ErrorKind::IllegalValue(at as u64, "patch offset"));
        }
        BigEndian::write_u16(&mut self[at..at + 2], value);
        Ok(())
    }

    fn patch_length(&mut self, mark: LengthMark) -> Result<u16> {
        let len = self.len() - mark.start;
        if len > u16::MAX as usize {
            error!("Structure starting at {} is {} bytes long", mark.start, len);
            bail!(ErrorKind::IllegalValue(len as u64, "length field"));
        }
        self.patch_u16(mark.field, len as u16)?;
        Ok(len as u16)
    }

    fn pad_to_multiple(&mut self, start: usize, align: usize) -> usize {
        let pad = padding_for(self.len() - start, align);
        self.write_zeros(pad);
        pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    #[test]
    fn padding_is_zero_for_aligned_lengths() {
        assert_eq!(padding_for(0, 8), 0);
        assert_eq!(padding_for(16, 8), 0);
        assert_eq!(padding_for(13, 8), 3);
        assert_eq!(padding_for(1, 8), 7);
    }

    #[test]
    fn fixed_string_is_null_padded() {
        let mut out = Vec::new();
        out.write_fixed_str("eth0", PORT_NAME_LEN).unwrap();
        assert_eq!(out.len(), 16);
        assert_eq!(&out[..4], b"eth0");
        assert!(out[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn fixed_string_too_long_is_rejected() {
        let mut out = Vec::new();
        let name = "a-very-long-interface-name";
        assert!(out.write_fixed_str(name, PORT_NAME_LEN).is_err());
    }

    #[test]
    fn length_mark_is_self_inclusive() {
        let mut out = vec![0xaa, 0xbb];
        let start = out.position();
        out.write_u16::<BigEndian>(7).unwrap();
        let mark = out.reserve_length(start);
        out.write_u32::<BigEndian>(0xdead_beef).unwrap();
        assert_eq!(out.patch_length(mark).unwrap(), 8);
        assert_eq!(out, vec![0xaa, 0xbb, 0, 7, 0, 8, 0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn patch_outside_buffer_fails() {
        let mut out = vec![0u8; 3];
        assert!(out.patch_u16(2, 1).is_err());
    }

    #[test]
    fn pad_to_multiple_counts_from_start() {
        let mut out = vec![1, 2, 3];
        out.extend_from_slice(&[9; 5]);
        assert_eq!(out.pad_to_multiple(3, 8), 3);
        assert_eq!(out.len(), 11);
        assert_eq!(&out[8..], &[0, 0, 0]);
    }
}
