use std::convert::TryInto;

use crate::err::*;

/// length of ethernet address in bytes (6)
pub const ETHERNET_ADDRESS_LENGTH: usize = 6;
pub type EthernetAddress = [u8; ETHERNET_ADDRESS_LENGTH];

pub fn from_slice_eth(slice: &[u8]) -> Result<EthernetAddress> {
    slice
        .get(..ETHERNET_ADDRESS_LENGTH)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            ErrorKind::InvalidSliceLength(
                ETHERNET_ADDRESS_LENGTH,
                slice.len(),
                stringify!(EthernetAddress),
            )
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_leading_six_bytes() {
        let addr = from_slice_eth(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(addr, [1, 2, 3, 4, 5, 6]);
        assert!(from_slice_eth(&[1, 2, 3]).is_err());
    }
}
