//! Bitmask packing of named flag sets.
//!
//! Flag sets are `bitflags` types whose bits are version neutral. The wire
//! position of each flag lives in a static per-version table in [`tables`],
//! and [`pack`]/[`unpack`] translate between the two.

use std::ops::{BitAnd, BitOr};

pub mod tables;

/// Test whether bit `bit` of `x` is set.
pub fn test_bit(bit: u8, x: u32) -> bool {
    bit < 32 && (x >> bit) & 1 == 1
}

/// Sets bit `i` for every `(i, true)` pair. Unset, repeated or out of range
/// positions are ignored.
pub fn fill_bitmask<I>(bits: I) -> u32
where
    I: IntoIterator<Item = (u8, bool)>,
{
    bits.into_iter()
        .filter(|(_, set)| *set)
        .fold(0, |acc, (bit, _)| acc | 1u32.checked_shl(bit as u32).unwrap_or(0))
}

/// Consecutive flags starting at bit `offset`.
pub fn fill_bitmask_from_offset(offset: u8, values: &[bool]) -> u32 {
    fill_bitmask(
        values
            .iter()
            .enumerate()
            .map(|(i, set)| (offset.saturating_add(i as u8), *set)),
    )
}

/// Packs `flags` using the wire positions of `table`. Flags without a
/// position in the table have no wire representation and are left out.
pub fn pack<F>(table: &[(F, u8)], flags: F) -> u32
where
    F: Copy + PartialEq + BitAnd<Output = F>,
{
    fill_bitmask(table.iter().map(|&(flag, bit)| (bit, flags & flag == flag)))
}

/// Mirror of [`pack`]. Bits without a table entry are dropped.
pub fn unpack<F>(table: &[(F, u8)], bits: u32) -> F
where
    F: Copy + Default + BitOr<Output = F>,
{
    table
        .iter()
        .filter(|(_, bit)| test_bit(*bit, bits))
        .fold(F::default(), |acc, &(flag, _)| acc | flag)
}
