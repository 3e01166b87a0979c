//! Bit-order rules shared by the stream codec and the slice helpers.
//!
//! Bits inside a byte are numbered most-significant first: bit 0 of a byte
//! is `0x80`. Fields follow [`FieldLayout`].

use crate::{BitStreamError, Result};

/// Mask of the bit at `bit_position` within its byte.
#[inline(always)]
pub fn bit_mask(bit_position: u64) -> u8 {
    0x80 >> (bit_position & 7)
}

/// Parses one character of a bit string.
#[inline]
pub fn parse_bit_char(c: char) -> Result<bool> {
    match c {
        '0' => Ok(false),
        '1' => Ok(true),
        other => Err(BitStreamError::InvalidBitChar(other)),
    }
}

/// Scan order of one integer field.
///
/// `width` is the natural width of the source type (8, 16, 32 or 64).
///
/// - `lsb_first = true`: the mask starts at bit `bit_count - 1` and moves
///   down, so the low `bit_count` bits go out most-significant first. A
///   field wider than `width` starts with zero padding.
/// - `lsb_first = false`: the mask starts at the top bit of `width`, with
///   the value aligned so its low `min(bit_count, width)` bits sit at the
///   top. A field wider than `width` ends with zero padding once the mask
///   has run out.
///
/// ```
/// use bit_stream::FieldLayout;
///
/// // 0xAB as a 12-bit field of a u8
/// let front = FieldLayout::new(12, 8, true).unwrap();
/// let back = FieldLayout::new(12, 8, false).unwrap();
/// let render = |l: FieldLayout| -> String {
///     (0..12).map(|i| if l.bit(0xAB, i) { '1' } else { '0' }).collect()
/// };
/// assert_eq!(render(front), "000010101011");
/// assert_eq!(render(back), "101010110000");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    bit_count: u32,
    width: u32,
    lsb_first: bool,
}

impl FieldLayout {
    /// Validates `bit_count` (1..=64).
    pub fn new(bit_count: u32, width: u32, lsb_first: bool) -> Result<Self> {
        if !(1..=64).contains(&bit_count) {
            return Err(BitStreamError::InvalidBitCount(bit_count));
        }
        Ok(Self {
            bit_count,
            width,
            lsb_first,
        })
    }

    #[inline]
    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Number of leading field bits that carry value bits when scanning
    /// from the natural top.
    #[inline]
    fn lead(&self) -> u32 {
        self.bit_count.min(self.width)
    }

    /// Bit of `value` emitted at step `i` of the field.
    #[inline]
    pub fn bit(&self, value: u64, i: u32) -> bool {
        debug_assert!(i < self.bit_count);
        let shift = if self.lsb_first {
            self.bit_count - 1 - i
        } else {
            if i >= self.lead() {
                return false;
            }
            self.lead() - 1 - i
        };
        (value >> shift) & 1 == 1
    }

    /// Folds the bit read at step `i` into the accumulated value.
    #[inline]
    pub fn gather(&self, acc: u64, bit: bool, i: u32) -> u64 {
        if !self.lsb_first && i >= self.lead() {
            return acc;
        }
        (acc << 1) | bit as u64
    }
}

/// Writes `value` as a field at `bit_offset` inside `slice`.
///
/// Slow but simple. The property tests compare the stream's field output
/// against it.
pub fn set_bits(slice: &mut [u8], bit_offset: usize, layout: FieldLayout, value: u64) {
    for i in 0..layout.bit_count {
        let pos = (bit_offset + i as usize) as u64;
        let byte = (pos >> 3) as usize;
        let mask = bit_mask(pos);
        if layout.bit(value, i) {
            slice[byte] |= mask;
        } else {
            slice[byte] &= !mask;
        }
    }
}

/// Reads a field at `bit_offset` inside `slice`.
pub fn get_bits(slice: &[u8], bit_offset: usize, layout: FieldLayout) -> u64 {
    let mut value = 0u64;
    for i in 0..layout.bit_count {
        let pos = (bit_offset + i as usize) as u64;
        let bit = slice[(pos >> 3) as usize] & bit_mask(pos) != 0;
        value = layout.gather(value, bit, i);
    }
    value
}
