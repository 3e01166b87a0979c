//! Linear mapping between a closed range and the levels of an N-bit field.
//!
//! A value is placed in its range as `r = (value - lo) / (hi - lo)` clamped
//! to `[0, 1]`, then rounded onto one of `2^bits` levels:
//! `q = trunc(r * (2^bits - 1) + 0.5)`. Decoding is the inverse blend
//! `lo + (q / (2^bits - 1)) * (hi - lo)`. Bounds may be given in either
//! order; an empty or inverted-to-zero range maps everything to level 0.

use bit_stream::{BitStreamError, Result};
use log::trace;

use crate::scalar::{Quantize, unit_clamp};

/// Largest level of a `bits`-wide field.
#[inline]
pub fn max_level(bits: u32) -> u64 {
    debug_assert!((1..=64).contains(&bits));
    u64::MAX >> (64 - bits)
}

#[inline]
fn ordered<T: Quantize>(min: T, max: T) -> (T, T) {
    if max < min { (max, min) } else { (min, max) }
}

/// Field width implied by a range: the bit length of the integer part of
/// its span, never less than 1.
///
/// ```
/// use quantized::derive_bits;
///
/// assert_eq!(derive_bits(0.0f32, 1.0), 1);
/// assert_eq!(derive_bits(0.0f64, 255.9), 8);
/// assert_eq!(derive_bits(100.0f64, -100.0), 8);
/// ```
pub fn derive_bits<T: Quantize>(min: T, max: T) -> u32 {
    let (lo, hi) = ordered(min, max);
    let whole = (hi - lo).to_level();
    (u64::BITS - whole.leading_zeros()).max(1)
}

/// Resolves the width argument of the stream codec: 0 derives it from the
/// range, 1..=64 is taken as is.
pub fn resolve_bits<T: Quantize>(min: T, max: T, bits: u32) -> Result<u32> {
    match bits {
        0 => {
            let derived = derive_bits(min, max);
            trace!("derived {derived}-bit field for range {min:?}..{max:?}");
            Ok(derived)
        }
        1..=64 => Ok(bits),
        _ => Err(BitStreamError::InvalidBitCount(bits)),
    }
}

/// Maps `value` onto a level of a `bits`-wide field (`1..=64`).
///
/// ```
/// use quantized::quantize;
///
/// assert_eq!(quantize(0.73f32, 0.0, 1.0, 8), 186);
/// assert_eq!(quantize(2.0f32, 0.0, 1.0, 8), 255);
/// assert_eq!(quantize(5.0f64, 5.0, 5.0, 8), 0);
/// ```
pub fn quantize<T: Quantize>(value: T, min: T, max: T, bits: u32) -> u64 {
    let (lo, hi) = ordered(min, max);
    let span = hi - lo;
    let ratio = if span > T::ZERO {
        unit_clamp((value - lo) / span)
    } else {
        T::ZERO
    };
    let top = max_level(bits);
    (ratio * T::from_level(top) + T::HALF).to_level().min(top)
}

/// Maps a level of a `bits`-wide field (`1..=64`) back into the range.
pub fn dequantize<T: Quantize>(level: u64, min: T, max: T, bits: u32) -> T {
    let (lo, hi) = ordered(min, max);
    let ratio = unit_clamp(T::from_level(level) / T::from_level(max_level(bits)));
    lo + ratio * (hi - lo)
}
