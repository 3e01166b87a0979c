use bit_stream::{BitStream, Channel, Result};

use crate::codec::{dequantize, quantize, resolve_bits};
use crate::scalar::Quantize;

/// Range-quantized floats on a [`BitStream`].
///
/// Levels are written as integer fields with `lsb_first = true`. A `bits`
/// of 0 derives the width from the range (see [`derive_bits`](crate::derive_bits));
/// reader and writer must agree on `min`, `max` and `bits`.
///
/// ```
/// use bit_stream::BitStream;
/// use quantized::QuantizedExt;
///
/// let mut s = BitStream::allocate(16).unwrap();
/// s.write_quantized(0.73f32, 0.0, 1.0, 8).unwrap();
/// s.set_bit_position(0).unwrap();
/// let back: f32 = s.read_quantized(0.0, 1.0, 8).unwrap();
/// assert!((back - 0.73).abs() <= 1.0 / 255.0);
/// ```
pub trait QuantizedExt {
    /// # Errors
    ///
    /// [`InvalidBitCount`](bit_stream::BitStreamError::InvalidBitCount) when
    /// `bits > 64`, otherwise whatever the underlying bit writes return.
    fn write_quantized<T: Quantize>(&mut self, value: T, min: T, max: T, bits: u32) -> Result<()>;

    fn read_quantized<T: Quantize>(&mut self, min: T, max: T, bits: u32) -> Result<T>;
}

impl<C: Channel> QuantizedExt for BitStream<C> {
    fn write_quantized<T: Quantize>(&mut self, value: T, min: T, max: T, bits: u32) -> Result<()> {
        let bits = resolve_bits(min, max, bits)?;
        self.write_field(quantize(value, min, max, bits), bits, true)
    }

    fn read_quantized<T: Quantize>(&mut self, min: T, max: T, bits: u32) -> Result<T> {
        let bits = resolve_bits(min, max, bits)?;
        let level = self.read_field::<u64>(bits, true)?;
        Ok(dequantize(level, min, max, bits))
    }
}
