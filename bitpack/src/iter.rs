//! Iterator utilities over bit streams

use std::iter::from_fn;

use bit_stream::{BitField, BitStream, Channel, Result};

/// Iterates the committed bits from the cursor to the end of the channel.
///
/// Stops after the first error.
///
/// # Examples
///
/// ```
/// use bitpack::iter::bits;
/// use bitpack::prelude::*;
///
/// let mut stream = BitStream::attach(MemoryChannel::from_vec(vec![0b1010_0000]))?;
/// stream.set_bit_position(4)?;
/// let rest: Vec<bool> = bits(&mut stream).collect::<bit_stream::Result<_>>()?;
/// assert_eq!(rest, vec![false; 4]);
/// # Ok::<(), BitStreamError>(())
/// ```
pub fn bits<C: Channel>(stream: &mut BitStream<C>) -> impl Iterator<Item = Result<bool>> + '_ {
    let mut failed = false;
    from_fn(move || {
        if failed || stream.bit_position() >= stream.bit_length() {
            return None;
        }
        let bit = stream.read_bit();
        failed = bit.is_err();
        Some(bit)
    })
}

/// Iterates `bit_count`-bit fields while a whole field is left in the
/// committed bits.
///
/// # Examples
///
/// ```
/// use bitpack::iter::fields;
/// use bitpack::prelude::*;
///
/// let mut stream = BitStream::attach(MemoryChannel::from_vec(vec![0x12, 0x34]))?;
/// let nibbles: Vec<u8> = fields(&mut stream, 4, false).collect::<bit_stream::Result<_>>()?;
/// assert_eq!(nibbles, vec![1, 2, 3, 4]);
/// # Ok::<(), BitStreamError>(())
/// ```
pub fn fields<C: Channel, T: BitField>(
    stream: &mut BitStream<C>,
    bit_count: u32,
    lsb_first: bool,
) -> impl Iterator<Item = Result<T>> + '_ {
    let mut failed = false;
    from_fn(move || {
        if failed {
            return None;
        }
        let remaining = stream.bit_length().saturating_sub(stream.bit_position());
        // invalid widths fall through so read_field reports them
        if (1..=64).contains(&bit_count) && remaining < u64::from(bit_count) {
            return None;
        }
        let field = stream.read_field::<T>(bit_count, lsb_first);
        failed = field.is_err();
        Some(field)
    })
}
