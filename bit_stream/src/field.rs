use byte_channel::Channel;

use crate::bit_ops::FieldLayout;
use crate::{BitStream, Result};

mod private {
    pub trait Sealed {}
}

/// Unsigned integer types the field codec accepts.
///
/// `WIDTH` is the type's natural width, which is the alignment reference
/// for MSB-aligned fields (see [`FieldLayout`]).
pub trait BitField: Copy + private::Sealed {
    const WIDTH: u32;

    fn to_u64(self) -> u64;

    /// Truncating conversion back from the accumulated field.
    fn from_u64(value: u64) -> Self;
}

macro_rules! impl_bit_field {
    ($($t:ty),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl BitField for $t {
                const WIDTH: u32 = <$t>::BITS;

                #[inline(always)]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline(always)]
                fn from_u64(value: u64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_bit_field!(u8, u16, u32, u64);

impl<C: Channel> BitStream<C> {
    /// Writes `value` into exactly `bit_count` bits.
    ///
    /// High-order bits that do not fit are dropped without notice. See
    /// [`FieldLayout`] for how `lsb_first` orders the scan.
    ///
    /// # Errors
    ///
    /// - [`BitStreamError::InvalidBitCount`](crate::BitStreamError::InvalidBitCount)
    ///   unless `1 <= bit_count <= 64`
    /// - capability and channel errors from [`BitStream::write_bit`]
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_stream::BitStream;
    ///
    /// let mut s = BitStream::allocate(16).unwrap();
    /// s.write_field(17u64, 5, false).unwrap();
    /// s.write_field(0xFFu8, 3, true).unwrap();
    /// assert_eq!(s.to_bit_string().unwrap(), "10001111");
    /// ```
    pub fn write_field<T: BitField>(&mut self, value: T, bit_count: u32, lsb_first: bool) -> Result<()> {
        let layout = FieldLayout::new(bit_count, T::WIDTH, lsb_first)?;
        let raw = value.to_u64();
        for i in 0..bit_count {
            self.write_bit(layout.bit(raw, i))?;
        }
        Ok(())
    }

    /// Reads a `bit_count`-bit field written by [`BitStream::write_field`]
    /// with the same `T` and `lsb_first`.
    ///
    /// ```
    /// use bit_stream::BitStream;
    ///
    /// let mut s = BitStream::allocate(16).unwrap();
    /// s.write_field(0xABCDu16, 12, true).unwrap();
    /// s.set_bit_position(0).unwrap();
    /// assert_eq!(s.read_field::<u16>(12, true).unwrap(), 0xBCD);
    /// ```
    pub fn read_field<T: BitField>(&mut self, bit_count: u32, lsb_first: bool) -> Result<T> {
        let layout = FieldLayout::new(bit_count, T::WIDTH, lsb_first)?;
        let mut acc = 0u64;
        for i in 0..bit_count {
            let bit = self.read_bit()?;
            acc = layout.gather(acc, bit, i);
        }
        Ok(T::from_u64(acc))
    }

    /// Writes each character as an 8-bit code (the low 8 bits of its
    /// scalar value), most significant bit first.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            self.write_field(c as u32 as u8, 8, false)?;
        }
        Ok(())
    }

    /// Reads `chars` 8-bit codes written by [`BitStream::write_str`].
    pub fn read_str(&mut self, chars: usize) -> Result<String> {
        let mut out = String::with_capacity(chars);
        for _ in 0..chars {
            out.push(char::from(self.read_field::<u8>(8, false)?));
        }
        Ok(out)
    }
}
