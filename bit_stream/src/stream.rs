//! Bit cursor over a byte channel.
//!
//! # Examples
//!
//! ## Writing and reading back
//!
//! ```rust
//! use bit_stream::BitStream;
//!
//! let mut stream = BitStream::allocate(32).expect("allocate");
//! stream.write_bit_str("1011").unwrap();
//! stream.write_field(0x2Au8, 6, false).unwrap();
//!
//! stream.set_bit_position(0).unwrap();
//! assert_eq!(stream.read_bit_string(4).unwrap(), "1011");
//! assert_eq!(stream.read_field::<u8>(6, false).unwrap(), 0x2A);
//! ```
//!
//! ## Lending a channel
//!
//! ```rust
//! use bit_stream::BitStream;
//! use byte_channel::MemoryChannel;
//!
//! let mut channel = MemoryChannel::new();
//! {
//!     let mut stream = BitStream::attach(&mut channel).unwrap();
//!     stream.write_bits_from(&[true; 8]).unwrap();
//!     stream.write_bit(true).unwrap();
//!     stream.flush().unwrap();
//! }
//! assert_eq!(channel.as_slice(), &[0xFF, 0x80]);
//! ```

use byte_channel::{Capabilities, Channel, MemoryChannel};
use log::{debug, trace, warn};

use crate::bit_ops::{self, bit_mask};
use crate::{BitStreamError, CapabilityPolicy, Result, StreamConfig};

/// Reference point for [`BitStream::seek`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeekOrigin {
    /// From bit 0.
    Begin,
    /// From the current cursor.
    Current,
    /// Backwards from the last bit of the channel's capacity.
    End,
}

/// Scratch size used when a forward-only channel has to skip bytes.
const SKIP_CHUNK: usize = 64;

/// Bit-granular reader/writer over a [`Channel`].
///
/// The stream caches exactly one byte, the *working byte*, for the byte the
/// cursor is in. Bit reads and writes touch only that byte; the channel is
/// consulted when the cursor crosses into another byte, at which point a
/// dirty working byte is written back and the new byte is loaded (if the
/// channel is readable). This is what lets a single bit be changed without
/// disturbing its seven neighbours.
///
/// The stream owns whatever it is attached to. Attach a `&mut C` to lend a
/// channel instead, or take it back with [`BitStream::into_inner`].
/// Neither [`BitStream::close`] nor dropping the stream flushes.
///
/// A stream is single-owner state: there is no internal locking.
#[derive(Debug)]
pub struct BitStream<C: Channel> {
    channel: Option<C>,
    caps: Capabilities,
    policy: CapabilityPolicy,
    bit_position: u64,
    byte_index: u64,
    working: u8,
    dirty: bool,
}

impl BitStream<MemoryChannel> {
    /// Allocates a growable in-memory channel of `requested_bits / 8` bytes
    /// and attaches to it.
    ///
    /// The byte count truncates: 20 bits gives a 2-byte (16-bit) capacity.
    ///
    /// ```
    /// use bit_stream::BitStream;
    ///
    /// let stream = BitStream::allocate(20).unwrap();
    /// assert_eq!(stream.bit_capacity(), 16);
    /// ```
    pub fn allocate(requested_bits: u64) -> Result<Self> {
        Self::allocate_with(requested_bits, StreamConfig::default())
    }

    pub fn allocate_with(requested_bits: u64, config: StreamConfig) -> Result<Self> {
        let bytes = requested_bits / 8;
        debug!("allocating {bytes} byte channel for {requested_bits} requested bits");
        Self::with_config(MemoryChannel::try_with_capacity(bytes)?, config)
    }
}

impl<C: Channel> BitStream<C> {
    /// Attaches to `channel` at its current position.
    pub fn attach(channel: C) -> Result<Self> {
        Self::with_config(channel, StreamConfig::default())
    }

    /// Attaches to `channel` and skips `skip_bits` past its current position.
    pub fn attach_at(channel: C, skip_bits: u64) -> Result<Self> {
        Self::with_config(channel, StreamConfig::default().with_skip_bits(skip_bits))
    }

    /// Attaches to `channel` with explicit options.
    ///
    /// Capabilities are probed here, once. A readable channel has its current
    /// byte pre-loaded so that existing data survives partial writes; a
    /// seekable channel is then moved back over the probe read. Forward-only
    /// channels stay advanced.
    pub fn with_config(mut channel: C, config: StreamConfig) -> Result<Self> {
        let caps = channel.capabilities();
        let start = channel.position();

        let mut working = 0u8;
        if caps.read {
            let mut buf = [0u8; 1];
            let n = channel.read(&mut buf)?;
            if n == 1 {
                working = buf[0];
            }
            if caps.seek && n > 0 {
                channel.seek_relative(-(n as i64))?;
            }
        }

        debug!(
            "attached bit stream at byte {start} (read={}, write={}, seek={}, policy={:?})",
            caps.read, caps.write, caps.seek, config.policy
        );

        let mut stream = Self {
            channel: Some(channel),
            caps,
            policy: config.policy,
            bit_position: start * 8,
            byte_index: start,
            working,
            dirty: false,
        };
        if config.skip_bits > 0 {
            let target = (start * 8)
                .checked_add(config.skip_bits)
                .ok_or(BitStreamError::PositionOverflow(start * 8))?;
            stream.set_bit_position(target)?;
        }
        Ok(stream)
    }

    /// A stream with no channel. Every operation is a no-op returning
    /// `false`, `0` or empty.
    pub fn detached() -> Self {
        Self {
            channel: None,
            caps: Capabilities::none(),
            policy: CapabilityPolicy::default(),
            bit_position: 0,
            byte_index: 0,
            working: 0,
            dirty: false,
        }
    }

    //  Introspection

    #[inline]
    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    #[inline]
    pub fn can_read(&self) -> bool {
        self.caps.read
    }

    #[inline]
    pub fn can_write(&self) -> bool {
        self.caps.write
    }

    #[inline]
    pub fn can_seek(&self) -> bool {
        self.caps.seek
    }

    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    #[inline]
    pub fn policy(&self) -> CapabilityPolicy {
        self.policy
    }

    /// The attached channel, if any.
    pub fn channel(&self) -> Option<&C> {
        self.channel.as_ref()
    }

    /// Whether the working byte holds bits not yet written to the channel.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    //  Position and size

    #[inline]
    pub fn bit_position(&self) -> u64 {
        self.bit_position
    }

    /// Bits committed to the channel (channel length × 8). A dirty working
    /// byte is not counted until it is written back.
    pub fn bit_length(&self) -> u64 {
        self.channel.as_ref().map_or(0, |c| c.len() * 8)
    }

    /// Pre-allocated size of the channel in bits, 0 when unknown.
    pub fn bit_capacity(&self) -> u64 {
        self.channel
            .as_ref()
            .and_then(|c| c.capacity())
            .map_or(0, |bytes| bytes * 8)
    }

    /// Moves the cursor to `position`.
    ///
    /// Within the current byte this only updates counters. Crossing into
    /// another byte writes back a dirty working byte, moves the channel to
    /// the new byte, loads it if the channel is readable, and lands the
    /// channel exactly on the new byte again.
    pub fn set_bit_position(&mut self, position: u64) -> Result<()> {
        let Some(channel) = self.channel.as_mut() else {
            return Ok(());
        };

        let next_byte = position >> 3;
        if next_byte != self.byte_index {
            if self.dirty && self.caps.write {
                write_back(channel, self.caps, self.byte_index, self.working)?;
            }
            self.dirty = false;
            self.working = 0;

            move_channel_to(channel, self.caps, next_byte)?;
            if self.caps.read {
                let mut buf = [0u8; 1];
                if channel.read(&mut buf)? == 1 {
                    self.working = buf[0];
                }
            }
            move_channel_to(channel, self.caps, next_byte)?;

            trace!(
                "crossed byte {} -> {next_byte}, loaded {:#04x}",
                self.byte_index, self.working
            );
        }

        self.bit_position = position;
        self.byte_index = next_byte;
        Ok(())
    }

    /// Moves the cursor relative to `origin` and returns the new position.
    /// Targets before bit 0 clamp to 0.
    ///
    /// `End` counts backwards from the last bit of [`BitStream::bit_capacity`].
    ///
    /// ```
    /// use bit_stream::{BitStream, SeekOrigin};
    /// use byte_channel::MemoryChannel;
    ///
    /// let mut stream = BitStream::attach(MemoryChannel::with_capacity(10)).unwrap();
    /// assert_eq!(stream.seek(0, SeekOrigin::End).unwrap(), 79);
    /// assert_eq!(stream.seek(-100, SeekOrigin::Current).unwrap(), 0);
    /// ```
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<u64> {
        let target = match origin {
            SeekOrigin::Begin => offset as i128,
            SeekOrigin::Current => self.bit_position as i128 + offset as i128,
            SeekOrigin::End => self.bit_capacity() as i128 - 1 - offset as i128,
        };
        self.set_bit_position(target.clamp(0, u64::MAX as i128) as u64)?;
        Ok(self.bit_position)
    }

    /// Resizes the channel to hold `bits` bits (rounded up to whole bytes).
    /// The cursor is left alone.
    ///
    /// Bits still pending in the working byte are kept; they land on their
    /// own byte at the next write-back, even when that byte was cut off.
    pub fn set_length(&mut self, bits: u64) -> Result<()> {
        if !self.writable()? {
            return Ok(());
        }
        let bytes = bits.div_ceil(8);
        if let Some(channel) = self.channel.as_mut() {
            channel.set_len(bytes)?;
            // truncation may have pulled the channel back from the cursor
            move_channel_to(channel, self.caps, self.byte_index)?;
            debug!("channel resized to {bytes} bytes");
        }
        Ok(())
    }

    //  Bit primitives

    /// Writes one bit at the cursor and advances it.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if !self.writable()? {
            return Ok(());
        }
        let next = self.next_position()?;
        let mask = bit_mask(self.bit_position);
        if bit {
            self.working |= mask;
        } else {
            self.working &= !mask;
        }
        self.dirty = true;
        self.set_bit_position(next)
    }

    /// Reads one bit at the cursor and advances it.
    ///
    /// Bits past the end of the channel's data read as `false`.
    pub fn read_bit(&mut self) -> Result<bool> {
        if !self.readable()? {
            return Ok(false);
        }
        let next = self.next_position()?;
        let bit = self.working & bit_mask(self.bit_position) != 0;
        self.set_bit_position(next)?;
        Ok(bit)
    }

    pub fn write_bits_from(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Writes one bit per byte: 0 is `false`, anything else `true`.
    pub fn write_bit_bytes(&mut self, bits: &[u8]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit != 0)?;
        }
        Ok(())
    }

    /// Writes a string of `'0'`/`'1'` characters. The whole string is
    /// validated before anything is written.
    pub fn write_bit_str(&mut self, bits: &str) -> Result<()> {
        let parsed = bits
            .chars()
            .map(bit_ops::parse_bit_char)
            .collect::<Result<Vec<bool>>>()?;
        self.write_bits_from(&parsed)
    }

    pub fn read_bits_into(&mut self, count: usize) -> Result<Vec<bool>> {
        let mut bits = Vec::with_capacity(count);
        for _ in 0..count {
            bits.push(self.read_bit()?);
        }
        Ok(bits)
    }

    /// Reads `count` bits as a `'0'`/`'1'` string.
    pub fn read_bit_string(&mut self, count: usize) -> Result<String> {
        let mut out = String::with_capacity(count);
        for _ in 0..count {
            out.push(if self.read_bit()? { '1' } else { '0' });
        }
        Ok(out)
    }

    /// Reads every committed bit from the cursor to [`BitStream::bit_length`].
    pub fn read_remaining(&mut self) -> Result<Vec<bool>> {
        let remaining = self.bit_length().saturating_sub(self.bit_position);
        self.read_bits_into(remaining as usize)
    }

    /// Renders every committed bit as `'0'`/`'1'`, then restores the cursor.
    ///
    /// A dirty working byte is flushed first so the bits written so far are
    /// part of the rendering.
    pub fn to_bit_string(&mut self) -> Result<String> {
        if !self.readable()? {
            return Ok(String::new());
        }
        if !self.caps.seek {
            return match self.policy {
                CapabilityPolicy::Strict => Err(BitStreamError::NotSeekable),
                CapabilityPolicy::Lenient => Ok(String::new()),
            };
        }

        self.flush()?;
        let saved = self.bit_position;
        self.set_bit_position(0)?;
        let rendered = self.read_bit_string(self.bit_length() as usize);
        self.set_bit_position(saved)?;
        rendered
    }

    //  Lifecycle

    /// Writes a dirty working byte and flushes the channel.
    ///
    /// On a seekable channel the channel is moved back onto the byte just
    /// written, so later bits in the same byte land in the same place. The
    /// dirty flag is cleared only once the write has succeeded.
    pub fn flush(&mut self) -> Result<()> {
        let Some(channel) = self.channel.as_mut() else {
            return Ok(());
        };
        if self.dirty && self.caps.write {
            write_back(channel, self.caps, self.byte_index, self.working)?;
            self.dirty = false;
            rewind_after_flush(channel, self.caps, self.byte_index)?;
            trace!("flushed working byte {:#04x}", self.working);
        }
        channel.flush()?;
        Ok(())
    }

    /// Asynchronous [`BitStream::flush`]: one asynchronous write of the
    /// working byte, a synchronous rewind, then the channel's own
    /// asynchronous flush.
    ///
    /// Do not use the stream for anything else while this is pending.
    pub async fn flush_async(&mut self) -> Result<()> {
        let Some(channel) = self.channel.as_mut() else {
            return Ok(());
        };
        if self.dirty && self.caps.write {
            let byte = [self.working];
            move_channel_to(channel, self.caps, self.byte_index)?;
            channel.write_async(&byte).await?;
            self.dirty = false;
            rewind_after_flush(channel, self.caps, self.byte_index)?;
            trace!("flushed working byte {:#04x} (async)", self.working);
        }
        channel.flush_async().await?;
        Ok(())
    }

    /// Drops the channel and zeroes the cursor. Pending bits are discarded,
    /// not flushed.
    pub fn close(&mut self) {
        if self.channel.take().is_some() {
            debug!(
                "closed bit stream at bit {} (discarded dirty byte: {})",
                self.bit_position, self.dirty
            );
        }
        self.caps = Capabilities::none();
        self.bit_position = 0;
        self.byte_index = 0;
        self.working = 0;
        self.dirty = false;
    }

    /// Gives the channel back without flushing.
    pub fn into_inner(self) -> Option<C> {
        self.channel
    }

    #[inline]
    fn next_position(&self) -> Result<u64> {
        self.bit_position
            .checked_add(1)
            .ok_or(BitStreamError::PositionOverflow(self.bit_position))
    }

    //  Capability gates

    /// `Ok(true)` to proceed, `Ok(false)` to skip silently.
    pub(crate) fn writable(&self) -> Result<bool> {
        self.gate(self.caps.write, BitStreamError::NotWritable)
    }

    pub(crate) fn readable(&self) -> Result<bool> {
        self.gate(self.caps.read, BitStreamError::NotReadable)
    }

    fn gate(&self, capable: bool, err: BitStreamError) -> Result<bool> {
        if self.channel.is_none() {
            return Ok(false);
        }
        if capable {
            return Ok(true);
        }
        match self.policy {
            CapabilityPolicy::Strict => Err(err),
            CapabilityPolicy::Lenient => Ok(false),
        }
    }
}

impl<C: Channel> Default for BitStream<C> {
    fn default() -> Self {
        Self::detached()
    }
}

/// Lands `channel` on byte `target`.
///
/// Seekable channels seek. Forward-only channels can only move ahead: a
/// reader discards bytes, a writer pads with zeros. Moving a forward-only
/// channel backwards is a no-op.
fn move_channel_to<C: Channel>(channel: &mut C, caps: Capabilities, target: u64) -> Result<()> {
    let current = channel.position();
    if current == target {
        return Ok(());
    }
    if caps.seek {
        channel.seek_relative(target as i64 - current as i64)?;
    } else if target > current {
        skip_forward(channel, caps, target - current)?;
    }
    Ok(())
}

/// Writes the working byte to byte `byte_index`.
fn write_back<C: Channel>(channel: &mut C, caps: Capabilities, byte_index: u64, working: u8) -> Result<()> {
    move_channel_to(channel, caps, byte_index)?;
    channel.write(&[working])?;
    Ok(())
}

fn skip_forward<C: Channel>(channel: &mut C, caps: Capabilities, mut count: u64) -> Result<()> {
    let mut scratch = [0u8; SKIP_CHUNK];
    while count > 0 {
        let chunk = count.min(SKIP_CHUNK as u64) as usize;
        if caps.read {
            let n = channel.read(&mut scratch[..chunk])?;
            if n == 0 {
                break;
            }
            count -= n as u64;
        } else if caps.write {
            scratch[..chunk].fill(0);
            channel.write(&scratch[..chunk])?;
            count -= chunk as u64;
        } else {
            break;
        }
    }
    Ok(())
}

fn rewind_after_flush<C: Channel>(channel: &mut C, caps: Capabilities, byte_index: u64) -> Result<()> {
    if caps.seek {
        channel.seek_relative(-1)?;
    } else {
        warn!("flushed partial byte {byte_index} on a forward-only channel; it cannot be rewritten");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use byte_channel::{ChannelError, ForwardReader, ForwardWriter};
    use std::io::Cursor;

    /// Memory channel whose next `failures` writes fail.
    #[derive(Debug)]
    struct Flaky {
        inner: MemoryChannel,
        failures: u32,
    }

    impl Flaky {
        fn failing(failures: u32) -> Self {
            Self {
                inner: MemoryChannel::new(),
                failures,
            }
        }
    }

    impl Channel for Flaky {
        fn capabilities(&self) -> Capabilities {
            self.inner.capabilities()
        }

        fn position(&self) -> u64 {
            self.inner.position()
        }

        fn len(&self) -> u64 {
            self.inner.len()
        }

        fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, ChannelError> {
            self.inner.read(buf)
        }

        fn write(&mut self, buf: &[u8]) -> core::result::Result<(), ChannelError> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(ChannelError::Io(std::io::Error::other("write refused")));
            }
            self.inner.write(buf)
        }

        fn seek_relative(&mut self, delta: i64) -> core::result::Result<u64, ChannelError> {
            self.inner.seek_relative(delta)
        }

        fn set_len(&mut self, len: u64) -> core::result::Result<(), ChannelError> {
            self.inner.set_len(len)
        }

        fn flush(&mut self) -> core::result::Result<(), ChannelError> {
            self.inner.flush()
        }
    }

    #[test]
    fn basic_in_memory() -> Result<()> {
        let mut s = BitStream::allocate(64)?;
        s.write_bit_str("1100101")?;
        s.write_bit(true)?;
        s.write_bit(false)?;
        assert_eq!(s.bit_position(), 9);
        assert_eq!(s.channel().unwrap().as_slice(), &[0b1100_1011]);

        s.set_bit_position(0)?;
        assert_eq!(s.read_bit_string(9)?, "110010110");
        Ok(())
    }

    #[test]
    fn partial_byte_preservation() -> Result<()> {
        let mut s = BitStream::attach(MemoryChannel::from_vec(vec![0b1011_0000]))?;

        // bit 2 is already set: writing 1 leaves the byte as it was
        s.set_bit_position(2)?;
        s.write_bit(true)?;
        s.flush()?;
        assert_eq!(s.channel().unwrap().as_slice(), &[0b1011_0000]);

        // flipping bit 1 keeps the other seven
        s.set_bit_position(1)?;
        s.write_bit(true)?;
        s.flush()?;
        assert_eq!(s.channel().unwrap().as_slice(), &[0b1111_0000]);
        Ok(())
    }

    #[test]
    fn flush_rewinds_so_same_byte_is_rewritten() -> Result<()> {
        let mut s = BitStream::allocate(16)?;
        s.write_bit(true)?;
        s.flush()?;
        assert!(!s.is_dirty());
        assert_eq!(s.channel().unwrap().position(), 0);

        s.write_bit(true)?;
        s.flush()?;
        assert_eq!(s.channel().unwrap().as_slice(), &[0b1100_0000]);
        Ok(())
    }

    #[test]
    fn attach_preloads_and_compensates() -> Result<()> {
        let mut ch = MemoryChannel::from_vec(vec![0xAA, 0x55]);
        ch.seek_relative(1)?;
        let mut s = BitStream::attach(ch)?;
        assert_eq!(s.bit_position(), 8);
        assert_eq!(s.channel().unwrap().position(), 1);
        assert_eq!(s.read_bit_string(8)?, "01010101");
        Ok(())
    }

    #[test]
    fn attach_at_skips_bits() -> Result<()> {
        let mut s = BitStream::attach_at(MemoryChannel::from_vec(vec![0x00, 0x0F]), 12)?;
        assert_eq!(s.bit_position(), 12);
        assert_eq!(s.read_bit_string(4)?, "1111");
        Ok(())
    }

    #[test]
    fn allocation_truncates() -> Result<()> {
        let s = BitStream::allocate(20)?;
        assert_eq!(s.bit_capacity(), 16);
        assert_eq!(s.bit_length(), 0);
        Ok(())
    }

    #[test]
    fn seek_origins() -> Result<()> {
        let mut s = BitStream::attach(MemoryChannel::with_capacity(10))?;
        assert_eq!(s.seek(0, SeekOrigin::End)?, 79);
        assert_eq!(s.seek(9, SeekOrigin::End)?, 70);
        assert_eq!(s.seek(3, SeekOrigin::Begin)?, 3);
        assert_eq!(s.seek(5, SeekOrigin::Current)?, 8);
        assert_eq!(s.seek(-20, SeekOrigin::Current)?, 0);
        Ok(())
    }

    #[test]
    fn set_length_rounds_up_and_keeps_cursor() -> Result<()> {
        let mut s = BitStream::allocate(0)?;
        s.set_bit_position(5)?;
        s.set_length(9)?;
        assert_eq!(s.bit_length(), 16);
        assert_eq!(s.bit_position(), 5);
        s.set_length(0)?;
        assert_eq!(s.bit_length(), 0);
        Ok(())
    }

    #[test]
    fn read_remaining_drains_committed_bits() -> Result<()> {
        let mut s = BitStream::attach(MemoryChannel::from_vec(vec![0xF0, 0x01]))?;
        s.set_bit_position(4)?;
        let rest = s.read_remaining()?;
        assert_eq!(rest.len(), 12);
        assert!(rest[..4].iter().all(|b| !b));
        assert_eq!(rest.iter().filter(|b| **b).count(), 1);
        assert!(rest[11]);
        Ok(())
    }

    #[test]
    fn bit_string_rendering_restores_cursor() -> Result<()> {
        let mut s = BitStream::allocate(16)?;
        s.write_bit_str("101")?;
        let rendered = s.to_bit_string()?;
        assert_eq!(rendered, "10100000");
        assert_eq!(s.bit_position(), 3);

        s.write_bit(true)?;
        assert_eq!(s.to_bit_string()?, "10110000");
        Ok(())
    }

    #[test]
    fn batch_forms_agree() -> Result<()> {
        let mut a = BitStream::allocate(8)?;
        let mut b = BitStream::allocate(8)?;
        let mut c = BitStream::allocate(8)?;
        a.write_bits_from(&[true, false, true, true])?;
        b.write_bit_bytes(&[1, 0, 7, 1])?;
        c.write_bit_str("1011")?;
        for s in [&mut a, &mut b, &mut c] {
            s.flush()?;
        }
        let bytes = a.channel().unwrap().as_slice().to_vec();
        assert_eq!(bytes, vec![0b1011_0000]);
        assert_eq!(b.channel().unwrap().as_slice(), bytes.as_slice());
        assert_eq!(c.channel().unwrap().as_slice(), bytes.as_slice());
        Ok(())
    }

    #[test]
    fn invalid_bit_string_writes_nothing() -> Result<()> {
        let mut s = BitStream::allocate(8)?;
        assert!(matches!(
            s.write_bit_str("10a1"),
            Err(BitStreamError::InvalidBitChar('a'))
        ));
        assert_eq!(s.bit_position(), 0);
        assert!(!s.is_dirty());
        Ok(())
    }

    #[test]
    fn detached_stream_is_inert() -> Result<()> {
        let mut s: BitStream<MemoryChannel> = BitStream::detached();
        assert!(!s.has_channel());
        s.write_bit(true)?;
        assert!(!s.read_bit()?);
        s.set_bit_position(40)?;
        assert_eq!(s.bit_position(), 0);
        assert_eq!(s.bit_length(), 0);
        assert_eq!(s.bit_capacity(), 0);
        assert_eq!(s.to_bit_string()?, "");
        s.flush()?;
        Ok(())
    }

    #[test]
    fn strict_policy_reports_missing_capability() -> Result<()> {
        let mut s = BitStream::attach(MemoryChannel::read_only(vec![0xFF]))?;
        assert!(matches!(s.write_bit(true), Err(BitStreamError::NotWritable)));
        assert!(s.read_bit()?);

        let mut w = BitStream::attach(ForwardWriter::new(Vec::new()))?;
        assert!(matches!(w.read_bit(), Err(BitStreamError::NotReadable)));
        Ok(())
    }

    #[test]
    fn lenient_policy_skips_silently() -> Result<()> {
        let mut s = BitStream::with_config(
            MemoryChannel::read_only(vec![0xFF]),
            StreamConfig::lenient(),
        )?;
        s.write_bit(false)?;
        assert_eq!(s.bit_position(), 0);
        assert!(s.read_bit()?);
        Ok(())
    }

    #[test]
    fn close_discards_pending_bits() -> Result<()> {
        let mut channel = MemoryChannel::new();
        {
            let mut s = BitStream::attach(&mut channel)?;
            s.write_bit_str("111")?;
            s.close();
            assert!(!s.has_channel());
            assert_eq!(s.bit_position(), 0);
        }
        assert!(channel.is_empty());
        Ok(())
    }

    #[test]
    fn into_inner_returns_channel() -> Result<()> {
        let mut s = BitStream::allocate(8)?;
        s.write_bit_str("1")?;
        s.flush()?;
        let ch = s.into_inner().unwrap();
        assert_eq!(ch.into_inner(), vec![0x80]);
        Ok(())
    }

    #[test]
    fn forward_writer_emits_each_byte_once() -> Result<()> {
        let mut s = BitStream::attach(ForwardWriter::new(Vec::new()))?;
        s.write_bit_str("1010101011110000")?;
        let ch = s.into_inner().unwrap();
        assert_eq!(ch.into_inner(), vec![0xAA, 0xF0]);
        Ok(())
    }

    #[test]
    fn forward_reader_reads_in_order() -> Result<()> {
        let mut s = BitStream::attach(ForwardReader::new(Cursor::new(vec![0xAA, 0xF0, 0x0F])))?;
        assert_eq!(s.read_bit_string(16)?, "1010101011110000");
        assert_eq!(s.read_bit_string(8)?, "00001111");
        Ok(())
    }

    #[test]
    fn forward_reader_skips_by_discarding() -> Result<()> {
        let mut s = BitStream::attach_at(ForwardReader::new(Cursor::new(vec![0, 0, 0x80])), 16)?;
        assert!(s.read_bit()?);
        Ok(())
    }

    #[test]
    fn forward_writer_pads_skipped_bytes() -> Result<()> {
        let mut s = BitStream::attach(ForwardWriter::new(Vec::new()))?;
        s.set_bit_position(16)?;
        s.write_bit_str("11111111")?;
        let ch = s.into_inner().unwrap();
        assert_eq!(ch.into_inner(), vec![0x00, 0x00, 0xFF]);
        Ok(())
    }

    #[test]
    fn truncating_below_the_cursor_keeps_pending_bits_in_place() -> Result<()> {
        let mut s = BitStream::allocate(0)?;
        s.write_bits_from(&[true; 20])?;
        s.set_length(8)?;
        assert_eq!(s.bit_length(), 8);
        assert_eq!(s.channel().unwrap().position(), 2);

        s.write_bit_str("1111")?;
        s.flush()?;
        assert_eq!(s.channel().unwrap().as_slice(), &[0xFF, 0x00, 0xFF]);
        Ok(())
    }

    #[test]
    fn failed_flush_keeps_byte_dirty() -> Result<()> {
        let mut s = BitStream::attach(Flaky::failing(1))?;
        s.write_bit(true)?;

        assert!(matches!(s.flush(), Err(BitStreamError::Channel(ChannelError::Io(_)))));
        assert!(s.is_dirty());
        assert!(s.channel().unwrap().inner.is_empty());

        s.flush()?;
        assert!(!s.is_dirty());
        assert_eq!(s.channel().unwrap().inner.as_slice(), &[0x80]);
        Ok(())
    }

    #[test]
    fn failed_crossing_keeps_byte_dirty() -> Result<()> {
        let mut s = BitStream::attach(Flaky::failing(1))?;
        s.write_bit_str("1010101")?;

        assert!(s.write_bit(true).is_err());
        assert!(s.is_dirty());
        assert_eq!(s.bit_position(), 7);
        assert!(s.channel().unwrap().inner.is_empty());

        s.set_bit_position(8)?;
        assert!(!s.is_dirty());
        assert_eq!(s.channel().unwrap().inner.as_slice(), &[0b1010_1011]);
        Ok(())
    }

    #[test]
    fn cursor_at_the_last_bit_cannot_advance() -> Result<()> {
        let mut s = BitStream::allocate(8)?;
        s.set_bit_position(u64::MAX)?;
        assert!(matches!(
            s.write_bit(true),
            Err(BitStreamError::PositionOverflow(u64::MAX))
        ));
        assert!(!s.is_dirty());
        assert!(matches!(s.read_bit(), Err(BitStreamError::PositionOverflow(_))));
        assert_eq!(s.bit_position(), u64::MAX);
        Ok(())
    }

    #[test]
    fn oversized_allocation_is_an_error() {
        assert!(matches!(
            BitStream::allocate(u64::MAX),
            Err(BitStreamError::Channel(ChannelError::Allocation { .. }))
        ));
    }

    #[tokio::test]
    async fn failed_flush_async_keeps_byte_dirty() -> Result<()> {
        let mut s = BitStream::attach(Flaky::failing(1))?;
        s.write_bit_str("11")?;

        assert!(s.flush_async().await.is_err());
        assert!(s.is_dirty());

        s.flush_async().await?;
        assert!(!s.is_dirty());
        assert_eq!(s.channel().unwrap().inner.as_slice(), &[0xC0]);
        Ok(())
    }

    #[tokio::test]
    async fn flush_async_matches_flush() -> Result<()> {
        let mut s = BitStream::allocate(8)?;
        s.write_bit_str("11")?;
        s.flush_async().await?;
        assert!(!s.is_dirty());
        s.write_bit(true)?;
        s.flush_async().await?;
        assert_eq!(s.channel().unwrap().as_slice(), &[0b1110_0000]);
        Ok(())
    }
}
