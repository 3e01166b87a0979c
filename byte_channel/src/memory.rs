use bytemuck::Pod;
use log::trace;

use crate::error::offset_by;
use crate::{Capabilities, Channel, ChannelError};

/// Smallest capacity a growing channel jumps to.
const MIN_GROWTH: u64 = 256;

/// Growable in-memory channel.
///
/// Capacity is tracked explicitly so that it reports exactly what was
/// requested at construction, independent of the allocator. Writes past the
/// end grow the capacity to `max(needed, 2 * capacity, 256)`, and seeking
/// past the end is allowed; a later write zero-fills the gap.
#[derive(Debug, Clone)]
pub struct MemoryChannel {
    data: Vec<u8>,
    position: u64,
    capacity: u64,
    writable: bool,
}

impl MemoryChannel {
    /// Creates an empty, writable channel with no pre-allocated capacity.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            position: 0,
            capacity: 0,
            writable: true,
        }
    }

    /// Creates an empty, writable channel with `bytes` of capacity.
    ///
    /// ```
    /// use byte_channel::{Channel, MemoryChannel};
    ///
    /// let ch = MemoryChannel::with_capacity(10);
    /// assert_eq!(ch.capacity(), Some(10));
    /// assert_eq!(ch.len(), 0);
    /// ```
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            position: 0,
            capacity: bytes as u64,
            writable: true,
        }
    }

    /// Fallible [`MemoryChannel::with_capacity`] for sizes that may not fit in
    /// memory.
    ///
    /// ```
    /// use byte_channel::{ChannelError, MemoryChannel};
    ///
    /// assert!(MemoryChannel::try_with_capacity(64).is_ok());
    /// assert!(matches!(
    ///     MemoryChannel::try_with_capacity(u64::MAX),
    ///     Err(ChannelError::Allocation { .. })
    /// ));
    /// ```
    pub fn try_with_capacity(bytes: u64) -> Result<Self, ChannelError> {
        let mut data = Vec::new();
        reserve(&mut data, bytes)?;
        Ok(Self {
            data,
            position: 0,
            capacity: bytes,
            writable: true,
        })
    }

    /// Wraps existing bytes. The channel stays writable and growable.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let capacity = data.len() as u64;
        Self {
            data,
            position: 0,
            capacity,
            writable: true,
        }
    }

    /// Wraps existing bytes for reading only.
    pub fn read_only(data: Vec<u8>) -> Self {
        Self {
            writable: false,
            ..Self::from_vec(data)
        }
    }

    /// Copies the raw bytes of a `Pod` slice into a new channel.
    ///
    /// ```
    /// use byte_channel::{Channel, MemoryChannel};
    ///
    /// let ch = MemoryChannel::from_pod_slice(&[0x0102u16.to_be()]);
    /// assert_eq!(ch.as_slice(), &[0x01, 0x02]);
    /// ```
    pub fn from_pod_slice<T: Pod>(values: &[T]) -> Self {
        Self::from_vec(bytemuck::cast_slice(values).to_vec())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn ensure_capacity(&mut self, needed: u64) -> Result<(), ChannelError> {
        if needed <= self.capacity {
            return Ok(());
        }
        let grown = needed
            .max(self.capacity.saturating_mul(2))
            .max(MIN_GROWTH);
        reserve(&mut self.data, grown)?;
        trace!("memory channel grew from {} to {grown} bytes", self.capacity);
        self.capacity = grown;
        Ok(())
    }

    fn check_writable(&self) -> Result<(), ChannelError> {
        if self.writable {
            Ok(())
        } else {
            Err(ChannelError::Unsupported("memory channel is read-only"))
        }
    }
}

impl Channel for MemoryChannel {
    fn capabilities(&self) -> Capabilities {
        if self.writable {
            Capabilities::all()
        } else {
            Capabilities::read_only()
        }
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    #[inline]
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    #[inline]
    fn capacity(&self) -> Option<u64> {
        Some(self.capacity)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        let len = self.len();
        if self.position >= len {
            return Ok(0);
        }
        let start = self.position as usize;
        let n = buf.len().min((len - self.position) as usize);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), ChannelError> {
        self.check_writable()?;
        let end = self
            .position
            .checked_add(buf.len() as u64)
            .ok_or(ChannelError::Allocation { requested: u64::MAX })?;
        self.ensure_capacity(end)?;
        if end > self.len() {
            self.data.resize(end as usize, 0);
        }
        let start = self.position as usize;
        self.data[start..end as usize].copy_from_slice(buf);
        self.position = end;
        Ok(())
    }

    fn seek_relative(&mut self, delta: i64) -> Result<u64, ChannelError> {
        self.position = offset_by(self.position, delta)?;
        Ok(self.position)
    }

    fn set_len(&mut self, len: u64) -> Result<(), ChannelError> {
        self.check_writable()?;
        self.ensure_capacity(len)?;
        self.data.resize(len as usize, 0);
        if self.position > len {
            self.position = len;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ChannelError> {
        Ok(())
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Grows `data` so it can hold `total` bytes without panicking on
/// impossible sizes.
fn reserve(data: &mut Vec<u8>, total: u64) -> Result<(), ChannelError> {
    let failed = || ChannelError::Allocation { requested: total };
    let total = usize::try_from(total).map_err(|_| failed())?;
    let extra = total.saturating_sub(data.len());
    data.try_reserve(extra).map_err(|_| failed())
}
