use core::future::Future;

use crate::ChannelError;

/// What a channel allows. Probed once by the bit layer and cached.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub read: bool,
    pub write: bool,
    pub seek: bool,
}

impl Capabilities {
    /// Readable, writable and seekable.
    pub const fn all() -> Self {
        Self { read: true, write: true, seek: true }
    }

    /// Readable and seekable, never writable.
    pub const fn read_only() -> Self {
        Self { read: true, write: false, seek: true }
    }

    /// Forward-only reader.
    pub const fn forward_read() -> Self {
        Self { read: true, write: false, seek: false }
    }

    /// Forward-only writer.
    pub const fn forward_write() -> Self {
        Self { read: false, write: true, seek: false }
    }

    pub const fn none() -> Self {
        Self { read: false, write: false, seek: false }
    }
}

/// A byte-oriented resource the bit layer reads from and writes to.
///
/// The contract mirrors a classic seekable stream: one current byte
/// position shared by reads and writes, a reported length, and an optional
/// pre-allocated capacity. Backends that cannot perform an operation return
/// [`ChannelError::Unsupported`]; callers are expected to consult
/// [`Channel::capabilities`] first.
///
/// Disposal is `Drop`. Lending a channel instead of handing it over works
/// through the `&mut C` implementation below.
///
/// # Examples
///
/// ```
/// use byte_channel::{Channel, MemoryChannel};
///
/// let mut ch = MemoryChannel::with_capacity(4);
/// ch.write(&[0xAB, 0xCD]).unwrap();
/// assert_eq!(ch.position(), 2);
/// assert_eq!(ch.len(), 2);
/// assert_eq!(ch.capacity(), Some(4));
///
/// ch.seek_relative(-2).unwrap();
/// let mut buf = [0u8; 1];
/// assert_eq!(ch.read(&mut buf).unwrap(), 1);
/// assert_eq!(buf[0], 0xAB);
/// ```
pub trait Channel {
    fn capabilities(&self) -> Capabilities;

    /// Current byte position.
    fn position(&self) -> u64;

    /// Bytes of data currently held.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-allocated size in bytes, `None` when the backend cannot tell.
    fn capacity(&self) -> Option<u64> {
        None
    }

    /// Reads up to `buf.len()` bytes, returning how many were read.
    /// Returns 0 at end of data.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError>;

    /// Writes all of `buf` at the current position.
    fn write(&mut self, buf: &[u8]) -> Result<(), ChannelError>;

    /// Moves the position by `delta` bytes and returns the new position.
    fn seek_relative(&mut self, delta: i64) -> Result<u64, ChannelError>;

    /// Resizes the backing data to `len` bytes.
    fn set_len(&mut self, len: u64) -> Result<(), ChannelError>;

    fn flush(&mut self) -> Result<(), ChannelError>;

    /// Asynchronous form of [`Channel::write`]. The default runs the
    /// synchronous write inside the future.
    fn write_async(&mut self, buf: &[u8]) -> impl Future<Output = Result<(), ChannelError>> {
        async move { self.write(buf) }
    }

    /// Asynchronous form of [`Channel::flush`].
    fn flush_async(&mut self) -> impl Future<Output = Result<(), ChannelError>> {
        async move { self.flush() }
    }
}

impl<C: Channel> Channel for &mut C {
    #[inline]
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    #[inline]
    fn position(&self) -> u64 {
        (**self).position()
    }

    #[inline]
    fn len(&self) -> u64 {
        (**self).len()
    }

    #[inline]
    fn capacity(&self) -> Option<u64> {
        (**self).capacity()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), ChannelError> {
        (**self).write(buf)
    }

    fn seek_relative(&mut self, delta: i64) -> Result<u64, ChannelError> {
        (**self).seek_relative(delta)
    }

    fn set_len(&mut self, len: u64) -> Result<(), ChannelError> {
        (**self).set_len(len)
    }

    fn flush(&mut self) -> Result<(), ChannelError> {
        (**self).flush()
    }

    fn write_async(&mut self, buf: &[u8]) -> impl Future<Output = Result<(), ChannelError>> {
        (**self).write_async(buf)
    }

    fn flush_async(&mut self) -> impl Future<Output = Result<(), ChannelError>> {
        (**self).flush_async()
    }
}
