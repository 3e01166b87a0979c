//! Forward-only channels over plain `Read`/`Write` values.
//!
//! These cannot seek and cannot be read back, so the bit layer uses them
//! strictly front to back: a reader consumes one byte per boundary crossing,
//! a writer emits one byte per completed byte.

use std::io::{Read, Write};

use crate::{Capabilities, Channel, ChannelError};

/// Forward-only reader.
#[derive(Debug)]
pub struct ForwardReader<R: Read> {
    inner: R,
    position: u64,
    declared_len: Option<u64>,
}

impl<R: Read> ForwardReader<R> {
    /// Wraps a reader of unknown length. `len()` reports the bytes
    /// consumed so far.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            position: 0,
            declared_len: None,
        }
    }

    /// Wraps a reader whose total length is known up front.
    pub fn with_len(inner: R, len: u64) -> Self {
        Self {
            inner,
            position: 0,
            declared_len: Some(len),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Channel for ForwardReader<R> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::forward_read()
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    fn len(&self) -> u64 {
        self.declared_len.unwrap_or(self.position)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn write(&mut self, _buf: &[u8]) -> Result<(), ChannelError> {
        Err(ChannelError::Unsupported("forward reader cannot write"))
    }

    fn seek_relative(&mut self, delta: i64) -> Result<u64, ChannelError> {
        if delta == 0 {
            return Ok(self.position);
        }
        Err(ChannelError::Unsupported("forward reader cannot seek"))
    }

    fn set_len(&mut self, _len: u64) -> Result<(), ChannelError> {
        Err(ChannelError::Unsupported("forward reader cannot resize"))
    }

    fn flush(&mut self) -> Result<(), ChannelError> {
        Ok(())
    }
}

/// Forward-only writer.
#[derive(Debug)]
pub struct ForwardWriter<W: Write> {
    inner: W,
    position: u64,
}

impl<W: Write> ForwardWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Channel for ForwardWriter<W> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::forward_write()
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    /// Bytes written so far.
    fn len(&self) -> u64 {
        self.position
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ChannelError> {
        Err(ChannelError::Unsupported("forward writer cannot read"))
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), ChannelError> {
        self.inner.write_all(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn seek_relative(&mut self, delta: i64) -> Result<u64, ChannelError> {
        if delta == 0 {
            return Ok(self.position);
        }
        Err(ChannelError::Unsupported("forward writer cannot seek"))
    }

    fn set_len(&mut self, _len: u64) -> Result<(), ChannelError> {
        Err(ChannelError::Unsupported("forward writer cannot resize"))
    }

    fn flush(&mut self) -> Result<(), ChannelError> {
        self.inner.flush()?;
        Ok(())
    }
}
