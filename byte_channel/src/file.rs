use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;
#[cfg(feature = "mmap")]
use memmap2::MmapMut;

use crate::error::offset_by;
use crate::{Capabilities, Channel, ChannelError};

/// Channel over a [`std::fs::File`].
///
/// Capabilities follow the open mode. Length comes from file metadata;
/// files report no capacity.
#[derive(Debug)]
pub struct FileChannel {
    file: File,
    position: u64,
    caps: Capabilities,
}

impl FileChannel {
    /// Opens an existing file for reading and writing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ChannelError> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Self::from_file(file, Capabilities::all())
    }

    /// Creates (or truncates) a file for reading and writing.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, ChannelError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Self::from_file(file, Capabilities::all())
    }

    /// Opens an existing file for reading only.
    pub fn open_read<P: AsRef<Path>>(path: P) -> Result<Self, ChannelError> {
        let file = File::open(path)?;
        Self::from_file(file, Capabilities::read_only())
    }

    /// Wraps an already-open file. `caps` must match how it was opened.
    pub fn from_file(mut file: File, caps: Capabilities) -> Result<Self, ChannelError> {
        let position = file.stream_position()?;
        debug!(
            "file channel at byte {position} (read={}, write={}, seek={})",
            caps.read, caps.write, caps.seek
        );
        Ok(Self {
            file,
            position,
            caps,
        })
    }

    pub fn into_inner(self) -> File {
        self.file
    }
}

impl Channel for FileChannel {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    fn len(&self) -> u64 {
        self.file.metadata().map_or(0, |m| m.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        let n = self.file.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), ChannelError> {
        self.file.write_all(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn seek_relative(&mut self, delta: i64) -> Result<u64, ChannelError> {
        let target = offset_by(self.position, delta)?;
        self.position = self.file.seek(SeekFrom::Start(target))?;
        Ok(self.position)
    }

    fn set_len(&mut self, len: u64) -> Result<(), ChannelError> {
        self.file.set_len(len)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ChannelError> {
        self.file.flush()?;
        Ok(())
    }
}

/// Fixed-size channel over a read-write memory map.
///
/// Capacity and length coincide; the map cannot grow, so writes past the end
/// fail with [`ChannelError::OutOfBounds`] and `set_len` is unsupported.
#[cfg(feature = "mmap")]
#[derive(Debug)]
pub struct MmapChannel {
    map: MmapMut,
    position: u64,
}

#[cfg(feature = "mmap")]
impl MmapChannel {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ChannelError> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        // Safety: the map is private to this channel; concurrent external
        // modification of the file is the caller's responsibility.
        let map = unsafe { MmapMut::map_mut(&file)? };
        debug!("mapped {} bytes read-write", map.len());
        Ok(Self { map, position: 0 })
    }
}

#[cfg(feature = "mmap")]
impl Channel for MmapChannel {
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    #[inline]
    fn len(&self) -> u64 {
        self.map.len() as u64
    }

    fn capacity(&self) -> Option<u64> {
        Some(self.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        let len = self.len();
        if self.position >= len {
            return Ok(0);
        }
        let start = self.position as usize;
        let n = buf.len().min((len - self.position) as usize);
        buf[..n].copy_from_slice(&self.map[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), ChannelError> {
        let len = self.len();
        let end = self.position + buf.len() as u64;
        if end > len {
            return Err(ChannelError::OutOfBounds { offset: end, len });
        }
        let start = self.position as usize;
        self.map[start..end as usize].copy_from_slice(buf);
        self.position = end;
        Ok(())
    }

    fn seek_relative(&mut self, delta: i64) -> Result<u64, ChannelError> {
        self.position = offset_by(self.position, delta)?;
        Ok(self.position)
    }

    fn set_len(&mut self, _len: u64) -> Result<(), ChannelError> {
        Err(ChannelError::Unsupported("mmap channels have a fixed length"))
    }

    fn flush(&mut self) -> Result<(), ChannelError> {
        self.map.flush()?;
        Ok(())
    }
}
