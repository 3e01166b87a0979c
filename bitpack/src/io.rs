//! File helpers for bit streams

use std::path::Path;

use bit_stream::{BitStream, Result};
use byte_channel::FileChannel;
use log::debug;

/// Creates (or truncates) `path` and attaches a read/write stream to it.
///
/// Bits written are committed when the cursor leaves a byte or on
/// [`BitStream::flush`]; dropping the stream does not flush.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<BitStream<FileChannel>> {
    debug!("creating bit file {}", path.as_ref().display());
    BitStream::attach(FileChannel::create(path)?)
}

/// Opens an existing file for reading and in-place bit edits.
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<BitStream<FileChannel>> {
    debug!("opening bit file {}", path.as_ref().display());
    BitStream::attach(FileChannel::open(path)?)
}

/// Reads every bit of a file.
pub fn read_file_bits<P: AsRef<Path>>(path: P) -> Result<Vec<bool>> {
    let mut stream = BitStream::attach(FileChannel::open_read(path)?)?;
    stream.read_remaining()
}

/// Writes `bits` to a new file, zero-padding the last byte.
pub fn write_file_bits<P: AsRef<Path>>(path: P, bits: &[bool]) -> Result<()> {
    let mut stream = create_file(path)?;
    stream.write_bits_from(bits)?;
    stream.flush()
}
