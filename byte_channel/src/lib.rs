//! # byte_channel
//!
//! Byte-oriented channels for the bit layer: one trait, [`Channel`], and the
//! backends that implement it.
//!
//! - [`MemoryChannel`]: growable in-memory buffer with an explicit capacity
//! - [`FileChannel`]: seekable file
//! - [`ForwardReader`] / [`ForwardWriter`]: forward-only `Read`/`Write` adapters
//! - `MmapChannel`: fixed-size memory map (feature `mmap`)

pub mod channel;
pub mod error;
pub mod file;
pub mod forward;
pub mod memory;

pub use channel::{Capabilities, Channel};
pub use error::ChannelError;
pub use file::FileChannel;
#[cfg(feature = "mmap")]
pub use file::MmapChannel;
pub use forward::{ForwardReader, ForwardWriter};
pub use memory::MemoryChannel;
