//! Convenience re-exports for common usage

pub use crate::builder::BitStreamBuilder;
pub use crate::io::{create_file, open_file, read_file_bits, write_file_bits};

// Stream types
pub use bit_stream::{
    BitField, BitStream, BitStreamError, CapabilityPolicy, SeekOrigin, StreamConfig,
};

// Quantized floats
pub use quantized::{Quantize, QuantizedExt};

// Channels
pub use byte_channel::{
    Capabilities, Channel, ChannelError, FileChannel, ForwardReader, ForwardWriter, MemoryChannel,
};

// Bytemuck utilities
pub use bytemuck::{Pod, Zeroable};

// Common result type
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
