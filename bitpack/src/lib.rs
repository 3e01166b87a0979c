//! # bitpack
//!
//! A unified, ergonomic API for bit-granular data packing.
//!
//! ## Features
//!
//! - **Bit-level cursor**: read and write single bits anywhere in a channel
//! - **Integer fields**: 1 to 64 bit unsigned fields in either scan order
//! - **Quantized floats**: `f32`/`f64` (and `half::f16`) mapped onto N-bit levels
//! - **Pluggable channels**: memory, files, memory maps, forward-only readers/writers
//!
//! ## Quick Start
//!
//! ```rust
//! use bitpack::prelude::*;
//!
//! // A 17-bit record: a 5-bit id, four flag bits and a quantized ratio
//! let mut record = BitStream::allocate(32)?;
//! record.write_field(17u8, 5, false)?;
//! record.write_bit_str("1011")?;
//! record.write_quantized(0.73f32, 0.0, 1.0, 8)?;
//!
//! record.set_bit_position(0)?;
//! assert_eq!(record.read_field::<u8>(5, false)?, 17);
//! assert_eq!(record.read_bit_string(4)?, "1011");
//! let ratio: f32 = record.read_quantized(0.0, 1.0, 8)?;
//! assert!((ratio - 0.73).abs() <= 1.0 / 255.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod io;
pub mod iter;
pub mod prelude;

pub use crate::builder::BitStreamBuilder;
pub use crate::io::{create_file, open_file, read_file_bits, write_file_bits};

// Re-export byte_channel types
pub use byte_channel::{
    Capabilities, Channel, ChannelError, FileChannel, ForwardReader, ForwardWriter, MemoryChannel,
};

#[cfg(feature = "mmap")]
pub use byte_channel::MmapChannel;

// Re-export bit_stream types
pub use bit_stream::{
    BitField, BitStream, BitStreamError, CapabilityPolicy, FieldLayout, SeekOrigin, StreamConfig,
};

// Re-export quantized types
pub use quantized::{Quantize, QuantizedExt, dequantize, derive_bits, quantize};

// Re-export for convenience
pub use bytemuck::{self, Pod, Zeroable};
