//! # bit_stream
//!
//! Bit-granular reads and writes over any [`byte_channel::Channel`].
//!
//! ```rust
//! use bit_stream::BitStream;
//!
//! // Three fields in 13 bits, no byte alignment
//! let mut stream = BitStream::allocate(16).expect("Failed to allocate stream");
//! stream.write_bit(true).unwrap();
//! stream.write_field(5u8, 3, false).unwrap();
//! stream.write_field(300u16, 9, false).unwrap();
//!
//! stream.set_bit_position(0).unwrap();
//! assert!(stream.read_bit().unwrap());
//! assert_eq!(stream.read_field::<u8>(3, false).unwrap(), 5);
//! assert_eq!(stream.read_field::<u16>(9, false).unwrap(), 300);
//! ```
//!
//! ## Ownership
//!
//! A stream owns its channel. Pass `&mut channel` to lend one instead:
//!
//! ```rust
//! use bit_stream::BitStream;
//! use byte_channel::MemoryChannel;
//!
//! let mut channel = MemoryChannel::new();
//! let mut stream = BitStream::attach(&mut channel).unwrap();
//! stream.write_bit_str("0110").unwrap();
//! stream.flush().unwrap();
//! drop(stream);
//!
//! assert_eq!(channel.as_slice(), &[0b0110_0000]);
//! ```

pub mod error;
pub use error::{BitStreamError, Result};

pub mod config;
pub use config::{CapabilityPolicy, StreamConfig};

#[doc(hidden)]
pub mod bit_ops;
pub use bit_ops::FieldLayout;

pub mod field;
pub use field::BitField;

pub mod stream;
pub use stream::{BitStream, SeekOrigin};

pub use byte_channel::{Capabilities, Channel, ChannelError};
