//! # quantized
//!
//! Range-quantized floating-point fields for [`bit_stream`].
//!
//! A float known to lie in `[min, max]` is stored as an N-bit level instead of
//! its full IEEE representation, trading precision for space.
//!
//! ## Features
//!
//! - `f32` and `f64` out of the box
//! - `half::f16` with the `half` feature
//! - Width derived from the range when `bits` is 0
//!
//! ## Examples
//!
//! ```
//! use bit_stream::BitStream;
//! use quantized::QuantizedExt;
//!
//! // A heading in [0, 360) and a throttle in [0, 1], 15 bits together
//! let mut stream = BitStream::allocate(16)?;
//! stream.write_quantized(271.3f32, 0.0, 360.0, 9)?;
//! stream.write_quantized(0.6f64, 0.0, 1.0, 6)?;
//!
//! stream.set_bit_position(0)?;
//! let heading: f32 = stream.read_quantized(0.0, 360.0, 9)?;
//! let throttle: f64 = stream.read_quantized(0.0, 1.0, 6)?;
//! assert!((heading - 271.3).abs() < 0.5);
//! assert!((throttle - 0.6).abs() < 0.02);
//! # Ok::<(), bit_stream::BitStreamError>(())
//! ```

pub mod codec;
pub mod scalar;
pub mod stream_ext;

pub use codec::{derive_bits, dequantize, max_level, quantize, resolve_bits};
pub use scalar::Quantize;
pub use stream_ext::QuantizedExt;
