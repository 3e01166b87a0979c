//! Fluent configuration for bit streams

use bit_stream::{BitStream, CapabilityPolicy, Channel, Result, StreamConfig};
use byte_channel::MemoryChannel;

/// Builder for [`BitStream`]s with a fluent API
///
/// ```
/// use bitpack::prelude::*;
///
/// let mut stream = BitStreamBuilder::new()
///     .lenient()
///     .skip_bits(3)
///     .attach(MemoryChannel::read_only(vec![0b0001_0000]))?;
///
/// assert!(stream.read_bit()?);
/// stream.write_bit(true)?; // not writable: skipped under the lenient policy
/// # Ok::<(), BitStreamError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BitStreamBuilder {
    config: StreamConfig,
}

impl BitStreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing capabilities become errors (the default).
    pub fn strict(mut self) -> Self {
        self.config.policy = CapabilityPolicy::Strict;
        self
    }

    /// Missing capabilities turn operations into silent no-ops.
    pub fn lenient(mut self) -> Self {
        self.config.policy = CapabilityPolicy::Lenient;
        self
    }

    pub fn policy(mut self, policy: CapabilityPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Starts the cursor `bits` past the channel's current position.
    pub fn skip_bits(mut self, bits: u64) -> Self {
        self.config.skip_bits = bits;
        self
    }

    pub fn config(&self) -> StreamConfig {
        self.config
    }

    pub fn attach<C: Channel>(self, channel: C) -> Result<BitStream<C>> {
        BitStream::with_config(channel, self.config)
    }

    /// Allocates a `requested_bits / 8` byte in-memory channel.
    pub fn allocate(self, requested_bits: u64) -> Result<BitStream<MemoryChannel>> {
        BitStream::allocate_with(requested_bits, self.config)
    }
}
