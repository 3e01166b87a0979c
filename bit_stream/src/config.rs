/// What a stream does when an operation needs a capability the channel
/// lacks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CapabilityPolicy {
    /// Return [`BitStreamError::NotReadable`](crate::BitStreamError::NotReadable)
    /// and friends.
    #[default]
    Strict,
    /// Silently do nothing and return `false`/`0`.
    Lenient,
}

/// Construction options for [`BitStream`](crate::BitStream).
///
/// ```
/// use bit_stream::{CapabilityPolicy, StreamConfig};
///
/// let config = StreamConfig::lenient().with_skip_bits(3);
/// assert_eq!(config.policy, CapabilityPolicy::Lenient);
/// assert_eq!(config.skip_bits, 3);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamConfig {
    pub policy: CapabilityPolicy,
    /// Bits to skip past the channel's position at attach time.
    pub skip_bits: u64,
}

impl StreamConfig {
    pub const fn strict() -> Self {
        Self {
            policy: CapabilityPolicy::Strict,
            skip_bits: 0,
        }
    }

    pub const fn lenient() -> Self {
        Self {
            policy: CapabilityPolicy::Lenient,
            skip_bits: 0,
        }
    }

    pub const fn with_skip_bits(mut self, bits: u64) -> Self {
        self.skip_bits = bits;
        self
    }
}
