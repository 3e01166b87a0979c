use thiserror::Error;

/// Channel errors
#[derive(Debug, Error)]
pub enum ChannelError {
    /// IO error from the underlying resource
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A relative seek that would land before byte 0
    #[error("cannot seek by {delta} bytes from position {from}")]
    InvalidSeek { from: u64, delta: i64 },

    /// The backend does not support the requested operation
    #[error("unsupported channel operation: {0}")]
    Unsupported(&'static str),

    /// Access past the end of a fixed-size backend
    #[error("offset {offset} out of bounds for length {len}")]
    OutOfBounds { offset: u64, len: u64 },

    /// An in-memory backend could not reserve the bytes it needed
    #[error("cannot allocate {requested} bytes")]
    Allocation { requested: u64 },
}

/// Resolve `from + delta` to an absolute byte offset.
pub(crate) fn offset_by(from: u64, delta: i64) -> Result<u64, ChannelError> {
    from.checked_add_signed(delta)
        .ok_or(ChannelError::InvalidSeek { from, delta })
}
