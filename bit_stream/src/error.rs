use byte_channel::ChannelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BitStreamError {
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("stream is not readable")]
    NotReadable,

    #[error("stream is not writable")]
    NotWritable,

    #[error("stream is not seekable")]
    NotSeekable,

    #[error("bit count must be in the range 1..=64, got {0}")]
    InvalidBitCount(u32),

    #[error("bit position cannot advance past {0}")]
    PositionOverflow(u64),

    #[error("invalid bit character {0:?}, expected '0' or '1'")]
    InvalidBitChar(char),
}

pub type Result<T> = core::result::Result<T, BitStreamError>;
