/// Errors that can occur in the header and entry codecs.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A source or destination buffer is shorter than the fixed layout requires.
    #[error("buffer too small ({got} bytes, need {needed})")]
    BufferTooSmall { needed: usize, got: usize },

    /// The version byte does not match [`PROTOCOL_VERSION`](crate::PROTOCOL_VERSION).
    #[error("protocol version mismatch (expected {expected}, found {found})")]
    VersionMismatch { expected: u8, found: u8 },

    /// The algorithm tag does not name a known scheme.
    #[error("unknown algorithm tag {0}")]
    UnknownAlgorithm(u32),

    /// The operation tag does not name a known operation.
    #[error("unknown operation tag {0}")]
    UnknownOperation(u32),

    /// A failed response header claims to carry a body.
    #[error("failed response header carries a body ({data_len} bytes)")]
    InvalidResponse { data_len: u32 },

    /// An entry length field does not fit a `usize` on this architecture.
    #[error("entry length field does not fit a usize")]
    LengthParse,

    /// A declared entry length would read past the end of the buffer.
    #[error("structured buffer truncated: need {needed} bytes, {available} remain")]
    OutOfBounds { needed: u64, available: usize },

    /// The combined entry lengths overflow the addressable size.
    #[error("combined entry lengths overflow usize")]
    LengthOverflow,
}

pub type Result<T> = std::result::Result<T, WireError>;
