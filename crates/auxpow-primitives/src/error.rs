/// Unified error type for all primitives operations.
///
/// Covers errors from wire reading, hashing, and hex decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// A read would consume more bytes than remain in the buffer.
    #[error("truncated input: need {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// Bytes the failing read required.
        needed: usize,
        /// Bytes left in the buffer at the time of the read.
        remaining: usize,
    },

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
