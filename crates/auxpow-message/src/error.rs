use auxpow_primitives::PrimitivesError;

use crate::branch::MAX_BRANCH_DEPTH;

/// Error types for AuxPow message decoding.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The buffer ended before a fixed or declared field was complete.
    #[error("truncated message: {0}")]
    Truncated(#[from] PrimitivesError),

    /// A declared count is inconsistent with the remaining bytes, or
    /// bytes remain unconsumed after the final field.
    #[error("malformed message: {0}")]
    Malformed(String),

    /// A merkle branch declares more links than the safety bound allows.
    #[error("oversized branch: {depth} links exceeds bound of {max}", max = MAX_BRANCH_DEPTH)]
    OversizedBranch {
        /// The declared link count.
        depth: u64,
    },
}
