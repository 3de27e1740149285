use auxpow_message::{MessageError, MAX_BRANCH_DEPTH};

/// Error types for AuxPow validation.
///
/// Every rejection of the validation pipeline surfaces as exactly one of
/// these, never silently swallowed or internally retried.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// A branch has more links than the safety bound allows.
    #[error("oversized branch: {depth} links exceeds bound of {max}", max = MAX_BRANCH_DEPTH)]
    OversizedBranch {
        /// The offered link count.
        depth: usize,
    },

    /// The recomputed coinbase branch root does not match the parent
    /// header's merkle root field.
    #[error("merkle proof mismatch: coinbase branch root differs from parent merkle root")]
    MerkleProofMismatch,

    /// The chain branch root is absent from the coinbase input script,
    /// or ambiguously present more than once.
    #[error("chain root not found in coinbase script: {0}")]
    ChainRootNotFound(String),

    /// The recomputed parent header hash exceeds the difficulty target.
    #[error("insufficient work: parent header hash exceeds target")]
    InsufficientWork,

    /// The compact bits field does not expand to a usable target.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// An underlying message error (forwarded from `auxpow-message`).
    #[error("message error: {0}")]
    Message(#[from] MessageError),
}
