//! The AuxPow validation pipeline.
//!
//! Ties the decoded message together: the coinbase transaction must hash
//! into the parent block via the coinbase branch, the auxiliary block
//! must hash into a commitment embedded in the coinbase script via the
//! chain branch, and the parent header must carry sufficient
//! proof-of-work. The pipeline is stateless and linear; the first
//! failing step halts it with exactly one error.

use auxpow_message::AuxPowMessage;
use auxpow_primitives::chainhash::{Hash, HASH_SIZE};

use crate::branch::branch_root;
use crate::target::{bits_to_target, hash_meets_target};
use crate::VerifyError;

/// Count occurrences of a 32-byte commitment within a script.
fn commitment_count(script: &[u8], commitment: &[u8; HASH_SIZE]) -> usize {
    if script.len() < HASH_SIZE {
        return 0;
    }
    script.windows(HASH_SIZE).filter(|w| w == commitment).count()
}

/// Validate an AuxPow message.
///
/// The chain-branch leaf is the caller-supplied hash of the auxiliary
/// block claiming the proof; the embedded `aux_block_hash` field of the
/// message is never consulted. `expected_bits` is the compact difficulty
/// the caller requires of the parent block; a caller willing to trust
/// the header's self-declared difficulty passes
/// `msg.parent_header.bits`.
///
/// Steps, in order:
/// 1. Recompute the coinbase transaction hash from its reconstructed
///    wire bytes.
/// 2. The coinbase branch must connect it to the parent header's merkle
///    root (`MerkleProofMismatch` otherwise).
/// 3. Recompute the chain branch root from `aux_block_hash`.
/// 4. That root, byte-reversed into its conventional order, must occur
///    exactly once in the coinbase input script; zero or multiple
///    occurrences fail with `ChainRootNotFound`.
/// 5. The parent header hash must not exceed the target expanded from
///    `expected_bits` (`InsufficientWork` otherwise).
///
/// # Arguments
/// * `msg` - The decoded message; not mutated or retained.
/// * `aux_block_hash` - Hash of the auxiliary block claiming the proof.
/// * `expected_bits` - Compact difficulty the parent block must meet.
///
/// # Returns
/// The verified parent header hash, or the rejection reason.
pub fn validate(
    msg: &AuxPowMessage,
    aux_block_hash: &Hash,
    expected_bits: u32,
) -> Result<Hash, VerifyError> {
    let coinbase_txid = msg.coinbase_tx.txid();
    let coinbase_root = branch_root(&coinbase_txid, &msg.coinbase_branch)?;
    if coinbase_root != msg.parent_header.merkle_root {
        return Err(VerifyError::MerkleProofMismatch);
    }

    let chain_root = branch_root(aux_block_hash, &msg.chain_branch)?;
    let commitment = chain_root.reversed_bytes();
    let occurrences: usize = msg
        .coinbase_tx
        .inputs
        .iter()
        .map(|input| commitment_count(&input.script, &commitment))
        .sum();
    match occurrences {
        1 => {}
        0 => {
            return Err(VerifyError::ChainRootNotFound(format!(
                "no commitment to chain root {}",
                chain_root
            )));
        }
        n => {
            return Err(VerifyError::ChainRootNotFound(format!(
                "{} candidate commitments to chain root {}",
                n, chain_root
            )));
        }
    }

    let target = bits_to_target(expected_bits)?;
    let header_hash = msg.parent_header.block_hash();
    if !hash_meets_target(&header_hash, &target) {
        return Err(VerifyError::InsufficientWork);
    }

    Ok(header_hash)
}
