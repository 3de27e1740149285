//! Merkle branch root recomputation.

use auxpow_message::{MerkleBranch, MAX_BRANCH_DEPTH};
use auxpow_primitives::chainhash::{Hash, HASH_SIZE};
use auxpow_primitives::hash::sha256d;

use crate::VerifyError;

/// Compute the merkle tree parent of two child hashes.
///
/// The hashes are in internal (little-endian) byte order; they are
/// concatenated directly and double-SHA256'd.
fn merkle_parent(left: &Hash, right: &Hash) -> Hash {
    let mut concatenated = [0u8; HASH_SIZE * 2];
    concatenated[..HASH_SIZE].copy_from_slice(left.as_bytes());
    concatenated[HASH_SIZE..].copy_from_slice(right.as_bytes());
    Hash::new(sha256d(&concatenated))
}

/// Recompute a merkle root from a leaf hash and a branch.
///
/// Starting from the leaf, each sibling in order is combined with the
/// running hash: when the level's bit in the branch's side mask is 0 the
/// running hash goes on the left of the sibling, when 1 on the right.
/// An empty branch returns the leaf unchanged.
///
/// Branches deeper than `MAX_BRANCH_DEPTH` are rejected with
/// `OversizedBranch` before any hashing, capping the compute cost of
/// adversarial input.
///
/// # Arguments
/// * `leaf` - The leaf hash (a txid or auxiliary block hash).
/// * `branch` - The sibling hashes and direction mask.
///
/// # Returns
/// The computed root, or `OversizedBranch`.
pub fn branch_root(leaf: &Hash, branch: &MerkleBranch) -> Result<Hash, VerifyError> {
    if branch.len() > MAX_BRANCH_DEPTH {
        return Err(VerifyError::OversizedBranch {
            depth: branch.len(),
        });
    }

    let mut running = *leaf;
    for (level, sibling) in branch.hashes.iter().enumerate() {
        running = if (branch.side_mask >> level) & 1 == 0 {
            merkle_parent(&running, sibling)
        } else {
            merkle_parent(sibling, &running)
        };
    }
    Ok(running)
}
