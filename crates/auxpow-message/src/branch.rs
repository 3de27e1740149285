//! Merkle branch carried in an AuxPow message.
//!
//! A branch is an ordered list of sibling hashes plus a direction
//! bitmask; together with a leaf hash it allows recomputation of the
//! merkle root. Two branches appear in every AuxPow message: one
//! connecting the coinbase transaction to the parent block's merkle
//! root, and one connecting the auxiliary block to the commitment in
//! the coinbase script.

use serde::{Deserialize, Serialize};

use auxpow_primitives::chainhash::{Hash, HASH_SIZE};
use auxpow_primitives::util::{VarInt, WireReader, WireWriter};

use crate::MessageError;

/// Safety bound on branch depth.
///
/// Caps the compute cost an adversarial message can force: the bound is
/// checked before any of the declared sibling hashes are read or hashed.
/// 30 levels covers a merkle tree of over a billion leaves, far beyond
/// any real parent block or merge-mining tree.
pub const MAX_BRANCH_DEPTH: usize = 30;

/// A merkle branch: ordered sibling hashes plus per-level direction bits.
///
/// Bit `i` of `side_mask` gives the side for level `i`: 0 places the
/// running hash on the left of the sibling, 1 on the right.
///
/// # Wire format
///
/// | Field      | Size               |
/// |------------|--------------------|
/// | link count | VarInt             |
/// | siblings   | 32 bytes per link  |
/// | side_mask  | 4 bytes (LE)       |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleBranch {
    /// Sibling hashes, ordered leaf-side first.
    pub hashes: Vec<Hash>,

    /// Per-level direction bits.
    pub side_mask: u32,
}

impl MerkleBranch {
    /// Deserialize a `MerkleBranch` from a `WireReader`.
    ///
    /// A link count above `MAX_BRANCH_DEPTH` fails with `OversizedBranch`
    /// before any of the claimed hashes are read. A count that cannot fit
    /// in the remaining bytes fails with `Malformed`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, MessageError> {
        let link_count = reader.read_varint()?.value();
        if link_count > MAX_BRANCH_DEPTH as u64 {
            return Err(MessageError::OversizedBranch { depth: link_count });
        }

        let needed = link_count as usize * HASH_SIZE + 4;
        if needed > reader.remaining() {
            return Err(MessageError::Malformed(format!(
                "branch of {} links needs {} bytes, {} remaining",
                link_count,
                needed,
                reader.remaining()
            )));
        }

        let mut hashes = Vec::with_capacity(link_count as usize);
        for _ in 0..link_count {
            hashes.push(reader.read_hash()?);
        }
        let side_mask = reader.read_u32_le()?;

        Ok(MerkleBranch { hashes, side_mask })
    }

    /// Serialize this branch into a `WireWriter`.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt::from(self.hashes.len()));
        for hash in &self.hashes {
            writer.write_hash(hash);
        }
        writer.write_u32_le(self.side_mask);
    }

    /// Return the number of levels in the branch.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Check whether the branch is empty.
    ///
    /// An empty branch leaves a leaf hash unchanged during root
    /// recomputation.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
