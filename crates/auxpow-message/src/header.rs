//! Parent block header embedded in an AuxPow message.

use serde::{Deserialize, Serialize};

use auxpow_primitives::chainhash::{double_hash, Hash};
use auxpow_primitives::util::{WireReader, WireWriter};

use crate::MessageError;

/// Encoded size of a parent block header in bytes.
pub const HEADER_SIZE: usize = 80;

/// The parent block header, on which the real proof-of-work was done.
///
/// Reconstructable byte-for-byte from the decoded fields alone; the
/// reconstruction is what gets hashed for the proof-of-work check and
/// must be byte-identical to what a parent-chain node would hash.
///
/// # Wire format
///
/// | Field       | Size          |
/// |-------------|---------------|
/// | version     | 4 bytes (LE)  |
/// | prev_block  | 32 bytes      |
/// | merkle_root | 32 bytes      |
/// | time        | 4 bytes (LE)  |
/// | bits        | 4 bytes (LE)  |
/// | nonce       | 4 bytes (LE)  |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentHeader {
    /// Block version.
    pub version: u32,

    /// Hash of the previous block in the parent chain.
    pub prev_block: Hash,

    /// Root of the parent block's transaction merkle tree.
    pub merkle_root: Hash,

    /// Block timestamp in Unix seconds, as claimed by the miner.
    pub time: u32,

    /// Compact encoding of the difficulty target.
    pub bits: u32,

    /// The nonce selected to obtain a low enough block hash.
    pub nonce: u32,
}

impl ParentHeader {
    /// Deserialize a `ParentHeader` from a `WireReader`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, MessageError> {
        let version = reader.read_u32_le()?;
        let prev_block = reader.read_hash()?;
        let merkle_root = reader.read_hash()?;
        let time = reader.read_u32_le()?;
        let bits = reader.read_u32_le()?;
        let nonce = reader.read_u32_le()?;

        Ok(ParentHeader {
            version,
            prev_block,
            merkle_root,
            time,
            bits,
            nonce,
        })
    }

    /// Serialize this header into a `WireWriter`.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u32_le(self.version);
        writer.write_hash(&self.prev_block);
        writer.write_hash(&self.merkle_root);
        writer.write_u32_le(self.time);
        writer.write_u32_le(self.bits);
        writer.write_u32_le(self.nonce);
    }

    /// Serialize this header to its exact 80-byte wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(HEADER_SIZE);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Compute the block hash: double SHA-256 over the reconstructed
    /// header bytes, in internal byte order.
    pub fn block_hash(&self) -> Hash {
        double_hash(&self.to_bytes())
    }
}
