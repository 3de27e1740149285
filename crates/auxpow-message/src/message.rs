//! The full AuxPow wire message.

use serde::{Deserialize, Serialize};

use auxpow_primitives::chainhash::Hash;
use auxpow_primitives::util::{WireReader, WireWriter};

use crate::branch::MerkleBranch;
use crate::coinbase::CoinbaseTransaction;
use crate::header::ParentHeader;
use crate::MessageError;

/// Defensive bound on total message size, checked before any parsing.
pub const MAX_MESSAGE_SIZE: usize = 1_000_000;

/// A decoded AuxPow message.
///
/// Proves that an auxiliary-chain block was merge-mined with a parent
/// block: the parent coinbase transaction carries a commitment to the
/// auxiliary chain's merkle root, the coinbase branch connects the
/// coinbase transaction to the parent header's merkle root, and the
/// parent header carries the proof-of-work.
///
/// Constructed exactly once from a raw buffer via `from_bytes`, which
/// either yields a fully-populated structure or fails with no partial
/// object. The structure is never mutated after decode.
///
/// # Wire format
///
/// | Field           | Size                |
/// |-----------------|---------------------|
/// | coinbase_tx     | variable            |
/// | aux_block_hash  | 32 bytes            |
/// | coinbase_branch | variable            |
/// | chain_branch    | variable            |
/// | parent_header   | 80 bytes            |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxPowMessage {
    /// The parent block's coinbase transaction.
    pub coinbase_tx: CoinbaseTransaction,

    /// The auxiliary block hash field carried in the message.
    ///
    /// Transport only: the validator takes the chain-branch leaf as an
    /// explicit caller parameter rather than trusting this field.
    pub aux_block_hash: Hash,

    /// Branch connecting the coinbase transaction to the parent
    /// header's merkle root.
    pub coinbase_branch: MerkleBranch,

    /// Branch connecting the auxiliary block to the commitment in the
    /// coinbase script.
    pub chain_branch: MerkleBranch,

    /// The parent block header carrying the proof-of-work.
    pub parent_header: ParentHeader,
}

impl AuxPowMessage {
    /// Decode an AuxPow message from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, MessageError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| MessageError::Malformed(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Decode an AuxPow message from raw bytes.
    ///
    /// The buffer must contain exactly one complete message: trailing
    /// bytes after the final header field fail with `Malformed`, as does
    /// a buffer larger than `MAX_MESSAGE_SIZE`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageError> {
        if bytes.len() > MAX_MESSAGE_SIZE {
            return Err(MessageError::Malformed(format!(
                "message of {} bytes exceeds bound of {}",
                bytes.len(),
                MAX_MESSAGE_SIZE
            )));
        }

        let mut reader = WireReader::new(bytes);
        let msg = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(MessageError::Malformed(format!(
                "trailing {} bytes after parent header",
                reader.remaining()
            )));
        }
        Ok(msg)
    }

    /// Deserialize an AuxPow message from a `WireReader`.
    ///
    /// Fields are decoded strictly in wire order: coinbase transaction,
    /// auxiliary block hash, coinbase branch, chain branch, parent header.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, MessageError> {
        let coinbase_tx = CoinbaseTransaction::read_from(reader)?;
        let aux_block_hash = reader.read_hash()?;
        let coinbase_branch = MerkleBranch::read_from(reader)?;
        let chain_branch = MerkleBranch::read_from(reader)?;
        let parent_header = ParentHeader::read_from(reader)?;

        Ok(AuxPowMessage {
            coinbase_tx,
            aux_block_hash,
            coinbase_branch,
            chain_branch,
            parent_header,
        })
    }

    /// Serialize this message into a `WireWriter`.
    pub fn write_to(&self, writer: &mut WireWriter) {
        self.coinbase_tx.write_to(writer);
        writer.write_hash(&self.aux_block_hash);
        self.coinbase_branch.write_to(writer);
        self.chain_branch.write_to(writer);
        self.parent_header.write_to(writer);
    }

    /// Serialize this message to raw bytes.
    ///
    /// Reproduces the original wire bytes exactly.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(512);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Serialize this message to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}
