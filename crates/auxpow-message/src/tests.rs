//! Tests for the auxpow-message crate.
//!
//! Covers wire decoding of synthetic AuxPow messages, byte-exact
//! serialization roundtrips, truncation handling, strict trailing-data
//! rejection, and the branch depth safety bound.

use auxpow_primitives::chainhash::{double_hash, Hash};
use auxpow_primitives::util::{VarInt, WireReader, WireWriter};
use auxpow_primitives::PrimitivesError;

use crate::branch::{MerkleBranch, MAX_BRANCH_DEPTH};
use crate::coinbase::{CoinbaseInput, CoinbaseOutput, CoinbaseTransaction};
use crate::header::{ParentHeader, HEADER_SIZE};
use crate::message::AuxPowMessage;
use crate::MessageError;

// -----------------------------------------------------------------------
// Synthetic message construction
// -----------------------------------------------------------------------

/// Build a well-formed coinbase transaction with the given input script.
fn sample_coinbase(script: &[u8]) -> CoinbaseTransaction {
    CoinbaseTransaction {
        version: 1,
        inputs: vec![CoinbaseInput {
            prev_out_hash: Hash::default(),
            prev_out_index: 0xffff_ffff,
            script: script.to_vec(),
            sequence: 0xffff_ffff,
        }],
        outputs: vec![CoinbaseOutput {
            value: 5_000_000_000,
            script: vec![0x51],
        }],
        lock_time: 0,
    }
}

/// Build a well-formed AuxPow message with one-level branches.
fn sample_message() -> AuxPowMessage {
    AuxPowMessage {
        coinbase_tx: sample_coinbase(b"merge mining commitment goes here"),
        aux_block_hash: double_hash(b"aux block"),
        coinbase_branch: MerkleBranch {
            hashes: vec![double_hash(b"coinbase sibling")],
            side_mask: 0,
        },
        chain_branch: MerkleBranch {
            hashes: vec![double_hash(b"chain sibling")],
            side_mask: 1,
        },
        parent_header: ParentHeader {
            version: 2,
            prev_block: double_hash(b"parent prev"),
            merkle_root: double_hash(b"parent root"),
            time: 1_415_270_000,
            bits: 0x1d00_ffff,
            nonce: 42,
        },
    }
}

// -----------------------------------------------------------------------
// Decoding and roundtrips
// -----------------------------------------------------------------------

#[test]
fn test_message_roundtrip() {
    let msg = sample_message();
    let bytes = msg.to_bytes();

    let decoded = AuxPowMessage::from_bytes(&bytes).expect("should decode synthetic message");
    assert_eq!(decoded, msg);
    assert_eq!(decoded.to_bytes(), bytes, "reserialization must be byte-exact");
}

#[test]
fn test_hex_roundtrip() {
    let msg = sample_message();
    let hex_str = msg.to_hex();
    let decoded = AuxPowMessage::from_hex(&hex_str).expect("should decode from hex");
    assert_eq!(decoded.to_hex(), hex_str);
}

#[test]
fn test_decoded_fields() {
    let msg = sample_message();
    let decoded = AuxPowMessage::from_bytes(&msg.to_bytes()).unwrap();

    assert_eq!(decoded.coinbase_tx.version, 1);
    assert_eq!(decoded.coinbase_tx.inputs.len(), 1);
    assert_eq!(decoded.coinbase_tx.inputs[0].prev_out_index, 0xffff_ffff);
    assert_eq!(
        decoded.coinbase_tx.inputs[0].script,
        b"merge mining commitment goes here"
    );
    assert_eq!(decoded.coinbase_tx.outputs.len(), 1);
    assert_eq!(decoded.coinbase_tx.outputs[0].value, 5_000_000_000);
    assert_eq!(decoded.coinbase_tx.lock_time, 0);

    assert_eq!(decoded.aux_block_hash, double_hash(b"aux block"));
    assert_eq!(decoded.coinbase_branch.len(), 1);
    assert_eq!(decoded.coinbase_branch.side_mask, 0);
    assert_eq!(decoded.chain_branch.side_mask, 1);

    assert_eq!(decoded.parent_header.bits, 0x1d00_ffff);
    assert_eq!(decoded.parent_header.nonce, 42);
}

#[test]
fn test_coinbase_reconstruction_is_byte_exact() {
    let tx = sample_coinbase(&[0xde, 0xad, 0xbe, 0xef]);
    let bytes = tx.to_bytes();

    let mut reader = WireReader::new(&bytes);
    let decoded = CoinbaseTransaction::read_from(&mut reader).unwrap();
    assert_eq!(reader.remaining(), 0);
    assert_eq!(decoded.to_bytes(), bytes);
    assert_eq!(decoded.txid(), tx.txid());
}

#[test]
fn test_header_reconstruction() {
    let header = sample_message().parent_header;
    let bytes = header.to_bytes();
    assert_eq!(bytes.len(), HEADER_SIZE);

    let mut reader = WireReader::new(&bytes);
    let decoded = ParentHeader::read_from(&mut reader).unwrap();
    assert_eq!(decoded, header);
    assert_eq!(decoded.block_hash(), double_hash(&bytes));
}

#[test]
fn test_empty_branch_roundtrip() {
    let mut msg = sample_message();
    msg.chain_branch = MerkleBranch {
        hashes: vec![],
        side_mask: 0,
    };
    let decoded = AuxPowMessage::from_bytes(&msg.to_bytes()).unwrap();
    assert!(decoded.chain_branch.is_empty());
}

// -----------------------------------------------------------------------
// Truncation
// -----------------------------------------------------------------------

#[test]
fn test_truncated_message_at_every_prefix() {
    // No prefix of a well-formed message decodes successfully.
    let bytes = sample_message().to_bytes();
    for len in 0..bytes.len() {
        let result = AuxPowMessage::from_bytes(&bytes[..len]);
        assert!(result.is_err(), "prefix of {} bytes should not decode", len);
    }
}

#[test]
fn test_truncated_hash_field() {
    // Removing the last byte cuts the final hash-bearing field short and
    // must surface as a truncation, not a panic or out-of-bounds read.
    let bytes = sample_message().to_bytes();
    let result = AuxPowMessage::from_bytes(&bytes[..bytes.len() - 1]);
    assert!(matches!(
        result,
        Err(MessageError::Truncated(PrimitivesError::TruncatedInput { .. }))
    ));
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut bytes = sample_message().to_bytes();
    bytes.push(0x00);
    let result = AuxPowMessage::from_bytes(&bytes);
    assert!(matches!(result, Err(MessageError::Malformed(_))));
}

#[test]
fn test_empty_input_rejected() {
    assert!(AuxPowMessage::from_bytes(&[]).is_err());
}

// -----------------------------------------------------------------------
// Count consistency
// -----------------------------------------------------------------------

#[test]
fn test_inflated_input_count_rejected() {
    // Declare 200 inputs in a buffer that only carries one.
    let tx = sample_coinbase(&[0x00]);
    let bytes = tx.to_bytes();

    let mut forged = bytes.clone();
    assert_eq!(forged[4], 1, "varint input count sits after the version");
    forged[4] = 200;

    let mut reader = WireReader::new(&forged);
    let result = CoinbaseTransaction::read_from(&mut reader);
    assert!(matches!(result, Err(MessageError::Malformed(_))));
}

#[test]
fn test_inflated_branch_count_rejected() {
    // Declare 20 links (within the depth bound) in a buffer carrying one.
    let branch = MerkleBranch {
        hashes: vec![double_hash(b"sibling")],
        side_mask: 0,
    };
    let mut writer = WireWriter::new();
    branch.write_to(&mut writer);
    let mut forged = writer.into_bytes();
    forged[0] = 20;

    let mut reader = WireReader::new(&forged);
    let result = MerkleBranch::read_from(&mut reader);
    assert!(matches!(result, Err(MessageError::Malformed(_))));
}

// -----------------------------------------------------------------------
// Branch depth bound
// -----------------------------------------------------------------------

#[test]
fn test_oversized_branch_rejected_before_reading_hashes() {
    // A branch declaring 40 links is rejected on the count alone; the
    // buffer holds none of the claimed hashes, so any attempt to read
    // them would surface as truncation instead.
    let mut writer = WireWriter::new();
    writer.write_varint(VarInt(40));
    let bytes = writer.into_bytes();

    let mut reader = WireReader::new(&bytes);
    let result = MerkleBranch::read_from(&mut reader);
    assert!(matches!(
        result,
        Err(MessageError::OversizedBranch { depth: 40 })
    ));
}

#[test]
fn test_branch_at_depth_bound_accepted() {
    let branch = MerkleBranch {
        hashes: (0..MAX_BRANCH_DEPTH as u8)
            .map(|i| double_hash(&[i]))
            .collect(),
        side_mask: 0x2aaa_aaaa,
    };
    let mut writer = WireWriter::new();
    branch.write_to(&mut writer);
    let bytes = writer.into_bytes();

    let mut reader = WireReader::new(&bytes);
    let decoded = MerkleBranch::read_from(&mut reader).expect("bound is inclusive");
    assert_eq!(decoded, branch);
}

#[test]
fn test_oversized_branch_inside_message() {
    // Swap the coinbase branch for one declaring 40 links.
    let msg = sample_message();
    let mut writer = WireWriter::new();
    msg.coinbase_tx.write_to(&mut writer);
    writer.write_hash(&msg.aux_block_hash);
    writer.write_varint(VarInt(40));
    let bytes = writer.into_bytes();

    let result = AuxPowMessage::from_bytes(&bytes);
    assert!(matches!(
        result,
        Err(MessageError::OversizedBranch { depth: 40 })
    ));
}
