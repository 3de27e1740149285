//! Parent-chain coinbase transaction embedded in an AuxPow message.
//!
//! The coinbase transaction of the parent block carries the merge-mining
//! commitment in its input script. Decoding reconstructs the transaction
//! field-by-field so that `to_bytes` reproduces the wire bytes exactly —
//! the reconstruction is what gets hashed for the coinbase merkle proof.

use serde::{Deserialize, Serialize};

use auxpow_primitives::chainhash::{Hash, HASH_SIZE};
use auxpow_primitives::hash::sha256d;
use auxpow_primitives::util::{VarInt, WireReader, WireWriter};

use crate::MessageError;

/// Minimum encoded size of a coinbase input: prevout hash (32) +
/// prevout index (4) + script length varint (1) + sequence (4).
const MIN_INPUT_SIZE: usize = HASH_SIZE + 4 + 1 + 4;

/// Minimum encoded size of an output: value (8) + script length varint (1).
const MIN_OUTPUT_SIZE: usize = 8 + 1;

/// A single input of the parent coinbase transaction.
///
/// # Wire format
///
/// | Field          | Size          |
/// |----------------|---------------|
/// | prev_out_hash  | 32 bytes      |
/// | prev_out_index | 4 bytes (LE)  |
/// | script length  | VarInt        |
/// | script         | variable      |
/// | sequence       | 4 bytes (LE)  |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinbaseInput {
    /// Hash of the referenced previous output (all zeroes for a coinbase).
    pub prev_out_hash: Hash,

    /// Index of the referenced previous output.
    pub prev_out_index: u32,

    /// The input script. For the coinbase input this is where a
    /// merge-mining commitment is embedded.
    #[serde(with = "hex_bytes")]
    pub script: Vec<u8>,

    /// Sequence number.
    pub sequence: u32,
}

impl CoinbaseInput {
    /// Deserialize a `CoinbaseInput` from a `WireReader`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, MessageError> {
        let prev_out_hash = reader.read_hash()?;
        let prev_out_index = reader.read_u32_le()?;
        let script = reader.read_var_bytes()?.to_vec();
        let sequence = reader.read_u32_le()?;

        Ok(CoinbaseInput {
            prev_out_hash,
            prev_out_index,
            script,
            sequence,
        })
    }

    /// Serialize this input into a `WireWriter`.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_hash(&self.prev_out_hash);
        writer.write_u32_le(self.prev_out_index);
        writer.write_var_bytes(&self.script);
        writer.write_u32_le(self.sequence);
    }
}

/// A single output of the parent coinbase transaction.
///
/// # Wire format
///
/// | Field         | Size          |
/// |---------------|---------------|
/// | value         | 8 bytes (LE)  |
/// | script length | VarInt        |
/// | script        | variable      |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinbaseOutput {
    /// The output value in the parent chain's base unit.
    pub value: u64,

    /// The locking script.
    #[serde(with = "hex_bytes")]
    pub script: Vec<u8>,
}

impl CoinbaseOutput {
    /// Deserialize a `CoinbaseOutput` from a `WireReader`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, MessageError> {
        let value = reader.read_u64_le()?;
        let script = reader.read_var_bytes()?.to_vec();

        Ok(CoinbaseOutput { value, script })
    }

    /// Serialize this output into a `WireWriter`.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u64_le(self.value);
        writer.write_var_bytes(&self.script);
    }
}

/// The parent block's coinbase transaction.
///
/// # Wire format
///
/// | Field        | Size                 |
/// |--------------|----------------------|
/// | version      | 4 bytes (LE)         |
/// | input count  | VarInt               |
/// | inputs       | variable (per input) |
/// | output count | VarInt               |
/// | outputs      | variable (per output)|
/// | lock_time    | 4 bytes (LE)         |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinbaseTransaction {
    /// Transaction format version.
    pub version: u32,

    /// Ordered list of inputs. A well-formed coinbase has exactly one.
    pub inputs: Vec<CoinbaseInput>,

    /// Ordered list of outputs.
    pub outputs: Vec<CoinbaseOutput>,

    /// Lock time.
    pub lock_time: u32,
}

impl CoinbaseTransaction {
    /// Deserialize a `CoinbaseTransaction` from a `WireReader`.
    ///
    /// Declared input and output counts are checked against the remaining
    /// buffer length before any element is read; a count that cannot fit
    /// fails with `Malformed`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, MessageError> {
        let version = reader.read_u32_le()?;

        let input_count = reader.read_varint()?.value();
        check_count("input", input_count, MIN_INPUT_SIZE, reader.remaining())?;
        let mut inputs = Vec::with_capacity(input_count as usize);
        for _ in 0..input_count {
            inputs.push(CoinbaseInput::read_from(reader)?);
        }

        let output_count = reader.read_varint()?.value();
        check_count("output", output_count, MIN_OUTPUT_SIZE, reader.remaining())?;
        let mut outputs = Vec::with_capacity(output_count as usize);
        for _ in 0..output_count {
            outputs.push(CoinbaseOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u32_le()?;

        Ok(CoinbaseTransaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    /// Serialize this transaction into a `WireWriter`.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u32_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer);
        }

        writer.write_u32_le(self.lock_time);
    }

    /// Serialize this transaction to raw bytes.
    ///
    /// Reproduces the original wire bytes exactly.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(256);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Compute the transaction ID (double SHA-256 of the reconstructed
    /// wire bytes), in internal byte order.
    pub fn txid(&self) -> Hash {
        Hash::new(sha256d(&self.to_bytes()))
    }
}

/// Reject a declared element count whose minimum encoding cannot fit in
/// the remaining bytes.
fn check_count(
    what: &str,
    count: u64,
    min_size: usize,
    remaining: usize,
) -> Result<(), MessageError> {
    let fits = count
        .checked_mul(min_size as u64)
        .is_some_and(|needed| needed <= remaining as u64);
    if !fits {
        return Err(MessageError::Malformed(format!(
            "{} count {} cannot fit in {} remaining bytes",
            what, count, remaining
        )));
    }
    Ok(())
}

mod hex_bytes {
    //! Serde codec rendering byte strings as hex.

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}
