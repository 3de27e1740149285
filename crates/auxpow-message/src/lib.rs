/// AuxPow SDK - Wire message structures and decoding.
///
/// Provides the decoded AuxPow message: the parent chain's coinbase
/// transaction, the coinbase and chain merkle branches, and the parent
/// block header, with binary serialization that reproduces the wire
/// bytes exactly.

pub mod branch;
pub mod coinbase;
pub mod header;
pub mod message;

mod error;
pub use branch::{MerkleBranch, MAX_BRANCH_DEPTH};
pub use coinbase::{CoinbaseInput, CoinbaseOutput, CoinbaseTransaction};
pub use error::MessageError;
pub use header::{ParentHeader, HEADER_SIZE};
pub use message::{AuxPowMessage, MAX_MESSAGE_SIZE};

#[cfg(test)]
mod tests;
