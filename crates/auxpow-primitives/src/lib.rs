/// AuxPow SDK - Hashing and wire-format primitives.
///
/// This crate provides the foundational building blocks for AuxPow
/// message decoding and verification:
/// - Hash functions (SHA-256 and double SHA-256)
/// - Chain hash type for transaction and block identification
/// - Variable-length integer encoding
/// - Cursor-based wire reader and writer

pub mod hash;
pub mod chainhash;
pub mod util;

mod error;
pub use error::PrimitivesError;
