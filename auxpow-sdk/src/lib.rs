#![deny(missing_docs)]

//! AuxPow SDK - Complete SDK.
//!
//! Re-exports all AuxPow components for convenient single-crate usage.

pub use auxpow_message as message;
pub use auxpow_primitives as primitives;
pub use auxpow_verify as verify;
