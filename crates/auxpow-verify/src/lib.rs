/// AuxPow SDK - Merkle branch and proof-of-work validation.
///
/// Recomputes merkle roots from branch proofs, expands compact difficulty
/// bits into 256-bit targets, and runs the validation pipeline tying an
/// auxiliary block to its parent chain's proof-of-work.

pub mod branch;
pub mod target;
pub mod validator;

mod error;
pub use branch::branch_root;
pub use error::VerifyError;
pub use target::{bits_to_target, hash_meets_target, target_to_bits};
pub use validator::validate;
