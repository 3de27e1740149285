//! Compact difficulty target expansion.
//!
//! The parent chain packs a 256-bit proof-of-work target into 4 bytes:
//! `bits = (exponent << 24) | mantissa` with a 3-byte mantissa, giving
//! `target = mantissa * 2^(8*(exponent-3))`.
//!
//! Conversions are strict and float-free: negative (sign-bit) mantissas,
//! zero targets, and encodings whose expansion overflows 256 bits are
//! all rejected rather than silently clamped.

use num_bigint::BigUint;
use num_traits::Zero;

use auxpow_primitives::chainhash::Hash;

use crate::VerifyError;

/// Expand compact `bits` into a full 256-bit target.
///
/// # Arguments
/// * `bits` - The compact encoding.
///
/// # Returns
/// The target as a `BigUint`, or `InvalidTarget` for negative, zero, or
/// overflowing encodings.
pub fn bits_to_target(bits: u32) -> Result<BigUint, VerifyError> {
    let exponent = (bits >> 24) as u8;
    let mantissa = bits & 0x00ff_ffff;

    // Sign bit set in the mantissa encodes a negative target.
    if bits & 0x0080_0000 != 0 {
        return Err(VerifyError::InvalidTarget(format!(
            "negative mantissa in compact bits {:#010x}",
            bits
        )));
    }

    if mantissa == 0 {
        return Err(VerifyError::InvalidTarget(format!(
            "zero mantissa in compact bits {:#010x}",
            bits
        )));
    }

    let mant = BigUint::from(mantissa);

    // target = mantissa * 2^(8*(exponent-3)), shifting right when the
    // exponent is below 3.
    let target = if exponent <= 3 {
        let shift = 8 * (3 - exponent as u32);
        mant >> shift
    } else {
        let shift = 8 * (exponent as u32 - 3);
        mant << shift
    };

    if target.is_zero() {
        return Err(VerifyError::InvalidTarget(format!(
            "compact bits {:#010x} expand to zero",
            bits
        )));
    }
    if target.bits() > 256 {
        return Err(VerifyError::InvalidTarget(format!(
            "compact bits {:#010x} overflow 256 bits",
            bits
        )));
    }

    Ok(target)
}

/// Pack a target back into compact `bits`.
///
/// Normalized to the chain's canonical compact form; primarily useful
/// for constructing test vectors.
pub fn target_to_bits(target: &BigUint) -> Result<u32, VerifyError> {
    if target.is_zero() {
        return Err(VerifyError::InvalidTarget("zero target".to_string()));
    }

    let mut bytes = target.to_bytes_be();
    let mut exponent = bytes.len() as u32;

    while bytes.len() < 3 {
        bytes.push(0);
    }
    let mut mantissa = ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32);

    // A mantissa with its high bit set would read back as negative;
    // renormalize by trading a mantissa byte for an exponent step.
    if mantissa & 0x0080_0000 != 0 {
        mantissa >>= 8;
        exponent += 1;
    }

    if exponent > 0xff {
        return Err(VerifyError::InvalidTarget(
            "target too wide for compact encoding".to_string(),
        ));
    }

    Ok((exponent << 24) | mantissa)
}

/// Check a block hash against a target.
///
/// The hash's internal bytes are interpreted as a little-endian 256-bit
/// unsigned integer.
///
/// # Returns
/// `true` if `hash <= target`.
pub fn hash_meets_target(hash: &Hash, target: &BigUint) -> bool {
    BigUint::from_bytes_le(hash.as_bytes()) <= *target
}
