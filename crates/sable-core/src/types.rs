// Copyright (c) 2026 Sable Security
// Sable — Authenticated Key Exchange & Augmented PAKE
// Licensed under the MIT License

use thiserror::Error;

pub const SCALAR_LENGTH: usize = 32;
pub const WIDE_SCALAR_LENGTH: usize = 64;
pub const POINT_LENGTH: usize = 32;
pub const NONCE_LENGTH: usize = 32;
pub const DIGEST_LENGTH: usize = 64;
pub const MASK_SEED_LENGTH: usize = 32;
pub const SESSION_KEY_LENGTH: usize = 32;
pub const PROOF_LENGTH: usize = 32;
pub const SIGN_KEY_LENGTH: usize = 32;
pub const RNG_STATE_LENGTH: usize = 64;
pub const PERSONAL_LENGTH: usize = 16;

pub const CLIENT_REQUEST_LENGTH: usize = POINT_LENGTH + NONCE_LENGTH;
pub const SERVER_RESPONSE_LENGTH: usize = POINT_LENGTH + NONCE_LENGTH + PROOF_LENGTH;
pub const SIGNATURE_LENGTH: usize = POINT_LENGTH + SCALAR_LENGTH;
pub const SERVER_RECORD_LENGTH: usize = SCALAR_LENGTH + POINT_LENGTH + SIGN_KEY_LENGTH;
pub const CLIENT_PROOF_LENGTH: usize = POINT_LENGTH + PROOF_LENGTH;
pub const SERVER_PROOF_LENGTH: usize = PROOF_LENGTH;

/// Cap on internal rejection-sampling and mask-encoding retry loops.
///
/// A hostile RNG could otherwise spin such a loop forever; exceeding the cap
/// surfaces as [`Failed`].
pub const MAX_RETRIES: usize = 64;

pub type Scalar = [u8; SCALAR_LENGTH];
pub type Point = [u8; POINT_LENGTH];

/// The additive identity of the scalar field.
pub const ZERO_SCALAR: Scalar = [0u8; SCALAR_LENGTH];

const _: () = assert!(SCALAR_LENGTH == POINT_LENGTH);
const _: () = assert!(WIDE_SCALAR_LENGTH == 2 * SCALAR_LENGTH);
const _: () = assert!(DIGEST_LENGTH == SESSION_KEY_LENGTH + PROOF_LENGTH);
const _: () = assert!(CLIENT_REQUEST_LENGTH == 64);
const _: () = assert!(SERVER_RESPONSE_LENGTH == 96);
const _: () = assert!(SIGNATURE_LENGTH == 64);
const _: () = assert!(SERVER_RECORD_LENGTH == 96);
const _: () = assert!(CLIENT_PROOF_LENGTH == 64);

/// BLAKE2b personalization strings, all exactly [`PERSONAL_LENGTH`] bytes.
///
/// Every derivation in the engine is domain-separated so that no two uses of
/// the hash can collide on inputs.
pub mod personal {
    pub const SIGN_KEY: &[u8; 16] = b"sable.sign.key\0\0";
    pub const RNG_SEED: &[u8; 16] = b"sable.rng.seed\0\0";
    pub const RNG_BLOCK: &[u8; 16] = b"sable.rng.blk\0\0\0";
    pub const RNG_STEP: &[u8; 16] = b"sable.rng.step\0\0";
    pub const RNG_FORK: &[u8; 16] = b"sable.rng.fork\0\0";
    pub const MASK_POINT: &[u8; 16] = b"sable.ell.mask\0\0";
    pub const KDF_SALT: &[u8; 16] = b"sable.kdf.salt\0\0";
    pub const PASSWORD_SEED: &[u8; 16] = b"sable.pw.seed\0\0\0";
}

/// The single error the engine exposes.
///
/// Uninitialized records, malformed buffers, rejected curve inputs, tampered
/// persisted state, mismatched proofs, and RNG failures all collapse into
/// this one opaque kind: distinguishing failure modes for the caller would
/// leak information about secret-dependent control flow.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("protocol operation failed")]
pub struct Failed;

pub type SableResult<T> = Result<T, Failed>;

/// Compares two byte slices in constant time.
///
/// Slices of unequal length compare unequal; the lengths themselves are not
/// secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    // SAFETY: Both pointers come from valid slices of equal, non-zero length.
    unsafe {
        libsodium_sys::sodium_memcmp(
            a.as_ptr() as *const _,
            b.as_ptr() as *const _,
            a.len(),
        ) == 0
    }
}

/// Returns whether `data` is all zero bytes, in constant time.
pub fn is_all_zero(data: &[u8]) -> bool {
    // SAFETY: Pointer and length come from a valid slice.
    unsafe { libsodium_sys::sodium_is_zero(data.as_ptr(), data.len()) == 1 }
}

/// Scrubs a caller-owned buffer.
///
/// The write is guaranteed not to be elided by the optimizer. Record types in
/// the client and server crates zeroize themselves on drop; this helper is
/// for session keys and scratch buffers that live outside those records.
pub fn erase(buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }
    // SAFETY: Pointer and length come from a valid mutable slice.
    unsafe {
        libsodium_sys::sodium_memzero(buf.as_mut_ptr() as *mut _, buf.len());
    }
}
