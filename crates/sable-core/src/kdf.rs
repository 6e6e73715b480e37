// Copyright (c) 2026 Sable Security
// Sable — Authenticated Key Exchange & Augmented PAKE
// Licensed under the MIT License

//! Memory-hard password digest.
//!
//! Wraps the Argon2id primitive behind the two cost profiles the password
//! protocol ships. The wire salt (8 or 16 bytes depending on profile) is
//! expanded to the primitive's fixed 16-byte salt under a personalization.

use crate::hash;
use crate::types::{personal, Failed, SableResult, DIGEST_LENGTH};
use zeroize::Zeroize;

/// Required salt length of the password-hash primitive.
const PWHASH_SALT_LENGTH: usize = 16;
/// Algorithm identifier for Argon2id v1.3 in libsodium.
const ALG_ARGON2ID13: i32 = 2;

/// Runs the memory-hard digest over a 64-byte password seed.
///
/// `ops_limit` and `mem_limit` come from the active password profile.
///
/// # Errors
///
/// Returns [`Failed`] if `wire_salt` is empty or the primitive fails (for
/// example when the memory limit cannot be satisfied).
pub fn password_digest(
    seed: &[u8; DIGEST_LENGTH],
    wire_salt: &[u8],
    ops_limit: u64,
    mem_limit: usize,
    out: &mut [u8; DIGEST_LENGTH],
) -> SableResult<()> {
    if wire_salt.is_empty() {
        return Err(Failed);
    }

    let mut salt = [0u8; PWHASH_SALT_LENGTH];
    hash::personalized(&mut salt, None, wire_salt, personal::KDF_SALT);

    // SAFETY: All buffers are valid and correctly sized; the salt is exactly
    // the primitive's required length. Return code is checked.
    let rc = unsafe {
        libsodium_sys::crypto_pwhash(
            out.as_mut_ptr(),
            out.len() as u64,
            seed.as_ptr() as *const _,
            seed.len() as u64,
            salt.as_ptr(),
            ops_limit,
            mem_limit,
            ALG_ARGON2ID13,
        )
    };
    salt.zeroize();
    if rc != 0 {
        out.zeroize();
        return Err(Failed);
    }
    Ok(())
}
