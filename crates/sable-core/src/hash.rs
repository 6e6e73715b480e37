// Copyright (c) 2026 Sable Security
// Sable — Authenticated Key Exchange & Augmented PAKE
// Licensed under the MIT License

//! BLAKE2b wrappers.
//!
//! Every digest in the engine goes through these helpers: multi-part hashing
//! uses the streaming API so transcripts never have to be concatenated into
//! an owned buffer, and keyed or personalized variants cover the signing
//! sub-key, the RNG, and the domain-separated derivations.

use crate::types::{DIGEST_LENGTH, PERSONAL_LENGTH};

/// Streaming BLAKE2b over the concatenation of `parts`, optionally keyed.
///
/// `out.len()` selects the digest length (libsodium accepts 16..=64).
fn digest_into(out: &mut [u8], key: Option<&[u8]>, parts: &[&[u8]]) {
    let (key_ptr, key_len) = match key {
        Some(k) => (k.as_ptr(), k.len()),
        None => (std::ptr::null(), 0),
    };
    // SAFETY: State is initialized by _init before _update/_final use it.
    // Output and key pointers come from valid slices; lengths match. The
    // state is scrubbed afterwards because it absorbs the key material.
    unsafe {
        let mut state =
            std::mem::MaybeUninit::<libsodium_sys::crypto_generichash_state>::uninit();
        let state_ptr = state.as_mut_ptr();
        libsodium_sys::crypto_generichash_init(state_ptr, key_ptr, key_len, out.len());
        for part in parts {
            libsodium_sys::crypto_generichash_update(
                state_ptr,
                part.as_ptr(),
                part.len() as u64,
            );
        }
        libsodium_sys::crypto_generichash_final(state_ptr, out.as_mut_ptr(), out.len());
        libsodium_sys::sodium_memzero(
            state_ptr as *mut _,
            std::mem::size_of::<libsodium_sys::crypto_generichash_state>(),
        );
    }
}

/// BLAKE2b-64 over the concatenation of `parts`.
pub fn digest64(parts: &[&[u8]]) -> [u8; DIGEST_LENGTH] {
    let mut out = [0u8; DIGEST_LENGTH];
    digest_into(&mut out, None, parts);
    out
}

/// BLAKE2b-32 over the concatenation of `parts`.
pub fn digest32(parts: &[&[u8]]) -> [u8; 32] {
    let mut out = [0u8; 32];
    digest_into(&mut out, None, parts);
    out
}

/// Keyed BLAKE2b-64 over the concatenation of `parts`.
pub fn keyed64(key: &[u8], parts: &[&[u8]]) -> [u8; DIGEST_LENGTH] {
    let mut out = [0u8; DIGEST_LENGTH];
    digest_into(&mut out, Some(key), parts);
    out
}

/// One-shot BLAKE2b with a 16-byte personalization string.
///
/// `out.len()` selects the digest length (16..=64); the salt slot of the
/// primitive is left at its all-zero default.
pub fn personalized(
    out: &mut [u8],
    key: Option<&[u8]>,
    input: &[u8],
    personal: &[u8; PERSONAL_LENGTH],
) {
    let (key_ptr, key_len) = match key {
        Some(k) => (k.as_ptr(), k.len()),
        None => (std::ptr::null(), 0),
    };
    // SAFETY: All pointers come from valid slices; a null salt pointer is
    // treated as all-zero by libsodium; personal is exactly 16 bytes.
    unsafe {
        libsodium_sys::crypto_generichash_blake2b_salt_personal(
            out.as_mut_ptr(),
            out.len(),
            input.as_ptr(),
            input.len() as u64,
            key_ptr,
            key_len,
            std::ptr::null(),
            personal.as_ptr(),
        );
    }
}
