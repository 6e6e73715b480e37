// Copyright (c) 2026 Sable Security
// Sable — Authenticated Key Exchange & Augmented PAKE
// Licensed under the MIT License

//! Core library for the Sable protocol suite.
//!
//! Implements the primitives shared by the client and server crates: an
//! ephemeral Diffie–Hellman handshake in which the server proves possession
//! of its static key, deterministic Schnorr signatures under that key, and an
//! augmented password-authenticated key exchange in which the stored
//! verifier alone is not enough to impersonate the user. Everything runs
//! over the Ristretto255 group and BLAKE2b.
//!
//! # Crate layout
//!
//! * [`types`] -- shared constants, the error type, and constant-time helpers.
//! * [`hash`] -- BLAKE2b wrappers (multi-part, keyed, personalized).
//! * [`curve`] -- scalar and point adapter over Ristretto255.
//! * [`rng`] -- seeded, forkable random generator with a ratcheted state.
//! * [`kdf`] -- memory-hard password digest profiles.
//! * [`pake`] -- shared algebra of the augmented password protocol.
//! * [`protocol`] -- wire-format serialization and parsing.

/// Scalar and point adapter over Ristretto255.
pub mod curve;
/// BLAKE2b wrappers.
pub mod hash;
/// Memory-hard password digest.
pub mod kdf;
/// Shared algebra of the augmented password protocol.
pub mod pake;
/// Wire-format serialization and parsing.
pub mod protocol;
/// Seeded, forkable random generator.
pub mod rng;
/// Shared constants, error type, and constant-time helpers.
pub mod types;

use types::{Failed, SableResult};

/// Initializes the underlying cryptographic library.
///
/// Idempotent and callable from multiple threads; every record constructor
/// and stateless entry point in the client and server crates calls it, so
/// callers only need it when using the primitives in this crate directly.
///
/// # Errors
///
/// Returns [`Failed`] if the library cannot be initialized, in which case no
/// engine operation will succeed.
pub fn init() -> SableResult<()> {
    // SAFETY: sodium_init is safe to call concurrently and repeatedly; it
    // returns 0 on first success, 1 if already initialized, -1 on failure.
    let rc = unsafe { libsodium_sys::sodium_init() };
    if rc < 0 {
        return Err(Failed);
    }
    Ok(())
}
