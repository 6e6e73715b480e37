// Copyright (c) 2026 Sable Security
// Sable — Authenticated Key Exchange & Augmented PAKE
// Licensed under the MIT License

//! Shared algebra of the augmented password protocol.
//!
//! Both sides of the protocol derive the same intermediate values from public
//! material: the password scalar `v`, the mask point `E`, the binding scalar
//! `h`, and the proof transcript digest. Keeping those derivations here means
//! the client and server crates cannot drift apart on them.
//!
//! Two cost profiles exist. They differ in salt size, memory-hard parameters,
//! ephemeral-scalar sampling, the client's proof scalar, and the transcript
//! that is hashed into the proof. A deployment picks one and never mixes
//! them, so every operation takes the profile explicitly and validates all
//! buffer lengths against it.

use crate::rng::SecretRng;
use crate::types::{
    is_all_zero, personal, Failed, Point, SableResult, Scalar, DIGEST_LENGTH, MASK_SEED_LENGTH,
    POINT_LENGTH, SCALAR_LENGTH, WIDE_SCALAR_LENGTH,
};
use crate::{curve, hash, kdf};
use zeroize::Zeroize;

/// Password-protocol cost profile.
///
/// `Desktop` trades memory for iterations (many passes over a small state);
/// `Mobile` is the conventional memory-hard setting (few passes over a large
/// state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Desktop,
    Mobile,
}

/// Size in bytes of one memory row of the password-hash primitive.
const KDF_ROW_LENGTH: usize = 4096;

impl Profile {
    pub const fn salt_length(self) -> usize {
        match self {
            Profile::Desktop => 8,
            Profile::Mobile => 16,
        }
    }

    /// Iteration cost of the memory-hard digest.
    pub const fn ops_limit(self) -> u64 {
        match self {
            Profile::Desktop => 1000,
            Profile::Mobile => 2,
        }
    }

    /// Memory cost of the memory-hard digest, in bytes.
    pub const fn mem_limit(self) -> usize {
        match self {
            Profile::Desktop => 8 * KDF_ROW_LENGTH,
            Profile::Mobile => 3000 * KDF_ROW_LENGTH,
        }
    }

    /// Bytes drawn for the ephemeral scalars x and y.
    pub const fn scalar_draw_length(self) -> usize {
        match self {
            Profile::Desktop => SCALAR_LENGTH,
            Profile::Mobile => WIDE_SCALAR_LENGTH,
        }
    }

    /// `V ∥ salt`.
    pub const fn verifier_length(self) -> usize {
        POINT_LENGTH + self.salt_length()
    }

    /// `X′ ∥ salt`.
    pub const fn challenge_length(self) -> usize {
        POINT_LENGTH + self.salt_length()
    }

    /// `E ∥ x ∥ V`, plus `X′` in the mobile profile.
    ///
    /// The desktop profile recomputes `X′ = x·G + E` at proof time instead of
    /// storing it.
    pub const fn challenge_secret_length(self) -> usize {
        match self {
            Profile::Desktop => POINT_LENGTH + SCALAR_LENGTH + POINT_LENGTH,
            Profile::Mobile => POINT_LENGTH + SCALAR_LENGTH + POINT_LENGTH + POINT_LENGTH,
        }
    }
}

/// Derives the password scalar `v` for `(username, realm, password, salt)`.
///
/// Pipeline: personalized BLAKE2b-64 over the length-prefixed identity tuple,
/// the profile's memory-hard digest, then reduction modulo the group order.
/// The caller must treat a zero result as a failure (fresh salt at verifier
/// creation, fatal during login).
///
/// # Errors
///
/// Returns [`Failed`] if `username` or `password` is empty, the salt length
/// does not match the profile, or the memory-hard digest fails.
pub fn password_scalar(
    profile: Profile,
    username: &[u8],
    realm: &[u8],
    password: &[u8],
    salt: &[u8],
) -> SableResult<Scalar> {
    if username.is_empty() || password.is_empty() {
        return Err(Failed);
    }
    if salt.len() != profile.salt_length() {
        return Err(Failed);
    }

    let mut input = Vec::with_capacity(16 + username.len() + realm.len() + password.len());
    input.extend_from_slice(&(username.len() as u64).to_le_bytes());
    input.extend_from_slice(username);
    input.extend_from_slice(&(realm.len() as u64).to_le_bytes());
    input.extend_from_slice(realm);
    input.extend_from_slice(password);

    let mut seed = [0u8; DIGEST_LENGTH];
    hash::personalized(&mut seed, None, &input, personal::PASSWORD_SEED);
    input.zeroize();

    let mut digest = [0u8; DIGEST_LENGTH];
    let result = kdf::password_digest(
        &seed,
        salt,
        profile.ops_limit(),
        profile.mem_limit(),
        &mut digest,
    );
    seed.zeroize();
    result?;

    let scalar = curve::reduce(&digest);
    digest.zeroize();
    Ok(scalar)
}

/// Derives the password-bound mask `E = Elligator(BLAKE2b-32(V ∥ salt))`.
pub fn verifier_mask(verifier_point: &Point, salt: &[u8]) -> SableResult<Point> {
    let mut seed: [u8; MASK_SEED_LENGTH] = hash::digest32(&[verifier_point, salt]);
    let mask = curve::elligator(&seed);
    seed.zeroize();
    mask
}

/// Derives the binding scalar `h = BLAKE2b-64(X′ ∥ Y′) mod q`.
///
/// # Errors
///
/// Returns [`Failed`] if the reduction yields zero.
pub fn binding_scalar(x_masked: &Point, y_masked: &Point) -> SableResult<Scalar> {
    let wide = hash::digest64(&[x_masked, y_masked]);
    let h = curve::reduce(&wide);
    if is_all_zero(&h) {
        return Err(Failed);
    }
    Ok(h)
}

/// Draws an ephemeral scalar with the profile's sampling width.
///
/// The desktop profile reduces a 32-byte draw, the mobile profile a 64-byte
/// draw. Zero results are possible and are rejected by the caller's retry
/// loop (a zero scalar cannot survive the masked-encrypt step).
pub fn ephemeral_scalar(profile: Profile, rng: &mut SecretRng) -> SableResult<Scalar> {
    let mut wide = [0u8; WIDE_SCALAR_LENGTH];
    let draw = profile.scalar_draw_length();
    if rng.fill(&mut wide[..draw]).is_err() {
        wide.zeroize();
        return Err(Failed);
    }
    let scalar = curve::reduce(&wide);
    wide.zeroize();
    Ok(scalar)
}

/// Hashes the proof transcript: `E ∥ SP ∥ Z` (desktop) or
/// `E ∥ X′ ∥ Y′ ∥ SP ∥ Z` (mobile).
///
/// The low 32 bytes are the client proof, the high 32 bytes the server proof.
pub fn proof_digest(
    profile: Profile,
    mask: &Point,
    x_masked: &Point,
    y_masked: &Point,
    server_public: &Point,
    shared: &Point,
) -> [u8; DIGEST_LENGTH] {
    match profile {
        Profile::Desktop => hash::digest64(&[mask, server_public, shared]),
        Profile::Mobile => hash::digest64(&[mask, x_masked, y_masked, server_public, shared]),
    }
}
