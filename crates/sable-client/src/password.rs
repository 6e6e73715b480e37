// Copyright (c) 2026 Sable Security
// Sable — Client (Initiator)
// Licensed under the MIT License

use sable_core::pake::{self, Profile};
use sable_core::types::{
    constant_time_eq, is_all_zero, Failed, Point, SableResult, CLIENT_PROOF_LENGTH, MAX_RETRIES,
    PROOF_LENGTH, SERVER_PROOF_LENGTH, ZERO_SCALAR,
};
use sable_core::{curve, protocol};
use zeroize::Zeroize;

use crate::state::Client;

/// Largest salt length across profiles; scratch buffers are sliced to the
/// active profile's length.
const MAX_SALT_LENGTH: usize = 16;

/// Creates the password verifier stored by the server at account creation.
///
/// Draws a salt, derives the password scalar v through the profile's
/// memory-hard digest, and emits `V ∥ salt` with V = v·G. A derivation that
/// yields an unusable scalar is retried with a fresh salt; this is the one
/// place the protocol can recover by re-salting, bounded by [`MAX_RETRIES`].
///
/// The verifier alone does not let its holder impersonate the user: producing
/// a client proof still requires v, which only the password (run through the
/// memory-hard digest) yields.
///
/// # Errors
///
/// Returns [`Failed`] if `username` or `password` is empty, `verifier` does
/// not match the profile's length, the generator fails, or no usable salt was
/// found within the retry bound.
pub fn create_password_verifier(
    client: &mut Client,
    profile: Profile,
    username: &[u8],
    realm: &[u8],
    password: &[u8],
    verifier: &mut [u8],
) -> SableResult<()> {
    if verifier.len() != profile.verifier_length() {
        return Err(Failed);
    }

    let mut salt_buf = [0u8; MAX_SALT_LENGTH];
    let salt = &mut salt_buf[..profile.salt_length()];

    for _ in 0..MAX_RETRIES {
        client.rng.fill(salt)?;
        let mut scalar = pake::password_scalar(profile, username, realm, password, salt)?;
        if is_all_zero(&scalar) {
            continue;
        }
        let point = curve::base_mul(&scalar);
        scalar.zeroize();
        let point = match point {
            Ok(point) => point,
            Err(_) => continue,
        };
        return protocol::write_verifier(profile, &point, salt, verifier);
    }

    Err(Failed)
}

/// Answers a server challenge with a proof of password knowledge.
///
/// Re-derives v and V from the password, recomputes the mask E, draws an
/// ephemeral y, and emits `Y′ ∥ CPROOF` where Y′ = y·G + E and CPROOF is the
/// low half of the proof transcript digest over the shared point
/// Z = a·(X′ − E). The proof scalar a is v·h in the desktop profile and
/// v·h + y in the mobile profile, h = BLAKE2b-64(X′ ∥ Y′) mod q. The high
/// half of the digest is written to `server_verifier`; the caller holds it
/// privately and checks the server's answer with
/// [`password_check_server`].
///
/// Unlike verifier creation there is no salt to vary here, so a failed v
/// derivation is fatal; only the ephemeral y is retried.
///
/// # Errors
///
/// Returns [`Failed`] if any input is malformed for the profile, the
/// password scalar or challenge point is unusable, the generator fails, or
/// no usable y was found within the retry bound.
pub fn password_client_proof(
    client: &mut Client,
    profile: Profile,
    username: &[u8],
    realm: &[u8],
    password: &[u8],
    challenge: &[u8],
    server_public: &[u8],
    server_verifier: &mut [u8; SERVER_PROOF_LENGTH],
    client_proof: &mut [u8; CLIENT_PROOF_LENGTH],
) -> SableResult<()> {
    let chal = protocol::parse_challenge(profile, challenge)?;
    curve::validate_point(chal.masked_point)?;
    curve::validate_point(server_public)?;
    let server_masked: &Point = chal.masked_point.try_into().map_err(|_| Failed)?;
    let server_point: &Point = server_public.try_into().map_err(|_| Failed)?;

    let mut secret = pake::password_scalar(profile, username, realm, password, chal.salt)?;
    if is_all_zero(&secret) {
        return Err(Failed);
    }
    let verifier_point = match curve::base_mul(&secret) {
        Ok(point) => point,
        Err(e) => {
            secret.zeroize();
            return Err(e);
        }
    };
    let mask = match pake::verifier_mask(&verifier_point, chal.salt) {
        Ok(point) => point,
        Err(e) => {
            secret.zeroize();
            return Err(e);
        }
    };

    for _ in 0..MAX_RETRIES {
        let mut ephemeral = match pake::ephemeral_scalar(profile, &mut client.rng) {
            Ok(scalar) => scalar,
            Err(e) => {
                secret.zeroize();
                return Err(e);
            }
        };
        let client_masked = match curve::elligator_encrypt(&ephemeral, &mask) {
            Ok(point) => point,
            Err(_) => {
                ephemeral.zeroize();
                continue;
            }
        };
        let binding = match pake::binding_scalar(server_masked, &client_masked) {
            Ok(scalar) => scalar,
            Err(_) => {
                // h = 0: a fresh y gives a fresh Y′ and a fresh h
                ephemeral.zeroize();
                continue;
            }
        };

        let mut proof_scalar = match profile {
            Profile::Desktop => curve::scalar_mul_add(&secret, &binding, &ZERO_SCALAR),
            Profile::Mobile => curve::scalar_mul_add(&secret, &binding, &ephemeral),
        };
        ephemeral.zeroize();
        if is_all_zero(&proof_scalar) {
            proof_scalar.zeroize();
            continue;
        }

        let shared = curve::elligator_secret(&proof_scalar, server_masked, &mask);
        proof_scalar.zeroize();
        let mut shared = match shared {
            Ok(point) => point,
            Err(e) => {
                // X′ − E is the identity: the challenge itself is bogus
                secret.zeroize();
                return Err(e);
            }
        };

        let mut digest = pake::proof_digest(
            profile,
            &mask,
            server_masked,
            &client_masked,
            server_point,
            &shared,
        );
        shared.zeroize();
        secret.zeroize();

        let written = protocol::write_client_proof(
            &client_masked,
            &digest[..PROOF_LENGTH],
            client_proof,
        );
        if written.is_err() {
            digest.zeroize();
            return Err(Failed);
        }
        server_verifier.copy_from_slice(&digest[PROOF_LENGTH..]);
        digest.zeroize();
        return Ok(());
    }

    secret.zeroize();
    Err(Failed)
}

/// Checks the server's counter-proof against the held verifier half.
///
/// A match proves the server knew both the challenge scalar x and the stored
/// verifier, closing the mutual authentication.
///
/// # Errors
///
/// Returns [`Failed`] on a length mismatch or a proof that does not match
/// (compared in constant time).
pub fn password_check_server(server_proof: &[u8], server_verifier: &[u8]) -> SableResult<()> {
    if server_proof.len() != SERVER_PROOF_LENGTH || server_verifier.len() != SERVER_PROOF_LENGTH {
        return Err(Failed);
    }
    if !constant_time_eq(server_proof, server_verifier) {
        return Err(Failed);
    }
    Ok(())
}
