// Copyright (c) 2026 Sable Security
// Sable — Server (Responder)
// Licensed under the MIT License

use sable_core::pake::{self, Profile};
use sable_core::types::{
    constant_time_eq, is_all_zero, Failed, Point, SableResult, Scalar, MAX_RETRIES, PROOF_LENGTH,
    SERVER_PROOF_LENGTH, ZERO_SCALAR,
};
use sable_core::{curve, protocol};
use zeroize::Zeroize;

use crate::state::Server;

/// Builds a login challenge from a stored password verifier.
///
/// Recomputes the password-bound mask E = Elligator(BLAKE2b-32(V ∥ salt)),
/// draws an ephemeral scalar x with the profile's sampling width, and emits
/// the masked point X′ = x·G + E alongside the salt. The scratch needed to
/// finish the round (E, x, V, and in the mobile profile X′) is written to
/// `challenge_secret`, which the caller must keep private and pass back to
/// [`password_server_proof`]. A zero x is rejected by the masked-encrypt step
/// and redrawn, bounded by [`MAX_RETRIES`].
///
/// # Errors
///
/// Returns [`Failed`] if the record is uninitialized, the verifier is
/// malformed for the profile, its point is invalid, or no usable x was found
/// within the retry bound.
pub fn password_challenge(
    server: &mut Server,
    profile: Profile,
    verifier: &[u8],
    challenge_secret: &mut [u8],
    challenge: &mut [u8],
) -> SableResult<()> {
    server.ensure_ready()?;

    let record = protocol::parse_verifier(profile, verifier)?;
    curve::validate_point(record.point)?;
    let verifier_point: &Point = record.point.try_into().map_err(|_| Failed)?;

    let mask = pake::verifier_mask(verifier_point, record.salt)?;

    for _ in 0..MAX_RETRIES {
        let mut scalar = pake::ephemeral_scalar(profile, &mut server.rng)?;
        let masked = match curve::elligator_encrypt(&scalar, &mask) {
            Ok(point) => point,
            Err(_) => {
                scalar.zeroize();
                continue;
            }
        };

        let stored_masked = match profile {
            Profile::Desktop => None,
            Profile::Mobile => Some(&masked[..]),
        };
        let written = protocol::write_challenge_secret(
            profile,
            &mask,
            &scalar,
            record.point,
            stored_masked,
            challenge_secret,
        );
        scalar.zeroize();
        written?;

        return protocol::write_challenge(profile, &masked, record.salt, challenge);
    }

    Err(Failed)
}

/// Verifies a client proof and produces the server's counter-proof.
///
/// Rebuilds the binding scalar h = BLAKE2b-64(X′ ∥ Y′) mod q (recomputing
/// X′ = x·G + E in the desktop profile, which does not store it), recovers
/// the shared point from the challenge secret, and recomputes the proof
/// transcript digest. The low half must match the received client proof
/// (compared in constant time, so a failed password reveals nothing through
/// timing); the high half is emitted for the client to check.
///
/// Desktop profile: Z = (x·h)·V; the client's masked point is unmasked and
/// validated but contributes to Z only through h. Mobile profile:
/// Z = x·Y + (x·h)·V.
///
/// # Errors
///
/// Returns [`Failed`] if the record is uninitialized, either input is
/// malformed for the profile, any point or scalar is invalid, or the client
/// proof does not match.
pub fn password_server_proof(
    server: &Server,
    profile: Profile,
    client_proof: &[u8],
    challenge_secret: &[u8],
    server_proof: &mut [u8; SERVER_PROOF_LENGTH],
) -> SableResult<()> {
    server.ensure_ready()?;

    let proof_msg = protocol::parse_client_proof(client_proof)?;
    let secret = protocol::parse_challenge_secret(profile, challenge_secret)?;

    curve::validate_point(proof_msg.masked_point)?;
    curve::validate_point(secret.mask)?;
    curve::validate_point(secret.verifier_point)?;
    let client_masked: &Point = proof_msg.masked_point.try_into().map_err(|_| Failed)?;
    let mask: &Point = secret.mask.try_into().map_err(|_| Failed)?;
    let verifier_point: &Point = secret.verifier_point.try_into().map_err(|_| Failed)?;
    let scalar: &Scalar = secret.scalar.try_into().map_err(|_| Failed)?;
    if is_all_zero(scalar) {
        return Err(Failed);
    }

    let server_masked: Point = match secret.masked_point {
        Some(stored) => {
            curve::validate_point(stored)?;
            stored.try_into().map_err(|_| Failed)?
        }
        None => curve::elligator_encrypt(scalar, mask)?,
    };

    let binding = pake::binding_scalar(&server_masked, client_masked)?;
    let mut counter = curve::scalar_mul_add(scalar, &binding, &ZERO_SCALAR);
    if is_all_zero(&counter) {
        counter.zeroize();
        return Err(Failed);
    }

    let shared = match profile {
        Profile::Desktop => {
            // Unmask the client's ephemeral point; a forged or identity Y′
            // must be rejected even though Z does not depend on it here.
            match curve::point_sub(client_masked, mask) {
                Ok(inner) if !is_all_zero(&inner) => curve::point_mul(&counter, verifier_point),
                _ => Err(Failed),
            }
        }
        Profile::Mobile => {
            curve::elligator_secret_dual(scalar, client_masked, mask, &counter, verifier_point)
        }
    };
    counter.zeroize();
    let mut shared = shared?;

    let mut digest = pake::proof_digest(
        profile,
        mask,
        &server_masked,
        client_masked,
        &server.public_key,
        &shared,
    );
    shared.zeroize();

    if !constant_time_eq(&digest[..PROOF_LENGTH], proof_msg.proof) {
        digest.zeroize();
        return Err(Failed);
    }
    server_proof.copy_from_slice(&digest[PROOF_LENGTH..]);
    digest.zeroize();
    Ok(())
}
