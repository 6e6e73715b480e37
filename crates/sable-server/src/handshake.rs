// Copyright (c) 2026 Sable Security
// Sable — Server (Responder)
// Licensed under the MIT License

use sable_core::types::{
    is_all_zero, Failed, Point, SableResult, MAX_RETRIES, NONCE_LENGTH, SERVER_RESPONSE_LENGTH,
    SESSION_KEY_LENGTH, ZERO_SCALAR,
};
use sable_core::{curve, hash, protocol};
use zeroize::Zeroize;

use crate::state::Server;

/// Answers a client handshake request.
///
/// Draws a server nonce SN and an ephemeral scalar e, binds the static key
/// into the transcript challenge h = BLAKE2b-64(CP ∥ CN ∥ EP ∥ SP ∥ SN) mod
/// q, and computes the shared point T = (e + h·s)·CP in a single double
/// multiplication. The 64-byte digest of T ∥ H splits into the session key
/// (low half) and the proof the client will verify (high half). A zero
/// challenge or an identity T restarts the attempt with a fresh nonce and
/// ephemeral, bounded by [`MAX_RETRIES`].
///
/// The server never retries after a response has been emitted; each request
/// is answered at most once.
///
/// # Errors
///
/// Returns [`Failed`] if the record is uninitialized, the request is
/// malformed, its public point is invalid, or no usable transcript was found
/// within the retry bound.
pub fn handshake(
    server: &mut Server,
    request: &[u8],
    response: &mut [u8; SERVER_RESPONSE_LENGTH],
    session_key: &mut [u8; SESSION_KEY_LENGTH],
) -> SableResult<()> {
    server.ensure_ready()?;

    let req = protocol::parse_client_request(request)?;
    curve::validate_point(req.public_point)?;
    let client_point: &Point = req.public_point.try_into().map_err(|_| Failed)?;

    let mut server_nonce = [0u8; NONCE_LENGTH];
    for _ in 0..MAX_RETRIES {
        server.rng.fill(&mut server_nonce)?;
        let mut ephemeral = curve::random_scalar(&mut server.rng)?;
        let ephemeral_point = match curve::base_mul(&ephemeral) {
            Ok(point) => point,
            Err(e) => {
                ephemeral.zeroize();
                return Err(e);
            }
        };

        let transcript = hash::digest64(&[
            req.public_point,
            req.nonce,
            &ephemeral_point,
            &server.public_key,
            &server_nonce,
        ]);
        let challenge = curve::reduce(&transcript);
        if is_all_zero(&challenge) {
            ephemeral.zeroize();
            continue;
        }

        let mut bound = curve::scalar_mul_add(&challenge, &server.private_key, &ZERO_SCALAR);
        let shared = curve::double_mul(&ephemeral, client_point, &bound, client_point);
        ephemeral.zeroize();
        bound.zeroize();
        let mut shared = match shared {
            // identity result: unusable transcript, try again
            Ok(point) => point,
            Err(_) => continue,
        };

        let mut key_block = hash::digest64(&[&shared, &transcript]);
        shared.zeroize();

        let written = protocol::write_server_response(
            &ephemeral_point,
            &server_nonce,
            &key_block[SESSION_KEY_LENGTH..],
            response,
        );
        if written.is_err() {
            key_block.zeroize();
            return Err(Failed);
        }
        session_key.copy_from_slice(&key_block[..SESSION_KEY_LENGTH]);
        key_block.zeroize();
        return Ok(());
    }

    Err(Failed)
}
