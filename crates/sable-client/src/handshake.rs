// Copyright (c) 2026 Sable Security
// Sable — Client (Initiator)
// Licensed under the MIT License

use sable_core::types::{
    constant_time_eq, is_all_zero, Failed, Point, SableResult, SESSION_KEY_LENGTH, ZERO_SCALAR,
};
use sable_core::{curve, hash, protocol};
use zeroize::Zeroize;

use crate::state::{Client, ClientPhase};

/// Verifies a server handshake response and derives the session key.
///
/// Recomputes the transcript challenge h = BLAKE2b-64(CP ∥ CN ∥ EP ∥ SP ∥
/// SN) mod q and the shared point T = c·EP + (h·c)·SP, then checks the
/// server's proof (the high half of BLAKE2b-64(T ∥ H)) in constant time.
/// Only a server holding the static private key behind `server_public` can
/// have produced a matching proof, so acceptance authenticates the server.
/// Both h = 0 and h·c = 0 are rejected outright; the client never retries a
/// transcript.
///
/// On success the session key is written to `session_key` and the record
/// moves to [`ClientPhase::Finished`]; it cannot run a second handshake.
///
/// # Errors
///
/// Returns [`Failed`] if the record has already completed a handshake, the
/// response or either public point is malformed, the transcript is unusable,
/// or the proof does not match.
pub fn handshake(
    client: &mut Client,
    server_public: &[u8],
    response: &[u8],
    session_key: &mut [u8; SESSION_KEY_LENGTH],
) -> SableResult<()> {
    client.ensure_ready()?;

    curve::validate_point(server_public)?;
    let server_point: &Point = server_public.try_into().map_err(|_| Failed)?;

    let resp = protocol::parse_server_response(response)?;
    curve::validate_point(resp.ephemeral_point)?;
    let ephemeral_point: &Point = resp.ephemeral_point.try_into().map_err(|_| Failed)?;

    let transcript = hash::digest64(&[
        &client.public_key,
        &client.nonce,
        resp.ephemeral_point,
        server_public,
        resp.nonce,
    ]);
    let challenge = curve::reduce(&transcript);
    if is_all_zero(&challenge) {
        return Err(Failed);
    }

    let mut bound = curve::scalar_mul_add(&challenge, &client.private_key, &ZERO_SCALAR);
    if is_all_zero(&bound) {
        bound.zeroize();
        return Err(Failed);
    }

    let shared = curve::double_mul(&client.private_key, ephemeral_point, &bound, server_point);
    bound.zeroize();
    let mut shared = shared?;

    let mut key_block = hash::digest64(&[&shared, &transcript]);
    shared.zeroize();

    if !constant_time_eq(&key_block[SESSION_KEY_LENGTH..], resp.proof) {
        key_block.zeroize();
        return Err(Failed);
    }

    session_key.copy_from_slice(&key_block[..SESSION_KEY_LENGTH]);
    key_block.zeroize();
    client.phase = ClientPhase::Finished;
    Ok(())
}
