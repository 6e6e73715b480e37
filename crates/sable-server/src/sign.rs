// Copyright (c) 2026 Sable Security
// Sable — Server (Responder)
// Licensed under the MIT License

use sable_core::types::{is_all_zero, Failed, SableResult, SIGNATURE_LENGTH};
use sable_core::{curve, hash, protocol};
use zeroize::Zeroize;

use crate::state::Server;

/// Signs `message` under the server's static key.
///
/// Schnorr with a deterministic nonce: r is the message digest keyed by the
/// signing sub-key, reduced mod q; the signature is `R ∥ s` with R = r·G and
/// s = r + t·priv for the challenge t = BLAKE2b-64(SP ∥ R ∥ M) mod q.
/// Deterministic nonces make the signature a pure function of (key, message),
/// so there is no nonce-reuse hazard across identical messages.
///
/// # Errors
///
/// Returns [`Failed`] if the record is uninitialized, `message` is empty, or
/// either derived scalar reduces to zero (a zero challenge would render the
/// signature unverifiable).
pub fn sign(
    server: &Server,
    message: &[u8],
    signature: &mut [u8; SIGNATURE_LENGTH],
) -> SableResult<()> {
    server.ensure_ready()?;
    if message.is_empty() {
        return Err(Failed);
    }

    let mut nonce_wide = hash::keyed64(&server.sign_key, &[message]);
    let mut nonce = curve::reduce(&nonce_wide);
    nonce_wide.zeroize();
    if is_all_zero(&nonce) {
        return Err(Failed);
    }

    let commitment = match curve::base_mul(&nonce) {
        Ok(point) => point,
        Err(e) => {
            nonce.zeroize();
            return Err(e);
        }
    };

    let challenge = curve::reduce(&hash::digest64(&[
        &server.public_key,
        &commitment,
        message,
    ]));
    if is_all_zero(&challenge) {
        nonce.zeroize();
        return Err(Failed);
    }

    let response = curve::scalar_mul_add(&challenge, &server.private_key, &nonce);
    nonce.zeroize();

    protocol::write_signature(&commitment, &response, signature)
}
