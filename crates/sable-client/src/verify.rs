// Copyright (c) 2026 Sable Security
// Sable — Client (Initiator)
// Licensed under the MIT License

use sable_core::types::{constant_time_eq, is_all_zero, Failed, Point, SableResult, Scalar};
use sable_core::{curve, hash, protocol};

/// Verifies a signature under a server's static public point.
///
/// Recomputes the challenge t = BLAKE2b-64(SP ∥ R ∥ M) mod q and checks that
/// s·G − t·SP equals the commitment R byte-for-byte. Verification involves no
/// secrets and needs no constant-time discipline.
///
/// # Errors
///
/// Returns [`Failed`] if `message` is empty, the public point or signature is
/// malformed, or the equation does not hold.
pub fn verify(message: &[u8], server_public: &[u8], signature: &[u8]) -> SableResult<()> {
    sable_core::init()?;
    if message.is_empty() {
        return Err(Failed);
    }

    curve::validate_point(server_public)?;
    let server_point: &Point = server_public.try_into().map_err(|_| Failed)?;

    let sig = protocol::parse_signature(signature)?;
    let response: &Scalar = sig.response.try_into().map_err(|_| Failed)?;
    if !curve::is_canonical_scalar(response) {
        return Err(Failed);
    }

    let challenge = curve::reduce(&hash::digest64(&[server_public, sig.commitment, message]));
    if is_all_zero(&challenge) {
        return Err(Failed);
    }

    let negated = curve::point_negate(server_point)?;
    let recovered = curve::base_double_mul(response, &challenge, &negated)?;

    if !constant_time_eq(&recovered, sig.commitment) {
        return Err(Failed);
    }
    Ok(())
}
