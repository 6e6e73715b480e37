// Copyright (c) 2026 Sable Security
// Sable — Authenticated Key Exchange & Augmented PAKE
// Licensed under the MIT License

//! Wire-format serialization and parsing.
//!
//! Every message is a fixed-size concatenation of points, scalars, nonces,
//! and proofs; parsing returns zero-copy views and never allocates. Password
//! messages carry a profile-dependent salt, so their parse and write
//! functions take the active [`Profile`](crate::pake::Profile) and validate
//! lengths against it.

use crate::pake::Profile;
use crate::types::{
    Failed, SableResult, CLIENT_PROOF_LENGTH, CLIENT_REQUEST_LENGTH, NONCE_LENGTH, POINT_LENGTH,
    PROOF_LENGTH, SCALAR_LENGTH, SERVER_RECORD_LENGTH, SERVER_RESPONSE_LENGTH, SIGNATURE_LENGTH,
    SIGN_KEY_LENGTH,
};

/// Byte offset of the client nonce inside a client request.
const REQUEST_NONCE_OFFSET: usize = POINT_LENGTH;

/// Byte offset of the server nonce inside a server response.
const RESPONSE_NONCE_OFFSET: usize = POINT_LENGTH;
/// Byte offset of the proof inside a server response.
const RESPONSE_PROOF_OFFSET: usize = POINT_LENGTH + NONCE_LENGTH;

/// Byte offset of the response scalar inside a signature.
const SIGNATURE_SCALAR_OFFSET: usize = POINT_LENGTH;

/// Byte offset of the public point inside a persisted server record.
const RECORD_PUBLIC_OFFSET: usize = SCALAR_LENGTH;
/// Byte offset of the signing sub-key inside a persisted server record.
const RECORD_SIGN_KEY_OFFSET: usize = SCALAR_LENGTH + POINT_LENGTH;

/// Byte offset of the ephemeral scalar inside a challenge secret.
const SECRET_SCALAR_OFFSET: usize = POINT_LENGTH;
/// Byte offset of the verifier point inside a challenge secret.
const SECRET_VERIFIER_OFFSET: usize = POINT_LENGTH + SCALAR_LENGTH;
/// Byte offset of the masked point inside a mobile-profile challenge secret.
const SECRET_MASKED_OFFSET: usize = POINT_LENGTH + SCALAR_LENGTH + POINT_LENGTH;

/// Byte offset of the client proof inside a client-proof message.
const CLIENT_PROOF_PROOF_OFFSET: usize = POINT_LENGTH;

/// Zero-copy view into a serialized client handshake request.
pub struct ClientRequestRef<'a> {
    /// The client's ephemeral public point CP (32 bytes).
    pub public_point: &'a [u8],
    /// The client's random nonce CN (32 bytes).
    pub nonce: &'a [u8],
}

/// Zero-copy view into a serialized server handshake response.
pub struct ServerResponseRef<'a> {
    /// The server's ephemeral public point EP (32 bytes).
    pub ephemeral_point: &'a [u8],
    /// The server's random nonce SN (32 bytes).
    pub nonce: &'a [u8],
    /// Proof that the response was produced with the static key (32 bytes).
    pub proof: &'a [u8],
}

/// Zero-copy view into a serialized signature.
pub struct SignatureRef<'a> {
    /// The commitment point R (32 bytes).
    pub commitment: &'a [u8],
    /// The response scalar s (32 bytes).
    pub response: &'a [u8],
}

/// Zero-copy view into a persisted server record.
pub struct ServerRecordRef<'a> {
    /// The static private scalar (32 bytes).
    pub private_key: &'a [u8],
    /// The static public point (32 bytes).
    pub public_key: &'a [u8],
    /// The signing sub-key (32 bytes).
    pub sign_key: &'a [u8],
}

/// Zero-copy view into a password verifier.
pub struct VerifierRef<'a> {
    /// The verifier point V = v·G (32 bytes).
    pub point: &'a [u8],
    /// The salt (profile-dependent length).
    pub salt: &'a [u8],
}

/// Zero-copy view into a password challenge.
pub struct ChallengeRef<'a> {
    /// The masked server point X′ (32 bytes).
    pub masked_point: &'a [u8],
    /// The salt (profile-dependent length).
    pub salt: &'a [u8],
}

/// Zero-copy view into a server-side challenge secret.
pub struct ChallengeSecretRef<'a> {
    /// The password-bound mask E (32 bytes).
    pub mask: &'a [u8],
    /// The server's ephemeral scalar x (32 bytes).
    pub scalar: &'a [u8],
    /// The stored verifier point V (32 bytes).
    pub verifier_point: &'a [u8],
    /// The masked point X′, stored in the mobile profile only.
    pub masked_point: Option<&'a [u8]>,
}

/// Zero-copy view into a client-proof message.
pub struct ClientProofRef<'a> {
    /// The client's masked ephemeral point Y′ (32 bytes).
    pub masked_point: &'a [u8],
    /// The client's half of the proof digest (32 bytes).
    pub proof: &'a [u8],
}

/// Parses a client handshake request.
///
/// # Errors
///
/// Returns [`Failed`] if `data` is not exactly [`CLIENT_REQUEST_LENGTH`] bytes.
pub fn parse_client_request(data: &[u8]) -> SableResult<ClientRequestRef<'_>> {
    if data.len() != CLIENT_REQUEST_LENGTH {
        return Err(Failed);
    }
    Ok(ClientRequestRef {
        public_point: &data[..REQUEST_NONCE_OFFSET],
        nonce: &data[REQUEST_NONCE_OFFSET..],
    })
}

/// Serializes a client handshake request into `out`.
///
/// # Errors
///
/// Returns [`Failed`] if any component has an incorrect length.
pub fn write_client_request(
    public_point: &[u8],
    nonce: &[u8],
    out: &mut [u8; CLIENT_REQUEST_LENGTH],
) -> SableResult<()> {
    if public_point.len() != POINT_LENGTH || nonce.len() != NONCE_LENGTH {
        return Err(Failed);
    }
    out[..REQUEST_NONCE_OFFSET].copy_from_slice(public_point);
    out[REQUEST_NONCE_OFFSET..].copy_from_slice(nonce);
    Ok(())
}

/// Parses a server handshake response.
///
/// # Errors
///
/// Returns [`Failed`] if `data` is not exactly [`SERVER_RESPONSE_LENGTH`] bytes.
pub fn parse_server_response(data: &[u8]) -> SableResult<ServerResponseRef<'_>> {
    if data.len() != SERVER_RESPONSE_LENGTH {
        return Err(Failed);
    }
    Ok(ServerResponseRef {
        ephemeral_point: &data[..RESPONSE_NONCE_OFFSET],
        nonce: &data[RESPONSE_NONCE_OFFSET..RESPONSE_PROOF_OFFSET],
        proof: &data[RESPONSE_PROOF_OFFSET..],
    })
}

/// Serializes a server handshake response into `out`.
///
/// # Errors
///
/// Returns [`Failed`] if any component has an incorrect length.
pub fn write_server_response(
    ephemeral_point: &[u8],
    nonce: &[u8],
    proof: &[u8],
    out: &mut [u8; SERVER_RESPONSE_LENGTH],
) -> SableResult<()> {
    if ephemeral_point.len() != POINT_LENGTH
        || nonce.len() != NONCE_LENGTH
        || proof.len() != PROOF_LENGTH
    {
        return Err(Failed);
    }
    out[..RESPONSE_NONCE_OFFSET].copy_from_slice(ephemeral_point);
    out[RESPONSE_NONCE_OFFSET..RESPONSE_PROOF_OFFSET].copy_from_slice(nonce);
    out[RESPONSE_PROOF_OFFSET..].copy_from_slice(proof);
    Ok(())
}

/// Parses a signature.
///
/// # Errors
///
/// Returns [`Failed`] if `data` is not exactly [`SIGNATURE_LENGTH`] bytes.
pub fn parse_signature(data: &[u8]) -> SableResult<SignatureRef<'_>> {
    if data.len() != SIGNATURE_LENGTH {
        return Err(Failed);
    }
    Ok(SignatureRef {
        commitment: &data[..SIGNATURE_SCALAR_OFFSET],
        response: &data[SIGNATURE_SCALAR_OFFSET..],
    })
}

/// Serializes a signature into `out`.
///
/// # Errors
///
/// Returns [`Failed`] if any component has an incorrect length.
pub fn write_signature(
    commitment: &[u8],
    response: &[u8],
    out: &mut [u8; SIGNATURE_LENGTH],
) -> SableResult<()> {
    if commitment.len() != POINT_LENGTH || response.len() != SCALAR_LENGTH {
        return Err(Failed);
    }
    out[..SIGNATURE_SCALAR_OFFSET].copy_from_slice(commitment);
    out[SIGNATURE_SCALAR_OFFSET..].copy_from_slice(response);
    Ok(())
}

/// Parses a persisted server record.
///
/// # Errors
///
/// Returns [`Failed`] if `data` is not exactly [`SERVER_RECORD_LENGTH`] bytes.
pub fn parse_server_record(data: &[u8]) -> SableResult<ServerRecordRef<'_>> {
    if data.len() != SERVER_RECORD_LENGTH {
        return Err(Failed);
    }
    Ok(ServerRecordRef {
        private_key: &data[..RECORD_PUBLIC_OFFSET],
        public_key: &data[RECORD_PUBLIC_OFFSET..RECORD_SIGN_KEY_OFFSET],
        sign_key: &data[RECORD_SIGN_KEY_OFFSET..],
    })
}

/// Serializes a server record into `out`.
///
/// # Errors
///
/// Returns [`Failed`] if any component has an incorrect length.
pub fn write_server_record(
    private_key: &[u8],
    public_key: &[u8],
    sign_key: &[u8],
    out: &mut [u8; SERVER_RECORD_LENGTH],
) -> SableResult<()> {
    if private_key.len() != SCALAR_LENGTH
        || public_key.len() != POINT_LENGTH
        || sign_key.len() != SIGN_KEY_LENGTH
    {
        return Err(Failed);
    }
    out[..RECORD_PUBLIC_OFFSET].copy_from_slice(private_key);
    out[RECORD_PUBLIC_OFFSET..RECORD_SIGN_KEY_OFFSET].copy_from_slice(public_key);
    out[RECORD_SIGN_KEY_OFFSET..].copy_from_slice(sign_key);
    Ok(())
}

/// Parses a password verifier under the given profile.
///
/// # Errors
///
/// Returns [`Failed`] if `data` does not match the profile's verifier length.
pub fn parse_verifier(profile: Profile, data: &[u8]) -> SableResult<VerifierRef<'_>> {
    if data.len() != profile.verifier_length() {
        return Err(Failed);
    }
    Ok(VerifierRef {
        point: &data[..POINT_LENGTH],
        salt: &data[POINT_LENGTH..],
    })
}

/// Serializes a password verifier into `out`.
///
/// # Errors
///
/// Returns [`Failed`] if any component or `out` has an incorrect length.
pub fn write_verifier(
    profile: Profile,
    point: &[u8],
    salt: &[u8],
    out: &mut [u8],
) -> SableResult<()> {
    if point.len() != POINT_LENGTH
        || salt.len() != profile.salt_length()
        || out.len() != profile.verifier_length()
    {
        return Err(Failed);
    }
    out[..POINT_LENGTH].copy_from_slice(point);
    out[POINT_LENGTH..].copy_from_slice(salt);
    Ok(())
}

/// Parses a password challenge under the given profile.
///
/// # Errors
///
/// Returns [`Failed`] if `data` does not match the profile's challenge length.
pub fn parse_challenge(profile: Profile, data: &[u8]) -> SableResult<ChallengeRef<'_>> {
    if data.len() != profile.challenge_length() {
        return Err(Failed);
    }
    Ok(ChallengeRef {
        masked_point: &data[..POINT_LENGTH],
        salt: &data[POINT_LENGTH..],
    })
}

/// Serializes a password challenge into `out`.
///
/// # Errors
///
/// Returns [`Failed`] if any component or `out` has an incorrect length.
pub fn write_challenge(
    profile: Profile,
    masked_point: &[u8],
    salt: &[u8],
    out: &mut [u8],
) -> SableResult<()> {
    if masked_point.len() != POINT_LENGTH
        || salt.len() != profile.salt_length()
        || out.len() != profile.challenge_length()
    {
        return Err(Failed);
    }
    out[..POINT_LENGTH].copy_from_slice(masked_point);
    out[POINT_LENGTH..].copy_from_slice(salt);
    Ok(())
}

/// Parses a server-side challenge secret under the given profile.
///
/// # Errors
///
/// Returns [`Failed`] if `data` does not match the profile's secret length.
pub fn parse_challenge_secret(
    profile: Profile,
    data: &[u8],
) -> SableResult<ChallengeSecretRef<'_>> {
    if data.len() != profile.challenge_secret_length() {
        return Err(Failed);
    }
    let masked_point = match profile {
        Profile::Desktop => None,
        Profile::Mobile => Some(&data[SECRET_MASKED_OFFSET..]),
    };
    Ok(ChallengeSecretRef {
        mask: &data[..SECRET_SCALAR_OFFSET],
        scalar: &data[SECRET_SCALAR_OFFSET..SECRET_VERIFIER_OFFSET],
        verifier_point: &data[SECRET_VERIFIER_OFFSET..SECRET_VERIFIER_OFFSET + POINT_LENGTH],
        masked_point,
    })
}

/// Serializes a server-side challenge secret into `out`.
///
/// The mobile profile appends the masked point; the desktop profile must pass
/// `None`.
///
/// # Errors
///
/// Returns [`Failed`] if any component or `out` has an incorrect length, or
/// the masked point's presence does not match the profile.
pub fn write_challenge_secret(
    profile: Profile,
    mask: &[u8],
    scalar: &[u8],
    verifier_point: &[u8],
    masked_point: Option<&[u8]>,
    out: &mut [u8],
) -> SableResult<()> {
    if mask.len() != POINT_LENGTH
        || scalar.len() != SCALAR_LENGTH
        || verifier_point.len() != POINT_LENGTH
        || out.len() != profile.challenge_secret_length()
    {
        return Err(Failed);
    }
    out[..SECRET_SCALAR_OFFSET].copy_from_slice(mask);
    out[SECRET_SCALAR_OFFSET..SECRET_VERIFIER_OFFSET].copy_from_slice(scalar);
    out[SECRET_VERIFIER_OFFSET..SECRET_VERIFIER_OFFSET + POINT_LENGTH]
        .copy_from_slice(verifier_point);
    match (profile, masked_point) {
        (Profile::Desktop, None) => {}
        (Profile::Mobile, Some(point)) if point.len() == POINT_LENGTH => {
            out[SECRET_MASKED_OFFSET..].copy_from_slice(point);
        }
        _ => return Err(Failed),
    }
    Ok(())
}

/// Parses a client-proof message.
///
/// # Errors
///
/// Returns [`Failed`] if `data` is not exactly [`CLIENT_PROOF_LENGTH`] bytes.
pub fn parse_client_proof(data: &[u8]) -> SableResult<ClientProofRef<'_>> {
    if data.len() != CLIENT_PROOF_LENGTH {
        return Err(Failed);
    }
    Ok(ClientProofRef {
        masked_point: &data[..CLIENT_PROOF_PROOF_OFFSET],
        proof: &data[CLIENT_PROOF_PROOF_OFFSET..],
    })
}

/// Serializes a client-proof message into `out`.
///
/// # Errors
///
/// Returns [`Failed`] if any component has an incorrect length.
pub fn write_client_proof(
    masked_point: &[u8],
    proof: &[u8],
    out: &mut [u8; CLIENT_PROOF_LENGTH],
) -> SableResult<()> {
    if masked_point.len() != POINT_LENGTH || proof.len() != PROOF_LENGTH {
        return Err(Failed);
    }
    out[..CLIENT_PROOF_PROOF_OFFSET].copy_from_slice(masked_point);
    out[CLIENT_PROOF_PROOF_OFFSET..].copy_from_slice(proof);
    Ok(())
}
