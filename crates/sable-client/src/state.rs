// Copyright (c) 2026 Sable Security
// Sable — Client (Initiator)
// Licensed under the MIT License

use sable_core::rng::SecretRng;
use sable_core::types::{
    Failed, Point, SableResult, Scalar, CLIENT_REQUEST_LENGTH, NONCE_LENGTH,
};
use sable_core::{curve, protocol};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Tracks whether the client's ephemeral key may still be used for a
/// handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPhase {
    /// Ephemeral key pair and nonce are fresh; a handshake may run.
    Ready,
    /// A handshake completed with this key pair; it must not run again.
    Finished,
}

/// Per-connection client record: ephemeral key pair, request nonce, and the
/// record's own random generator.
///
/// Created for one connection attempt and either consumed by a successful
/// handshake or dropped; all secret fields are zeroized on drop. The password
/// operations only need the generator and may run in either phase.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Client {
    /// Current lifecycle phase.
    #[zeroize(skip)]
    pub phase: ClientPhase,
    /// Ephemeral private scalar c.
    pub private_key: Scalar,
    /// Ephemeral public point CP = c·G.
    pub public_key: Point,
    /// Random nonce CN sent with the request.
    pub nonce: [u8; NONCE_LENGTH],
    /// Generator for ephemeral material and verifier salts.
    pub rng: SecretRng,
}

impl Client {
    /// Generates a fresh client record from OS entropy plus an optional seed.
    ///
    /// # Errors
    ///
    /// Returns [`Failed`] if the library cannot initialize, the entropy
    /// source fails, or key generation fails.
    pub fn generate(seed: Option<&[u8]>) -> SableResult<Self> {
        sable_core::init()?;
        Self::from_rng(SecretRng::from_entropy(seed)?)
    }

    /// Generates a client record from a caller-built generator.
    ///
    /// With a generator from [`SecretRng::from_seed`] the ephemeral key pair
    /// and nonce are deterministic functions of the seed.
    ///
    /// # Errors
    ///
    /// Returns [`Failed`] if the library cannot initialize or key generation
    /// fails.
    pub fn from_rng(mut rng: SecretRng) -> SableResult<Self> {
        sable_core::init()?;

        let mut private_key = curve::random_scalar(&mut rng)?;
        let public_key = match curve::base_mul(&private_key) {
            Ok(point) => point,
            Err(e) => {
                private_key.zeroize();
                return Err(e);
            }
        };

        let mut nonce = [0u8; NONCE_LENGTH];
        if rng.fill(&mut nonce).is_err() {
            private_key.zeroize();
            return Err(Failed);
        }

        Ok(Self {
            phase: ClientPhase::Ready,
            private_key,
            public_key,
            nonce,
            rng,
        })
    }

    /// Derives the next client record from this one without an OS entropy
    /// draw.
    ///
    /// The child generator is forked from this record's generator state, so
    /// rekeying never blocks on the entropy source, and forking twice with
    /// the same seed still produces distinct key pairs and nonces.
    ///
    /// # Errors
    ///
    /// Returns [`Failed`] if key generation fails.
    pub fn rekey(&mut self, seed: Option<&[u8]>) -> SableResult<Self> {
        let rng = self.rng.derive(seed);
        Self::from_rng(rng)
    }

    /// Serializes the handshake request `CP ∥ CN`.
    ///
    /// # Errors
    ///
    /// Returns [`Failed`] once the record has completed a handshake.
    pub fn request(&self) -> SableResult<[u8; CLIENT_REQUEST_LENGTH]> {
        self.ensure_ready()?;
        let mut out = [0u8; CLIENT_REQUEST_LENGTH];
        protocol::write_client_request(&self.public_key, &self.nonce, &mut out)?;
        Ok(out)
    }

    pub(crate) fn ensure_ready(&self) -> SableResult<()> {
        if self.phase != ClientPhase::Ready {
            return Err(Failed);
        }
        Ok(())
    }
}
