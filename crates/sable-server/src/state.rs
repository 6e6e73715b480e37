// Copyright (c) 2026 Sable Security
// Sable — Server (Responder)
// Licensed under the MIT License

use sable_core::rng::SecretRng;
use sable_core::types::{
    constant_time_eq, personal, Failed, Point, SableResult, Scalar, SERVER_RECORD_LENGTH,
    SIGN_KEY_LENGTH,
};
use sable_core::{curve, hash, protocol};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Tracks whether a server record holds live key material.
///
/// Every protocol entry point checks the phase first; a cleared record
/// refuses all operations until it is regenerated or reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPhase {
    /// No key material present (freshly cleared).
    Created,
    /// Static key pair and signing sub-key are loaded.
    Ready,
}

/// Long-lived server record: static key pair, signing sub-key, and the
/// record's own random generator.
///
/// One caller owns the record; `&mut self` on the mutating operations is what
/// enforces the no-concurrent-use contract. All secret fields are zeroized on
/// drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Server {
    /// Current lifecycle phase.
    #[zeroize(skip)]
    pub phase: ServerPhase,
    /// Static private scalar s.
    pub private_key: Scalar,
    /// Static public point SP = s·G.
    pub public_key: Point,
    /// Sub-key for deterministic signature nonces, derived from `private_key`.
    pub sign_key: [u8; SIGN_KEY_LENGTH],
    /// Generator for nonces, ephemeral scalars, and challenge scalars.
    pub rng: SecretRng,
}

impl Server {
    /// Generates a fresh server record from OS entropy plus an optional seed.
    ///
    /// # Errors
    ///
    /// Returns [`Failed`] if the library cannot initialize, the entropy
    /// source fails, or key generation fails; nothing is left initialized.
    pub fn generate(seed: Option<&[u8]>) -> SableResult<Self> {
        sable_core::init()?;
        Self::from_rng(SecretRng::from_entropy(seed)?)
    }

    /// Generates a server record from a caller-built generator.
    ///
    /// With a generator from [`SecretRng::from_seed`] the resulting key pair
    /// is a deterministic function of the seed.
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

        let mut sign_key = [0u8; SIGN_KEY_LENGTH];
        hash::personalized(&mut sign_key, None, &private_key, personal::SIGN_KEY);

        Ok(Self {
            phase: ServerPhase::Ready,
            private_key,
            public_key,
            sign_key,
            rng,
        })
    }

    /// Restores a server record persisted by [`Server::save`].
    ///
    /// The stored public point is checked against `priv·G` in constant time,
    /// so a tampered record fails to load.
    pub fn load(data: &[u8], seed: Option<&[u8]>) -> SableResult<Self> {
        sable_core::init()?;
        let record = protocol::parse_server_record(data)?;

        let mut private_key: Scalar = record.private_key.try_into().map_err(|_| Failed)?;
        let derived = match curve::base_mul(&private_key) {
            Ok(point) => point,
            Err(e) => {
                private_key.zeroize();
                return Err(e);
            }
        };
        if !constant_time_eq(&derived, record.public_key) {
            private_key.zeroize();
            return Err(Failed);
        }

        let mut sign_key = [0u8; SIGN_KEY_LENGTH];
        sign_key.copy_from_slice(record.sign_key);

        let rng = match SecretRng::from_entropy(seed) {
            Ok(rng) => rng,
            Err(e) => {
                private_key.zeroize();
                sign_key.zeroize();
                return Err(e);
            }
        };

        Ok(Self {
            phase: ServerPhase::Ready,
            private_key,
            public_key: derived,
            sign_key,
            rng,
        })
    }

    /// Writes the packed record `priv ∥ pub ∥ signkey` into `out`.
    ///
    /// The output contains the private key; the caller owns its protection.
    pub fn save(&self, out: &mut [u8; SERVER_RECORD_LENGTH]) -> SableResult<()> {
        self.ensure_ready()?;
        protocol::write_server_record(&self.private_key, &self.public_key, &self.sign_key, out)
    }

    /// Returns the static public point.
    pub fn public_key(&self) -> SableResult<Point> {
        self.ensure_ready()?;
        Ok(self.public_key)
    }

    /// Remixes fresh OS entropy, plus an optional seed, into the record's
    /// generator. Periodic rekeying bounds how long a captured generator
    /// state stays useful.
    pub fn rekey(&mut self, seed: Option<&[u8]>) -> SableResult<()> {
        self.ensure_ready()?;
        self.rng.reseed(seed)
    }

    /// Zeroizes all secret fields and returns the record to `Created`.
    pub fn clear(&mut self) {
        self.private_key.zeroize();
        self.public_key.zeroize();
        self.sign_key.zeroize();
        self.rng.zeroize();
        self.phase = ServerPhase::Created;
    }

    pub(crate) fn ensure_ready(&self) -> SableResult<()> {
        if self.phase != ServerPhase::Ready {
            return Err(Failed);
        }
        Ok(())
    }
}
