// Copyright (c) 2026 Sable Security
// Sable — Authenticated Key Exchange & Augmented PAKE
// Licensed under the MIT License

//! Seeded, forkable random generator.
//!
//! `SecretRng` keeps a 64-byte state and produces output as keyed BLAKE2b
//! blocks. The state is stepped through a one-way hash after every draw, so
//! capturing it at step i reveals nothing about the bytes produced at step
//! i − 1. A child generator can be forked from a parent without touching the
//! OS entropy source, which is what lets client rekeying stay non-blocking.

use crate::hash;
use crate::types::{personal, Failed, SableResult, DIGEST_LENGTH, RNG_STATE_LENGTH};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Amount of OS entropy mixed in per (re)seed.
const OS_SEED_LENGTH: usize = 32;

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretRng {
    state: [u8; RNG_STATE_LENGTH],
}

impl SecretRng {
    /// Creates a generator from OS entropy, mixing in an optional caller seed.
    ///
    /// # Errors
    ///
    /// Returns [`Failed`] if the entropy source cannot be read.
    pub fn from_entropy(seed: Option<&[u8]>) -> SableResult<Self> {
        let mut rng = Self {
            state: [0u8; RNG_STATE_LENGTH],
        };
        rng.reseed(seed)?;
        Ok(rng)
    }

    /// Creates a fully deterministic generator from a caller seed.
    ///
    /// No OS entropy is drawn: the same seed always yields the same output
    /// stream. Intended for derived generators and reproducible key
    /// generation; production records should prefer [`SecretRng::from_entropy`].
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut state = [0u8; RNG_STATE_LENGTH];
        hash::personalized(&mut state, None, seed, personal::RNG_SEED);
        Self { state }
    }

    /// Remixes fresh OS entropy, and an optional caller seed, into the state.
    ///
    /// # Errors
    ///
    /// Returns [`Failed`] if the entropy source cannot be read.
    pub fn reseed(&mut self, seed: Option<&[u8]>) -> SableResult<()> {
        let mut fresh = [0u8; OS_SEED_LENGTH];
        // SAFETY: Buffer is a valid mutable array; length matches.
        unsafe {
            libsodium_sys::randombytes_buf(fresh.as_mut_ptr() as *mut _, fresh.len());
        }
        self.absorb(&fresh);
        fresh.zeroize();
        if let Some(extra) = seed {
            self.absorb(extra);
        }
        Ok(())
    }

    /// Writes uniform bytes into `out`.
    ///
    /// The state is stepped after the draw.
    ///
    /// # Errors
    ///
    /// Returns [`Failed`] if `out` is empty.
    pub fn fill(&mut self, out: &mut [u8]) -> SableResult<()> {
        if out.is_empty() {
            return Err(Failed);
        }
        let mut block = [0u8; DIGEST_LENGTH];
        for (index, chunk) in out.chunks_mut(DIGEST_LENGTH).enumerate() {
            let counter = (index as u64).to_le_bytes();
            hash::personalized(&mut block, Some(&self.state), &counter, personal::RNG_BLOCK);
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        block.zeroize();
        self.step();
        Ok(())
    }

    /// Forks a child generator from this one without an OS entropy draw.
    ///
    /// The parent state is stepped afterwards, so forking twice with the same
    /// seed still yields two unrelated children.
    pub fn derive(&mut self, seed: Option<&[u8]>) -> SecretRng {
        let mut child = [0u8; RNG_STATE_LENGTH];
        hash::personalized(
            &mut child,
            Some(&self.state),
            seed.unwrap_or(&[]),
            personal::RNG_FORK,
        );
        self.step();
        let rng = Self { state: child };
        child.zeroize();
        rng
    }

    /// Folds caller-supplied bytes into the state.
    fn absorb(&mut self, input: &[u8]) {
        let mut next = [0u8; RNG_STATE_LENGTH];
        hash::personalized(&mut next, Some(&self.state), input, personal::RNG_SEED);
        self.state.copy_from_slice(&next);
        next.zeroize();
    }

    /// One-way state transition.
    fn step(&mut self) {
        let mut next = [0u8; RNG_STATE_LENGTH];
        hash::personalized(&mut next, Some(&self.state), &[], personal::RNG_STEP);
        self.state.copy_from_slice(&next);
        next.zeroize();
    }
}
