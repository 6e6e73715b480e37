// Copyright (c) 2026 Sable Security
// Sable — Server (Responder)
// Licensed under the MIT License

//! Server (responder) side of the Sable protocol suite.
//!
//! A [`Server`] owns a long-lived static key pair, a signing sub-key derived
//! from it, and a random generator. On top of that record this crate
//! implements the handshake response with proof of static-key possession,
//! deterministic signing, and the server half of the augmented password
//! protocol (challenge generation and counter-proof).

/// Handshake response with proof of static-key possession.
mod handshake;
/// Server half of the augmented password protocol.
mod password;
/// Deterministic signing under the static key.
mod sign;
/// Long-lived server record and its lifecycle.
mod state;

pub use handshake::handshake;
pub use password::{password_challenge, password_server_proof};
pub use sign::sign;
pub use state::{Server, ServerPhase};
