// Copyright (c) 2026 Sable Security
// Sable — Client (Initiator)
// Licensed under the MIT License

//! Client (initiator) side of the Sable protocol suite.
//!
//! A [`Client`] is a per-connection record holding an ephemeral key pair and
//! request nonce. This crate implements the handshake request and response
//! verification (yielding the session key once the server has proven
//! possession of its static key), signature verification, and the client
//! half of the augmented password protocol (verifier creation, proof of
//! password knowledge, and the check of the server's counter-proof).

/// Handshake request and response verification.
mod handshake;
/// Client half of the augmented password protocol.
mod password;
/// Per-connection client record and its lifecycle.
mod state;
/// Signature verification.
mod verify;

pub use handshake::handshake;
pub use password::{create_password_verifier, password_check_server, password_client_proof};
pub use state::{Client, ClientPhase};
pub use verify::verify;
