//! YubiKey U2F Core Library
//!
//! This crate decodes and verifies FIDO U2F raw authentication responses: the
//! binary message a hardware security key returns after signing a
//! relying party's challenge.
//!
//! # Overview
//!
//! An authentication response carries a user-presence byte, a big-endian
//! signature counter and an ECDSA P-256 signature. The signature covers a
//! message the relying party must rebuild byte for byte from its own context
//! (application identifier and client data) plus the decoded fields.
//!
//! This library provides:
//!
//! - **Decoding**: base64 wire blob to [`AuthenticationResponse`]
//! - **Signed Payload**: bit-exact reconstruction of the signed message
//! - **Verification**: ECDSA P-256 signature verification against the
//!   registered key
//! - **Policy Checks**: user presence and anti-replay counter checks
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Caller (flow controller)                │
//! ├──────────────────────────────────────────────────────────┤
//! │   U2fVerifier  ──  Policy  ──  presence / counter checks │
//! ├──────────────────────────────────────────────────────────┤
//! │  Response Decoder  │  Signed-Payload Builder  │  Crypto  │
//! │  (base64, BE u32)  │  (appId ‖ up ‖ ctr ‖ cd) │  (P-256) │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use yubikey_u2f_core::{AuthenticationResponse, Policy, U2fVerifier};
//!
//! # fn run(registered_key: &[u8], client_data: &str, raw: &str) -> yubikey_u2f_core::Result<()> {
//! let verifier = U2fVerifier::new("https://example.com", registered_key)?;
//! let response = AuthenticationResponse::decode(raw)?;
//!
//! // Last counter the caller stored for this key, if any.
//! let previous = Some(41);
//! let counter = verifier.authenticate(&response, client_data, previous, &Policy::default())?;
//! # let _ = counter;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Diagnostics are emitted through [`tracing`]. The library never installs a
//! subscriber.
//!
//! # Feature Flags
//!
//! This crate currently has no optional features.
//!
//! # Security Considerations
//!
//! - Signature verification and the presence check are independent; both must
//!   pass before a ceremony is accepted
//! - Counters are compared but never stored here; persist the value returned
//!   by [`U2fVerifier::authenticate`]
//! - No operation retries: every failure is deterministic

// Modules
pub mod crypto;
pub mod error;
pub mod payload;
pub mod policy;
pub mod response;
pub mod verify;

// Re-exports for convenience
pub use error::{Error, Result};
pub use payload::build_signed_payload;
pub use policy::Policy;
pub use response::AuthenticationResponse;
pub use verify::{U2fVerifier, check_counter, check_user_presence};
