//! Error types for U2F authentication response handling.
//!
//! This module provides the [`enum@Error`] type shared by every operation in
//! the crate. Each variant corresponds to one way an authentication ceremony
//! can be rejected, so callers can report an accurate reason.
//!
//! # Error Categories
//!
//! - **Decoding errors**: the response blob is not valid base64 or is too short
//! - **Key errors**: the registered public key cannot be decoded
//! - **Verification errors**: the signature, user-presence or counter check failed
//! - **Configuration errors**: a [`Policy`](crate::Policy) could not be loaded
//!
//! # Example
//!
//! ```
//! use yubikey_u2f_core::Error;
//!
//! let err = Error::UserPresenceRequired(0x00);
//! assert_eq!(err.to_string(), "user presence required (presence byte 0x00)");
//! ```

use base64::DecodeError;
use core::result::Result as CoreResult;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// The error type for U2F authentication response operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Decoding Errors
    // =========================================================================
    /// The raw response is not valid base64 or is shorter than its fixed header.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    // =========================================================================
    // Key Errors
    // =========================================================================
    /// The caller-supplied public key is not a valid P-256 point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    // =========================================================================
    // Verification Errors
    // =========================================================================
    /// The ECDSA signature does not match the signed payload.
    #[error("signature invalid: {0}")]
    SignatureInvalid(String),

    /// The authenticator did not assert user presence.
    ///
    /// Carries the presence byte that was rejected.
    #[error("user presence required (presence byte {0:#04x})")]
    UserPresenceRequired(u8),

    /// The signature counter did not advance past the last accepted value.
    #[error("counter did not increase: current {current}, previous {previous}")]
    CounterNotIncreased {
        /// Counter reported by the authenticator.
        current: u32,
        /// Last counter accepted for this registration.
        previous: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A verification policy could not be parsed.
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}

impl From<SerdeJsonError> for Error {
    fn from(err: SerdeJsonError) -> Self {
        Error::InvalidPolicy(err.to_string())
    }
}

/// A specialized [`Result`] type for U2F operations.
pub type Result<T> = CoreResult<T, Error>;
