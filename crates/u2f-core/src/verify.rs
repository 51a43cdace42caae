//! Verification of U2F authentication responses.
//!
//! Accepting an authentication ceremony takes two independent checks:
//!
//! 1. [`verify`]: the signature covers `SHA-256(appId) || presence ||
//!    counter || SHA-256(clientData)` under the registered key
//! 2. [`check_user_presence`]: the presence byte is exactly `0x01`
//!
//! [`check_counter`] adds the anti-replay comparison against the last counter
//! the caller stored. [`U2fVerifier`] bundles all three behind a [`Policy`].
//!
//! # Example
//!
//! ```no_run
//! use yubikey_u2f_core::{AuthenticationResponse, verify};
//!
//! # fn run(public_key: &[u8], client_data: &str) -> yubikey_u2f_core::Result<()> {
//! let response = AuthenticationResponse::decode("AQAAAAEwRg==")?;
//!
//! verify::verify(&response, "https://example.com", client_data, public_key)?;
//! verify::check_user_presence(&response)?;
//! # Ok(())
//! # }
//! ```

use p256::ecdsa::VerifyingKey;
use tracing::{debug, warn};

use crate::crypto::{app_id_hash, challenge_hash, decode_public_key, verify_p256};
use crate::error::{Error, Result};
use crate::payload::{HASH_LEN, build_signed_payload};
use crate::policy::Policy;
use crate::response::{AuthenticationResponse, USER_PRESENT};

/// Verifies the signature of an authentication response.
///
/// # Arguments
///
/// * `response` - The decoded response
/// * `app_id` - The application identifier the key was registered for
/// * `client_data` - The client data string the browser sent
/// * `public_key` - The registered P-256 public key (see
///   [`decode_public_key`](crate::crypto::decode_public_key) for formats)
///
/// # Errors
///
/// - [`Error::InvalidPublicKey`] if `public_key` cannot be decoded
/// - [`Error::SignatureInvalid`] if the signature does not verify
pub fn verify(
    response: &AuthenticationResponse,
    app_id: &str,
    client_data: &str,
    public_key: &[u8],
) -> Result<()> {
    let key = decode_public_key(public_key)?;
    verify_signature(response, &app_id_hash(app_id), client_data, &key)
}

/// Checks that the authenticator asserted user presence.
///
/// Only a presence byte of exactly `0x01` is accepted; reserved bits must be
/// clear.
///
/// # Errors
///
/// Returns [`Error::UserPresenceRequired`] carrying the rejected byte.
pub fn check_user_presence(response: &AuthenticationResponse) -> Result<()> {
    let user_presence = response.user_presence();
    if user_presence == USER_PRESENT {
        return Ok(());
    }

    warn!(user_presence, "user presence not asserted");
    Err(Error::UserPresenceRequired(user_presence))
}

/// Checks that the counter advanced past the last accepted value.
///
/// # Errors
///
/// Returns [`Error::CounterNotIncreased`] if `response.counter() <= previous`.
pub fn check_counter(response: &AuthenticationResponse, previous: u32) -> Result<()> {
    let current = response.counter();
    if current > previous {
        return Ok(());
    }

    warn!(current, previous, "counter did not increase");
    Err(Error::CounterNotIncreased { current, previous })
}

fn verify_signature(
    response: &AuthenticationResponse,
    app_id_hash: &[u8; HASH_LEN],
    client_data: &str,
    key: &VerifyingKey,
) -> Result<()> {
    let payload = build_signed_payload(
        app_id_hash,
        response.user_presence(),
        response.counter(),
        &challenge_hash(client_data),
    );

    match verify_p256(key, &payload, response.signature()) {
        Ok(()) => {
            debug!(counter = response.counter(), "signature verified");
            Ok(())
        }
        Err(err) => {
            warn!(counter = response.counter(), error = %err, "signature rejected");
            Err(err)
        }
    }
}

impl AuthenticationResponse {
    /// Verifies this response's signature. See [`verify`].
    ///
    /// # Errors
    ///
    /// See [`verify`].
    pub fn verify(&self, app_id: &str, client_data: &str, public_key: &[u8]) -> Result<()> {
        verify(self, app_id, client_data, public_key)
    }

    /// Checks this response's presence byte. See [`check_user_presence`].
    ///
    /// # Errors
    ///
    /// See [`check_user_presence`].
    pub fn check_user_presence(&self) -> Result<()> {
        check_user_presence(self)
    }
}

/// A verifier bound to one registration: an application identifier and the
/// public key the authenticator returned when it was enrolled.
///
/// The key is decoded once and reused for every response.
#[derive(Debug, Clone)]
pub struct U2fVerifier {
    /// SHA-256 of the application identifier.
    app_id_hash: [u8; HASH_LEN],

    /// The registered P-256 key.
    key: VerifyingKey,
}

impl U2fVerifier {
    /// Creates a verifier for `app_id` and the encoded `public_key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] if `public_key` cannot be decoded.
    pub fn new(app_id: &str, public_key: &[u8]) -> Result<Self> {
        Ok(Self::from_parts(
            app_id_hash(app_id),
            decode_public_key(public_key)?,
        ))
    }

    /// Creates a verifier from an already hashed application identifier and
    /// decoded key.
    #[must_use]
    pub const fn from_parts(app_id_hash: [u8; HASH_LEN], key: VerifyingKey) -> Self {
        Self { app_id_hash, key }
    }

    /// Returns the application parameter.
    #[must_use]
    pub const fn app_id_hash(&self) -> &[u8; HASH_LEN] {
        &self.app_id_hash
    }

    /// Returns the registered key.
    #[must_use]
    pub const fn verifying_key(&self) -> &VerifyingKey {
        &self.key
    }

    /// Verifies the signature of `response` over `client_data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignatureInvalid`] if the signature does not verify.
    pub fn verify(&self, response: &AuthenticationResponse, client_data: &str) -> Result<()> {
        verify_signature(response, &self.app_id_hash, client_data, &self.key)
    }

    /// Runs a complete acceptance check and returns the counter to persist.
    ///
    /// The signature is always verified first. The presence and counter checks
    /// follow as `policy` requires; the counter check is skipped when no
    /// previous counter is known. The first failure is returned and nothing
    /// is partially accepted.
    ///
    /// # Errors
    ///
    /// - [`Error::SignatureInvalid`] if the signature does not verify
    /// - [`Error::UserPresenceRequired`] if presence is required and absent
    /// - [`Error::CounterNotIncreased`] if the counter did not advance
    pub fn authenticate(
        &self,
        response: &AuthenticationResponse,
        client_data: &str,
        previous_counter: Option<u32>,
        policy: &Policy,
    ) -> Result<u32> {
        self.verify(response, client_data)?;

        if policy.require_user_presence {
            check_user_presence(response)?;
        }

        if let (true, Some(previous)) = (policy.require_counter_increase, previous_counter) {
            check_counter(response, previous)?;
        }

        Ok(response.counter())
    }
}
