//! Cryptographic primitives for U2F verification.
//!
//! This module wraps the external primitives the verifier depends on:
//!
//! - SHA-256 hashing of the application identifier and client data
//! - Decoding of the registered P-256 public key
//! - ECDSA P-256 signature verification
//!
//! # Public Key Formats
//!
//! U2F registration returns the key as an uncompressed SEC1 point:
//! ```text
//! 04 || x (32 bytes) || y (32 bytes)
//! ```
//!
//! Compressed SEC1 points (33 bytes) and bare `x || y` coordinates (64 bytes)
//! are accepted as well.
//!
//! # Signature Formats
//!
//! Authenticators emit ASN.1 DER signatures:
//! ```text
//! 30 len 02 r_len r_bytes 02 s_len s_bytes
//! ```
//!
//! A fixed-width `r || s` (64 bytes) is also accepted.

use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature as P256Signature, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::payload::HASH_LEN;

/// SEC1 tag of an uncompressed point.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Length of a fixed-width `r || s` signature.
const RAW_SIGNATURE_LEN: usize = 64;

/// Computes the SHA-256 digest of `data`.
///
/// # Example
///
/// ```
/// use yubikey_u2f_core::crypto::sha256;
///
/// let digest = sha256(b"abc");
/// assert_eq!(digest[0], 0xBA);
/// ```
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; HASH_LEN] {
    Sha256::digest(data).into()
}

/// Computes the application parameter: `SHA-256(app_id)`.
#[must_use]
pub fn app_id_hash(app_id: &str) -> [u8; HASH_LEN] {
    sha256(app_id.as_bytes())
}

/// Computes the challenge parameter: `SHA-256(client_data)`.
#[must_use]
pub fn challenge_hash(client_data: &str) -> [u8; HASH_LEN] {
    sha256(client_data.as_bytes())
}

/// Decodes a P-256 public key.
///
/// # Arguments
///
/// * `bytes` - 65 bytes (`0x04 || x || y`), 33 bytes (compressed SEC1) or
///   64 bytes (`x || y`)
///
/// # Errors
///
/// Returns [`Error::InvalidPublicKey`] if:
///
/// - The byte length is not 33, 64 or 65
/// - The encoding tag is wrong
/// - The point is not on the curve
pub fn decode_public_key(bytes: &[u8]) -> Result<VerifyingKey> {
    let key = match bytes.len() {
        33 | 65 => VerifyingKey::from_sec1_bytes(bytes),
        64 => {
            let mut sec1 = [0u8; 65];
            sec1[0] = SEC1_UNCOMPRESSED;
            sec1[1..].copy_from_slice(bytes);
            VerifyingKey::from_sec1_bytes(&sec1)
        }
        len => {
            return Err(Error::InvalidPublicKey(format!(
                "expected 33, 64 or 65 bytes, got {len}"
            )));
        }
    };

    key.map_err(|_| Error::InvalidPublicKey("not a valid P-256 point".to_string()))
}

/// Parses an ECDSA signature in DER or fixed-width form.
///
/// # Errors
///
/// Returns [`Error::SignatureInvalid`] if `bytes` is neither a DER signature
/// nor a 64-byte `r || s` with scalars in range.
pub fn parse_signature(bytes: &[u8]) -> Result<P256Signature> {
    if let Ok(signature) = P256Signature::from_der(bytes) {
        return Ok(signature);
    }

    if bytes.len() == RAW_SIGNATURE_LEN {
        return P256Signature::from_slice(bytes)
            .map_err(|_| Error::SignatureInvalid("signature scalars out of range".to_string()));
    }

    Err(Error::SignatureInvalid(format!(
        "undecodable signature of {} bytes",
        bytes.len()
    )))
}

/// Verifies an ECDSA P-256 signature over `message` hashed with SHA-256.
///
/// High-S signatures are accepted.
///
/// # Errors
///
/// Returns [`Error::SignatureInvalid`] if the signature cannot be parsed or
/// does not verify.
pub fn verify_p256(public_key: &VerifyingKey, message: &[u8], signature: &[u8]) -> Result<()> {
    let signature = parse_signature(signature)?;

    public_key
        .verify(message, &signature)
        .map_err(|_| Error::SignatureInvalid("ECDSA verification failed".to_string()))
}
