//! The U2F raw authentication response.
//!
//! An authenticator answers an authentication request with a short binary
//! message. The relying party receives it base64-encoded and decodes it into
//! an [`AuthenticationResponse`].
//!
//! # Wire Format
//!
//! ```text
//! | Offset | Length    | Field         | Encoding          |
//! |--------|-----------|---------------|-------------------|
//! | 0      | 1         | user presence | raw byte          |
//! | 1      | 4         | counter       | big-endian u32    |
//! | 5      | remainder | signature     | raw ECDSA bytes   |
//! ```
//!
//! # Example
//!
//! ```
//! use yubikey_u2f_core::AuthenticationResponse;
//!
//! // presence = 0x01, counter = 1, two signature bytes
//! let response = AuthenticationResponse::decode("AQAAAAEwRg==").unwrap();
//!
//! assert!(response.is_user_present());
//! assert_eq!(response.counter(), 1);
//! assert_eq!(response.signature(), &[0x30, 0x46]);
//! ```

use core::fmt;
use core::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Presence byte value asserting that the user touched the authenticator.
pub const USER_PRESENT: u8 = 0x01;

/// Length of the fixed header: presence byte plus 4-byte counter.
pub const HEADER_LEN: usize = 5;

/// A decoded U2F raw authentication response.
///
/// The value is immutable once constructed. Two responses are equal iff their
/// presence byte, counter and signature bytes are equal; [`Hash`] agrees with
/// that equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    /// Presence byte. Bit 0 set means the user was present.
    user_presence: u8,

    /// Anti-replay counter, already converted from big-endian.
    counter: u32,

    /// Raw ECDSA signature bytes, DER or fixed-length.
    #[serde(with = "hex_bytes")]
    signature: Vec<u8>,
}

/// Serde helper for hex encoding/decoding variable-length byte strings.
mod hex_bytes {
    use hex::{decode, encode};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(super) fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", encode(bytes)))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        decode(s).map_err(de::Error::custom)
    }
}

impl AuthenticationResponse {
    /// Creates a response from its decoded fields.
    ///
    /// # Example
    ///
    /// ```
    /// use yubikey_u2f_core::AuthenticationResponse;
    ///
    /// let response = AuthenticationResponse::new(0x01, 42, vec![0x30, 0x44]);
    /// assert_eq!(response.counter(), 42);
    /// ```
    #[must_use]
    pub const fn new(user_presence: u8, counter: u32, signature: Vec<u8>) -> Self {
        Self {
            user_presence,
            counter,
            signature,
        }
    }

    /// Decodes a base64-encoded raw authentication response.
    ///
    /// # Arguments
    ///
    /// * `raw` - The standard-alphabet base64 blob returned by the authenticator
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] if:
    ///
    /// - `raw` is not valid base64
    /// - The decoded message is shorter than [`HEADER_LEN`] bytes
    pub fn decode(raw: &str) -> Result<Self> {
        let bytes = STANDARD.decode(raw)?;
        Self::from_vec(bytes)
    }

    /// Parses a response from its wire bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] if `bytes` is shorter than
    /// [`HEADER_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (user_presence, counter) = parse_header(bytes)?;

        Ok(Self::new(
            user_presence,
            counter,
            bytes[HEADER_LEN..].to_vec(),
        ))
    }

    /// Parses a response from an owned buffer, reusing its allocation for the
    /// signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] if `bytes` is shorter than
    /// [`HEADER_LEN`].
    pub fn from_vec(mut bytes: Vec<u8>) -> Result<Self> {
        let (user_presence, counter) = parse_header(&bytes)?;
        bytes.drain(..HEADER_LEN);

        debug!(
            user_presence,
            counter,
            signature_len = bytes.len(),
            "decoded authentication response"
        );

        Ok(Self::new(user_presence, counter, bytes))
    }

    /// Serializes the response back to its wire bytes.
    ///
    /// The output is `presence || counter (big-endian) || signature`, byte for
    /// byte what the authenticator sent.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.signature.len());
        bytes.push(self.user_presence);
        bytes.extend_from_slice(&self.counter.to_be_bytes());
        bytes.extend_from_slice(&self.signature);
        bytes
    }

    /// Encodes the wire bytes as standard base64.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Returns the raw presence byte.
    #[must_use]
    pub const fn user_presence(&self) -> u8 {
        self.user_presence
    }

    /// Returns `true` if bit 0 of the presence byte is set.
    ///
    /// This only inspects the presence bit. The stricter ceremony check lives
    /// in [`check_user_presence`](crate::verify::check_user_presence).
    #[must_use]
    pub const fn is_user_present(&self) -> bool {
        self.user_presence & USER_PRESENT != 0
    }

    /// Returns the signature counter.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Returns the raw signature bytes.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

/// Reads the presence byte and big-endian counter from the fixed header.
fn parse_header(bytes: &[u8]) -> Result<(u8, u32)> {
    let Some((&user_presence, rest)) = bytes.split_first() else {
        return Err(too_short(bytes.len()));
    };
    let counter: [u8; 4] = rest
        .get(..4)
        .and_then(|c| c.try_into().ok())
        .ok_or_else(|| too_short(bytes.len()))?;

    Ok((user_presence, u32::from_be_bytes(counter)))
}

fn too_short(len: usize) -> Error {
    Error::MalformedResponse(format!(
        "expected at least {HEADER_LEN} bytes, got {len}"
    ))
}

/// Decodes a base64-encoded raw authentication response.
///
/// Shorthand for [`AuthenticationResponse::decode`].
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] on invalid base64 or a truncated
/// message.
pub fn decode(raw: &str) -> Result<AuthenticationResponse> {
    AuthenticationResponse::decode(raw)
}

impl FromStr for AuthenticationResponse {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl fmt::Display for AuthenticationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}
