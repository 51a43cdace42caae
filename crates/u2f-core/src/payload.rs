//! Reconstruction of the byte string an authenticator signs.
//!
//! The authenticator signs a fixed concatenation of the application
//! parameter, the presence byte, the counter and the challenge parameter:
//!
//! ```text
//! | appIdHash | presence | counter (BE) | challengeHash |
//! |-----------|----------|--------------|---------------|
//! | 32B       | 1B       | 4B           | 32B           |
//! ```
//!
//! Any deviation from this layout makes every signature fail, so the counter
//! is always written with [`u32::to_be_bytes`].

/// Length of a SHA-256 digest.
pub const HASH_LEN: usize = 32;

/// Length of the signed payload.
pub const SIGNED_PAYLOAD_LEN: usize = HASH_LEN + 1 + 4 + HASH_LEN;

/// Builds the exact message signed by a U2F authenticator.
///
/// # Arguments
///
/// * `app_id_hash` - SHA-256 of the application identifier
/// * `user_presence` - The presence byte from the response
/// * `counter` - The signature counter from the response
/// * `challenge_hash` - SHA-256 of the client data
///
/// # Example
///
/// ```
/// use yubikey_u2f_core::payload::build_signed_payload;
///
/// let payload = build_signed_payload(&[0xAA; 32], 0x01, 1, &[0xBB; 32]);
///
/// assert_eq!(payload.len(), 69);
/// assert_eq!(&payload[32..37], &[0x01, 0x00, 0x00, 0x00, 0x01]);
/// ```
#[must_use]
pub fn build_signed_payload(
    app_id_hash: &[u8; HASH_LEN],
    user_presence: u8,
    counter: u32,
    challenge_hash: &[u8; HASH_LEN],
) -> [u8; SIGNED_PAYLOAD_LEN] {
    let mut payload = [0u8; SIGNED_PAYLOAD_LEN];
    payload[0..32].copy_from_slice(app_id_hash);
    payload[32] = user_presence;
    payload[33..37].copy_from_slice(&counter.to_be_bytes());
    payload[37..69].copy_from_slice(challenge_hash);
    payload
}
