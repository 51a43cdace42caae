//! Acceptance policy for authentication ceremonies.
//!
//! # Example
//!
//! ```
//! use yubikey_u2f_core::Policy;
//!
//! let policy = Policy::from_json(r#"{"require_counter_increase": false}"#).unwrap();
//! assert!(policy.require_user_presence);
//! assert!(!policy.require_counter_increase);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which checks [`U2fVerifier::authenticate`](crate::U2fVerifier::authenticate)
/// runs beyond signature verification.
///
/// Signature verification itself is never optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Reject responses whose presence byte is not exactly `0x01`.
    pub require_user_presence: bool,

    /// Reject responses whose counter does not exceed the last accepted one.
    pub require_counter_increase: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self::STRICT
    }
}

impl Policy {
    /// All checks enabled.
    pub const STRICT: Self = Self {
        require_user_presence: true,
        require_counter_increase: true,
    };

    /// Parses a policy from JSON. Missing fields take their strict default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPolicy`](crate::Error::InvalidPolicy) on
    /// malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
