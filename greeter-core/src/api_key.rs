//! API key verification for protected routes.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Request header carrying the client's API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// A configured API key secret.
///
/// Only the SHA-256 digest is retained. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    digest: [u8; 32],
}

impl ApiKey {
    /// Wraps a configured secret.
    pub fn new(secret: impl AsRef<str>) -> Self {
        Self { digest: sha256(secret.as_ref()) }
    }

    /// Returns `true` if `presented` matches this key.
    ///
    /// Digests of both sides are compared in constant time, so the running
    /// time does not depend on where the keys first differ.
    #[must_use]
    pub fn matches(&self, presented: &str) -> bool {
        constant_time_eq(&sha256(presented), &self.digest)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Checks a presented key against the configured one.
///
/// An empty header value counts as missing. When no key is configured every
/// presented key is rejected.
///
/// # Errors
/// Returns [`CoreError::ApiKeyMissing`] or [`CoreError::ApiKeyInvalid`].
pub fn verify_api_key(expected: Option<&ApiKey>, presented: Option<&str>) -> Result<(), CoreError> {
    let presented = match presented {
        Some(key) if !key.is_empty() => key,
        _ => return Err(CoreError::ApiKeyMissing),
    };
    match expected {
        Some(key) if key.matches(presented) => Ok(()),
        _ => Err(CoreError::ApiKeyInvalid),
    }
}

fn sha256(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
