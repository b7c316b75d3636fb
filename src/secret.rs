use std::fmt;

use serde::{Deserialize, Deserializer};

/// A wrapper that prevents accidental exposure of sensitive values.
///
/// Bearer tokens, both the configured ones and the ones presented by clients,
/// are held as `Secret<String>`. Debug and Display always print `[REDACTED]`.
///
/// # Security Properties
///
/// - Does NOT implement `Deref`, `AsRef`, `Borrow`, `Clone`, `Copy` or `Serialize`
/// - No type information is leaked in formatted output
/// - Access requires the explicit [`expose_secret`](Self::expose_secret) call
///
/// # Examples
///
/// ```
/// use order_guard::Secret;
///
/// let token = Secret::new("alice-token".to_string());
///
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.expose_secret(), "alice-token");
/// ```
// Do NOT add Clone, Copy, Default or Serialize.
pub struct Secret<T> {
    // Must remain private.
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value in a `Secret`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// Never log or display the returned reference.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Secret::new)
    }
}
