use std::fmt;

/// A wrapper for untrusted request data that must be sanitized before use.
///
/// Every value that crosses the HTTP boundary (path segments, headers) is
/// wrapped in `Tainted<T>`. The inner value is only reachable from a
/// [`Sanitizer`](crate::Sanitizer), which validates it and returns a
/// [`Verified`](crate::Verified) value.
///
/// # Security Properties
///
/// - Does NOT implement `Deref` or any implicit conversion traits
/// - Inner value is inaccessible outside this crate
///
/// # Examples
///
/// ```
/// use order_guard::Tainted;
///
/// let raw_id = Tainted::new("1002 OR 1=1".to_string());
///
/// // Debug output shows it's tainted
/// println!("{:?}", raw_id);
///
/// // But you CANNOT use the value directly as a lookup key:
/// // store.get(raw_id); // Won't compile!
/// ```
#[derive(Clone)]
pub struct Tainted<T> {
    // Must remain private: external code goes through a Sanitizer.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value in `Tainted`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Extracts the inner value for sanitization.
    ///
    /// Only sanitizer implementations inside this crate may call this, and
    /// only before wrapping the validated result in `Verified<T>`.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

// Do NOT add Deref, AsRef, Borrow, From<T> or Into<T>: each one is a way
// around the sanitizer.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
