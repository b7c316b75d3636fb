/// A value that has passed through a [`Sanitizer`](crate::Sanitizer).
///
/// `Verified<T>` is compile-time proof that an untrusted request value was
/// validated. Lookups in the order store take `OrderId`s that came out of a
/// `Verified<OrderId>`, never a raw path segment.
///
/// # Construction Invariants
///
/// There is no public constructor and no `From<T>` implementation. Only
/// sanitizers inside this crate create `Verified<T>` values, after validation.
///
/// ```compile_fail
/// use order_guard::{OrderId, Verified};
///
/// // This will not compile - no public constructor:
/// let verified = Verified::new(OrderId(1002));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Creates a `Verified<T>` without performing validation.
    ///
    /// Callers must have validated `value` already. Restricted to this crate
    /// so that every `Verified<T>` originates from a sanitizer.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the `Verified<T>` and returns the inner value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
