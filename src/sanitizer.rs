use std::fmt;

use crate::order::OrderId;
use crate::{Secret, Tainted, Verified};

/// Error returned when sanitization fails.
///
/// The error never echoes the rejected input.
///
/// # Examples
///
/// ```
/// use order_guard::{SanitizationError, SanitizationErrorKind};
///
/// let error = SanitizationError::new(SanitizationErrorKind::MalformedInput, "not a number");
/// assert_eq!(error.kind(), SanitizationErrorKind::MalformedInput);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationError {
    kind: SanitizationErrorKind,
    message: String,
}

impl SanitizationError {
    /// Creates a new sanitization error.
    pub fn new(kind: SanitizationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SanitizationErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SanitizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sanitization failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for SanitizationError {}

/// Kind of sanitization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizationErrorKind {
    /// Input format is malformed.
    MalformedInput,
    /// Input is empty.
    Empty,
    /// Input exceeds maximum allowed length.
    TooLong,
    /// Input contains control, whitespace or non-printable characters.
    ContainsControlChars,
    /// Input is well formed but outside the accepted range.
    OutOfRange,
}

impl fmt::Display for SanitizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput => write!(f, "malformed input"),
            Self::Empty => write!(f, "empty input"),
            Self::TooLong => write!(f, "input too long"),
            Self::ContainsControlChars => write!(f, "contains control characters"),
            Self::OutOfRange => write!(f, "out of range"),
        }
    }
}

/// Converts tainted request values into verified values.
///
/// # Invariants
///
/// Implementations MUST:
/// - Validate the input according to their rules
/// - Only call `Verified::new_unchecked` after validation succeeds
/// - Not leak the rejected input in errors
pub trait Sanitizer<T> {
    /// Type produced on success.
    type Output;

    /// Sanitizes a tainted value, returning a verified value on success.
    ///
    /// # Errors
    ///
    /// Returns `SanitizationError` if the input fails validation.
    fn sanitize(&self, input: Tainted<T>) -> Result<Verified<Self::Output>, SanitizationError>;
}

/// Parses an order identifier taken from a request path.
///
/// Accepts only canonical decimal numbers: ASCII digits, no sign, no leading
/// zero, no surrounding whitespace, non-zero and within `u64`.
///
/// # Examples
///
/// ```
/// use order_guard::{OrderId, OrderIdSanitizer, Sanitizer, Tainted};
///
/// let sanitizer = OrderIdSanitizer::new();
///
/// let verified = sanitizer.sanitize(Tainted::new("1002".to_string())).unwrap();
/// assert_eq!(verified.into_inner(), OrderId(1002));
///
/// assert!(sanitizer.sanitize(Tainted::new("1002abc".to_string())).is_err());
/// assert!(sanitizer.sanitize(Tainted::new("0".to_string())).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderIdSanitizer {
    _private: (),
}

impl OrderIdSanitizer {
    /// Longest accepted input, the number of digits in `u64::MAX`.
    pub const MAX_LEN: usize = 20;

    /// Creates an order id sanitizer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Sanitizer<String> for OrderIdSanitizer {
    type Output = OrderId;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<OrderId>, SanitizationError> {
        let raw = input.into_inner();

        if raw.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "order id is empty",
            ));
        }

        if raw.len() > Self::MAX_LEN {
            return Err(SanitizationError::new(
                SanitizationErrorKind::TooLong,
                format!("order id exceeds {} characters", Self::MAX_LEN),
            ));
        }

        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "order id must be decimal digits",
            ));
        }

        if raw.starts_with('0') {
            return Err(SanitizationError::new(
                SanitizationErrorKind::OutOfRange,
                "order id must be a positive number without leading zeros",
            ));
        }

        let value: u64 = raw.parse().map_err(|_| {
            SanitizationError::new(
                SanitizationErrorKind::OutOfRange,
                "order id does not fit in 64 bits",
            )
        })?;

        Ok(Verified::new_unchecked(OrderId(value)))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// The verified token stays wrapped in [`Secret`] so it never reaches logs.
///
/// # Examples
///
/// ```
/// use order_guard::{BearerTokenSanitizer, Sanitizer, Tainted};
///
/// let sanitizer = BearerTokenSanitizer::new(256);
/// let token = sanitizer
///     .sanitize(Tainted::new("Bearer alice-token".to_string()))
///     .unwrap()
///     .into_inner();
///
/// assert_eq!(token.expose_secret(), "alice-token");
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BearerTokenSanitizer {
    max_len: usize,
}

impl BearerTokenSanitizer {
    const SCHEME: &'static str = "Bearer ";

    /// Creates a sanitizer accepting tokens of at most `max_len` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `max_len` is 0.
    pub fn new(max_len: usize) -> Self {
        assert!(max_len > 0, "max_len must be greater than 0");
        Self { max_len }
    }
}

impl Default for BearerTokenSanitizer {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Sanitizer<String> for BearerTokenSanitizer {
    type Output = Secret<String>;

    fn sanitize(
        &self,
        input: Tainted<String>,
    ) -> Result<Verified<Secret<String>>, SanitizationError> {
        let raw = input.into_inner();

        // Auth schemes are case-insensitive.
        let token = raw
            .get(..Self::SCHEME.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(Self::SCHEME))
            .and_then(|_| raw.get(Self::SCHEME.len()..))
            .ok_or_else(|| {
                SanitizationError::new(
                    SanitizationErrorKind::MalformedInput,
                    "authorization scheme must be Bearer",
                )
            })?;

        if token.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "bearer token is empty",
            ));
        }

        if token.len() > self.max_len {
            return Err(SanitizationError::new(
                SanitizationErrorKind::TooLong,
                format!("bearer token exceeds {} bytes", self.max_len),
            ));
        }

        if token.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::ContainsControlChars,
                "bearer token contains whitespace or control characters",
            ));
        }

        Ok(Verified::new_unchecked(Secret::new(token.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_id(raw: &str) -> Result<OrderId, SanitizationErrorKind> {
        OrderIdSanitizer::new()
            .sanitize(Tainted::new(raw.to_string()))
            .map(Verified::into_inner)
            .map_err(|e| e.kind())
    }

    fn token(raw: &str) -> Result<String, SanitizationErrorKind> {
        BearerTokenSanitizer::default()
            .sanitize(Tainted::new(raw.to_string()))
            .map(|v| v.into_inner().expose_secret().clone())
            .map_err(|e| e.kind())
    }

    #[test]
    fn sanitization_error_display() {
        let error = SanitizationError::new(SanitizationErrorKind::TooLong, "too many digits");
        assert_eq!(
            error.to_string(),
            "sanitization failed (input too long): too many digits"
        );
    }

    #[test]
    fn order_id_accepts_canonical_numbers() {
        assert_eq!(order_id("1001"), Ok(OrderId(1001)));
        assert_eq!(order_id("1"), Ok(OrderId(1)));
        assert_eq!(order_id("18446744073709551615"), Ok(OrderId(u64::MAX)));
    }

    #[test]
    fn order_id_rejects_malformed_input() {
        assert_eq!(order_id(""), Err(SanitizationErrorKind::Empty));
        assert_eq!(order_id("abc"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(order_id("-1"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(order_id("+1001"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(order_id(" 1001"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(order_id("1001\n"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(order_id("10.5"), Err(SanitizationErrorKind::MalformedInput));
    }

    #[test]
    fn order_id_rejects_zero_and_leading_zeros() {
        assert_eq!(order_id("0"), Err(SanitizationErrorKind::OutOfRange));
        assert_eq!(order_id("01001"), Err(SanitizationErrorKind::OutOfRange));
    }

    #[test]
    fn order_id_rejects_overflow() {
        assert_eq!(
            order_id("18446744073709551616"),
            Err(SanitizationErrorKind::OutOfRange)
        );
        assert_eq!(
            order_id("123456789012345678901"),
            Err(SanitizationErrorKind::TooLong)
        );
    }

    #[test]
    fn order_id_error_does_not_echo_input() {
        let err = OrderIdSanitizer::new()
            .sanitize(Tainted::new("<script>".to_string()))
            .unwrap_err();
        assert!(!err.to_string().contains("<script>"));
    }

    #[test]
    fn bearer_token_extracts_token() {
        assert_eq!(token("Bearer abc-123"), Ok("abc-123".to_string()));
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(token("bearer abc-123"), Ok("abc-123".to_string()));
        assert_eq!(token("BEARER abc-123"), Ok("abc-123".to_string()));
        assert_eq!(token("bEaReR abc-123"), Ok("abc-123".to_string()));
        assert_eq!(token("Bearé abc"), Err(SanitizationErrorKind::MalformedInput));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        assert_eq!(
            token("Basic YWxpY2U6cHc="),
            Err(SanitizationErrorKind::MalformedInput)
        );
        assert_eq!(token("abc-123"), Err(SanitizationErrorKind::MalformedInput));
    }

    #[test]
    fn bearer_token_rejects_empty_and_whitespace() {
        assert_eq!(token("Bearer "), Err(SanitizationErrorKind::Empty));
        assert_eq!(
            token("Bearer a b"),
            Err(SanitizationErrorKind::ContainsControlChars)
        );
        assert_eq!(
            token("Bearer a\0b"),
            Err(SanitizationErrorKind::ContainsControlChars)
        );
    }

    #[test]
    fn bearer_token_enforces_length() {
        let sanitizer = BearerTokenSanitizer::new(4);
        let result = sanitizer.sanitize(Tainted::new("Bearer 12345".to_string()));
        assert_eq!(result.unwrap_err().kind(), SanitizationErrorKind::TooLong);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Every positive u64 round-trips through its decimal form.
            #[test]
            fn proptest_positive_ids_are_accepted(id in 1u64..=u64::MAX) {
                prop_assert_eq!(order_id(&id.to_string()), Ok(OrderId(id)));
            }

            /// Anything containing a non-digit is rejected.
            #[test]
            fn proptest_non_digit_input_is_rejected(
                prefix in "[1-9][0-9]{0,5}",
                junk in "[^0-9]",
            ) {
                let raw = format!("{}{}", prefix, junk);
                prop_assert!(order_id(&raw).is_err());
            }
        }
    }
}
