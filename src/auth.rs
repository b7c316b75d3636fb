//! Principal resolution.
//!
//! The access service does not know how callers prove who they are. It asks a
//! [`ResolvePrincipal`] implementation and treats any failure as
//! `Unauthenticated`.

use crate::config::PrincipalEntry;
use crate::error::Violation;
use crate::request::Principal;
use crate::sanitizer::{BearerTokenSanitizer, Sanitizer};
use crate::web::RequestAdapter;
use crate::Secret;

/// Resolves the principal behind a request.
///
/// Implementations see only the framework-agnostic [`RequestAdapter`], and
/// must treat everything in it as tainted.
///
/// # Examples
///
/// ```
/// use order_guard::auth::ResolvePrincipal;
/// use order_guard::web::RequestAdapter;
/// use order_guard::{Principal, Violation};
///
/// // Resolves every request to the same principal.
/// struct Fixed(Principal);
///
/// impl ResolvePrincipal for Fixed {
///     fn resolve(&self, _adapter: &RequestAdapter) -> Result<Principal, Violation> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let resolver = Fixed(Principal::new(1, "Alice"));
/// let adapter = RequestAdapter::new("req-1".to_string());
/// assert_eq!(resolver.resolve(&adapter).unwrap().id.0, 1);
/// ```
pub trait ResolvePrincipal: Send + Sync {
    /// Returns the principal for this request.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthenticated` violation when no principal can be
    /// established.
    fn resolve(&self, adapter: &RequestAdapter) -> Result<Principal, Violation>;
}

/// Resolves `Authorization: Bearer <token>` against a static token table.
///
/// # Examples
///
/// ```
/// use order_guard::auth::{ResolvePrincipal, TokenResolver};
/// use order_guard::web::RequestAdapter;
/// use order_guard::{Principal, Secret};
///
/// let resolver = TokenResolver::new(vec![(
///     Secret::new("alice-token".to_string()),
///     Principal::new(1, "Alice"),
/// )]);
///
/// let mut adapter = RequestAdapter::new("req-1".to_string());
/// adapter.add_header("Authorization".to_string(), "Bearer alice-token".to_string());
///
/// assert_eq!(resolver.resolve(&adapter).unwrap(), Principal::new(1, "Alice"));
/// ```
#[derive(Debug)]
pub struct TokenResolver {
    tokens: Vec<(Secret<String>, Principal)>,
    sanitizer: BearerTokenSanitizer,
}

impl TokenResolver {
    /// Header carrying the bearer token.
    pub const HEADER: &'static str = "authorization";

    /// Creates a resolver from `(token, principal)` pairs.
    pub fn new(tokens: Vec<(Secret<String>, Principal)>) -> Self {
        Self {
            tokens,
            sanitizer: BearerTokenSanitizer::default(),
        }
    }

    /// Creates a resolver from configured principals.
    pub fn from_entries(entries: impl IntoIterator<Item = PrincipalEntry>) -> Self {
        Self::new(
            entries
                .into_iter()
                .map(|entry| {
                    let principal = Principal {
                        id: entry.id,
                        name: entry.name,
                    };
                    (entry.token, principal)
                })
                .collect(),
        )
    }

    /// Number of known tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens are configured.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl ResolvePrincipal for TokenResolver {
    fn resolve(&self, adapter: &RequestAdapter) -> Result<Principal, Violation> {
        let header = adapter
            .extract_tainted_inputs()
            .header(Self::HEADER)
            .ok_or_else(|| Violation::unauthenticated("missing Authorization header"))?;

        let presented = self
            .sanitizer
            .sanitize(header)
            .map_err(|e| Violation::unauthenticated(format!("invalid Authorization header: {}", e)))?
            .into_inner();

        self.tokens
            .iter()
            .find(|(token, _)| token.expose_secret() == presented.expose_secret())
            .map(|(_, principal)| principal.clone())
            .ok_or_else(|| Violation::unauthenticated("unknown bearer token"))
    }
}
