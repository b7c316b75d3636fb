//! Builds request contexts from a [`RequestAdapter`].
//!
//! These extractors never grant read access. They produce `Ctx<Unauthed>` or
//! `Ctx<Authed>`; read access is granted per order by the
//! [`PolicyGate`](crate::PolicyGate) inside the order service.
//!
//! ```text
//! HTTP request
//!   -> RequestAdapter
//!   -> extract_authed(adapter, resolver)
//!   -> (Ctx<Authed>, TaintedInputs)
//!   -> OrderService::get_order_by_token
//! ```

use crate::auth::ResolvePrincipal;
use crate::context::Ctx;
use crate::error::Violation;
use crate::state::{Authed, Unauthed};

use super::{RequestAdapter, TaintedInputs};

/// An unauthenticated context paired with the request's tainted inputs.
#[derive(Debug)]
pub struct UnauthenticatedExtraction {
    /// The unauthenticated context (no principal)
    pub context: Ctx<Unauthed>,
    /// All untrusted inputs from the request
    pub inputs: TaintedInputs,
}

/// An authenticated context paired with the request's tainted inputs.
#[derive(Debug)]
pub struct AuthenticatedExtraction {
    /// The authenticated context (has principal)
    pub context: Ctx<Authed>,
    /// All untrusted inputs from the request
    pub inputs: TaintedInputs,
}

/// Extracts an unauthenticated context, for endpoints that need no principal.
///
/// # Examples
///
/// ```
/// use order_guard::web::{extract_unauthed, RequestAdapter};
///
/// let adapter = RequestAdapter::new("req-public".to_string());
/// let extraction = extract_unauthed(&adapter);
///
/// assert_eq!(extraction.context.request_id(), "req-public");
/// assert!(extraction.context.principal().is_none());
/// ```
pub fn extract_unauthed(adapter: &RequestAdapter) -> UnauthenticatedExtraction {
    UnauthenticatedExtraction {
        context: Ctx::new(adapter.request_id()),
        inputs: adapter.extract_tainted_inputs(),
    }
}

/// Resolves the principal and extracts an authenticated context.
///
/// # Errors
///
/// Returns the resolver's `Unauthenticated` violation; the caller should
/// answer 401.
///
/// # Examples
///
/// ```
/// use order_guard::auth::TokenResolver;
/// use order_guard::web::{extract_authed, RequestAdapter};
/// use order_guard::{Principal, Secret};
///
/// let resolver = TokenResolver::new(vec![(
///     Secret::new("alice-token".to_string()),
///     Principal::new(1, "Alice"),
/// )]);
///
/// let mut adapter = RequestAdapter::new("req-auth".to_string());
/// adapter.add_header("authorization".to_string(), "Bearer alice-token".to_string());
///
/// let extraction = extract_authed(&adapter, &resolver).expect("token is known");
/// assert_eq!(extraction.context.principal().unwrap().name, "Alice");
///
/// let anonymous = RequestAdapter::new("req-anon".to_string());
/// assert!(extract_authed(&anonymous, &resolver).is_err());
/// ```
pub fn extract_authed(
    adapter: &RequestAdapter,
    resolver: &dyn ResolvePrincipal,
) -> Result<AuthenticatedExtraction, Violation> {
    let principal = resolver.resolve(adapter)?;
    let context = Ctx::new(adapter.request_id()).authenticate(Some(principal))?;

    Ok(AuthenticatedExtraction {
        context,
        inputs: adapter.extract_tainted_inputs(),
    })
}
