use std::marker::PhantomData;

use crate::capability::ReadCap;
use crate::error::Violation;
use crate::logging::PolicyLog;
use crate::order::{Order, OrderId};
use crate::request::{Principal, RequestMeta};
use crate::state::{Authed, Authorized, Unauthed};

/// Per-request execution context.
///
/// `Ctx<S>` is generic over its authentication/authorization state:
/// - `Ctx<Unauthed>`: request id only
/// - `Ctx<Authed>`: request id and a resolved principal
/// - `Ctx<Authorized>`: principal plus the read capabilities granted by the
///   ownership gate
///
/// # Type-State Progression
///
/// ```text
/// Ctx<Unauthed> --authenticate--> Ctx<Authed> --PolicyGate--> Ctx<Authorized>
/// ```
///
/// Only `Ctx<Authorized>` can disclose an order, and only for orders it holds
/// a [`ReadCap`] for.
///
/// # Examples
///
/// ```
/// use order_guard::{Ctx, Principal};
///
/// let ctx = Ctx::new("req-1")
///     .authenticate(Some(Principal::new(1, "Alice")))
///     .expect("principal present");
///
/// assert_eq!(ctx.principal().unwrap().id.0, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Ctx<S = Authorized> {
    request_id: String,
    principal: Option<Principal>,
    read_caps: Vec<ReadCap>,
    _state: PhantomData<S>,
}

// ============================================================================
// Shared methods (available on all states)
// ============================================================================

impl<S> Ctx<S> {
    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal if present.
    ///
    /// `Some` for `Ctx<Authed>` and for `Ctx<Authorized>` built by a gate that
    /// saw a principal, `None` for `Ctx<Unauthed>`.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns a logger that tags every line with this request's id.
    pub fn log(&self) -> PolicyLog<'_> {
        PolicyLog::new(&self.request_id)
    }
}

// ============================================================================
// Ctx<Unauthed> - Initial state
// ============================================================================

impl Ctx<Unauthed> {
    /// Creates a new unauthenticated context with only a request ID.
    ///
    /// An unauthenticated context grants nothing, so it may be built anywhere.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            principal: None,
            read_caps: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Authenticates the context with the principal produced by a resolver.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthenticated` violation if the principal is `None`.
    pub fn authenticate(self, principal: Option<Principal>) -> Result<Ctx<Authed>, Violation> {
        let principal = principal.ok_or_else(|| {
            Violation::unauthenticated("Authentication required: principal not provided")
        })?;

        Ok(Ctx {
            request_id: self.request_id,
            principal: Some(principal),
            read_caps: Vec::new(),
            _state: PhantomData,
        })
    }
}

// ============================================================================
// Ctx<Authed> - Principal known, nothing granted
// ============================================================================

impl Ctx<Authed> {
    /// Returns request metadata suitable for a [`PolicyGate`](crate::PolicyGate).
    pub fn meta(&self) -> RequestMeta {
        RequestMeta {
            request_id: self.request_id.clone(),
            principal: self.principal.clone(),
        }
    }
}

// ============================================================================
// Ctx<Authorized> - Passed the ownership gate
// ============================================================================

impl Ctx<Authorized> {
    /// Creates an authorized context. Only the policy gate calls this.
    pub(crate) fn new_authorized(
        request_id: String,
        principal: Option<Principal>,
        read_caps: Vec<ReadCap>,
    ) -> Self {
        Self {
            request_id,
            principal,
            read_caps,
            _state: PhantomData,
        }
    }

    /// Returns the read capability for `order_id`, if one was granted.
    pub fn read_cap(&self, order_id: OrderId) -> Option<ReadCap> {
        self.read_caps
            .iter()
            .copied()
            .find(|cap| cap.covers(order_id))
    }

    /// Releases `order` if this context holds a read capability for it.
    ///
    /// This is the single point where an order leaves the access layer.
    ///
    /// # Errors
    ///
    /// Returns a `Forbidden` violation if no capability covers `order.id`.
    pub fn disclose<'o>(&self, order: &'o Order) -> Result<&'o Order, Violation> {
        match self.read_cap(order.id) {
            Some(_) => Ok(order),
            None => Err(Violation::forbidden(
                crate::PolicyGate::READ_ACTION,
                "no read capability for the requested order",
            )),
        }
    }
}
