use crate::{
    capability::ReadCap,
    context::Ctx,
    error::Violation,
    policy::PolicyReq,
    request::RequestMeta,
};

/// The policy enforcement gate.
///
/// `PolicyGate` is the only way to construct a `Ctx<Authorized>`, and
/// therefore the only way to obtain the [`ReadCap`] needed to disclose an
/// order. It validates every requirement before granting anything.
///
/// # Examples
///
/// ```
/// use order_guard::{Authenticated, Order, Owner, PolicyGate, Principal, RequestMeta};
///
/// let order = Order::new(1001, 1, "Laptop");
/// let meta = RequestMeta {
///     request_id: "req-123".to_string(),
///     principal: Some(Principal::new(1, "Alice")),
/// };
///
/// let ctx = PolicyGate::new(meta)
///     .require(Authenticated)
///     .require(Owner::of(&order))
///     .build()
///     .expect("principal 1 owns order 1001");
///
/// assert!(ctx.read_cap(order.id).is_some());
/// ```
///
/// A principal that does not own the order is refused:
///
/// ```
/// use order_guard::{Order, Owner, PolicyGate, Principal, RequestMeta, ViolationKind};
///
/// let order = Order::new(1002, 2, "Phone");
/// let meta = RequestMeta {
///     request_id: "req-124".to_string(),
///     principal: Some(Principal::new(1, "Alice")),
/// };
///
/// let err = PolicyGate::new(meta).require(Owner::of(&order)).build().unwrap_err();
/// assert_eq!(err.kind, ViolationKind::Forbidden { action: "read" });
/// ```
pub struct PolicyGate {
    meta: RequestMeta,
    requirements: Vec<PolicyReq>,
}

impl PolicyGate {
    /// Action name reported when an ownership requirement fails.
    pub const READ_ACTION: &'static str = "read";

    /// Creates a new policy gate with the given request metadata.
    pub fn new(meta: RequestMeta) -> Self {
        Self {
            meta,
            requirements: Vec::new(),
        }
    }

    /// Adds a policy requirement, ignoring exact duplicates.
    pub fn require(mut self, policy: impl Into<PolicyReq>) -> Self {
        let req = policy.into();

        if !self.requirements.contains(&req) {
            self.requirements.push(req);
        }

        self
    }

    /// Validates the accumulated requirements and builds an authorized context.
    ///
    /// Every satisfied [`PolicyReq::Owner`] requirement grants a [`ReadCap`]
    /// for its order.
    ///
    /// # Errors
    ///
    /// Returns the `Violation` of the first requirement that fails.
    pub fn build(self) -> Result<Ctx<crate::state::Authorized>, Violation> {
        self.validate_all()?;

        let read_caps = self
            .requirements
            .iter()
            .filter_map(|req| match req {
                PolicyReq::Owner { order_id, .. } => Some(ReadCap::new(*order_id)),
                PolicyReq::Authenticated => None,
            })
            .collect();

        Ok(Ctx::new_authorized(
            self.meta.request_id,
            self.meta.principal,
            read_caps,
        ))
    }

    fn validate_all(&self) -> Result<(), Violation> {
        for req in &self.requirements {
            self.validate_one(req)?;
        }
        Ok(())
    }

    fn validate_one(&self, req: &PolicyReq) -> Result<(), Violation> {
        let principal = self
            .meta
            .principal
            .as_ref()
            .ok_or_else(|| Violation::unauthenticated("Authentication required"))?;

        match req {
            PolicyReq::Authenticated => Ok(()),
            PolicyReq::Owner { owner_id, .. } if *owner_id == principal.id => Ok(()),
            // The message names neither the order contents nor its real owner.
            PolicyReq::Owner { .. } => Err(Violation::forbidden(
                Self::READ_ACTION,
                "principal does not own the requested order",
            )),
        }
    }
}
