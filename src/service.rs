//! The order access service.
//!
//! `OrderService::get_order` is the only read path. It looks the order up,
//! runs the ownership gate, and discloses the record only through the
//! resulting capability. Every read is audited.

use std::sync::Arc;

use crate::audit::{AuditEvent, AuditTrail};
use crate::context::Ctx;
use crate::error::{Error, Violation};
use crate::gate::PolicyGate;
use crate::order::{Order, OrderId};
use crate::policy::{Authenticated, Owner};
use crate::sanitizer::{OrderIdSanitizer, Sanitizer};
use crate::state::Authed;
use crate::store::OrderStore;
use crate::Tainted;

/// Serves orders to their owners.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use order_guard::audit::AuditTrail;
/// use order_guard::{Ctx, Error, Order, OrderId, OrderService, OrderStore, Principal, ViolationKind};
///
/// let store = OrderStore::from_orders(vec![
///     Order::new(1001, 1, "Laptop"),
///     Order::new(1002, 2, "Phone"),
/// ])
/// .unwrap();
/// let service = OrderService::new(Arc::new(store), Arc::new(AuditTrail::new()));
///
/// let alice = Ctx::new("req-1").authenticate(Some(Principal::new(1, "Alice"))).unwrap();
///
/// assert_eq!(service.get_order(&alice, OrderId(1001)).unwrap().description, "Laptop");
///
/// let err = service.get_order(&alice, OrderId(1002)).unwrap_err();
/// assert_eq!(err.violation_kind(), Some(&ViolationKind::Forbidden { action: "read" }));
///
/// assert!(matches!(service.get_order(&alice, OrderId(9999)), Err(Error::NotFound)));
/// ```
#[derive(Debug, Clone)]
pub struct OrderService {
    store: Arc<OrderStore>,
    audit: Arc<AuditTrail>,
}

impl OrderService {
    /// Creates a service over a read-only store.
    pub fn new(store: Arc<OrderStore>, audit: Arc<AuditTrail>) -> Self {
        Self { store, audit }
    }

    /// The underlying store.
    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// The audit trail every read is recorded to.
    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    /// Returns the order `order_id` if the context's principal owns it.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no such order exists
    /// - `Forbidden` violation if the principal is not the owner
    /// - `Unauthenticated` violation if the context carries no principal
    pub fn get_order(&self, ctx: &Ctx<Authed>, order_id: OrderId) -> Result<Order, Error> {
        let result = self.read(ctx, order_id);

        self.audit.record(AuditEvent::for_read(
            ctx.request_id(),
            ctx.principal().map(|p| p.id.to_string()),
            order_id.to_string(),
            result.as_ref().map(|_| ()),
        ));

        result
    }

    /// Like [`get_order`](Self::get_order), for an identifier taken straight
    /// from a request path.
    ///
    /// Identifiers that fail [`OrderIdSanitizer`] cannot match any order and
    /// yield [`Error::NotFound`].
    pub fn get_order_by_token(
        &self,
        ctx: &Ctx<Authed>,
        raw_id: Tainted<String>,
    ) -> Result<Order, Error> {
        match OrderIdSanitizer::new().sanitize(raw_id) {
            Ok(order_id) => self.get_order(ctx, order_id.into_inner()),
            Err(e) => {
                ctx.log().debug(format_args!("rejected order id: {}", e));
                let err = Error::NotFound;
                self.audit.record(AuditEvent::for_read(
                    ctx.request_id(),
                    ctx.principal().map(|p| p.id.to_string()),
                    "<malformed>",
                    Err(&err),
                ));
                Err(err)
            }
        }
    }

    fn read(&self, ctx: &Ctx<Authed>, order_id: OrderId) -> Result<Order, Error> {
        let log = ctx.log();
        let principal = ctx
            .principal()
            .ok_or_else(|| Violation::unauthenticated("no principal on authenticated context"))?;

        let Some(order) = self.store.get(order_id) else {
            log.info(format_args!("order {} not found", order_id));
            return Err(Error::NotFound);
        };

        let authorized = PolicyGate::new(ctx.meta())
            .require(Authenticated)
            .require(Owner::of(order))
            .build()
            .inspect_err(|v| {
                log.warn(format_args!(
                    "principal {} refused order {}: {}",
                    principal.id, order_id, v
                ));
            })?;

        let order = authorized.disclose(order)?;
        log.info(format_args!(
            "order {} disclosed to principal {}",
            order_id, principal.id
        ));

        Ok(order.clone())
    }
}
