use crate::order::{Order, OrderId};
use crate::request::PrincipalId;

/// A policy requirement that must be satisfied.
///
/// Policies are evaluated during `PolicyGate::build()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyReq {
    /// Requires an authenticated principal
    Authenticated,
    /// Requires the principal to own a specific order
    Owner {
        /// The order being read
        order_id: OrderId,
        /// The principal that owns it
        owner_id: PrincipalId,
    },
}

/// Policy requiring authentication.
///
/// Use this to require that a principal is present in the request metadata.
pub struct Authenticated;

/// Policy requiring that the requesting principal owns an order.
///
/// Satisfying it grants a [`ReadCap`](crate::ReadCap) for that order.
pub struct Owner {
    order_id: OrderId,
    owner_id: PrincipalId,
}

impl Owner {
    /// Creates an ownership requirement for `order`.
    pub fn of(order: &Order) -> Self {
        Self {
            order_id: order.id,
            owner_id: order.owner_id,
        }
    }
}

impl From<Authenticated> for PolicyReq {
    fn from(_: Authenticated) -> Self {
        PolicyReq::Authenticated
    }
}

impl From<Owner> for PolicyReq {
    fn from(owner: Owner) -> Self {
        PolicyReq::Owner {
            order_id: owner.order_id,
            owner_id: owner.owner_id,
        }
    }
}
