//! Order records served by the access service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request::PrincipalId;

/// Stable identifier of an order. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single order.
///
/// Serializes to the response body shape `{"id", "ownerId", "description"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier
    pub id: OrderId,
    /// Principal that owns the order
    pub owner_id: PrincipalId,
    /// Opaque payload
    pub description: String,
}

impl Order {
    /// Creates an order.
    pub fn new(id: u64, owner_id: u64, description: impl Into<String>) -> Self {
        Self {
            id: OrderId(id),
            owner_id: PrincipalId(owner_id),
            description: description.into(),
        }
    }

    /// Returns true if `principal` owns this order.
    pub fn is_owned_by(&self, principal: PrincipalId) -> bool {
        self.owner_id == principal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_serializes_with_owner_id_in_camel_case() {
        let order = Order::new(1001, 1, "Laptop");
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 1001, "ownerId": 1, "description": "Laptop"})
        );
    }

    #[test]
    fn ownership_compares_principal_ids() {
        let order = Order::new(1002, 2, "Phone");
        assert!(order.is_owned_by(PrincipalId(2)));
        assert!(!order.is_owned_by(PrincipalId(1)));
    }
}
