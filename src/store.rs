//! Read-only order store.
//!
//! The store is built once at startup and never mutated afterwards. It is
//! shared between request handlers behind an `Arc`.

use std::collections::BTreeMap;

use crate::config::ConfigError;
use crate::order::{Order, OrderId};

/// Immutable mapping from [`OrderId`] to [`Order`].
///
/// # Examples
///
/// ```
/// use order_guard::{Order, OrderId, OrderStore};
///
/// let store = OrderStore::from_orders(vec![
///     Order::new(1001, 1, "Laptop"),
///     Order::new(1002, 2, "Phone"),
/// ])
/// .expect("unique ids");
///
/// assert_eq!(store.get(OrderId(1002)).unwrap().description, "Phone");
/// assert!(store.get(OrderId(9999)).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: BTreeMap<OrderId, Order>,
}

impl OrderStore {
    /// Builds a store from a list of orders.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOrder`] if two orders share an id and
    /// [`ConfigError::InvalidOrderId`] for the id `0`.
    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for order in orders {
            if order.id.0 == 0 {
                return Err(ConfigError::InvalidOrderId);
            }
            let id = order.id;
            if map.insert(id, order).is_some() {
                return Err(ConfigError::DuplicateOrder(id));
            }
        }
        Ok(Self { orders: map })
    }

    /// Looks up an order by id.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Number of orders in the store.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if the store holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Iterates over all orders in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }
}
