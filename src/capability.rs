use crate::order::OrderId;

/// Capability granting permission to read one specific order.
///
/// A `ReadCap` is proof that the ownership policy was checked for the order it
/// names. It cannot be constructed outside this crate, so the only way to get
/// one is through [`PolicyGate`](crate::PolicyGate).
///
/// ```compile_fail
/// # use order_guard::{OrderId, ReadCap};
/// // This does not compile - ReadCap has private fields:
/// let cap = ReadCap { order_id: OrderId(1002), _private: () };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCap {
    order_id: OrderId,
    // Private field prevents construction outside the crate
    _private: (),
}

impl ReadCap {
    /// Creates a new ReadCap for `order_id`.
    ///
    /// Only the policy gate calls this, after the ownership check passed.
    pub(crate) fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            _private: (),
        }
    }

    /// The order this capability unlocks.
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Returns true if this capability covers `order_id`.
    pub fn covers(&self, order_id: OrderId) -> bool {
        self.order_id == order_id
    }
}
