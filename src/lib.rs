//! Order lookup service that refuses to disclose a record to anyone but its
//! owner.
//!
//! A direct lookup by identifier is only half of a read. The other half is
//! checking that the caller may see *that* record. This crate makes the check
//! impossible to skip:
//! - **Taint tracking**: the order id from the path is a [`Tainted<String>`]
//!   until [`OrderIdSanitizer`] turns it into a [`Verified<OrderId>`]
//! - **Type-state contexts**: [`OrderService::get_order`] takes a
//!   `Ctx<Authed>`, so there is no read without a principal
//! - **Capabilities**: an order only leaves the access layer through
//!   `Ctx<Authorized>::disclose`, which needs a [`ReadCap`] for that exact
//!   order, and only the [`PolicyGate`] mints one
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use order_guard::audit::AuditTrail;
//! use order_guard::{Ctx, Order, OrderId, OrderService, OrderStore, Principal};
//!
//! let store = OrderStore::from_orders(vec![
//!     Order::new(1001, 1, "Laptop"),
//!     Order::new(1002, 2, "Phone"),
//! ])
//! .unwrap();
//! let service = OrderService::new(Arc::new(store), Arc::new(AuditTrail::new()));
//!
//! let alice = Ctx::new("req-1")
//!     .authenticate(Some(Principal::new(1, "Alice")))
//!     .unwrap();
//!
//! assert!(service.get_order(&alice, OrderId(1001)).is_ok());
//! assert!(service.get_order(&alice, OrderId(1002)).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
pub mod auth;
mod capability;
pub mod config;
mod context;
mod error;
mod gate;
pub mod logging;
mod order;
mod policy;
mod request;
mod sanitizer;
mod secret;
mod service;
mod state;
mod store;
mod tainted;
mod verified;
pub mod web;

pub use capability::ReadCap;
pub use config::{Config, ConfigError};
pub use context::Ctx;
pub use error::{Error, Violation, ViolationKind};
pub use gate::PolicyGate;
pub use logging::PolicyLog;
pub use order::{Order, OrderId};
pub use policy::{Authenticated, Owner, PolicyReq};
pub use request::{Principal, PrincipalId, RequestMeta};
pub use sanitizer::{
    BearerTokenSanitizer, OrderIdSanitizer, SanitizationError, SanitizationErrorKind, Sanitizer,
};
pub use secret::Secret;
pub use service::OrderService;
pub use state::{Authed, Authorized, Unauthed};
pub use store::OrderStore;
pub use tainted::Tainted;
pub use verified::Verified;
