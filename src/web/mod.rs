//! HTTP boundary.
//!
//! This module is where requests become typed values:
//! - request id extraction and propagation
//! - untrusted inputs (headers, path params) wrapped in `Tainted<T>`
//! - principal resolution through [`ResolvePrincipal`](crate::auth::ResolvePrincipal)
//!
//! The boundary never grants read access. That happens per order, inside
//! [`OrderService`](crate::OrderService), through the
//! [`PolicyGate`](crate::PolicyGate).

mod adapter;
mod middleware;
mod routes;

pub use adapter::{RequestAdapter, TaintedInputs};
pub use middleware::{
    extract_authed, extract_unauthed, AuthenticatedExtraction, UnauthenticatedExtraction,
};
pub use routes::{router, AppState, REQUEST_ID_HEADER};
