//! Type-state markers for context progression.
//!
//! A request context moves `Unauthed -> Authed -> Authorized`. Only an
//! `Authorized` context can disclose an order, and only the ownership gate
//! produces one.

/// Marker for a context without a resolved principal.
#[derive(Debug, Clone, Copy)]
pub struct Unauthed {
    _private: (),
}

/// Marker for a context whose principal has been resolved.
///
/// `Ctx<Authed>` is what the order service requires: it proves who is asking,
/// not what they may read.
#[derive(Debug, Clone, Copy)]
pub struct Authed {
    _private: (),
}

/// Marker for a context that passed the ownership gate for one order.
#[derive(Debug, Clone, Copy)]
pub struct Authorized {
    _private: (),
}
