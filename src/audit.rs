//! Audit trail for order access decisions.
//!
//! Every call to the order service produces exactly one [`AuditEvent`]:
//! `success` when the order was disclosed, `denied` when a policy refused it,
//! `error` when the order does not exist.
//!
//! Events only hold identifiers. Order contents and tokens never enter the
//! trail.

mod event;
mod trail;

pub use event::{AuditEvent, AuditEventKind, AuditOutcome};
pub use trail::AuditTrail;
