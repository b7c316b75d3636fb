//! Audit event schema.

use std::fmt;

use crate::error::{Error, ViolationKind};

/// Kind of audit event being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEventKind {
    /// Principal resolution failed or succeeded
    Authentication,
    /// Ownership check refused the read
    Authorization,
    /// An order lookup
    ResourceAccess,
}

impl fmt::Display for AuditEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEventKind::Authentication => write!(f, "authentication"),
            AuditEventKind::Authorization => write!(f, "authorization"),
            AuditEventKind::ResourceAccess => write!(f, "resource_access"),
        }
    }
}

/// Outcome of an audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The order was disclosed
    Success,
    /// A policy refused the operation
    Denied,
    /// The operation failed, e.g. the order does not exist
    Error,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Success => write!(f, "success"),
            AuditOutcome::Denied => write!(f, "denied"),
            AuditOutcome::Error => write!(f, "error"),
        }
    }
}

/// A structured audit event containing only non-sensitive metadata.
///
/// # Example
///
/// ```
/// use order_guard::audit::{AuditEvent, AuditEventKind, AuditOutcome};
///
/// let event = AuditEvent::new(
///     "req-123",
///     Some("1"),
///     AuditEventKind::Authorization,
///     AuditOutcome::Denied,
/// )
/// .with_action("read")
/// .with_resource_id("1002");
///
/// assert_eq!(event.principal(), Some("1"));
/// assert_eq!(event.resource_id(), Some("1002"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    request_id: String,
    /// None for unauthenticated events
    principal: Option<String>,
    kind: AuditEventKind,
    outcome: AuditOutcome,
    action: Option<String>,
    /// Order id only; never order contents
    resource_id: Option<String>,
}

impl AuditEvent {
    /// Creates a new audit event with required fields.
    pub fn new(
        request_id: impl Into<String>,
        principal: Option<impl Into<String>>,
        kind: AuditEventKind,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            principal: principal.map(Into::into),
            kind,
            outcome,
            action: None,
            resource_id: None,
        }
    }

    /// Builds the event describing the result of an order read.
    pub fn for_read(
        request_id: &str,
        principal: Option<String>,
        resource_id: impl Into<String>,
        result: Result<(), &Error>,
    ) -> Self {
        let (kind, outcome) = match result {
            Ok(()) => (AuditEventKind::ResourceAccess, AuditOutcome::Success),
            Err(Error::NotFound) => (AuditEventKind::ResourceAccess, AuditOutcome::Error),
            Err(Error::Violation(v)) => match v.kind {
                ViolationKind::Unauthenticated => {
                    (AuditEventKind::Authentication, AuditOutcome::Denied)
                }
                ViolationKind::Forbidden { .. } => {
                    (AuditEventKind::Authorization, AuditOutcome::Denied)
                }
            },
        };

        Self::new(request_id, principal, kind, outcome)
            .with_action("read")
            .with_resource_id(resource_id)
    }

    /// Sets the specific action being performed.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Sets the resource identifier.
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Returns the request identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal, if authenticated.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    /// Returns the event kind.
    pub fn kind(&self) -> AuditEventKind {
        self.kind
    }

    /// Returns the operation outcome.
    pub fn outcome(&self) -> AuditOutcome {
        self.outcome
    }

    /// Returns the action, if set.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Returns the resource identifier, if set.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[kind={}, outcome={}, request_id={}, principal={}",
            self.kind,
            self.outcome,
            self.request_id,
            self.principal.as_deref().unwrap_or("<none>")
        )?;

        if let Some(action) = &self.action {
            write!(f, ", action={}", action)?;
        }
        if let Some(resource_id) = &self.resource_id {
            write!(f, ", resource_id={}", resource_id)?;
        }

        write!(f, "]")
    }
}
