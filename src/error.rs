use std::fmt;

/// Errors returned by the order access operations.
///
/// Each variant maps to exactly one HTTP status at the web boundary. None of
/// them carry record contents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No order matches the requested identifier.
    #[error("order not found")]
    NotFound,
    /// A policy violation occurred.
    #[error("policy violation: {0}")]
    Violation(#[from] Violation),
}

impl Error {
    /// Returns the violation kind, if this error is a policy violation.
    pub fn violation_kind(&self) -> Option<&ViolationKind> {
        match self {
            Error::NotFound => None,
            Error::Violation(v) => Some(&v.kind),
        }
    }
}

/// A policy violation with details about what failed.
#[derive(Debug, Clone)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for an [`ViolationKind::Unauthenticated`] violation.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Unauthenticated, message)
    }

    /// Shorthand for a [`ViolationKind::Forbidden`] violation.
    pub fn forbidden(action: &'static str, message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Forbidden { action }, message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

/// The kind of policy violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// No principal could be resolved for the request
    Unauthenticated,
    /// The principal is known but may not perform the action on this resource
    Forbidden {
        /// The action that was refused
        action: &'static str,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unauthenticated => write!(f, "Unauthenticated"),
            ViolationKind::Forbidden { action } => write!(f, "Forbidden for '{}'", action),
        }
    }
}
