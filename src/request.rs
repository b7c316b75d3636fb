use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata about an incoming request.
///
/// Contains the request identifier and the resolved principal, if any.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Unique identifier for this request
    pub request_id: String,
    /// Authenticated principal, if any
    pub principal: Option<Principal>,
}

/// Identifier of a principal. Orders reference their owner by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub u64);

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated user or service principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: PrincipalId,
    /// Display name
    pub name: String,
}

impl Principal {
    /// Creates a principal.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: PrincipalId(id),
            name: name.into(),
        }
    }
}
