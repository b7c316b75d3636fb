//! Service configuration.
//!
//! Configuration is a single JSON document. Every field is optional; missing
//! fields fall back to [`Config::default`], which serves the three sample
//! orders on `127.0.0.1:3000`.
//!
//! ```json
//! {
//!   "listen": "0.0.0.0:8080",
//!   "log_filter": "order_guard=debug,info",
//!   "audit_capacity": 4096,
//!   "orders": [{"id": 1001, "ownerId": 1, "description": "Laptop"}],
//!   "principals": [{"id": 1, "name": "Alice", "token": "alice-token"}]
//! }
//! ```

use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::order::{Order, OrderId};
use crate::request::PrincipalId;
use crate::Secret;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The configuration is not valid JSON for [`Config`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two orders share an id.
    #[error("duplicate order id {0}")]
    DuplicateOrder(OrderId),
    /// An order uses the reserved id 0.
    #[error("order ids must be positive")]
    InvalidOrderId,
    /// Two principals share an id.
    #[error("duplicate principal id {0}")]
    DuplicatePrincipal(PrincipalId),
    /// Two principals share a token. The token itself is not reported.
    #[error("principal {0} reuses another principal's token")]
    DuplicateToken(PrincipalId),
    /// A principal has an empty token.
    #[error("principal {0} has an empty token")]
    EmptyToken(PrincipalId),
    /// An order references a principal that is not configured.
    #[error("order {order} is owned by unknown principal {owner}")]
    UnknownOwner {
        /// The offending order
        order: OrderId,
        /// The owner it names
        owner: PrincipalId,
    },
}

/// A configured principal and the bearer token that resolves to it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrincipalEntry {
    /// Principal id, matched against `Order::owner_id`
    pub id: PrincipalId,
    /// Display name
    pub name: String,
    /// Bearer token presented by this principal
    pub token: Secret<String>,
}

/// Top-level service configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen: SocketAddr,
    /// Filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Number of audit events retained in memory
    pub audit_capacity: usize,
    /// Contents of the order store
    pub orders: Vec<Order>,
    /// Principals that may authenticate
    pub principals: Vec<PrincipalEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            log_filter: "info".to_string(),
            audit_capacity: crate::audit::AuditTrail::DEFAULT_CAPACITY,
            orders: vec![
                Order::new(1001, 1, "Laptop"),
                Order::new(1002, 2, "Phone"),
                Order::new(1003, 1, "Tablet"),
            ],
            principals: vec![
                PrincipalEntry {
                    id: PrincipalId(1),
                    name: "Alice".to_string(),
                    token: Secret::new("alice-token".to_string()),
                },
                PrincipalEntry {
                    id: PrincipalId(2),
                    name: "Bob".to_string(),
                    token: Secret::new("bob-token".to_string()),
                },
            ],
        }
    }
}

impl Config {
    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, and any parse or
    /// validation error from [`Config::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field invariants.
    ///
    /// Principal ids and tokens must be unique and non-empty, order ids must
    /// be unique and positive, and every order owner must be a configured
    /// principal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        let mut tokens = HashSet::new();
        for entry in &self.principals {
            if !ids.insert(entry.id) {
                return Err(ConfigError::DuplicatePrincipal(entry.id));
            }
            let token = entry.token.expose_secret().as_str();
            if token.is_empty() {
                return Err(ConfigError::EmptyToken(entry.id));
            }
            if !tokens.insert(token) {
                return Err(ConfigError::DuplicateToken(entry.id));
            }
        }

        let mut order_ids = HashSet::new();
        for order in &self.orders {
            if order.id.0 == 0 {
                return Err(ConfigError::InvalidOrderId);
            }
            if !order_ids.insert(order.id) {
                return Err(ConfigError::DuplicateOrder(order.id));
            }
            if !ids.contains(&order.owner_id) {
                return Err(ConfigError::UnknownOwner {
                    order: order.id,
                    owner: order.owner_id,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_matches_sample_data() {
        let config = Config::default();
        config.validate().unwrap();

        assert_eq!(config.listen.port(), 3000);
        assert_eq!(config.orders.len(), 3);
        assert_eq!(config.orders[1], Order::new(1002, 2, "Phone"));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.listen, Config::default().listen);
        assert_eq!(config.principals.len(), 2);
    }

    #[test]
    fn full_document_parses() {
        let config = Config::from_json(
            r#"{
                "listen": "0.0.0.0:8080",
                "log_filter": "debug",
                "audit_capacity": 16,
                "orders": [{"id": 7, "ownerId": 3, "description": "Desk"}],
                "principals": [{"id": 3, "name": "Carol", "token": "carol-token"}]
            }"#,
        )
        .unwrap();

        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.audit_capacity, 16);
        assert_eq!(config.orders, vec![Order::new(7, 3, "Desk")]);
        assert_eq!(config.principals[0].token.expose_secret(), "carol-token");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_json(r#"{"port": 3000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_owner_is_rejected() {
        let err = Config::from_json(
            r#"{"orders": [{"id": 1, "ownerId": 42, "description": "x"}]}"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::UnknownOwner {
                order: OrderId(1),
                owner: PrincipalId(42)
            }
        ));
    }

    #[test]
    fn duplicate_token_error_does_not_reveal_token() {
        let err = Config::from_json(
            r#"{"principals": [
                {"id": 1, "name": "A", "token": "shared-secret"},
                {"id": 2, "name": "B", "token": "shared-secret"}
            ]}"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateToken(PrincipalId(2))));
        assert!(!err.to_string().contains("shared-secret"));
    }

    #[test]
    fn duplicate_orders_are_rejected() {
        let err = Config::from_json(
            r#"{"orders": [
                {"id": 1001, "ownerId": 1, "description": "a"},
                {"id": 1001, "ownerId": 2, "description": "b"}
            ]}"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateOrder(OrderId(1001))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
