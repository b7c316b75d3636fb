//! axum routes.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::audit::{AuditEvent, AuditEventKind, AuditOutcome, AuditTrail};
use crate::auth::{ResolvePrincipal, TokenResolver};
use crate::config::{Config, ConfigError};
use crate::error::{Error, ViolationKind};
use crate::service::OrderService;
use crate::store::OrderStore;

use super::{extract_authed, extract_unauthed, RequestAdapter};

/// Header carrying the request id, read from requests and echoed on responses.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Path parameter holding the order id.
const ORDER_ID_PARAM: &str = "orderId";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    service: Arc<OrderService>,
    resolver: Arc<dyn ResolvePrincipal>,
}

impl AppState {
    /// Creates state from a service and a principal resolver.
    pub fn new(service: OrderService, resolver: Arc<dyn ResolvePrincipal>) -> Self {
        Self {
            service: Arc::new(service),
            resolver,
        }
    }

    /// Builds the store, audit trail and token resolver described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is inconsistent.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let store = OrderStore::from_orders(config.orders)?;
        let audit = AuditTrail::with_capacity(config.audit_capacity);
        let resolver = TokenResolver::from_entries(config.principals);

        tracing::info!(
            orders = store.len(),
            principals = resolver.len(),
            "order store loaded"
        );

        Ok(Self::new(
            OrderService::new(Arc::new(store), Arc::new(audit)),
            Arc::new(resolver),
        ))
    }

    /// The order service behind the routes.
    pub fn service(&self) -> &OrderService {
        &self.service
    }
}

/// Builds the HTTP router.
///
/// - `GET /orders/{orderId}`: the order, if the caller owns it
/// - `GET /health`: liveness check
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/orders/{orderId}", get(get_order))
        .route("/health", get(health))
        .with_state(state)
}

async fn get_order(
    State(state): State<AppState>,
    order_id: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id(&headers);

    // A segment that does not decode (e.g. invalid UTF-8) is still an order id
    // that cannot exist: it goes through authentication and the sanitizer.
    let order_id = order_id.map(|Path(id)| id).unwrap_or_else(|rejection| {
        tracing::debug!(request_id = %request_id, "undecodable order id: {}", rejection);
        String::new()
    });

    let mut adapter = RequestAdapter::from_headers(request_id.clone(), &headers);
    adapter.add_path_param(ORDER_ID_PARAM.to_string(), order_id);

    let result = match extract_authed(&adapter, state.resolver.as_ref()) {
        Ok(extraction) => match extraction.inputs.path_param(ORDER_ID_PARAM) {
            Some(raw_id) => state
                .service
                .get_order_by_token(&extraction.context, raw_id),
            None => Err(Error::NotFound),
        },
        Err(violation) => {
            tracing::info!(request_id = %request_id, "{}", violation);
            state.service.audit().record(
                AuditEvent::new(
                    request_id.as_str(),
                    None::<String>,
                    AuditEventKind::Authentication,
                    AuditOutcome::Denied,
                )
                .with_action("read"),
            );
            Err(Error::from(violation))
        }
    };

    let response = match result {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => err.into_response(),
    };

    with_request_id(response, &request_id)
}

async fn health(headers: HeaderMap) -> Response {
    let adapter = RequestAdapter::from_headers(request_id(&headers), &headers);
    let extraction = extract_unauthed(&adapter);
    extraction.context.log().debug(format_args!("health check"));

    with_request_id("ok".into_response(), extraction.context.request_id())
}

fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Uses the caller's request id if it is short and plain, otherwise a new UUID.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= 64
                && id
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => (StatusCode::NOT_FOUND, "Order not found").into_response(),
            Error::Violation(v) => match v.kind {
                ViolationKind::Unauthenticated => (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    "Unauthorized",
                )
                    .into_response(),
                ViolationKind::Forbidden { .. } => {
                    (StatusCode::FORBIDDEN, "Forbidden").into_response()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    #[test]
    fn caller_request_id_is_kept_when_plain() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123_x"));
        assert_eq!(request_id(&headers), "abc-123_x");
    }

    #[test]
    fn unsafe_request_id_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("a b\"c"));
        let id = request_id(&headers);
        assert_ne!(id, "a b\"c");
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn missing_request_id_gets_uuid() {
        let id = request_id(&HeaderMap::new());
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            Error::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );

        let unauth = Error::from(Violation::unauthenticated("x")).into_response();
        assert_eq!(unauth.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unauth.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let forbidden = Error::from(Violation::forbidden("read", "x")).into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }
}
