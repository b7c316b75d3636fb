//! Framework-agnostic view of an HTTP request.

use std::collections::HashMap;

use axum::http::HeaderMap;

use crate::Tainted;

/// Adapter between an HTTP framework's request and the access layer.
///
/// `RequestAdapter` holds plain owned data: a request id, headers and path
/// parameters. Everything except the request id is untrusted and only leaves
/// the adapter wrapped in [`Tainted`].
///
/// Header names are stored lowercase, so lookups are case-insensitive.
///
/// # Examples
///
/// ```
/// use order_guard::web::RequestAdapter;
///
/// let mut adapter = RequestAdapter::new("req-12345".to_string());
/// adapter.add_header("Authorization".to_string(), "Bearer alice-token".to_string());
/// adapter.add_path_param("orderId".to_string(), "1002".to_string());
///
/// let inputs = adapter.extract_tainted_inputs();
/// assert!(inputs.header("authorization").is_some());
/// assert!(inputs.path_param("orderId").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    request_id: String,
    headers: HashMap<String, String>,
    path_params: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates an adapter with the given request id and no inputs.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            headers: HashMap::new(),
            path_params: HashMap::new(),
        }
    }

    /// Creates an adapter from an HTTP header map.
    ///
    /// Header values that are not visible ASCII are skipped.
    pub fn from_headers(request_id: String, headers: &HeaderMap) -> Self {
        let mut adapter = Self::new(request_id);
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                adapter.add_header(name.as_str().to_string(), value.to_string());
            }
        }
        adapter
    }

    /// Adds a header. The name is lowercased.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name.to_ascii_lowercase(), value);
    }

    /// Adds a path parameter.
    pub fn add_path_param(&mut self, name: String, value: String) {
        self.path_params.insert(name, value);
    }

    /// Returns the request id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Copies every untrusted input into a [`TaintedInputs`] collection.
    pub fn extract_tainted_inputs(&self) -> TaintedInputs {
        TaintedInputs {
            headers: self
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), Tainted::new(v.clone())))
                .collect(),
            path_params: self
                .path_params
                .iter()
                .map(|(k, v)| (k.clone(), Tainted::new(v.clone())))
                .collect(),
        }
    }
}

/// Untrusted inputs extracted from a request, read-only.
#[derive(Debug, Clone)]
pub struct TaintedInputs {
    headers: HashMap<String, Tainted<String>>,
    path_params: HashMap<String, Tainted<String>>,
}

impl TaintedInputs {
    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<Tainted<String>> {
        self.headers.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Returns a path parameter by name.
    pub fn path_param(&self, name: &str) -> Option<Tainted<String>> {
        self.path_params.get(name).cloned()
    }

    /// Number of headers.
    pub fn headers_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of path parameters.
    pub fn path_params_count(&self) -> usize {
        self.path_params.len()
    }
}
