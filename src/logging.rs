//! Subscriber setup and the request-scoped [`PolicyLog`].

use std::fmt;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (for example `"info"`
/// or `"order_guard=debug"`) is used. Calling this twice is harmless: the
/// second install attempt is ignored.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// A request-scoped logger.
///
/// `PolicyLog` is obtained from `Ctx::log()` and is lifetime-bound to the
/// context. Every message carries the request id as a structured field.
///
/// Tokens are held as [`Secret`](crate::Secret) and print as `[REDACTED]`,
/// so passing them here cannot leak them.
#[derive(Debug)]
pub struct PolicyLog<'a> {
    request_id: &'a str,
}

impl<'a> PolicyLog<'a> {
    /// Only `Ctx` creates loggers.
    pub(crate) fn new(request_id: &'a str) -> Self {
        Self { request_id }
    }

    /// Returns the request ID associated with this logger.
    pub fn request_id(&self) -> &str {
        self.request_id
    }

    /// Logs an info-level message with request ID.
    ///
    /// Use with `format_args!`:
    /// ```
    /// # use order_guard::Ctx;
    /// let ctx = Ctx::new("req-7");
    /// ctx.log().info(format_args!("looking up order {}", 1001));
    /// ```
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a warning-level message with request ID.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a debug-level message with request ID.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.request_id, "{}", args);
    }
}
