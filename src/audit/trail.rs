//! Bounded in-memory audit recorder.

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::AuditEvent;

/// In-memory recorder for audit events.
///
/// Holds at most `capacity` events; the oldest is evicted first. Every
/// recorded event is also emitted on the `order_guard::audit` tracing target.
///
/// # Example
///
/// ```
/// use order_guard::audit::{AuditTrail, AuditEvent, AuditEventKind, AuditOutcome};
///
/// let trail = AuditTrail::with_capacity(2);
/// for id in ["req-1", "req-2", "req-3"] {
///     trail.record(AuditEvent::new(
///         id,
///         Some("1"),
///         AuditEventKind::ResourceAccess,
///         AuditOutcome::Success,
///     ));
/// }
///
/// let events = trail.events();
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[0].request_id(), "req-2");
/// ```
#[derive(Debug)]
pub struct AuditTrail {
    capacity: usize,
    events: Mutex<VecDeque<AuditEvent>>,
}

impl AuditTrail {
    /// Default number of retained events.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Creates a trail with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a trail retaining at most `capacity` events.
    ///
    /// A capacity of 0 still emits events to tracing but retains none.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY))),
        }
    }

    /// Emits `event` to tracing and stores it.
    pub fn record(&self, event: AuditEvent) {
        tracing::info!(
            target: "order_guard::audit",
            request_id = %event.request_id(),
            principal = ?event.principal(),
            kind = %event.kind(),
            outcome = %event.outcome(),
            action = ?event.action(),
            resource_id = ?event.resource_id(),
            "audit event"
        );

        if self.capacity == 0 {
            return;
        }

        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Returns a snapshot of the retained events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Returns the number of retained events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if no events are retained.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditEventKind, AuditOutcome};

    fn event(request_id: &str) -> AuditEvent {
        AuditEvent::new(
            request_id,
            Some("1"),
            AuditEventKind::ResourceAccess,
            AuditOutcome::Success,
        )
    }

    #[test]
    fn audit_trail_starts_empty() {
        let trail = AuditTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.len(), 0);
    }

    #[test]
    fn audit_trail_records_in_order() {
        let trail = AuditTrail::new();
        trail.record(event("req-1"));
        trail.record(event("req-2"));

        let events = trail.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].request_id(), "req-1");
        assert_eq!(events[1].request_id(), "req-2");
    }

    #[test]
    fn audit_trail_evicts_oldest_at_capacity() {
        let trail = AuditTrail::with_capacity(3);
        for i in 0..5 {
            trail.record(event(&format!("req-{}", i)));
        }

        let ids: Vec<String> = trail
            .events()
            .iter()
            .map(|e| e.request_id().to_string())
            .collect();
        assert_eq!(ids, vec!["req-2", "req-3", "req-4"]);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let trail = AuditTrail::with_capacity(0);
        trail.record(event("req-1"));
        assert!(trail.is_empty());
    }
}
