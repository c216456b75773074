//! AuditSink port - where status-change audit records go.

use crate::state::AuditEvent;

/// Receives one audit event per status mutation (diagnostic mode only).
///
/// Delivery is fire-and-forget from the mutator's point of view: the sink
/// must not block the caller, and the event (with its rendered strings) is
/// dropped as soon as `record` returns.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}
