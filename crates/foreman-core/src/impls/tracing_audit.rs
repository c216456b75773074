//! Tracing-backed audit sink (the default).

use tracing::trace;

use crate::ports::AuditSink;
use crate::state::AuditEvent;

/// Emits each audit event as a `trace!` record under the `trace_jobs`
/// target. Fire-and-forget; nothing is retained after emission.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) {
        trace!(target: "trace_jobs", "{event}");
    }
}
