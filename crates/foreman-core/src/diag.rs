//! Diagnostics context: the trace toggle plus the two diagnostic hooks.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::impls::{PanicViolationHandler, TracingAuditSink};
use crate::ports::{AuditSink, Violation, ViolationHandler};
use crate::state::AuditEvent;

/// Diagnostics section of the workload manager configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DiagConfig {
    /// Trace job state changes: enables encoding checks and change audit
    /// on every status mutation. Off by default (zero-overhead path).
    #[serde(default)]
    pub trace_jobs: bool,
}

/// Injected diagnostics context.
///
/// Design:
/// - Cheap to clone and share across whoever mutates job records; the
///   core reads the toggle, it never writes it. Flipping it is an
///   administrative action done by building a new context.
/// - With the toggle off, every diagnostic path is one bool load.
/// - The hooks are ports so test suites can observe audits and
///   violations without a subscriber or a process abort.
#[derive(Clone)]
pub struct Diagnostics {
    inner: Arc<Inner>,
}

struct Inner {
    trace_jobs: bool,
    audit: Arc<dyn AuditSink>,
    violations: Arc<dyn ViolationHandler>,
}

impl Diagnostics {
    /// Production default: tracing off, hooks dormant.
    pub fn disabled() -> Self {
        Self::build(
            false,
            Arc::new(TracingAuditSink),
            Arc::new(PanicViolationHandler),
        )
    }

    /// Tracing on with the default hooks: `tracing` audit records and a
    /// panicking violation handler.
    pub fn enabled() -> Self {
        Self::build(
            true,
            Arc::new(TracingAuditSink),
            Arc::new(PanicViolationHandler),
        )
    }

    pub fn from_config(config: &DiagConfig) -> Self {
        if config.trace_jobs {
            Self::enabled()
        } else {
            Self::disabled()
        }
    }

    /// Caller-supplied hooks with an explicit toggle. The seam test
    /// suites use to observe both the on and the off path.
    pub fn with_hooks(
        trace_jobs: bool,
        audit: Arc<dyn AuditSink>,
        violations: Arc<dyn ViolationHandler>,
    ) -> Self {
        Self::build(trace_jobs, audit, violations)
    }

    fn build(
        trace_jobs: bool,
        audit: Arc<dyn AuditSink>,
        violations: Arc<dyn ViolationHandler>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                trace_jobs,
                audit,
                violations,
            }),
        }
    }

    /// The "trace job state changes" toggle.
    pub fn trace_jobs(&self) -> bool {
        self.inner.trace_jobs
    }

    pub(crate) fn record(&self, event: &AuditEvent) {
        self.inner.audit.record(event);
    }

    pub(crate) fn report(&self, violation: &Violation) {
        self.inner.violations.report(violation);
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("trace_jobs", &self.inner.trace_jobs)
            .finish_non_exhaustive()
    }
}
