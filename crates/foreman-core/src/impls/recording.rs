//! Recording hook implementations for test suites.

use std::sync::Mutex;

use crate::ports::{AuditSink, Violation, ViolationHandler};
use crate::state::AuditEvent;

/// Collects audit events instead of logging them.
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<AuditEvent> {
        std::mem::take(&mut *self.events.lock().expect("audit sink lock poisoned"))
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: &AuditEvent) {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .push(event.clone());
    }
}

/// Collects violations instead of panicking, so a test can drive a bad
/// encoding through the mutator and assert on what the checker saw.
#[derive(Debug, Default)]
pub struct RecordingViolationHandler {
    violations: Mutex<Vec<Violation>>,
}

impl RecordingViolationHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Violation> {
        std::mem::take(&mut *self.violations.lock().expect("violation lock poisoned"))
    }
}

impl ViolationHandler for RecordingViolationHandler {
    fn report(&self, violation: &Violation) {
        self.violations
            .lock()
            .expect("violation lock poisoned")
            .push(*violation);
    }
}
