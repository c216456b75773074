//! Change audit: describe and record every status mutation (diagnostic
//! mode only).

use std::fmt;

use crate::diag::Diagnostics;
use crate::domain::{JobId, JobRecord, StatusValue};

/// What a single mutation did to the status value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The candidate equals the current value.
    NoOp { state: String },
    /// A real transition.
    Transition { from: String, to: String },
}

/// One audit record per status mutation.
///
/// The rendered strings are owned by the event and dropped with it once
/// the sink returns; no copy outlives the mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Mutator operation that produced the event.
    pub op: &'static str,
    pub job_id: JobId,
    pub change: Change,
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.change {
            Change::NoOp { state } => {
                write!(f, "{}: [{}] no-op change state: {}", self.op, self.job_id, state)
            }
            Change::Transition { from, to } => {
                write!(
                    f,
                    "{}: [{}] change state: {} -> {}",
                    self.op, self.job_id, from, to
                )
            }
        }
    }
}

/// Describe the transition about to happen and hand it to the audit sink.
///
/// Runs strictly before commit: `job.status()` is still the pre-mutation
/// value, so the record reflects the actual old -> new pair, never a
/// partially-applied one.
pub(crate) fn audit_change(
    diag: &Diagnostics,
    op: &'static str,
    job: &JobRecord,
    new_value: StatusValue,
) {
    if !diag.trace_jobs() {
        return;
    }

    let before = job.status().describe();
    let change = if job.status() == new_value {
        Change::NoOp { state: before }
    } else {
        Change::Transition {
            from: before,
            to: new_value.describe(),
        }
    };

    diag.record(&AuditEvent {
        op,
        job_id: job.job_id,
        change,
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{BaseState, StatusFlag};
    use crate::impls::{RecordingAuditSink, RecordingViolationHandler};

    fn recording_diag() -> (Diagnostics, Arc<RecordingAuditSink>) {
        let sink = Arc::new(RecordingAuditSink::new());
        let diag = Diagnostics::with_hooks(
            true,
            sink.clone(),
            Arc::new(RecordingViolationHandler::new()),
        );
        (diag, sink)
    }

    #[test]
    fn identity_write_is_a_no_op_record() {
        let (diag, sink) = recording_diag();
        let job = JobRecord::new(JobId::generate(), "noop");

        audit_change(&diag, "set", &job, job.status());

        let events = sink.take();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].change,
            Change::NoOp {
                state: "PENDING".to_string()
            }
        );
    }

    #[test]
    fn transition_record_renders_old_and_new() {
        let (diag, sink) = recording_diag();
        let job = JobRecord::new(JobId::generate(), "transition");
        let new_value = StatusValue::new(BaseState::Running).with_flag(StatusFlag::Configuring);

        audit_change(&diag, "set", &job, new_value);

        let events = sink.take();
        assert_eq!(
            events[0].change,
            Change::Transition {
                from: "PENDING".to_string(),
                to: "RUNNING+CONFIGURING".to_string(),
            }
        );
    }

    #[test]
    fn display_matches_the_log_line_format() {
        let job_id = JobId::generate();

        let noop = AuditEvent {
            op: "set",
            job_id,
            change: Change::NoOp {
                state: "PENDING".to_string(),
            },
        };
        assert_eq!(
            noop.to_string(),
            format!("set: [{job_id}] no-op change state: PENDING")
        );

        let transition = AuditEvent {
            op: "set_flag",
            job_id,
            change: Change::Transition {
                from: "RUNNING".to_string(),
                to: "RUNNING+REQUEUE".to_string(),
            },
        };
        assert_eq!(
            transition.to_string(),
            format!("set_flag: [{job_id}] change state: RUNNING -> RUNNING+REQUEUE")
        );
    }

    #[test]
    fn disabled_diagnostics_audit_nothing() {
        let sink = Arc::new(RecordingAuditSink::new());
        let diag = Diagnostics::with_hooks(
            false,
            sink.clone(),
            Arc::new(RecordingViolationHandler::new()),
        );
        let job = JobRecord::new(JobId::generate(), "silent");

        audit_change(&diag, "set", &job, StatusValue::new(BaseState::Running));

        assert!(sink.take().is_empty());
    }
}
