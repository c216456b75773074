//! The status accessor: the only sanctioned write path for job status.

use crate::diag::Diagnostics;
use crate::domain::{JobRecord, StatusFlag, StatusValue};

use super::audit::audit_change;
use super::check::check_status;

/// Mutates a job's packed status value.
///
/// Design intent:
/// - All three operations funnel through one commit path, so the checker
///   and the auditor see every mutation exactly once; no path bypasses
///   them.
/// - Mutations never fail from the caller's point of view. A broken
///   encoding is a defect signal for the violation handler, and if that
///   handler returns, the commit still happens.
/// - The caller holds exclusive access to the record for the duration of
///   the call (single-writer contract; this type adds no locking).
#[derive(Debug, Clone)]
pub struct StatusMutator {
    diag: Diagnostics,
}

impl StatusMutator {
    pub fn new(diag: Diagnostics) -> Self {
        Self { diag }
    }

    /// Replace the whole status value, flags included.
    pub fn set(&self, job: &mut JobRecord, value: StatusValue) {
        self.commit("set", job, value);
    }

    /// Set one flag. The base state and every other flag are untouched.
    ///
    /// Taking [`StatusFlag`] (not raw bits) makes a zero, multi-bit, or
    /// base-overlapping argument unrepresentable.
    pub fn set_flag(&self, job: &mut JobRecord, flag: StatusFlag) {
        let value = job.status().with_flag(flag);
        self.commit("set_flag", job, value);
    }

    /// Clear one flag. The base state and every other flag are untouched.
    pub fn unset_flag(&self, job: &mut JobRecord, flag: StatusFlag) {
        let value = job.status().without_flag(flag);
        self.commit("unset_flag", job, value);
    }

    /// Check, audit, then commit, in that order: the audit must see the
    /// pre-mutation value as "current".
    fn commit(&self, op: &'static str, job: &mut JobRecord, value: StatusValue) {
        check_status(&self.diag, value);
        audit_change(&self.diag, op, job, value);
        job.commit_status(value);
    }
}
