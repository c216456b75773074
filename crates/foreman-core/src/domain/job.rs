//! Job record: the owner of a packed status value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::JobId;
use super::status::{BaseState, StatusFlag, StatusValue};

/// Job record: single source of truth for one job's run-time status.
///
/// Design: the status field is private. Every mutation flows through
/// [`crate::state::StatusMutator`], so there is no write path that
/// bypasses the diagnostic hooks. The record is created with its status
/// and they are dropped together; nothing else allocates or frees it.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub job_id: JobId,
    pub name: String,

    /// Packed status (one base state + flags).
    status: StatusValue,

    /// Timestamps for observability.
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// New jobs start pending with no flags.
    pub fn new(job_id: JobId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            job_id,
            name: name.into(),
            status: StatusValue::new(BaseState::Pending),
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Current packed status.
    pub fn status(&self) -> StatusValue {
        self.status
    }

    /// Commit a new status value. Only the state module calls this;
    /// everyone else goes through [`crate::state::StatusMutator`].
    pub(crate) fn commit_status(&mut self, value: StatusValue) {
        self.status = value;
        self.updated_at = Utc::now();
    }

    /// Serializable view for API responses.
    pub fn view(&self) -> JobStatusView {
        JobStatusView {
            job_id: self.job_id,
            state: self.status.describe(),
            base: self.status.base(),
            flags: self.status.flags().collect(),
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serializable view of a job's status for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusView {
    pub job_id: JobId,
    /// Rendered form, e.g. `RUNNING+CONFIGURING`.
    pub state: String,
    /// `None` when the stored encoding carries an out-of-range base.
    pub base: Option<BaseState>,
    pub flags: Vec<StatusFlag>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_is_pending_with_no_flags() {
        let job = JobRecord::new(JobId::generate(), "nightly-etl");

        assert!(job.status().is_pending());
        assert_eq!(job.status().flag_bits(), 0);
        assert_eq!(job.submitted_at, job.updated_at);
    }

    #[test]
    fn commit_updates_status_and_timestamp() {
        let mut job = JobRecord::new(JobId::generate(), "nightly-etl");
        let before = job.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(2));
        job.commit_status(StatusValue::new(BaseState::Running));

        assert!(job.status().is_running());
        assert!(job.updated_at > before);
    }

    #[test]
    fn view_serializes_with_snake_case_names() {
        let mut job = JobRecord::new(JobId::generate(), "nightly-etl");
        job.commit_status(
            StatusValue::new(BaseState::Running).with_flag(StatusFlag::Configuring),
        );

        let json = serde_json::to_value(job.view()).unwrap();
        assert_eq!(json["state"], "RUNNING+CONFIGURING");
        assert_eq!(json["base"], "running");
        assert_eq!(json["flags"][0], "configuring");
    }
}
