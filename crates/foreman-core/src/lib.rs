//! foreman-core
//!
//! Job-status core of the foreman workload manager.
//!
//! A job's run-time status is one packed value: a base state (pending,
//! running, completed, ...) in the low bits plus independent flags
//! (requeue, configuring, signaling, ...) above them. This crate owns the
//! encoding and the one sanctioned way to mutate it; scheduling policy,
//! queueing, and persistence live elsewhere and only read or write status
//! values through it.
//!
//! Modules:
//! - **domain**: IDs, the packed status value, the job record
//! - **state**: the mutation path (accessor, encoding checks, change audit)
//! - **ports**: hook seams (audit sink, violation handler)
//! - **impls**: default and recording hook implementations
//! - **diag**: injected diagnostics context and its config section
//! - **error**: the fallible parse/decode surface

pub mod diag;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;
pub mod state;

pub use diag::{DiagConfig, Diagnostics};
pub use domain::{BaseState, JobId, JobRecord, JobStatusView, StatusFlag, StatusValue};
pub use error::StatusError;
pub use state::{AuditEvent, Change, StatusMutator};
