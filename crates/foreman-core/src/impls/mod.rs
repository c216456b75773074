//! Impls - implementations of the diagnostic ports.
//!
//! # Included
//! - **TracingAuditSink**: default sink, emits `tracing` records
//! - **PanicViolationHandler**: default handler, fatal on violation
//! - **RecordingAuditSink** / **RecordingViolationHandler**: collectors
//!   for test suites (ours and embedders')

pub mod panic_violation;
pub mod recording;
pub mod tracing_audit;

pub use self::panic_violation::PanicViolationHandler;
pub use self::recording::{RecordingAuditSink, RecordingViolationHandler};
pub use self::tracing_audit::TracingAuditSink;
