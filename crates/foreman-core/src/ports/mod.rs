//! Ports: trait seams for the diagnostic hooks.
//!
//! The status core calls these through the injected
//! [`crate::diag::Diagnostics`] context and never cares which
//! implementation is behind them. Defaults live in [`crate::impls`].

pub mod audit_sink;
pub mod violation;

pub use self::audit_sink::AuditSink;
pub use self::violation::{Violation, ViolationHandler};
