//! Status mutation path: the accessor, encoding checks, and change audit.

mod audit;
mod check;
mod mutate;

pub use audit::{AuditEvent, Change};
pub use mutate::StatusMutator;
