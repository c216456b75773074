//! ViolationHandler port - what a failed encoding check does.

use thiserror::Error;

/// A status encoding that broke an invariant of the packed value.
///
/// These are defect signals, not recoverable errors. The mutation that
/// produced one is never rejected: if the handler returns, the commit
/// still happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// Base-region bits at or past the terminal marker.
    #[error("base state bits {raw:#06x} are not below the terminal marker")]
    BaseOutOfRange { raw: u32 },

    /// Flag-region bits left over after clearing every known flag.
    #[error("unrecognized status flag bits {bits:#010x}")]
    UnknownFlagBits { bits: u32 },
}

/// Decides what happens when the checker finds a violation.
///
/// The default implementation panics
/// ([`crate::impls::PanicViolationHandler`]); test suites inject a
/// recording handler to observe violations without terminating the
/// process.
pub trait ViolationHandler: Send + Sync {
    fn report(&self, violation: &Violation);
}
