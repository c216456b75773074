//! Panicking violation handler (the default).

use crate::ports::{Violation, ViolationHandler};

/// Treats an encoding violation as a fatal defect: the process stops at
/// the point of corruption instead of carrying a malformed status forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicViolationHandler;

impl ViolationHandler for PanicViolationHandler {
    fn report(&self, violation: &Violation) {
        panic!("job status invariant broken: {violation}");
    }
}
