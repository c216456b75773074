use thiserror::Error;

/// Errors from the fallible status surface (name parsing, strict decode).
///
/// Status mutation itself never returns these; see the state module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("unknown base state name: {0:?}")]
    UnknownBaseState(String),

    #[error("unknown status flag name: {0:?}")]
    UnknownFlag(String),

    #[error("base state bits {0:#06x} are not a known state")]
    BaseOutOfRange(u32),

    #[error("unrecognized status flag bits {0:#010x}")]
    UnknownFlagBits(u32),
}
