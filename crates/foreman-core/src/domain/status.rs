//! Packed job status: one base state plus independent flags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StatusError;

/// Bit region holding the mutually exclusive base state.
pub const BASE_MASK: u32 = 0x0000_00ff;

/// Bit region holding the independent status flags.
pub const FLAG_MASK: u32 = 0xffff_ff00;

/// Mutually exclusive lifecycle position of a job.
///
/// Exactly one base state is encoded in the low bits of a [`StatusValue`]
/// at any time. `End` is a terminal marker, not a real state: every legal
/// encoding is strictly below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum BaseState {
    /// Waiting for resources or dependencies.
    Pending = 0,
    /// Allocated and executing.
    Running = 1,
    /// Allocation kept, execution paused.
    Suspended = 2,
    /// Finished with a zero exit code.
    Completed = 3,
    /// Cancelled by user or administrator.
    Cancelled = 4,
    /// Finished with a non-zero exit code.
    Failed = 5,
    /// Killed on reaching its time limit.
    Timeout = 6,
    /// Terminated because an allocated node failed.
    NodeFail = 7,
    /// Displaced by a higher-priority job.
    Preempted = 8,
    /// Never started: node boot failure.
    BootFail = 9,
    /// Killed on reaching its deadline.
    Deadline = 10,
    /// Killed by the out-of-memory handler.
    OutOfMemory = 11,
    /// Terminal marker. Always last; never a valid state.
    End = 12,
}

impl BaseState {
    /// Every real base state, in numeric order (excludes the `End` marker).
    pub const ALL: [BaseState; 12] = [
        BaseState::Pending,
        BaseState::Running,
        BaseState::Suspended,
        BaseState::Completed,
        BaseState::Cancelled,
        BaseState::Failed,
        BaseState::Timeout,
        BaseState::NodeFail,
        BaseState::Preempted,
        BaseState::BootFail,
        BaseState::Deadline,
        BaseState::OutOfMemory,
    ];

    /// Canonical display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            BaseState::Pending => "PENDING",
            BaseState::Running => "RUNNING",
            BaseState::Suspended => "SUSPENDED",
            BaseState::Completed => "COMPLETED",
            BaseState::Cancelled => "CANCELLED",
            BaseState::Failed => "FAILED",
            BaseState::Timeout => "TIMEOUT",
            BaseState::NodeFail => "NODE_FAIL",
            BaseState::Preempted => "PREEMPTED",
            BaseState::BootFail => "BOOT_FAIL",
            BaseState::Deadline => "DEADLINE",
            BaseState::OutOfMemory => "OUT_OF_MEMORY",
            BaseState::End => "END",
        }
    }

    /// Decode base-region bits. `None` for anything at or past `End`.
    pub(crate) const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0 => Some(BaseState::Pending),
            1 => Some(BaseState::Running),
            2 => Some(BaseState::Suspended),
            3 => Some(BaseState::Completed),
            4 => Some(BaseState::Cancelled),
            5 => Some(BaseState::Failed),
            6 => Some(BaseState::Timeout),
            7 => Some(BaseState::NodeFail),
            8 => Some(BaseState::Preempted),
            9 => Some(BaseState::BootFail),
            10 => Some(BaseState::Deadline),
            11 => Some(BaseState::OutOfMemory),
            _ => None,
        }
    }
}

impl fmt::Display for BaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BaseState {
    type Error = StatusError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        match name {
            "PENDING" => Ok(BaseState::Pending),
            "RUNNING" => Ok(BaseState::Running),
            "SUSPENDED" => Ok(BaseState::Suspended),
            "COMPLETED" => Ok(BaseState::Completed),
            "CANCELLED" => Ok(BaseState::Cancelled),
            "FAILED" => Ok(BaseState::Failed),
            "TIMEOUT" => Ok(BaseState::Timeout),
            "NODE_FAIL" => Ok(BaseState::NodeFail),
            "PREEMPTED" => Ok(BaseState::Preempted),
            "BOOT_FAIL" => Ok(BaseState::BootFail),
            "DEADLINE" => Ok(BaseState::Deadline),
            "OUT_OF_MEMORY" => Ok(BaseState::OutOfMemory),
            _ => Err(StatusError::UnknownBaseState(name.to_string())),
        }
    }
}

/// Independently togglable status modifier.
///
/// Each flag occupies a single bit inside [`FLAG_MASK`]. Any subset may be
/// active at once, orthogonal to the base state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum StatusFlag {
    /// Batch launch failed; the job never started.
    LaunchFailed = 0x0000_0100,
    /// Accounting record still has to reach the database.
    UpdateDb = 0x0000_0200,
    /// Job will be requeued after it completes.
    Requeue = 0x0000_0400,
    /// Job will be requeued and held.
    RequeueHold = 0x0000_0800,
    /// Requeued with a special exit code and held.
    SpecialExit = 0x0000_1000,
    /// Allocation is being resized.
    Resizing = 0x0000_2000,
    /// Nodes allocated, waiting for them to boot and configure.
    Configuring = 0x0000_4000,
    /// Execution finished, epilog still running.
    Completing = 0x0000_8000,
    /// Processes stopped with the allocation kept.
    Stopped = 0x0001_0000,
    /// Node reconfiguration failed.
    ReconfigFail = 0x0002_0000,
    /// Waiting on powered-down nodes to come up.
    PowerUpNode = 0x0004_0000,
    /// Sibling allocation revoked (federation).
    Revoked = 0x0008_0000,
    /// Requeued by a federation sibling.
    RequeueFed = 0x0010_0000,
    /// Held pending deletion of its reservation.
    ResvDelHold = 0x0020_0000,
    /// A signal is being delivered to the job.
    Signaling = 0x0040_0000,
    /// Staging output files after execution.
    StageOut = 0x0080_0000,
}

impl StatusFlag {
    /// The known-flags catalogue, in declaration order. Fixed at build
    /// time; the checker classifies any other flag-region bit as a defect.
    pub const ALL: [StatusFlag; 16] = [
        StatusFlag::LaunchFailed,
        StatusFlag::UpdateDb,
        StatusFlag::Requeue,
        StatusFlag::RequeueHold,
        StatusFlag::SpecialExit,
        StatusFlag::Resizing,
        StatusFlag::Configuring,
        StatusFlag::Completing,
        StatusFlag::Stopped,
        StatusFlag::ReconfigFail,
        StatusFlag::PowerUpNode,
        StatusFlag::Revoked,
        StatusFlag::RequeueFed,
        StatusFlag::ResvDelHold,
        StatusFlag::Signaling,
        StatusFlag::StageOut,
    ];

    /// The flag's bit inside [`FLAG_MASK`].
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// Canonical display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusFlag::LaunchFailed => "LAUNCH_FAILED",
            StatusFlag::UpdateDb => "UPDATE_DB",
            StatusFlag::Requeue => "REQUEUE",
            StatusFlag::RequeueHold => "REQUEUE_HOLD",
            StatusFlag::SpecialExit => "SPECIAL_EXIT",
            StatusFlag::Resizing => "RESIZING",
            StatusFlag::Configuring => "CONFIGURING",
            StatusFlag::Completing => "COMPLETING",
            StatusFlag::Stopped => "STOPPED",
            StatusFlag::ReconfigFail => "RECONFIG_FAIL",
            StatusFlag::PowerUpNode => "POWER_UP_NODE",
            StatusFlag::Revoked => "REVOKED",
            StatusFlag::RequeueFed => "REQUEUE_FED",
            StatusFlag::ResvDelHold => "RESV_DEL_HOLD",
            StatusFlag::Signaling => "SIGNALING",
            StatusFlag::StageOut => "STAGE_OUT",
        }
    }
}

impl fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StatusFlag {
    type Error = StatusError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        StatusFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == name)
            .ok_or_else(|| StatusError::UnknownFlag(name.to_string()))
    }
}

/// Packed status value: one [`BaseState`] in the low bits, any subset of
/// [`StatusFlag`] bits above them.
///
/// Design:
/// - This is a plain value; nothing here rejects a malformed encoding.
///   Untrusted input goes through [`StatusValue::try_from_raw`], and every
///   mutation of a job's status is checked by the state module when
///   diagnostics are on.
/// - `with_flag`/`without_flag` touch exactly one bit: the base state and
///   all other flags carry over unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusValue(u32);

impl StatusValue {
    /// A base state with no flags.
    pub const fn new(base: BaseState) -> Self {
        Self(base as u32)
    }

    /// Reinterpret raw bits (wire or storage encoding). Lossless; whether
    /// the bits are legal is the checker's call, not this constructor's.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Strict decode for trust boundaries: rejects an out-of-range base
    /// and any bit outside the known-flags catalogue.
    pub fn try_from_raw(raw: u32) -> Result<Self, StatusError> {
        let value = Self(raw);
        if value.base().is_none() {
            return Err(StatusError::BaseOutOfRange(value.base_bits()));
        }
        let unknown = value.unknown_flag_bits();
        if unknown != 0 {
            return Err(StatusError::UnknownFlagBits(unknown));
        }
        Ok(value)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Base-region bits, taken alone.
    pub const fn base_bits(self) -> u32 {
        self.0 & BASE_MASK
    }

    /// Flag-region bits, taken alone.
    pub const fn flag_bits(self) -> u32 {
        self.0 & FLAG_MASK
    }

    /// The encoded base state. `None` if the base bits are out of range.
    pub const fn base(self) -> Option<BaseState> {
        BaseState::from_bits(self.base_bits())
    }

    /// Flag-region bits left over after clearing every catalogue entry.
    /// Non-zero means the encoding carries bits nobody defined.
    pub(crate) const fn unknown_flag_bits(self) -> u32 {
        let mut rest = self.flag_bits();
        let mut i = 0;
        while i < StatusFlag::ALL.len() {
            let bit = StatusFlag::ALL[i].bit();
            if rest & bit == bit {
                rest &= !bit;
            }
            i += 1;
        }
        rest
    }

    pub const fn has_flag(self, flag: StatusFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Copy with `flag` set.
    pub const fn with_flag(self, flag: StatusFlag) -> Self {
        Self(self.0 | flag.bit())
    }

    /// Copy with `flag` cleared.
    pub const fn without_flag(self, flag: StatusFlag) -> Self {
        Self(self.0 & !flag.bit())
    }

    /// Copy with the base state replaced and every flag kept.
    pub const fn with_base(self, base: BaseState) -> Self {
        Self(self.flag_bits() | base as u32)
    }

    /// Set known flags, in catalogue order.
    pub fn flags(self) -> impl Iterator<Item = StatusFlag> {
        StatusFlag::ALL
            .into_iter()
            .filter(move |flag| self.has_flag(*flag))
    }

    pub const fn is_pending(self) -> bool {
        self.base_bits() == BaseState::Pending as u32
    }

    pub const fn is_running(self) -> bool {
        self.base_bits() == BaseState::Running as u32
    }

    pub const fn is_suspended(self) -> bool {
        self.base_bits() == BaseState::Suspended as u32
    }

    pub const fn is_completed(self) -> bool {
        self.base_bits() == BaseState::Completed as u32
    }

    pub const fn is_cancelled(self) -> bool {
        self.base_bits() == BaseState::Cancelled as u32
    }

    pub const fn is_failed(self) -> bool {
        self.base_bits() == BaseState::Failed as u32
    }

    /// Base state is in the finished family (completed through OOM).
    pub const fn is_terminal(self) -> bool {
        self.base_bits() >= BaseState::Completed as u32 && self.base_bits() < BaseState::End as u32
    }

    pub const fn is_configuring(self) -> bool {
        self.has_flag(StatusFlag::Configuring)
    }

    pub const fn is_completing(self) -> bool {
        self.has_flag(StatusFlag::Completing)
    }

    pub const fn is_requeued(self) -> bool {
        self.has_flag(StatusFlag::Requeue)
    }

    pub const fn is_signaling(self) -> bool {
        self.has_flag(StatusFlag::Signaling)
    }

    pub const fn is_stage_out(self) -> bool {
        self.has_flag(StatusFlag::StageOut)
    }

    pub const fn is_revoked(self) -> bool {
        self.has_flag(StatusFlag::Revoked)
    }

    /// Human-readable form: base name plus every set known flag, in
    /// catalogue order, `+`-joined (e.g. `RUNNING+REQUEUE+SIGNALING`).
    ///
    /// Never fails: an out-of-range base renders as `INVALID(<bits>)` and
    /// unrecognized flag bits are omitted. The audit path renders values
    /// before the checker has ruled on them.
    pub fn describe(self) -> String {
        let mut out = match self.base() {
            Some(base) => base.as_str().to_string(),
            None => format!("INVALID({:#06x})", self.base_bits()),
        };
        for flag in self.flags() {
            out.push('+');
            out.push_str(flag.as_str());
        }
        out
    }
}

impl Default for StatusValue {
    /// Fresh jobs are pending with no flags.
    fn default() -> Self {
        Self::new(BaseState::Pending)
    }
}

impl From<BaseState> for StatusValue {
    fn from(base: BaseState) -> Self {
        Self::new(base)
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
