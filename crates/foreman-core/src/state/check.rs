//! Encoding checks for candidate status values (diagnostic mode only).

use crate::diag::Diagnostics;
use crate::domain::{BaseState, StatusValue};
use crate::ports::Violation;

/// Check that a candidate value decomposes into a legal base state plus a
/// subset of the known-flags catalogue.
///
/// Advisory only: reports to the violation handler and never touches the
/// value. With tracing off this returns immediately.
pub(crate) fn check_status(diag: &Diagnostics, value: StatusValue) {
    if !diag.trace_jobs() {
        return;
    }

    if value.base_bits() >= BaseState::End as u32 {
        diag.report(&Violation::BaseOutOfRange {
            raw: value.base_bits(),
        });
    }

    // Clear every known flag from a copy of the flag region; anything
    // left is a bit nobody defined.
    let rest = value.unknown_flag_bits();
    if rest != 0 {
        diag.report(&Violation::UnknownFlagBits { bits: rest });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::StatusFlag;
    use crate::impls::{RecordingAuditSink, RecordingViolationHandler};

    fn recording_diag() -> (Diagnostics, Arc<RecordingViolationHandler>) {
        let handler = Arc::new(RecordingViolationHandler::new());
        let diag =
            Diagnostics::with_hooks(true, Arc::new(RecordingAuditSink::new()), handler.clone());
        (diag, handler)
    }

    #[rstest]
    #[case::bare(StatusValue::new(BaseState::Pending))]
    #[case::one_flag(StatusValue::new(BaseState::Running).with_flag(StatusFlag::Requeue))]
    #[case::flag_pile(
        StatusValue::new(BaseState::Completed)
            .with_flag(StatusFlag::Completing)
            .with_flag(StatusFlag::UpdateDb)
            .with_flag(StatusFlag::StageOut)
    )]
    fn accepts_legal_values(#[case] value: StatusValue) {
        let (diag, handler) = recording_diag();

        check_status(&diag, value);

        assert!(handler.take().is_empty());
    }

    #[test]
    fn accepts_every_base_with_the_full_flag_set() {
        let (diag, handler) = recording_diag();
        let all_flags = StatusFlag::ALL
            .into_iter()
            .fold(StatusValue::default(), |v, f| v.with_flag(f));

        for base in BaseState::ALL {
            check_status(&diag, all_flags.with_base(base));
        }

        assert!(handler.take().is_empty());
    }

    #[test]
    fn rejects_base_at_or_past_the_marker() {
        let (diag, handler) = recording_diag();

        check_status(&diag, StatusValue::from_raw(BaseState::End as u32));
        check_status(&diag, StatusValue::from_raw(0x007f));

        assert_eq!(
            handler.take(),
            vec![
                Violation::BaseOutOfRange {
                    raw: BaseState::End as u32
                },
                Violation::BaseOutOfRange { raw: 0x007f },
            ]
        );
    }

    #[test]
    fn rejects_one_stray_bit_next_to_known_flags() {
        let (diag, handler) = recording_diag();
        let stray = 0x0400_0000;
        let value = StatusValue::new(BaseState::Running)
            .with_flag(StatusFlag::Requeue)
            .raw()
            | stray;

        check_status(&diag, StatusValue::from_raw(value));

        assert_eq!(handler.take(), vec![Violation::UnknownFlagBits { bits: stray }]);
    }

    #[test]
    fn reports_both_violations_for_a_doubly_bad_value() {
        let (diag, handler) = recording_diag();

        check_status(&diag, StatusValue::from_raw(0x00ff | 0x1000_0000));

        assert_eq!(
            handler.take(),
            vec![
                Violation::BaseOutOfRange { raw: 0x00ff },
                Violation::UnknownFlagBits { bits: 0x1000_0000 },
            ]
        );
    }

    #[test]
    fn disabled_diagnostics_check_nothing() {
        let handler = Arc::new(RecordingViolationHandler::new());
        let diag = Diagnostics::with_hooks(
            false,
            Arc::new(RecordingAuditSink::new()),
            handler.clone(),
        );

        check_status(&diag, StatusValue::from_raw(u32::MAX));

        assert!(handler.take().is_empty());
    }
}
