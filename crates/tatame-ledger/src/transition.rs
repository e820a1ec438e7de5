//! Pure payment-status state machine.
//!
//! `unset/pending → awaiting → confirmed → (after 30 days) pending`, and
//! nothing else. Each operation returns the [`PaymentPatch`] to persist; it
//! never touches the store itself, so every rule here is a plain function of
//! its inputs.

use chrono::NaiveDate;

use tatame_common::error::TatameError;
use tatame_common::models::member::{Member, PaymentPatch, PaymentStatus, Role};
use tatame_common::paydate::PayDate;

/// Days a confirmed payment stays valid before lapsing to pending.
pub const CYCLE_DAYS: i64 = 30;

/// Member-initiated payment signal.
///
/// Valid from `unset` or `pending` only. Stamps today's date — the recorded
/// date is when payment was initiated, not when it is later confirmed.
pub fn initiate(member: &Member, today: NaiveDate) -> Result<PaymentPatch, TatameError> {
    match member.payment_status {
        PaymentStatus::Unset | PaymentStatus::Pending => Ok(PaymentPatch {
            payment_status: PaymentStatus::Awaiting,
            payment_date: Some(PayDate::new(today).to_string()),
        }),
        from => Err(TatameError::InvalidStateTransition {
            action: "initiate payment",
            from,
        }),
    }
}

/// Admin confirmation of an awaiting payment.
///
/// The role gate comes first: a non-admin actor is rejected regardless of the
/// record's current status. The date is left untouched.
pub fn confirm(actor: Role, member: &Member) -> Result<PaymentPatch, TatameError> {
    if !actor.is_admin() {
        return Err(TatameError::Unauthorized);
    }
    match member.payment_status {
        PaymentStatus::Awaiting => Ok(PaymentPatch {
            payment_status: PaymentStatus::Confirmed,
            payment_date: None,
        }),
        from => Err(TatameError::InvalidStateTransition {
            action: "confirm payment",
            from,
        }),
    }
}

/// Lazy expiry check, re-derived on every read for display.
///
/// Lapses a confirmed payment once its date is strictly more than
/// [`CYCLE_DAYS`] calendar days before `as_of`; exactly 30 days old is still
/// valid. A missing or unparseable date means the member is treated as never
/// having paid and is not subject to expiry.
pub fn check_expiry(member: &Member, as_of: NaiveDate) -> Option<PaymentPatch> {
    if member.payment_status != PaymentStatus::Confirmed {
        return None;
    }
    let paid = member.payment_day()?;
    let elapsed = (as_of - paid.date()).num_days();
    (elapsed > CYCLE_DAYS).then_some(PaymentPatch {
        payment_status: PaymentStatus::Pending,
        payment_date: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tatame_common::models::member::Belt;

    fn member(status: PaymentStatus, date: Option<&str>) -> Member {
        Member {
            uid: "u1".into(),
            full_name: "Ana Silva".into(),
            nickname: "Tubarão".into(),
            email: "ana@example.com".into(),
            belt: Belt::Blue,
            birth_year: 1995,
            birth_month: 3,
            birth_day: 12,
            role: Role::Student,
            payment_status: status,
            payment_date: date.map(str::to_string),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn initiate_from_unset_stamps_today() {
        let m = member(PaymentStatus::Unset, None);
        let patch = initiate(&m, day(2024, 1, 10)).unwrap();
        assert_eq!(patch.payment_status, PaymentStatus::Awaiting);
        assert_eq!(patch.payment_date.as_deref(), Some("10/01/2024"));
    }

    #[test]
    fn initiate_reenters_from_pending() {
        let m = member(PaymentStatus::Pending, Some("01/12/2023"));
        let patch = initiate(&m, day(2024, 1, 10)).unwrap();
        assert_eq!(patch.payment_status, PaymentStatus::Awaiting);
        assert_eq!(patch.payment_date.as_deref(), Some("10/01/2024"));
    }

    #[test]
    fn initiate_rejected_while_awaiting_or_confirmed() {
        for status in [PaymentStatus::Awaiting, PaymentStatus::Confirmed] {
            let m = member(status, Some("10/01/2024"));
            let err = initiate(&m, day(2024, 1, 11)).unwrap_err();
            assert!(matches!(
                err,
                TatameError::InvalidStateTransition { from, .. } if from == status
            ));
        }
    }

    #[test]
    fn confirm_keeps_initiation_date() {
        let m = member(PaymentStatus::Awaiting, Some("10/01/2024"));
        let patch = confirm(Role::Admin, &m).unwrap();
        assert_eq!(patch.payment_status, PaymentStatus::Confirmed);
        assert_eq!(patch.payment_date, None);
    }

    #[test]
    fn confirm_requires_admin_regardless_of_status() {
        for status in [
            PaymentStatus::Unset,
            PaymentStatus::Awaiting,
            PaymentStatus::Confirmed,
            PaymentStatus::Pending,
        ] {
            let m = member(status, Some("10/01/2024"));
            let err = confirm(Role::Student, &m).unwrap_err();
            assert!(matches!(err, TatameError::Unauthorized));
        }
    }

    #[test]
    fn confirm_rejected_outside_awaiting() {
        for status in [
            PaymentStatus::Unset,
            PaymentStatus::Confirmed,
            PaymentStatus::Pending,
        ] {
            let m = member(status, None);
            let err = confirm(Role::Admin, &m).unwrap_err();
            assert!(matches!(err, TatameError::InvalidStateTransition { .. }));
        }
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let m = member(PaymentStatus::Confirmed, Some("10/01/2024"));
        // Exactly 30 days later — still valid.
        assert!(check_expiry(&m, day(2024, 2, 9)).is_none());
        // 31 days later — lapsed.
        let patch = check_expiry(&m, day(2024, 2, 10)).unwrap();
        assert_eq!(patch.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn expiry_at_36_days() {
        let m = member(PaymentStatus::Confirmed, Some("10/01/2024"));
        let patch = check_expiry(&m, day(2024, 2, 15)).unwrap();
        assert_eq!(patch.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn expiry_only_applies_to_confirmed() {
        for status in [
            PaymentStatus::Unset,
            PaymentStatus::Awaiting,
            PaymentStatus::Pending,
        ] {
            let m = member(status, Some("01/01/2020"));
            assert!(check_expiry(&m, day(2024, 1, 1)).is_none());
        }
    }

    #[test]
    fn expiry_skipped_without_parseable_date() {
        let missing = member(PaymentStatus::Confirmed, None);
        assert!(check_expiry(&missing, day(2024, 1, 1)).is_none());

        let mangled = member(PaymentStatus::Confirmed, Some("sometime last year"));
        assert!(check_expiry(&mangled, day(2024, 1, 1)).is_none());
    }

    #[test]
    fn expiry_is_idempotent() {
        let mut m = member(PaymentStatus::Confirmed, Some("10/01/2024"));
        let as_of = day(2024, 2, 15);

        let patch = check_expiry(&m, as_of).unwrap();
        m.apply(&patch);
        let once = m.clone();

        // A second pass over the already-lapsed record changes nothing.
        assert!(check_expiry(&m, as_of).is_none());
        assert_eq!(m, once);
    }
}
