// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order eligibility rules.
//!
//! A meal for a calendar date may be ordered only when all of the following
//! hold at the evaluation instant `now` (local wall-clock time):
//!
//! - The date (at 00:00:00) is strictly after `now`
//! - The date is a weekday (Monday-Friday)
//! - `now` is strictly before the cutoff: the previous day at 21:00:00
//!
//! ## Invariants
//!
//! - `now` is always supplied by the caller; nothing here reads the clock
//! - The cutoff comparison is exclusive: 21:00:00 itself is too late
//! - Eligibility gates new orders only; cancelling an existing order is
//!   never checked against these rules

use crate::error::DomainError;
use time::{Date, PrimitiveDateTime, Time, Weekday};

/// Hour of the day before the ordered date at which ordering closes.
pub const ORDER_CUTOFF_HOUR: u8 = 21;

/// The first rule that made a date non-orderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotOrderableReason {
    /// The date is today or in the past.
    NotInFuture,
    /// The date falls on a Saturday or Sunday.
    Weekend,
    /// The cutoff on the previous evening has passed.
    PastCutoff,
}

impl std::fmt::Display for NotOrderableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInFuture => write!(f, "the date is not in the future"),
            Self::Weekend => write!(f, "meals are not served on weekends"),
            Self::PastCutoff => write!(
                f,
                "orders close at {ORDER_CUTOFF_HOUR}:00 on the previous day"
            ),
        }
    }
}

/// Returns `true` when the date falls on a Saturday or Sunday.
#[must_use]
pub const fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Returns the last instant (exclusive) at which `date` may be ordered.
///
/// Returns `None` only for the first representable date, which has no
/// previous day.
#[must_use]
pub fn order_cutoff(date: Date) -> Option<PrimitiveDateTime> {
    let previous_day: Date = date.previous_day()?;
    let cutoff_time: Time = Time::from_hms(ORDER_CUTOFF_HOUR, 0, 0).ok()?;
    Some(previous_day.with_time(cutoff_time))
}

/// Checks whether `date` may be ordered at `now`.
///
/// # Errors
///
/// Returns `DomainError::NotOrderable` carrying the first failing rule.
pub fn check_orderable(date: Date, now: PrimitiveDateTime) -> Result<(), DomainError> {
    let reason: Option<NotOrderableReason> = if date.midnight() <= now {
        Some(NotOrderableReason::NotInFuture)
    } else if is_weekend(date) {
        Some(NotOrderableReason::Weekend)
    } else {
        match order_cutoff(date) {
            Some(cutoff) if now < cutoff => None,
            _ => Some(NotOrderableReason::PastCutoff),
        }
    };

    reason.map_or(Ok(()), |reason| {
        Err(DomainError::NotOrderable { date, reason })
    })
}

/// Returns whether a new order for `date` may be placed at `now`.
#[must_use]
pub fn is_orderable(date: Date, now: PrimitiveDateTime) -> bool {
    check_orderable(date, now).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn reason_for(date: Date, now: PrimitiveDateTime) -> Option<NotOrderableReason> {
        match check_orderable(date, now) {
            Ok(()) => None,
            Err(DomainError::NotOrderable { reason, .. }) => Some(reason),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_order_cutoff_is_previous_evening() {
        assert_eq!(
            order_cutoff(date!(2024 - 06 - 11)),
            Some(datetime!(2024-06-10 21:00:00))
        );
    }

    #[test]
    fn test_order_cutoff_crosses_month_boundary() {
        assert_eq!(
            order_cutoff(date!(2024 - 07 - 01)),
            Some(datetime!(2024-06-30 21:00:00))
        );
    }

    #[test]
    fn test_one_second_before_cutoff_is_orderable() {
        // 2024-06-11 is a Tuesday
        assert!(is_orderable(
            date!(2024 - 06 - 11),
            datetime!(2024-06-10 20:59:59)
        ));
    }

    #[test]
    fn test_exactly_at_cutoff_is_rejected() {
        assert_eq!(
            reason_for(date!(2024 - 06 - 11), datetime!(2024-06-10 21:00:00)),
            Some(NotOrderableReason::PastCutoff)
        );
    }

    #[test]
    fn test_next_day_after_evening_cutoff_is_rejected() {
        assert!(!is_orderable(
            date!(2024 - 06 - 11),
            datetime!(2024-06-10 22:30:00)
        ));
    }

    #[test]
    fn test_date_well_beyond_cutoff_is_orderable() {
        // Friday of the following week, ordered on a Monday morning
        assert!(is_orderable(
            date!(2024 - 06 - 21),
            datetime!(2024-06-10 08:00:00)
        ));
    }

    #[test]
    fn test_same_day_is_rejected() {
        assert_eq!(
            reason_for(date!(2024 - 06 - 11), datetime!(2024-06-11 00:00:00)),
            Some(NotOrderableReason::NotInFuture)
        );
        assert_eq!(
            reason_for(date!(2024 - 06 - 11), datetime!(2024-06-11 07:00:00)),
            Some(NotOrderableReason::NotInFuture)
        );
    }

    #[test]
    fn test_past_day_is_rejected() {
        assert_eq!(
            reason_for(date!(2024 - 06 - 03), datetime!(2024-06-11 07:00:00)),
            Some(NotOrderableReason::NotInFuture)
        );
    }

    #[test]
    fn test_weekends_are_never_orderable() {
        let now: PrimitiveDateTime = datetime!(2024-06-03 08:00:00);
        // Saturday and Sunday of the same week, and of the following week
        for day in [
            date!(2024 - 06 - 08),
            date!(2024 - 06 - 09),
            date!(2024 - 06 - 15),
            date!(2024 - 06 - 16),
        ] {
            assert!(is_weekend(day));
            assert_eq!(reason_for(day, now), Some(NotOrderableReason::Weekend));
        }
    }

    #[test]
    fn test_weekend_rule_holds_for_every_hour() {
        let saturday: Date = date!(2024 - 06 - 15);
        let mut day: Date = date!(2024 - 06 - 01);
        while day < saturday {
            for hour in 0..24 {
                let now = day.with_time(Time::from_hms(hour, 0, 0).unwrap());
                assert!(!is_orderable(saturday, now));
                assert!(!is_orderable(saturday.next_day().unwrap(), now));
            }
            day = day.next_day().unwrap();
        }
    }

    #[test]
    fn test_now_at_or_after_date_is_never_orderable() {
        let target: Date = date!(2024 - 06 - 12);
        let mut now: PrimitiveDateTime = target.midnight();
        for _ in 0..48 {
            assert!(!is_orderable(target, now));
            now += time::Duration::hours(1);
        }
    }

    #[test]
    fn test_monday_can_be_ordered_over_the_weekend() {
        // Cutoff for Monday 2024-06-17 is Sunday 21:00
        assert!(is_orderable(
            date!(2024 - 06 - 17),
            datetime!(2024-06-16 20:00:00)
        ));
        assert!(!is_orderable(
            date!(2024 - 06 - 17),
            datetime!(2024-06-16 21:00:00)
        ));
    }

    #[test]
    fn test_first_representable_date_has_no_cutoff() {
        assert_eq!(order_cutoff(Date::MIN), None);
    }

    #[test]
    fn test_not_orderable_error_message() {
        let err = check_orderable(date!(2024 - 06 - 15), datetime!(2024-06-10 08:00:00))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Meals for 2024-06-15 cannot be ordered: meals are not served on weekends"
        );
    }
}
