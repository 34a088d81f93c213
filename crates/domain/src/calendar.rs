// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Two-week ordering window.
//!
//! The window shown to a user is the current week followed by the next week,
//! fourteen consecutive days starting on the Monday of the week containing
//! `now`. It is recomputed from `now` on every request and never stored.

use crate::error::DomainError;
use time::{Date, Duration, PrimitiveDateTime};

/// Number of days in the ordering window.
pub const WINDOW_DAYS: usize = 14;

/// The current and next week, Monday-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWindow {
    current_week_start: Date,
    next_week_start: Date,
    days: Vec<Date>,
}

impl OrderWindow {
    /// Monday of the week containing `now`.
    #[must_use]
    pub const fn current_week_start(&self) -> Date {
        self.current_week_start
    }

    /// Monday of the following week.
    #[must_use]
    pub const fn next_week_start(&self) -> Date {
        self.next_week_start
    }

    /// Sunday closing the window.
    #[must_use]
    pub fn last_day(&self) -> Date {
        self.days
            .last()
            .copied()
            .unwrap_or(self.current_week_start)
    }

    /// All fourteen days in ascending order.
    #[must_use]
    pub fn days(&self) -> &[Date] {
        &self.days
    }

    /// Returns whether `date` falls in the first of the two weeks.
    #[must_use]
    pub fn is_current_week(&self, date: Date) -> bool {
        date >= self.current_week_start && date < self.next_week_start
    }

    /// Returns whether `date` is inside the window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.current_week_start && date <= self.last_day()
    }
}

/// Builds the two-week window for `now`.
///
/// Only the calendar date of `now` matters; any two instants on the same day
/// produce the same window.
///
/// # Errors
///
/// Returns an error if the window would leave the representable date range.
pub fn build_window(now: PrimitiveDateTime) -> Result<OrderWindow, DomainError> {
    let today: Date = now.date();
    let offset: i64 = i64::from(today.weekday().number_days_from_monday());

    let current_week_start: Date = today
        .checked_sub(Duration::days(offset))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("finding the start of the week containing {today}"),
        })?;

    let mut days: Vec<Date> = Vec::with_capacity(WINDOW_DAYS);
    let mut current: Date = current_week_start;
    days.push(current);
    while days.len() < WINDOW_DAYS {
        current = current
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("extending the order window past {current}"),
            })?;
        days.push(current);
    }

    let next_week_start: Date = days[7];

    Ok(OrderWindow {
        current_week_start,
        next_week_start,
        days,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::Weekday;
    use time::macros::{date, datetime};

    #[test]
    fn test_window_starts_on_monday_midweek() {
        // Wednesday
        let window = build_window(datetime!(2024-06-12 13:45:00)).unwrap();
        assert_eq!(window.current_week_start(), date!(2024 - 06 - 10));
        assert_eq!(window.next_week_start(), date!(2024 - 06 - 17));
        assert_eq!(window.last_day(), date!(2024 - 06 - 23));
    }

    #[test]
    fn test_window_on_monday_starts_same_day() {
        let window = build_window(datetime!(2024-06-10 00:00:00)).unwrap();
        assert_eq!(window.current_week_start(), date!(2024 - 06 - 10));
    }

    #[test]
    fn test_window_on_sunday_belongs_to_previous_monday() {
        let window = build_window(datetime!(2024-06-16 23:59:59)).unwrap();
        assert_eq!(window.current_week_start(), date!(2024 - 06 - 10));
        assert_eq!(window.next_week_start(), date!(2024 - 06 - 17));
    }

    #[test]
    fn test_window_is_fourteen_consecutive_days_from_monday() {
        let mut now: PrimitiveDateTime = datetime!(2023-12-20 06:00:00);
        // Sweep across a year boundary and a leap day
        for _ in 0..90 {
            let window = build_window(now).unwrap();
            let days = window.days();
            assert_eq!(days.len(), WINDOW_DAYS);
            assert_eq!(days[0].weekday(), Weekday::Monday);
            for pair in days.windows(2) {
                assert_eq!(pair[0].next_day(), Some(pair[1]));
            }
            assert!(window.contains(now.date()));
            assert!(window.is_current_week(now.date()));
            now += Duration::days(1);
        }
    }

    #[test]
    fn test_window_ignores_time_of_day() {
        let morning = build_window(datetime!(2024-02-28 00:00:01)).unwrap();
        let evening = build_window(datetime!(2024-02-28 23:59:59)).unwrap();
        assert_eq!(morning, evening);
    }

    #[test]
    fn test_current_week_membership() {
        let window = build_window(datetime!(2024-06-12 09:00:00)).unwrap();
        assert!(window.is_current_week(date!(2024 - 06 - 16)));
        assert!(!window.is_current_week(date!(2024 - 06 - 17)));
        assert!(!window.contains(date!(2024 - 06 - 24)));
        assert!(!window.contains(date!(2024 - 06 - 09)));
    }

    #[test]
    fn test_window_overflow_at_max_date() {
        let result = build_window(Date::MAX.midnight());
        assert!(matches!(
            result,
            Err(DomainError::DateArithmeticOverflow { .. })
        ));
    }
}
