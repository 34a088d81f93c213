// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion from UTC instants to the service's local wall-clock time.
//!
//! Ordering rules are expressed in local time (the 21:00 cutoff is the
//! canteen's evening, not UTC). The clock is read once per request in UTC
//! and converted here using the declared IANA timezone.

use crate::error::DomainError;
use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns an error if the name is not a known timezone.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Converts a UTC instant into local wall-clock time in `tz`.
///
/// Sub-second precision is dropped; eligibility works at second granularity.
///
/// # Errors
///
/// Returns an error if the instant cannot be represented in either
/// date/time library.
pub fn to_local(instant: OffsetDateTime, tz: Tz) -> Result<PrimitiveDateTime, DomainError> {
    let utc: DateTime<Utc> = Utc
        .timestamp_opt(instant.unix_timestamp(), 0)
        .single()
        .ok_or_else(|| DomainError::InvalidLocalTime {
            reason: format!("Timestamp {} is out of range", instant.unix_timestamp()),
        })?;

    let local: NaiveDateTime = utc.with_timezone(&tz).naive_local();

    // Convert chrono::NaiveDateTime to time::PrimitiveDateTime
    let month: Month = u8::try_from(local.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| DomainError::InvalidLocalTime {
            reason: format!("Invalid month in {local}"),
        })?;
    let day: u8 = u8::try_from(local.day()).map_err(|e| DomainError::InvalidLocalTime {
        reason: format!("Invalid day in {local}: {e}"),
    })?;
    let date: Date = Date::from_calendar_date(local.year(), month, day).map_err(|e| {
        DomainError::InvalidLocalTime {
            reason: format!("Invalid date in {local}: {e}"),
        }
    })?;

    let time_of_day: Time = Time::from_hms(
        u8::try_from(local.hour()).unwrap_or_default(),
        u8::try_from(local.minute()).unwrap_or_default(),
        u8::try_from(local.second()).unwrap_or_default(),
    )
    .map_err(|e| DomainError::InvalidLocalTime {
        reason: format!("Invalid time in {local}: {e}"),
    })?;

    Ok(date.with_time(time_of_day))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_valid_timezone() {
        assert_eq!(parse_timezone("Asia/Ho_Chi_Minh").unwrap(), Tz::Asia__Ho_Chi_Minh);
        assert_eq!(parse_timezone("UTC").unwrap(), Tz::UTC);
    }

    #[test]
    fn test_parse_invalid_timezone() {
        assert_eq!(
            parse_timezone("Invalid/Timezone"),
            Err(DomainError::InvalidTimezone(String::from("Invalid/Timezone")))
        );
    }

    #[test]
    fn test_utc_is_identity() {
        let local = to_local(datetime!(2024-06-10 20:59:59 UTC), Tz::UTC).unwrap();
        assert_eq!(local, datetime!(2024-06-10 20:59:59));
    }

    #[test]
    fn test_positive_offset_crosses_midnight() {
        // UTC+7, no DST
        let local = to_local(datetime!(2024-06-10 18:30:00 UTC), Tz::Asia__Ho_Chi_Minh).unwrap();
        assert_eq!(local, datetime!(2024-06-11 01:30:00));
    }

    #[test]
    fn test_daylight_saving_offset_is_applied() {
        // New York is UTC-4 in June and UTC-5 in January
        let summer = to_local(datetime!(2024-06-11 01:00:00 UTC), Tz::America__New_York).unwrap();
        assert_eq!(summer, datetime!(2024-06-10 21:00:00));

        let winter = to_local(datetime!(2024-01-16 02:00:00 UTC), Tz::America__New_York).unwrap();
        assert_eq!(winter, datetime!(2024-01-15 21:00:00));
    }

    #[test]
    fn test_subsecond_precision_is_dropped() {
        let instant = datetime!(2024-06-10 20:59:59.999 UTC);
        let local = to_local(instant, Tz::UTC).unwrap();
        assert_eq!(local, datetime!(2024-06-10 20:59:59));
    }
}
