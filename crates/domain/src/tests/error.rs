// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use crate::{DomainError, NotOrderableReason};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidRole(String::from("owner"));
    assert_eq!(
        format!("{err}"),
        "Invalid role: 'owner'. Must be 'user' or 'admin'"
    );

    let err: DomainError = DomainError::InvalidUserId(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid user id: test");

    let err: DomainError = DomainError::InvalidTimezone(String::from("Mars/Olympus"));
    assert_eq!(format!("{err}"), "Invalid timezone: Mars/Olympus");

    let err: DomainError = DomainError::DateArithmeticOverflow {
        operation: String::from("adding days"),
    };
    assert_eq!(format!("{err}"), "Date arithmetic overflow while adding days");

    let err: DomainError = DomainError::DateParseError {
        date_string: String::from("tomorrow"),
        error: String::from("bad"),
    };
    assert_eq!(format!("{err}"), "Failed to parse date 'tomorrow': bad");
}

#[test]
fn test_not_orderable_display_names_the_rule() {
    let err: DomainError = DomainError::NotOrderable {
        date: date!(2024 - 06 - 11),
        reason: NotOrderableReason::PastCutoff,
    };
    assert_eq!(
        format!("{err}"),
        "Meals for 2024-06-11 cannot be ordered: orders close at 21:00 on the previous day"
    );

    let err: DomainError = DomainError::NotOrderable {
        date: date!(2024 - 06 - 10),
        reason: NotOrderableReason::NotInFuture,
    };
    assert_eq!(
        format!("{err}"),
        "Meals for 2024-06-10 cannot be ordered: the date is not in the future"
    );
}
