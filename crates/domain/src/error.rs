// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::eligibility::NotOrderableReason;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Role string is not one of the known roles.
    InvalidRole(String),
    /// User identifier is empty or invalid.
    InvalidUserId(String),
    /// Declared timezone is not a valid IANA name.
    InvalidTimezone(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The date cannot be ordered at this moment.
    NotOrderable {
        /// The requested date.
        date: time::Date,
        /// The first rule that failed.
        reason: NotOrderableReason,
    },
    /// A local wall-clock time could not be resolved.
    InvalidLocalTime {
        /// Description of the conversion that failed.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(role) => {
                write!(f, "Invalid role: '{role}'. Must be 'user' or 'admin'")
            }
            Self::InvalidUserId(msg) => write!(f, "Invalid user id: {msg}"),
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::NotOrderable { date, reason } => {
                write!(f, "Meals for {date} cannot be ordered: {reason}")
            }
            Self::InvalidLocalTime { reason } => write!(f, "Invalid local time: {reason}"),
        }
    }
}

impl std::error::Error for DomainError {}
