// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Canonical textual form of an order date (`YYYY-MM-DD`).
pub const ORDER_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular employee. May order meals for themselves.
    #[default]
    User,
    /// Administrator. May additionally register accounts and see every order.
    Admin,
}

impl Role {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque, stable identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or contains whitespace.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidUserId(String::from(
                "User id cannot be empty",
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidUserId(format!(
                "User id '{value}' contains whitespace"
            )));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a meal in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MealId(i32);

impl MealId {
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for MealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry. Reference data, never owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    pub description: String,
}

impl Meal {
    #[must_use]
    pub const fn new(id: MealId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
        }
    }
}

/// A persisted meal order.
///
/// At most one order exists per `(user_id, date)`. Orders are never updated
/// in place; changing a meal means cancelling and ordering again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub user_id: UserId,
    pub date: Date,
    pub meal_id: MealId,
}

impl Order {
    #[must_use]
    pub const fn new(user_id: UserId, date: Date, meal_id: MealId) -> Self {
        Self {
            user_id,
            date,
            meal_id,
        }
    }
}

/// Parses an order date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_order_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, ORDER_DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats an order date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted (years outside 0..=9999).
pub fn format_order_date(date: Date) -> Result<String, DomainError> {
    date.format(ORDER_DATE_FORMAT)
        .map_err(|e| DomainError::DateParseError {
            date_string: date.to_string(),
            error: e.to_string(),
        })
}
