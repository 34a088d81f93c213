// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;
use time::macros::date;

use crate::{DomainError, MealId, Role, UserId, format_order_date, parse_order_date};

#[test]
fn test_role_round_trips_through_str() {
    assert_eq!(Role::from_str("user").unwrap(), Role::User);
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Admin.to_string(), "admin");
}

#[test]
fn test_role_parsing_is_case_insensitive() {
    assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("User").unwrap(), Role::User);
}

#[test]
fn test_unknown_role_is_rejected() {
    assert_eq!(
        Role::from_str("chef"),
        Err(DomainError::InvalidRole(String::from("chef")))
    );
}

#[test]
fn test_default_role_is_user() {
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    let role: Role = serde_json::from_str("\"user\"").unwrap();
    assert_eq!(role, Role::User);
}

#[test]
fn test_user_id_rejects_empty() {
    assert!(matches!(UserId::new(""), Err(DomainError::InvalidUserId(_))));
}

#[test]
fn test_user_id_rejects_whitespace() {
    assert!(matches!(
        UserId::new("abc def"),
        Err(DomainError::InvalidUserId(_))
    ));
}

#[test]
fn test_user_id_as_str() {
    let id = UserId::new("rfpce5licpx96jx").unwrap();
    assert_eq!(id.as_str(), "rfpce5licpx96jx");
    assert_eq!(id.to_string(), "rfpce5licpx96jx");
}

#[test]
fn test_meal_id_value() {
    assert_eq!(MealId::new(3).value(), 3);
}

#[test]
fn test_parse_order_date() {
    assert_eq!(parse_order_date("2024-06-11").unwrap(), date!(2024 - 06 - 11));
}

#[test]
fn test_parse_order_date_rejects_garbage() {
    assert!(matches!(
        parse_order_date("11/06/2024"),
        Err(DomainError::DateParseError { .. })
    ));
    assert!(matches!(
        parse_order_date("2024-02-30"),
        Err(DomainError::DateParseError { .. })
    ));
}

#[test]
fn test_format_order_date_pads_components() {
    assert_eq!(
        format_order_date(date!(2024 - 01 - 05)).unwrap(),
        "2024-01-05"
    );
}
