// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use meal_order_domain::{MealId, Role, UserId};
use time::Date;

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: UserId,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: UserId,
    pub created_at: String,
    pub last_activity_at: String,
    /// RFC 3339 UTC timestamp.
    pub expires_at: String,
}

/// A stored order joined with its owner's username and its meal's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: i64,
    pub user_id: UserId,
    pub username: String,
    pub date: Date,
    pub meal_id: MealId,
    pub meal_name: String,
    pub created_at: String,
}
