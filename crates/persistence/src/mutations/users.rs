// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use meal_order_domain::{Role, UserId};
use tracing::info;

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Creates a new user account.
///
/// The password is hashed with bcrypt before it is stored.
///
/// # Errors
///
/// Returns `DuplicateUsername` if the name is taken (case-insensitively),
/// or an error if hashing or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    username: &str,
    password: &str,
    role: Role,
) -> Result<(), PersistenceError> {
    info!(user_id = %user_id, username, role = %role, "Creating user");

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::user_id.eq(user_id.as_str()),
            users::username.eq(username),
            users::password_hash.eq(&password_hash),
            users::role.eq(role.as_str()),
        ))
        .execute(conn)
        .map_err(|e| {
            if PersistenceError::is_unique_violation(&e) {
                PersistenceError::DuplicateUsername(username.to_string())
            } else {
                PersistenceError::from(e)
            }
        })?;

    Ok(())
}
