// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the meal ordering service.
//!
//! Users, sessions, the meal catalog, and orders live in a single `SQLite`
//! database managed through Diesel. Migrations are embedded in the binary
//! and applied whenever a connection is opened.
//!
//! ## Order Store
//!
//! At most one order exists per `(user, date)`. The rule is enforced by a
//! unique index rather than by checking first, so two racing submissions
//! for the same day always resolve to exactly one row and one
//! `PersistenceError::DuplicateOrder`.
//!
//! ## Testing
//!
//! Tests use `Persistence::new_in_memory()`, which hands out a fresh shared
//! in-memory database per call.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use meal_order_domain::{Meal, MealId, Order, Role, UserId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{OrderRecord, SessionData, UserData};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID so tests
/// never share state.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

impl OrderRecord {
    /// The domain view of this row.
    #[must_use]
    pub fn to_order(&self) -> Order {
        Order::new(self.user_id.clone(), self.date, self.meal_id)
    }
}

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing and switched to WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user account, hashing `password`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` if the name is taken.
    pub fn create_user(
        &mut self,
        user_id: &UserId,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<(), PersistenceError> {
        mutations::users::create_user(&mut self.conn, user_id, username, password, role)
    }

    /// Retrieves a user by username (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: &UserId) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Counts registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    // ========================================================================
    // Session Management
    // ========================================================================

    /// Creates a new session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: &UserId,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token, returning whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<bool, PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions whose `expires_at` is not after `now` (RFC 3339).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Meals
    // ========================================================================

    /// Lists the meal catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_meals(&mut self) -> Result<Vec<Meal>, PersistenceError> {
        queries::meals::list_meals(&mut self.conn)
    }

    /// Retrieves one meal.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_meal(&mut self, meal_id: MealId) -> Result<Option<Meal>, PersistenceError> {
        queries::meals::get_meal(&mut self.conn, meal_id)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Stores an order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateOrder` if the user already ordered for `date`.
    pub fn save_order(
        &mut self,
        user_id: &UserId,
        date: Date,
        meal_id: MealId,
    ) -> Result<i64, PersistenceError> {
        mutations::orders::save_order(&mut self.conn, user_id, date, meal_id)
    }

    /// Removes an order. Returns `false` if there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_order(&mut self, user_id: &UserId, date: Date) -> Result<bool, PersistenceError> {
        mutations::orders::delete_order(&mut self.conn, user_id, date)
    }

    /// Lists one user's orders, or every order when `user_id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_orders(
        &mut self,
        user_id: Option<&UserId>,
    ) -> Result<Vec<OrderRecord>, PersistenceError> {
        queries::orders::list_orders(&mut self.conn, user_id)
    }
}
