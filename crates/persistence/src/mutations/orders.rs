// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order mutations.
//!
//! The `(user_id, order_date)` unique index is the sole guard against
//! double orders. There is no read-before-write: two concurrent
//! submissions race on the insert and the loser sees `DuplicateOrder`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use meal_order_domain::{MealId, UserId, format_order_date};
use time::Date;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::orders;
use crate::error::PersistenceError;

/// Inserts an order for `user_id` on `date`.
///
/// # Errors
///
/// Returns `DuplicateOrder` if the user already has an order for the date,
/// or a database error for any other failure (including an unknown meal,
/// which violates the foreign key).
pub fn save_order(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    date: Date,
    meal_id: MealId,
) -> Result<i64, PersistenceError> {
    let order_date: String = format_order_date(date)?;

    diesel::insert_into(orders::table)
        .values((
            orders::user_id.eq(user_id.as_str()),
            orders::order_date.eq(&order_date),
            orders::meal_id.eq(meal_id.value()),
        ))
        .execute(conn)
        .map_err(|e| {
            if PersistenceError::is_unique_violation(&e) {
                PersistenceError::DuplicateOrder {
                    user_id: user_id.to_string(),
                    date: order_date.clone(),
                }
            } else {
                PersistenceError::from(e)
            }
        })?;

    let order_id: i64 = get_last_insert_rowid(conn)?;

    info!(order_id, user_id = %user_id, date = %order_date, meal_id = %meal_id, "Order saved");
    Ok(order_id)
}

/// Deletes the order for `user_id` on `date`, if there is one.
///
/// Returns whether a row was removed. A missing order is success.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_order(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    date: Date,
) -> Result<bool, PersistenceError> {
    let order_date: String = format_order_date(date)?;

    let rows_affected: usize = diesel::delete(orders::table)
        .filter(orders::user_id.eq(user_id.as_str()))
        .filter(orders::order_date.eq(&order_date))
        .execute(conn)?;

    info!(user_id = %user_id, date = %order_date, removed = rows_affected > 0, "Order deleted");
    Ok(rows_affected > 0)
}
