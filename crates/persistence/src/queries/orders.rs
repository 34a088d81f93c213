// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order listings.
//!
//! Display state is always derived from these rows; nothing is cached.

use diesel::SqliteConnection;
use diesel::prelude::*;
use meal_order_domain::{MealId, UserId, parse_order_date};
use tracing::debug;

use crate::data_models::OrderRecord;
use crate::diesel_schema::{meals, orders, users};
use crate::error::PersistenceError;

type OrderRow = (i64, String, String, String, i32, String, String);

fn to_record(row: OrderRow) -> Result<OrderRecord, PersistenceError> {
    let (order_id, user_id, username, order_date, meal_id, meal_name, created_at) = row;
    Ok(OrderRecord {
        order_id,
        user_id: UserId::new(&user_id)?,
        username,
        date: parse_order_date(&order_date)?,
        meal_id: MealId::new(meal_id),
        meal_name,
        created_at,
    })
}

/// Lists orders, for one user or for everyone.
///
/// Results are sorted by date ascending, then by user ID. Dates are stored
/// as `YYYY-MM-DD`, so text order is calendar order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_orders(
    conn: &mut SqliteConnection,
    user_id: Option<&UserId>,
) -> Result<Vec<OrderRecord>, PersistenceError> {
    let mut query = orders::table
        .inner_join(meals::table)
        .inner_join(users::table)
        .select((
            orders::order_id,
            orders::user_id,
            users::username,
            orders::order_date,
            orders::meal_id,
            meals::name,
            orders::created_at,
        ))
        .order_by((orders::order_date.asc(), orders::user_id.asc()))
        .into_boxed();

    if let Some(user_id) = user_id {
        query = query.filter(orders::user_id.eq(user_id.as_str().to_owned()));
    }

    let rows: Vec<OrderRow> = query.load(conn)?;
    debug!(count = rows.len(), scoped = user_id.is_some(), "Listed orders");

    rows.into_iter().map(to_record).collect()
}
