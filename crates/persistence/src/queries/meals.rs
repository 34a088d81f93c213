// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Meal catalog queries. The catalog is seeded by migration and read-only.

use diesel::prelude::*;
use diesel::SqliteConnection;
use meal_order_domain::{Meal, MealId};
use tracing::debug;

use crate::diesel_schema::meals;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = meals)]
struct MealRow {
    meal_id: i32,
    name: String,
    description: String,
}

impl From<MealRow> for Meal {
    fn from(row: MealRow) -> Self {
        Self::new(MealId::new(row.meal_id), row.name, row.description)
    }
}

/// Lists every meal, ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_meals(conn: &mut SqliteConnection) -> Result<Vec<Meal>, PersistenceError> {
    let rows: Vec<MealRow> = meals::table
        .select(MealRow::as_select())
        .order_by(meals::meal_id.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded meal catalog");
    Ok(rows.into_iter().map(Meal::from).collect())
}

/// Retrieves one meal.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the meal does not exist.
pub fn get_meal(
    conn: &mut SqliteConnection,
    meal_id: MealId,
) -> Result<Option<Meal>, PersistenceError> {
    Ok(meals::table
        .filter(meals::meal_id.eq(meal_id.value()))
        .select(MealRow::as_select())
        .first(conn)
        .optional()?
        .map(Meal::from))
}
