// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-day display state for a user's order calendar.
//!
//! The view is always derived from the persisted orders; no client-side
//! mutation history is consulted.
//!
//! ## States
//!
//! - `Locked`: no order, and the date is not orderable
//! - `Orderable`: no order, and the date is orderable
//! - `Ordered`: an order exists, whether or not its cutoff has passed
//!
//! An existing order may always be cancelled. Eligibility only gates new
//! commitments. After a cancellation the day falls back to `Orderable` or
//! `Locked` depending on `now`.

use crate::calendar::OrderWindow;
use crate::eligibility::is_orderable;
use crate::types::{MealId, Order, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::{Date, PrimitiveDateTime};

/// Display state of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DayState {
    Locked,
    Orderable,
    Ordered { meal_id: MealId },
}

impl DayState {
    /// Derives the state for a date from its order (if any) and `now`.
    #[must_use]
    pub fn evaluate(date: Date, now: PrimitiveDateTime, order: Option<MealId>) -> Self {
        match order {
            Some(meal_id) => Self::Ordered { meal_id },
            None if is_orderable(date, now) => Self::Orderable,
            None => Self::Locked,
        }
    }

    /// A new order may be placed.
    #[must_use]
    pub const fn can_place(&self) -> bool {
        matches!(self, Self::Orderable)
    }

    /// The existing order may be cancelled.
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        matches!(self, Self::Ordered { .. })
    }

    /// The meal ordered for this day, if any.
    #[must_use]
    pub const fn meal_id(&self) -> Option<MealId> {
        match self {
            Self::Ordered { meal_id } => Some(*meal_id),
            Self::Locked | Self::Orderable => None,
        }
    }
}

/// One day in the calendar view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: Date,
    pub state: DayState,
    pub is_today: bool,
    pub is_current_week: bool,
}

/// Builds the calendar view for `user_id`.
///
/// Orders for other users and orders outside the window are ignored.
#[must_use]
pub fn build_order_view(
    window: &OrderWindow,
    now: PrimitiveDateTime,
    user_id: &UserId,
    orders: &[Order],
) -> Vec<DayView> {
    let ordered: HashMap<Date, MealId> = orders
        .iter()
        .filter(|order| &order.user_id == user_id && window.contains(order.date))
        .map(|order| (order.date, order.meal_id))
        .collect();

    let today: Date = now.date();

    window
        .days()
        .iter()
        .map(|&date| DayView {
            date,
            state: DayState::evaluate(date, now, ordered.get(&date).copied()),
            is_today: date == today,
            is_current_week: window.is_current_week(date),
        })
        .collect()
}
