// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod calendar;
mod eligibility;
mod error;
mod local_time;
mod order_view;
mod types;

#[cfg(test)]
mod tests;

pub use calendar::{OrderWindow, WINDOW_DAYS, build_window};
pub use eligibility::{
    NotOrderableReason, ORDER_CUTOFF_HOUR, check_orderable, is_orderable, is_weekend,
    order_cutoff,
};
pub use error::DomainError;
pub use local_time::{parse_timezone, to_local};
pub use order_view::{DayState, DayView, build_order_view};

// Re-export public types
pub use types::{
    Meal, MealId, ORDER_DATE_FORMAT, Order, Role, UserId, format_order_date, parse_order_date,
};

// Timezone type used by `to_local`
pub use chrono_tz::Tz;
