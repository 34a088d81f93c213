// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order operations.
//!
//! Each operation receives the caller's identity and, where eligibility
//! matters, the local wall-clock `now` read once for the request. The store
//! is the source of truth: every view is rebuilt from a fresh query.

use meal_order_domain::{
    DayState, DayView, Meal, MealId, Order, OrderWindow, build_order_view, build_window,
    check_orderable, format_order_date, is_weekend, order_cutoff, parse_order_date,
};
use meal_order_persistence::{OrderRecord, Persistence};
use std::collections::HashMap;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};
use tracing::{debug, info};

use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::error::ApiError;
use crate::request_response::{
    AdminOrderSummary, AllOrdersResponse, CalendarDay, CalendarResponse, CancelOrderResponse,
    MealInfo, MealsResponse, OrderHistoryResponse, OrderSummary, PlaceOrderRequest,
    PlaceOrderResponse,
};

const LOCAL_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

fn meal_info(meal: &Meal) -> MealInfo {
    MealInfo {
        meal_id: meal.id.value(),
        name: meal.name.clone(),
        description: meal.description.clone(),
    }
}

fn format_local(instant: PrimitiveDateTime) -> Result<String, ApiError> {
    instant
        .format(LOCAL_TIMESTAMP_FORMAT)
        .map_err(|e| ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to format {instant}: {e}"),
        })
}

fn calendar_day(day: &DayView, meal_names: &HashMap<MealId, String>) -> Result<CalendarDay, ApiError> {
    let state: &str = match day.state {
        DayState::Locked => "locked",
        DayState::Orderable => "orderable",
        DayState::Ordered { .. } => "ordered",
    };
    let meal_id: Option<MealId> = day.state.meal_id();
    let order_cutoff: Option<String> = if is_weekend(day.date) {
        None
    } else {
        order_cutoff(day.date).map(format_local).transpose()?
    };

    Ok(CalendarDay {
        date: format_order_date(day.date)?,
        weekday: day.date.weekday().to_string(),
        state: state.to_string(),
        meal_id: meal_id.map(|id| id.value()),
        meal_name: meal_id.and_then(|id| meal_names.get(&id).cloned()),
        can_place: day.state.can_place(),
        can_cancel: day.state.can_cancel(),
        is_today: day.is_today,
        is_current_week: day.is_current_week,
        order_cutoff,
    })
}

/// Lists the meal catalog.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_meals(persistence: &mut Persistence) -> Result<MealsResponse, ApiError> {
    let meals: Vec<Meal> = persistence.list_meals()?;
    Ok(MealsResponse {
        meals: meals.iter().map(meal_info).collect(),
    })
}

/// Builds the caller's order calendar for the window containing `now`.
///
/// # Errors
///
/// Returns an error if the window cannot be built or the store fails.
pub fn order_calendar(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    now: PrimitiveDateTime,
) -> Result<CalendarResponse, ApiError> {
    let window: OrderWindow = build_window(now)?;
    let meals: Vec<Meal> = persistence.list_meals()?;
    let orders: Vec<Order> = persistence
        .list_orders(Some(&actor.user_id))?
        .iter()
        .map(OrderRecord::to_order)
        .collect();

    let view: Vec<DayView> = build_order_view(&window, now, &actor.user_id, &orders);
    let meal_names: HashMap<MealId, String> =
        meals.iter().map(|m| (m.id, m.name.clone())).collect();

    debug!(user_id = %actor.user_id, orders = orders.len(), "Built order calendar");

    Ok(CalendarResponse {
        today: format_order_date(now.date())?,
        current_week_start: format_order_date(window.current_week_start())?,
        next_week_start: format_order_date(window.next_week_start())?,
        days: view
            .iter()
            .map(|day| calendar_day(day, &meal_names))
            .collect::<Result<Vec<_>, _>>()?,
        meals: meals.iter().map(meal_info).collect(),
    })
}

/// Places an order for the caller.
///
/// The date must be orderable at `now` and the meal must exist. A second
/// order for the same day is rejected by the store, not pre-checked here.
///
/// # Errors
///
/// Returns an error if:
/// - The date is malformed
/// - The date is not orderable
/// - The meal does not exist
/// - The caller already has an order for the date
/// - Database operations fail
pub fn place_order(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: &PlaceOrderRequest,
    now: PrimitiveDateTime,
) -> Result<PlaceOrderResponse, ApiError> {
    let date: Date = parse_order_date(&request.date)?;
    check_orderable(date, now)?;

    let meal_id: MealId = MealId::new(request.meal_id);
    let meal: Meal = persistence
        .get_meal(meal_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Meal"),
            message: format!("Meal {meal_id} does not exist"),
        })?;

    let order_id: i64 = persistence.save_order(&actor.user_id, date, meal_id)?;

    info!(user_id = %actor.user_id, date = %request.date, meal_id = %meal_id, "Order placed");

    Ok(PlaceOrderResponse {
        order_id,
        date: format_order_date(date)?,
        meal_id: meal.id.value(),
        meal_name: meal.name,
        message: String::from("Order placed successfully"),
    })
}

/// Cancels the caller's order for `date`.
///
/// Cancellation is allowed at any time, including after the cutoff. A
/// missing order is success with `cancelled: false`.
///
/// # Errors
///
/// Returns an error if the date is malformed or the delete fails.
pub fn cancel_order(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    date: &str,
) -> Result<CancelOrderResponse, ApiError> {
    let date: Date = parse_order_date(date)?;
    let cancelled: bool = persistence.delete_order(&actor.user_id, date)?;

    info!(user_id = %actor.user_id, date = %date, cancelled, "Order cancellation");

    Ok(CancelOrderResponse {
        date: format_order_date(date)?,
        cancelled,
        message: if cancelled {
            String::from("Order cancelled")
        } else {
            String::from("No order to cancel")
        },
    })
}

/// Lists the caller's orders, oldest date first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn order_history(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
) -> Result<OrderHistoryResponse, ApiError> {
    let records: Vec<OrderRecord> = persistence.list_orders(Some(&actor.user_id))?;

    let orders: Vec<OrderSummary> = records
        .into_iter()
        .map(|record| -> Result<OrderSummary, ApiError> {
            Ok(OrderSummary {
                date: format_order_date(record.date)?,
                meal_id: record.meal_id.value(),
                meal_name: record.meal_name,
                ordered_at: record.created_at,
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(OrderHistoryResponse { orders })
}

/// Lists every user's orders. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the query fails.
pub fn all_orders(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
) -> Result<AllOrdersResponse, ApiError> {
    AuthorizationService::authorize_view_all_orders(actor)?;

    let records: Vec<OrderRecord> = persistence.list_orders(None)?;

    let orders: Vec<AdminOrderSummary> = records
        .into_iter()
        .map(|record| -> Result<AdminOrderSummary, ApiError> {
            Ok(AdminOrderSummary {
                user_id: record.user_id.to_string(),
                username: record.username,
                date: format_order_date(record.date)?,
                meal_id: record.meal_id.value(),
                meal_name: record.meal_name,
                ordered_at: record.created_at,
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(AllOrdersResponse {
        total: orders.len(),
        orders,
    })
}
