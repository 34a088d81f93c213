// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order operations driven against an in-memory store.

use meal_order_domain::NotOrderableReason;
use time::macros::datetime;

use super::helpers::{bootstrap_admin, create_regular_user, setup_test_persistence};
use crate::{
    ApiError, PlaceOrderRequest, all_orders, cancel_order, list_meals, order_calendar,
    order_history, place_order,
};

fn request(date: &str, meal_id: i32) -> PlaceOrderRequest {
    PlaceOrderRequest {
        date: date.to_string(),
        meal_id,
    }
}

#[test]
fn test_list_meals() {
    let mut persistence = setup_test_persistence();
    let meals = list_meals(&mut persistence).unwrap().meals;
    assert_eq!(meals.len(), 3);
    assert_eq!(meals[0].name, "Grilled Chicken Salad");
}

#[test]
fn test_place_order_and_view_calendar() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);
    let user = create_regular_user(&mut persistence, &admin, "regular.user");
    // Tuesday morning
    let now = datetime!(2024-06-11 09:00:00);

    let placed = place_order(&mut persistence, &user, &request("2024-06-13", 2), now).unwrap();
    assert_eq!(placed.meal_name, "Vegetarian Pasta");
    assert_eq!(placed.date, "2024-06-13");

    let calendar = order_calendar(&mut persistence, &user, now).unwrap();
    assert_eq!(calendar.today, "2024-06-11");
    assert_eq!(calendar.current_week_start, "2024-06-10");
    assert_eq!(calendar.next_week_start, "2024-06-17");
    assert_eq!(calendar.days.len(), 14);
    assert_eq!(calendar.meals.len(), 3);

    let thursday = &calendar.days[3];
    assert_eq!(thursday.date, "2024-06-13");
    assert_eq!(thursday.weekday, "Thursday");
    assert_eq!(thursday.state, "ordered");
    assert_eq!(thursday.meal_name.as_deref(), Some("Vegetarian Pasta"));
    assert!(thursday.can_cancel);
    assert!(!thursday.can_place);
    assert_eq!(thursday.order_cutoff.as_deref(), Some("2024-06-12T21:00:00"));

    let wednesday = &calendar.days[2];
    assert_eq!(wednesday.state, "orderable");

    let saturday = &calendar.days[5];
    assert_eq!(saturday.state, "locked");
    assert!(saturday.order_cutoff.is_none());
}

#[test]
fn test_calendar_ignores_other_users_orders() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);
    let user = create_regular_user(&mut persistence, &admin, "regular.user");
    let now = datetime!(2024-06-11 09:00:00);

    place_order(&mut persistence, &admin, &request("2024-06-14", 1), now).unwrap();

    let calendar = order_calendar(&mut persistence, &user, now).unwrap();
    assert!(calendar.days.iter().all(|d| d.state != "ordered"));
}

#[test]
fn test_place_order_rejects_ineligible_dates() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);
    let now = datetime!(2024-06-10 21:00:00);

    // Tuesday, exactly at Monday's cutoff
    assert_eq!(
        place_order(&mut persistence, &admin, &request("2024-06-11", 1), now),
        Err(ApiError::NotOrderable {
            date: String::from("2024-06-11"),
            reason: NotOrderableReason::PastCutoff,
        })
    );
    assert!(matches!(
        place_order(&mut persistence, &admin, &request("2024-06-15", 1), now),
        Err(ApiError::NotOrderable {
            reason: NotOrderableReason::Weekend,
            ..
        })
    ));
    assert!(matches!(
        place_order(&mut persistence, &admin, &request("2024-06-10", 1), now),
        Err(ApiError::NotOrderable {
            reason: NotOrderableReason::NotInFuture,
            ..
        })
    ));

    assert!(persistence.list_orders(None).unwrap().is_empty());
}

#[test]
fn test_place_order_rejects_bad_input() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);
    let now = datetime!(2024-06-10 09:00:00);

    assert!(matches!(
        place_order(&mut persistence, &admin, &request("June 12", 1), now),
        Err(ApiError::InvalidInput { .. })
    ));
    assert!(matches!(
        place_order(&mut persistence, &admin, &request("2024-06-12", 9), now),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_duplicate_order_is_conflict() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);
    let now = datetime!(2024-06-10 09:00:00);

    place_order(&mut persistence, &admin, &request("2024-06-12", 1), now).unwrap();
    let second = place_order(&mut persistence, &admin, &request("2024-06-12", 3), now);

    let err = second.unwrap_err();
    assert_eq!(
        err,
        ApiError::DuplicateOrder {
            date: String::from("2024-06-12"),
        }
    );
    assert_eq!(err.to_string(), "You already have an order for this date");

    let history = order_history(&mut persistence, &admin).unwrap();
    assert_eq!(history.orders.len(), 1);
    assert_eq!(history.orders[0].meal_id, 1);
}

#[test]
fn test_cancel_after_cutoff_is_allowed() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);

    place_order(
        &mut persistence,
        &admin,
        &request("2024-06-12", 1),
        datetime!(2024-06-10 09:00:00),
    )
    .unwrap();

    let cancelled = cancel_order(&mut persistence, &admin, "2024-06-12").unwrap();
    assert!(cancelled.cancelled);

    // After the cutoff the day falls back to locked
    let calendar = order_calendar(&mut persistence, &admin, datetime!(2024-06-11 22:00:00)).unwrap();
    let wednesday = calendar.days.iter().find(|d| d.date == "2024-06-12").unwrap();
    assert_eq!(wednesday.state, "locked");
}

#[test]
fn test_cancel_absent_order_is_success() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);

    let response = cancel_order(&mut persistence, &admin, "2024-06-12").unwrap();
    assert!(!response.cancelled);
    assert_eq!(response.message, "No order to cancel");
}

#[test]
fn test_place_cancel_replace_round_trip() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);
    let now = datetime!(2024-06-10 09:00:00);

    place_order(&mut persistence, &admin, &request("2024-06-12", 1), now).unwrap();
    cancel_order(&mut persistence, &admin, "2024-06-12").unwrap();
    assert!(order_history(&mut persistence, &admin).unwrap().orders.is_empty());

    place_order(&mut persistence, &admin, &request("2024-06-12", 3), now).unwrap();
    let history = order_history(&mut persistence, &admin).unwrap();
    assert_eq!(history.orders.len(), 1);
    assert_eq!(history.orders[0].meal_name, "Fish and Chips");
}

#[test]
fn test_all_orders_lists_every_user() {
    let mut persistence = setup_test_persistence();
    let admin = bootstrap_admin(&mut persistence);
    let user = create_regular_user(&mut persistence, &admin, "regular.user");
    let now = datetime!(2024-06-10 09:00:00);

    place_order(&mut persistence, &user, &request("2024-06-13", 2), now).unwrap();
    place_order(&mut persistence, &admin, &request("2024-06-12", 1), now).unwrap();

    let listing = all_orders(&mut persistence, &admin).unwrap();
    assert_eq!(listing.total, 2);
    assert_eq!(listing.orders[0].date, "2024-06-12");
    assert_eq!(listing.orders[0].username, "admin.user");
    assert_eq!(listing.orders[1].username, "regular.user");
}
