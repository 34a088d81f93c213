// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings and timestamps as
//! RFC 3339 strings.

use meal_order_domain::Role;

/// API request to create an account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    /// Must equal `password`.
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
    /// Requested role. Ignored for the bootstrap account, which is always
    /// `admin`. Defaults to `user`.
    #[serde(default)]
    pub role: Option<Role>,
}

/// API response for a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignUpResponse {
    pub user_id: String,
    pub username: String,
    pub role: Role,
    /// Present only for the bootstrap account, which is signed in at once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionInfo>,
    pub message: String,
}

/// API request to sign in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// A newly issued session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionInfo {
    /// The session token (opaque).
    pub session_token: String,
    /// Session expiration timestamp (RFC 3339).
    pub expires_at: String,
}

/// API response for a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignInResponse {
    pub user_id: String,
    pub username: String,
    pub role: Role,
    #[serde(flatten)]
    pub session: SessionInfo,
}

/// API response for the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MeResponse {
    pub user_id: String,
    pub username: String,
    pub role: Role,
    pub capabilities: UserCapabilities,
}

/// One entry of the meal catalog.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MealInfo {
    pub meal_id: i32,
    pub name: String,
    pub description: String,
}

/// API response listing the meal catalog.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MealsResponse {
    pub meals: Vec<MealInfo>,
}

/// One day of the order calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarDay {
    pub date: String,
    /// English weekday name.
    pub weekday: String,
    /// `locked`, `orderable`, or `ordered`.
    pub state: String,
    pub meal_id: Option<i32>,
    pub meal_name: Option<String>,
    pub can_place: bool,
    pub can_cancel: bool,
    pub is_today: bool,
    pub is_current_week: bool,
    /// Last instant (local time) at which a new order is accepted.
    pub order_cutoff: Option<String>,
}

/// API response for the order calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarResponse {
    pub today: String,
    pub current_week_start: String,
    pub next_week_start: String,
    pub days: Vec<CalendarDay>,
    pub meals: Vec<MealInfo>,
}

/// API request to place an order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaceOrderRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub meal_id: i32,
}

/// API response for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: i64,
    pub date: String,
    pub meal_id: i32,
    pub meal_name: String,
    pub message: String,
}

/// API response for a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelOrderResponse {
    pub date: String,
    /// `false` when there was no order to cancel.
    pub cancelled: bool,
    pub message: String,
}

/// One of the caller's own orders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderSummary {
    pub date: String,
    pub meal_id: i32,
    pub meal_name: String,
    pub ordered_at: String,
}

/// API response for the caller's order history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderHistoryResponse {
    pub orders: Vec<OrderSummary>,
}

/// One order in the administrator listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdminOrderSummary {
    pub user_id: String,
    pub username: String,
    pub date: String,
    pub meal_id: i32,
    pub meal_name: String,
    pub ordered_at: String,
}

/// API response listing every order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllOrdersResponse {
    pub orders: Vec<AdminOrderSummary>,
    pub total: usize,
}

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as `true`/`false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(value))
    }
}

/// What the signed-in user may do. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserCapabilities {
    pub can_register_users: Capability,
    pub can_view_all_orders: Capability,
    pub can_place_orders: Capability,
}
