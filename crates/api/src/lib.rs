// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the meal ordering service.
//!
//! Operations here are transport-agnostic: they take a `Persistence`, the
//! caller's identity, and request DTOs, and return response DTOs or an
//! `ApiError`. The HTTP server maps these onto routes and status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod credential_policy;
mod error;
mod orders;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedUser, AuthenticationService, AuthorizationService, INVALID_CREDENTIALS_MESSAGE,
};
pub use capabilities::compute_capabilities;
pub use credential_policy::{CredentialPolicy, ValidationError};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use orders::{
    all_orders, cancel_order, list_meals, order_calendar, order_history, place_order,
};
pub use request_response::{
    AdminOrderSummary, AllOrdersResponse, CalendarDay, CalendarResponse, CancelOrderResponse,
    Capability, MeResponse, MealInfo, MealsResponse, OrderHistoryResponse, OrderSummary,
    PlaceOrderRequest, PlaceOrderResponse, SessionInfo, SignInRequest, SignInResponse,
    SignUpRequest, SignUpResponse, UserCapabilities,
};

/// Describes the signed-in user and what they may do.
#[must_use]
pub fn current_user(actor: &AuthenticatedUser) -> MeResponse {
    MeResponse {
        user_id: actor.user_id.to_string(),
        username: actor.username.clone(),
        role: actor.role,
        capabilities: compute_capabilities(actor),
    }
}
