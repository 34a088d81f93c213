// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use meal_order_domain::{Role, UserId};
use meal_order_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{AuthenticatedUser, AuthenticationService, SignUpRequest};

pub const TEST_PASSWORD: &str = "password123";

/// Tuesday 2024-06-11, 09:00 UTC.
pub fn test_now() -> OffsetDateTime {
    datetime!(2024-06-11 09:00:00 UTC)
}

pub fn test_ttl() -> Duration {
    AuthenticationService::DEFAULT_SESSION_TTL
}

pub fn sign_up_request(username: &str) -> SignUpRequest {
    SignUpRequest {
        username: username.to_string(),
        password: String::from(TEST_PASSWORD),
        confirm_password: String::from(TEST_PASSWORD),
        role: None,
    }
}

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates the bootstrap admin and returns it as an authenticated user.
pub fn bootstrap_admin(persistence: &mut Persistence) -> AuthenticatedUser {
    let response = AuthenticationService::sign_up(
        persistence,
        None,
        &sign_up_request("admin.user"),
        test_now(),
        test_ttl(),
    )
    .expect("bootstrap sign-up");
    AuthenticatedUser::new(
        UserId::new(&response.user_id).unwrap(),
        response.username,
        Role::Admin,
    )
}

/// Creates a regular user via the admin and returns it.
pub fn create_regular_user(
    persistence: &mut Persistence,
    admin: &AuthenticatedUser,
    username: &str,
) -> AuthenticatedUser {
    let response = AuthenticationService::sign_up(
        persistence,
        Some(admin),
        &sign_up_request(username),
        test_now(),
        test_ttl(),
    )
    .expect("admin sign-up");
    AuthenticatedUser::new(
        UserId::new(&response.user_id).unwrap(),
        response.username,
        response.role,
    )
}
