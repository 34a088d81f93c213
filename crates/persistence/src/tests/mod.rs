// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod session_tests;

use crate::Persistence;
use meal_order_domain::{Role, UserId};

pub fn create_test_user(persistence: &mut Persistence, id: &str, username: &str) -> UserId {
    let user_id = UserId::new(id).expect("valid test user id");
    persistence
        .create_user(&user_id, username, "password123", Role::User)
        .expect("test user created");
    user_id
}
