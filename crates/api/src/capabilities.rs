// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities tell a client which screens to offer. They are advisory
//! only and do not replace the checks in `AuthorizationService`.

use crate::auth::AuthenticatedUser;
use crate::request_response::{Capability, UserCapabilities};
use meal_order_domain::Role;

/// Computes the capabilities of a signed-in user.
#[must_use]
pub const fn compute_capabilities(actor: &AuthenticatedUser) -> UserCapabilities {
    let is_admin: bool = matches!(actor.role, Role::Admin);

    UserCapabilities {
        can_register_users: Capability::from_bool(is_admin),
        can_view_all_orders: Capability::from_bool(is_admin),
        // Every account orders for itself
        can_place_orders: Capability::Allowed,
    }
}
