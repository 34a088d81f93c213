// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `users`: Account creation
//! - `sessions`: Session creation, activity refresh, and removal
//! - `orders`: Placing and cancelling orders

pub mod orders;
pub mod sessions;
pub mod users;
