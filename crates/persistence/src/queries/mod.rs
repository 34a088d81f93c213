// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `users`: Account lookups, counts, and password verification
//! - `sessions`: Session lookup by token
//! - `meals`: The static meal catalog
//! - `orders`: Order listings, optionally scoped to one user

pub mod meals;
pub mod orders;
pub mod sessions;
pub mod users;
