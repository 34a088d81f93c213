// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Source of the current instant.
//!
//! Handlers read the clock once per request and pass the instant down.

use time::OffsetDateTime;

pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Wall clock of the host.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that always returns the same instant.
#[cfg(test)]
pub struct FixedClock(pub OffsetDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.0
    }
}
