// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so lifecycle-timestamp logic can be tested without sleeping.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Source of the current time. Production code uses [`SystemClock`]; tests use
/// [`FakeClock`] to assert set-if-absent timestamp behaviour deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time via [`chrono::Utc::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Useful for asserting that a
/// lifecycle timestamp was set exactly once and never overwritten on replay.
#[derive(Debug)]
pub struct FakeClock {
    current: Mutex<DateTime<Utc>>,
}

impl FakeClock {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        #[allow(clippy::unwrap_used)]
        {
            *self.current.lock().unwrap() = at;
        }
    }

    pub fn advance(&self, by: Duration) {
        #[allow(clippy::unwrap_used)]
        {
            let mut guard = self.current.lock().unwrap();
            *guard += chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        }
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        #[allow(clippy::unwrap_used)]
        {
            *self.current.lock().unwrap()
        }
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
