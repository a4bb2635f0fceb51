//! Wall-clock source for synthetic timestamps.
//!
//! The synthesizer reads the clock once per sample, so tests swap in a
//! [`FixedClock`] or a [`TickingClock`] to get deterministic timestamps.

use std::cell::Cell;
use std::time::Duration;

use chrono::Utc;

use crate::model::{Timestamp, TimestampTrait};

pub trait Clock {
    /// Current time as a Unix timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().timestamp_millis()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Returns `start` on the first read and moves forward by `step` on every
/// subsequent read. Simulates execution time passing between samples.
#[derive(Debug)]
pub struct TickingClock {
    next: Cell<Timestamp>,
    step: Duration,
}

impl TickingClock {
    pub fn new(start: Timestamp, step: Duration) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> Timestamp {
        let now = self.next.get();
        self.next.set(now.add(self.step));
        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
