//! Monotonic nanosecond clock.

use std::time::Instant;

/// Nanoseconds since the owning clock's origin. Only differences taken from
/// the same clock are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u64);

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Clock backed by the platform monotonic counter.
///
/// The origin is captured once at construction; `Instant` already resolves
/// the platform timebase, so there is nothing else to calibrate.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        // u64 nanoseconds cover ~584 years of process lifetime.
        let ns = self.origin.elapsed().as_nanos();
        Timestamp(u64::try_from(ns).unwrap_or(u64::MAX))
    }
}

/// `t1 - t0` in nanoseconds, never less than 1.
pub fn elapsed(t0: Timestamp, t1: Timestamp) -> u64 {
    t1.0.saturating_sub(t0.0).max(1)
}
