//! Time-of-day source for the wake greeting.
//!
//! The interpreter only needs the local hour.  Injecting it keeps the state
//! machine deterministic under test.

use chrono::Timelike;

/// Source of the current local hour (0–23).
pub trait Clock: Send {
    fn hour(&self) -> u32;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Clock stuck at a given hour.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.0
    }
}
