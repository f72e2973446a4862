//! Timestamp debounce for the two presence sensors.
//!
//! Each sensor remembers when it last fired. An active reading only
//! counts as a trigger once more than the window has elapsed since then,
//! so a sensor held active keeps re-triggering once per window
//! (level-based, not single-shot).
//!
//! Time is a `u32` millisecond counter; comparisons use `wrapping_sub`
//! so the counter rolling over after ~49 days does not wedge a sensor.

/// Debounce state for a single active-low input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    last_trigger_ms: u32,
    window_ms: u32,
}

impl Debounce {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            last_trigger_ms: 0,
            window_ms,
        }
    }

    /// Feed one reading. Returns `true` (and records `now_ms`) when the
    /// input is active and the window since the previous trigger has been
    /// exceeded. Inactive or too-early readings leave the state untouched.
    pub fn check(&mut self, active: bool, now_ms: u32) -> bool {
        if active && now_ms.wrapping_sub(self.last_trigger_ms) > self.window_ms {
            self.last_trigger_ms = now_ms;
            return true;
        }
        false
    }

    pub fn last_trigger_ms(&self) -> u32 {
        self.last_trigger_ms
    }
}

/// Debounce state for both presence sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorState {
    pub proximity: Debounce,
    pub infrared: Debounce,
}

impl SensorState {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            proximity: Debounce::new(window_ms),
            infrared: Debounce::new(window_ms),
        }
    }
}
