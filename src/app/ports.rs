//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SorterService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, clock, event sinks) implement
//! these traits. The [`SorterService`](super::service::SorterService)
//! consumes them via generics, so the handler sequences never touch
//! hardware directly and run against fake time in tests.
//!
//! None of these methods return errors: reads are trusted and actuator
//! failures are the adapter's to log.

use crate::drivers::stepper::Direction;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw input levels. Debouncing happens in the domain.
pub trait SensorPort {
    /// Proximity switch currently reads its active (LOW) level.
    fn proximity_active(&mut self) -> bool;

    /// Infrared beam currently reads its active (LOW) level.
    fn infrared_active(&mut self) -> bool;

    /// One moisture sample, 0–1023.
    fn read_moisture_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Rotate the diverter stepper by `degrees`. Blocks until the move
    /// completes.
    fn rotate_diverter(&mut self, direction: Direction, degrees: u16);

    /// Command the flap servo to an absolute angle. Returns immediately.
    fn set_flap_angle(&mut self, degrees: u8);

    /// Start a buzzer tone. Returns immediately.
    fn tone(&mut self, freq_hz: u32, duration_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

pub trait ClockPort {
    /// Milliseconds since boot (monotonic, wraps at `u32::MAX`).
    fn now_ms(&self) -> u32;

    /// Blocking sleep.
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → serial log)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`AppEvent`](super::events::AppEvent)s through this
/// port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
