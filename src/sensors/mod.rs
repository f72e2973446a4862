//! Sensor subsystem: presence inputs, their debounce state, and the
//! moisture probe.

pub mod debounce;
pub mod moisture;
pub mod presence;

pub use debounce::{Debounce, SensorState};
pub use moisture::{MoistureProbe, MoistureReading};
pub use presence::PresenceInputs;
