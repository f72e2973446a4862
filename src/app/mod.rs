//! Application core: pure domain logic, zero I/O.
//!
//! Debounced polling, the proximity and classification sequences, and
//! the moisture averaging. All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod classify;
pub mod events;
pub mod ports;
pub mod service;
