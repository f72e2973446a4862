//! Proximity switch and infrared beam-break inputs.
//!
//! Both are active-low: the proximity switch pulls its pulled-up input to
//! ground when metal is near; the IR module drives its output low while
//! the beam is broken. This driver only reports the raw level; debouncing
//! lives in [`super::debounce`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads real GPIO levels via hw_init helpers.
//! On host/test: defaults to inactive (HIGH) and can be driven through
//! the `sim_set_*` hooks.

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_PROXIMITY_LOW: AtomicBool = AtomicBool::new(false);
static SIM_IR_LOW: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_proximity_active(active: bool) {
    SIM_PROXIMITY_LOW.store(active, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ir_active(active: bool) {
    SIM_IR_LOW.store(active, Ordering::Relaxed);
}

pub struct PresenceInputs {
    _proximity_gpio: i32,
    _ir_gpio: i32,
}

impl PresenceInputs {
    pub fn new(proximity_gpio: i32, ir_gpio: i32) -> Self {
        Self {
            _proximity_gpio: proximity_gpio,
            _ir_gpio: ir_gpio,
        }
    }

    /// `true` while the proximity input reads LOW.
    #[cfg(target_os = "espidf")]
    pub fn proximity_active(&self) -> bool {
        !hw_init::gpio_read(self._proximity_gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn proximity_active(&self) -> bool {
        SIM_PROXIMITY_LOW.load(Ordering::Relaxed)
    }

    /// `true` while the IR input reads LOW.
    #[cfg(target_os = "espidf")]
    pub fn ir_active(&self) -> bool {
        !hw_init::gpio_read(self._ir_gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn ir_active(&self) -> bool {
        SIM_IR_LOW.load(Ordering::Relaxed)
    }
}
