//! Sorter calibration and timing parameters.
//!
//! Every value here was tuned on the bench against the physical
//! mechanism and sensors. They are compile-time constants; [`SorterConfig`]
//! only bundles them so the service and the boot log see one consistent
//! set. Nothing loads or mutates it at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// --- Sensors ---

/// Debounce window shared by both presence sensors (ms).
pub const DEBOUNCE_MS: u32 = 200;
/// Raw ADC value at which the moisture sensor reads fully wet (100 %).
pub const MOISTURE_RAW_MIN: u16 = 485;
/// Raw ADC value at which the moisture sensor reads fully dry (0 %).
pub const MOISTURE_RAW_MAX: u16 = 1023;
/// Classification threshold: strictly above this is category A (dry).
pub const DRY_THRESHOLD_PERCENT: u8 = 20;
/// Samples averaged per classification.
pub const MOISTURE_SAMPLES: u8 = 3;
/// Settling delay after each moisture sample (ms).
pub const MOISTURE_SAMPLE_INTERVAL_MS: u32 = 75;
/// Upper bound on samples per reading (fixed-capacity sample buffer).
pub const MAX_MOISTURE_SAMPLES: usize = 16;

// --- Actuators ---

/// Diverter stepper speed.
pub const STEPPER_RPM: u16 = 17;
/// Flap servo open / extended angle.
pub const SERVO_OPEN_DEG: u8 = 180;
/// Flap servo closed / rest angle.
pub const SERVO_REST_DEG: u8 = 70;
/// Settle time after every servo write (ms).
pub const SERVO_SETTLE_MS: u32 = 1000;
/// Settle time after every diverter rotation (ms).
pub const DIVERTER_SETTLE_MS: u32 = 1000;
/// Diverter travel for the proximity (welcome) sequence.
pub const WELCOME_ROTATION_DEG: u16 = 240;
/// Diverter travel for category A (dry) items.
pub const DRY_ROTATION_DEG: u16 = 120;
/// Buzzer pitch for every alert.
pub const BUZZER_FREQ_HZ: u32 = 1000;
/// Buzzer duration on proximity.
pub const WELCOME_BEEP_MS: u32 = 1000;
/// Buzzer duration on infrared / wet alert.
pub const CLASSIFY_BEEP_MS: u32 = 500;

// --- Main loop ---

/// Yield per loop iteration so the ESP-IDF idle task can run (ms).
pub const POLL_YIELD_MS: u32 = 10;

/// Bundle of the constants above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorterConfig {
    // --- Sensors ---
    pub debounce_ms: u32,
    pub moisture_raw_min: u16,
    pub moisture_raw_max: u16,
    pub dry_threshold_percent: u8,
    pub moisture_samples: u8,
    pub moisture_sample_interval_ms: u32,

    // --- Diverter ---
    pub stepper_rpm: u16,
    pub welcome_rotation_deg: u16,
    pub dry_rotation_deg: u16,
    pub diverter_settle_ms: u32,

    // --- Flap ---
    pub servo_open_deg: u8,
    pub servo_rest_deg: u8,
    pub servo_settle_ms: u32,

    // --- Buzzer ---
    pub buzzer_freq_hz: u32,
    pub welcome_beep_ms: u32,
    pub classify_beep_ms: u32,

    // --- Timing ---
    pub poll_yield_ms: u32,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            moisture_raw_min: MOISTURE_RAW_MIN,
            moisture_raw_max: MOISTURE_RAW_MAX,
            dry_threshold_percent: DRY_THRESHOLD_PERCENT,
            moisture_samples: MOISTURE_SAMPLES,
            moisture_sample_interval_ms: MOISTURE_SAMPLE_INTERVAL_MS,

            stepper_rpm: STEPPER_RPM,
            welcome_rotation_deg: WELCOME_ROTATION_DEG,
            dry_rotation_deg: DRY_ROTATION_DEG,
            diverter_settle_ms: DIVERTER_SETTLE_MS,

            servo_open_deg: SERVO_OPEN_DEG,
            servo_rest_deg: SERVO_REST_DEG,
            servo_settle_ms: SERVO_SETTLE_MS,

            buzzer_freq_hz: BUZZER_FREQ_HZ,
            welcome_beep_ms: WELCOME_BEEP_MS,
            classify_beep_ms: CLASSIFY_BEEP_MS,

            poll_yield_ms: POLL_YIELD_MS,
        }
    }
}

impl SorterConfig {
    /// Reject combinations the drivers or the mapping cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.moisture_raw_min >= self.moisture_raw_max {
            return Err(Error::Config("moisture raw min must be below raw max"));
        }
        if self.moisture_raw_max > 1023 {
            return Err(Error::Config("moisture raw max exceeds 10-bit range"));
        }
        if self.dry_threshold_percent > 100 {
            return Err(Error::Config("dry threshold above 100%"));
        }
        if self.moisture_samples == 0 || self.moisture_samples as usize > MAX_MOISTURE_SAMPLES {
            return Err(Error::Config("moisture samples out of range"));
        }
        if !crate::drivers::stepper::RPM_RANGE.contains(&self.stepper_rpm) {
            return Err(Error::Config("stepper rpm out of range"));
        }
        if self.servo_open_deg > 180 || self.servo_rest_deg > 180 {
            return Err(Error::Config("servo angle above 180"));
        }
        if self.servo_open_deg == self.servo_rest_deg {
            return Err(Error::Config("servo open and rest angles are equal"));
        }
        Ok(())
    }
}
