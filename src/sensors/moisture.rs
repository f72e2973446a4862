//! Resistive moisture ("soil") probe on ADC1.
//!
//! The probe reads lower when wet. Raw values are clamped to the bench
//! calibration window and mapped inversely onto 0–100 %:
//!
//! ```text
//!   raw   485 ──────────────── 1023
//!   pct   100 ────────────────    0
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init)
//! and scales the 12-bit result to the 10-bit range the calibration uses.
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::config::MAX_MOISTURE_SAMPLES;

static SIM_MOISTURE_RAW: AtomicU16 = AtomicU16::new(1023);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_moisture_raw(raw: u16) {
    SIM_MOISTURE_RAW.store(raw, Ordering::Relaxed);
}

/// Saturate a raw reading into the calibration window. An empty or
/// inverted window collapses onto `min`.
pub fn clamp_raw(raw: u16, min: u16, max: u16) -> u16 {
    raw.clamp(min, max.max(min))
}

/// Map a raw reading to percent: `min` → 100, `max` → 0, truncating.
///
/// With `max <= min` there is no span to interpolate over: readings at or
/// below `min` are 100 %, anything above is 0 %.
pub fn raw_to_percent(raw: u16, min: u16, max: u16) -> u8 {
    if max <= min {
        return if raw <= min { 100 } else { 0 };
    }
    let clamped = clamp_raw(raw, min, max);
    let span = u32::from(max - min);
    (u32::from(max - clamped) * 100 / span) as u8
}

/// Result of one multi-sample moisture measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoistureReading {
    /// Per-sample percents, in acquisition order.
    pub samples: heapless::Vec<u8, MAX_MOISTURE_SAMPLES>,
    /// Truncating average of `samples`.
    pub percent: u8,
}

impl MoistureReading {
    /// Average the collected samples. Empty input averages to 0.
    pub fn from_samples(samples: heapless::Vec<u8, MAX_MOISTURE_SAMPLES>) -> Self {
        let sum: u32 = samples.iter().map(|&p| u32::from(p)).sum();
        let percent = if samples.is_empty() {
            0
        } else {
            (sum / samples.len() as u32) as u8
        };
        Self { samples, percent }
    }
}

/// ADC-backed moisture probe.
pub struct MoistureProbe {
    _adc_channel: u32,
}

impl MoistureProbe {
    pub fn new(adc_channel: u32) -> Self {
        Self {
            _adc_channel: adc_channel,
        }
    }

    /// One raw sample in the 0–1023 range.
    pub fn read_raw(&self) -> u16 {
        self.read_adc()
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        // 12-bit hardware, 10-bit calibration.
        crate::drivers::hw_init::adc1_read(self._adc_channel) >> 2
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_MOISTURE_RAW.load(Ordering::Relaxed).min(1023)
    }
}
