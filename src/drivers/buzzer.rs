//! Passive piezo buzzer driver.
//!
//! `tone()` starts a square wave and returns immediately; a one-shot
//! esp_timer silences it after the requested duration. A new tone while
//! one is still sounding retunes the output and restarts the countdown.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: retunes LEDC via hw_init and arms an `EspTimer` whose
//! callback zeroes the duty.
//! On host/test: tracks the last tone in-memory only.

#[cfg(target_os = "espidf")]
use esp_idf_svc::timer::{EspTaskTimerService, EspTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub freq_hz: u32,
    pub duration_ms: u32,
}

pub struct Buzzer {
    last: Option<Tone>,
    #[cfg(target_os = "espidf")]
    stop_timer: EspTimer<'static>,
}

impl Buzzer {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self, esp_idf_svc::sys::EspError> {
        let service = EspTaskTimerService::new()?;
        let stop_timer = service.timer(crate::drivers::hw_init::buzzer_stop)?;
        Ok(Self {
            last: None,
            stop_timer,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, core::convert::Infallible> {
        Ok(Self { last: None })
    }

    pub fn tone(&mut self, freq_hz: u32, duration_ms: u32) {
        self.start_hw(freq_hz, duration_ms);
        self.last = Some(Tone {
            freq_hz,
            duration_ms,
        });
    }

    #[cfg(target_os = "espidf")]
    fn start_hw(&mut self, freq_hz: u32, duration_ms: u32) {
        use crate::drivers::hw_init;

        if let Err(e) = self.stop_timer.cancel() {
            log::warn!("buzzer: cancel stop timer failed: {}", e);
        }
        hw_init::buzzer_start(freq_hz);
        let after = core::time::Duration::from_millis(u64::from(duration_ms));
        if let Err(e) = self.stop_timer.after(after) {
            log::warn!("buzzer: arm stop timer failed ({}), silencing now", e);
            hw_init::buzzer_stop();
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn start_hw(&mut self, _freq_hz: u32, _duration_ms: u32) {}

    /// Most recent tone request.
    pub fn last_tone(&self) -> Option<Tone> {
        self.last
    }
}
