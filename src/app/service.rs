//! Sorter service: the hexagonal core.
//!
//! [`SorterService`] owns the debounce state and runtime counters and
//! runs the two handler sequences. All I/O flows through port traits
//! injected at call sites, so the sequences are testable with a fake
//! clock and a recording actuator mock.
//!
//! ```text
//!   SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │     SorterService      │
//! ActuatorPort ◀── │  debounce · sequences  │
//!    ClockPort ◀── └────────────────────────┘
//! ```
//!
//! Every handler runs to completion, blocking delays included, before
//! `poll` returns. The loop is blind to both sensors for that time.

use log::{debug, info};

use crate::config::{MAX_MOISTURE_SAMPLES, SorterConfig};
use crate::drivers::stepper::Direction;
use crate::error::Result;
use crate::sensors::debounce::SensorState;
use crate::sensors::moisture::{MoistureReading, raw_to_percent};

use super::classify::{Category, classify};
use super::events::AppEvent;
use super::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};

/// Which handlers ran during one [`SorterService::poll`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    pub proximity: bool,
    pub infrared: bool,
}

impl PollOutcome {
    pub fn any(&self) -> bool {
        self.proximity || self.infrared
    }
}

/// Runtime counters since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SorterStats {
    pub proximity_sequences: u32,
    pub dry_items: u32,
    pub wet_items: u32,
}

pub struct SorterService {
    config: SorterConfig,
    sensors: SensorState,
    stats: SorterStats,
}

impl SorterService {
    /// Build the service around a calibration set. Rejects anything
    /// [`SorterConfig::validate`] rejects.
    pub fn new(config: SorterConfig) -> Result<Self> {
        config.validate()?;
        let sensors = SensorState::new(config.debounce_ms);
        Ok(Self {
            config,
            sensors,
            stats: SorterStats::default(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Park the flap: one open/close cycle ends at the rest angle.
    pub fn start(&mut self, hw: &mut (impl ActuatorPort + ClockPort), sink: &mut impl EventSink) {
        self.servo_cycle(hw);
        sink.emit(&AppEvent::Started);
        info!(
            "SorterService started (debounce={}ms, threshold={}%)",
            self.config.debounce_ms, self.config.dry_threshold_percent
        );
    }

    // ── Per-iteration polling ─────────────────────────────────

    /// One main-loop iteration: proximity first, then infrared. Both are
    /// checked every time; when both fire they run back to back.
    pub fn poll(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort + ClockPort),
        sink: &mut impl EventSink,
    ) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        let active = hw.proximity_active();
        if self.sensors.proximity.check(active, hw.now_ms()) {
            self.handle_proximity(hw, sink);
            outcome.proximity = true;
        }

        let active = hw.infrared_active();
        if self.sensors.infrared.check(active, hw.now_ms()) {
            self.handle_infrared(hw, sink);
            outcome.infrared = true;
        }

        outcome
    }

    // ── Handler sequences ─────────────────────────────────────

    /// Welcome sequence: beep, swing the diverter out, cycle the flap,
    /// swing back. Net diverter rotation is zero.
    pub fn handle_proximity(&mut self, hw: &mut (impl ActuatorPort + ClockPort), sink: &mut impl EventSink) {
        sink.emit(&AppEvent::ProximityDetected);
        hw.tone(self.config.buzzer_freq_hz, self.config.welcome_beep_ms);

        self.divert_and_return(hw, self.config.welcome_rotation_deg);

        self.stats.proximity_sequences = self.stats.proximity_sequences.wrapping_add(1);
        sink.emit(&AppEvent::ProximitySequenceDone);
    }

    /// Classification sequence: beep, measure, then route dry items via a
    /// short diverter swing or alert and drop wet items straight through.
    pub fn handle_infrared(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort + ClockPort),
        sink: &mut impl EventSink,
    ) -> Category {
        sink.emit(&AppEvent::InfraredDetected);
        hw.tone(self.config.buzzer_freq_hz, self.config.classify_beep_ms);

        let percent = self.read_percentage(hw, self.config.moisture_samples);
        sink.emit(&AppEvent::MoistureMeasured { percent });

        let category = classify(percent, self.config.dry_threshold_percent);
        sink.emit(&AppEvent::Classified(category));

        match category {
            Category::Dry => {
                self.divert_and_return(hw, self.config.dry_rotation_deg);
                self.stats.dry_items = self.stats.dry_items.wrapping_add(1);
            }
            Category::Wet => {
                hw.tone(self.config.buzzer_freq_hz, self.config.classify_beep_ms);
                self.servo_cycle(hw);
                self.stats.wet_items = self.stats.wet_items.wrapping_add(1);
            }
        }

        debug!("stats: {:?}", self.stats);
        category
    }

    // ── Analog reader ─────────────────────────────────────────

    /// Average `samples` moisture readings, settling after each one.
    /// `samples` is bounded to 1..=`MAX_MOISTURE_SAMPLES`.
    pub fn read_moisture(&self, hw: &mut (impl SensorPort + ClockPort), samples: u8) -> MoistureReading {
        let count = usize::from(samples).clamp(1, MAX_MOISTURE_SAMPLES);
        let mut percents = heapless::Vec::<u8, MAX_MOISTURE_SAMPLES>::new();

        for _ in 0..count {
            let raw = hw.read_moisture_raw();
            let pct = raw_to_percent(raw, self.config.moisture_raw_min, self.config.moisture_raw_max);
            // Capacity is MAX_MOISTURE_SAMPLES and count never exceeds it.
            let _ = percents.push(pct);
            hw.sleep_ms(self.config.moisture_sample_interval_ms);
        }

        let reading = MoistureReading::from_samples(percents);
        debug!("moisture samples {:?} -> {}%", reading.samples, reading.percent);
        reading
    }

    pub fn read_percentage(&self, hw: &mut (impl SensorPort + ClockPort), samples: u8) -> u8 {
        self.read_moisture(hw, samples).percent
    }

    // ── Actuator helpers ──────────────────────────────────────

    /// Open then close the flap, settling after each write.
    fn servo_cycle(&self, hw: &mut (impl ActuatorPort + ClockPort)) {
        hw.set_flap_angle(self.config.servo_open_deg);
        hw.sleep_ms(self.config.servo_settle_ms);
        hw.set_flap_angle(self.config.servo_rest_deg);
        hw.sleep_ms(self.config.servo_settle_ms);
    }

    /// Swing the diverter out, cycle the flap, swing back by the same
    /// amount.
    fn divert_and_return(&self, hw: &mut (impl ActuatorPort + ClockPort), degrees: u16) {
        let out = Direction::Clockwise;
        self.rotate_and_settle(hw, out, degrees);
        self.servo_cycle(hw);
        self.rotate_and_settle(hw, out.opposite(), degrees);
    }

    fn rotate_and_settle(&self, hw: &mut (impl ActuatorPort + ClockPort), direction: Direction, degrees: u16) {
        hw.rotate_diverter(direction, degrees);
        hw.sleep_ms(self.config.diverter_settle_ms);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &SorterConfig {
        &self.config
    }

    pub fn sensor_state(&self) -> &SensorState {
        &self.sensors
    }

    pub fn stats(&self) -> SorterStats {
        self.stats
    }
}
