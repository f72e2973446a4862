//! Mock hardware adapter for integration tests.
//!
//! Implements every hardware-facing port on one struct with a fake clock.
//! Sensor levels and moisture samples are injected by the test; every
//! actuator call and every sleep is recorded in order so tests can assert
//! on the full command history without touching real GPIO/PWM registers.

use std::collections::VecDeque;

use sorter::app::events::AppEvent;
use sorter::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};
use sorter::drivers::stepper::Direction;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    Rotate { direction: Direction, degrees: u16 },
    SetAngle(u8),
    Tone { freq_hz: u32, duration_ms: u32 },
    Sleep(u32),
    ReadMoisture(u16),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    pub now_ms: u32,
    pub proximity: bool,
    pub infrared: bool,
    /// IR additionally reads active while `start <= now_ms < end`.
    pub ir_active_window: Option<(u32, u32)>,
    /// Returned once the queue is drained.
    pub moisture_raw: u16,
    pub moisture_queue: VecDeque<u16>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            // Past the first debounce window so a first trigger is accepted.
            now_ms: 1_000,
            proximity: false,
            infrared: false,
            ir_active_window: None,
            moisture_raw: 1023,
            moisture_queue: VecDeque::new(),
        }
    }

    pub fn advance(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
    }

    pub fn queue_moisture(&mut self, raws: &[u16]) {
        self.moisture_queue.extend(raws.iter().copied());
    }

    /// Actuator calls only, sleeps and sensor reads stripped.
    pub fn actuations(&self) -> Vec<HwCall> {
        self.calls
            .iter()
            .copied()
            .filter(|c| !matches!(c, HwCall::Sleep(_) | HwCall::ReadMoisture(_)))
            .collect()
    }

    /// Signed sum of diverter travel (clockwise positive).
    pub fn net_rotation(&self) -> i32 {
        self.calls
            .iter()
            .map(|c| match c {
                HwCall::Rotate {
                    direction: Direction::Clockwise,
                    degrees,
                } => i32::from(*degrees),
                HwCall::Rotate {
                    direction: Direction::CounterClockwise,
                    degrees,
                } => -i32::from(*degrees),
                _ => 0,
            })
            .sum()
    }

    pub fn last_angle(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::SetAngle(a) => Some(*a),
            _ => None,
        })
    }

    pub fn moisture_reads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::ReadMoisture(_)))
            .count()
    }

    pub fn total_sleep_ms(&self) -> u32 {
        self.calls
            .iter()
            .map(|c| match c {
                HwCall::Sleep(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn proximity_active(&mut self) -> bool {
        self.proximity
    }

    fn infrared_active(&mut self) -> bool {
        let in_window = self
            .ir_active_window
            .is_some_and(|(start, end)| (start..end).contains(&self.now_ms));
        self.infrared || in_window
    }

    fn read_moisture_raw(&mut self) -> u16 {
        let raw = self.moisture_queue.pop_front().unwrap_or(self.moisture_raw);
        self.calls.push(HwCall::ReadMoisture(raw));
        raw
    }
}

impl ActuatorPort for MockHardware {
    fn rotate_diverter(&mut self, direction: Direction, degrees: u16) {
        self.calls.push(HwCall::Rotate { direction, degrees });
    }

    fn set_flap_angle(&mut self, degrees: u8) {
        self.calls.push(HwCall::SetAngle(degrees));
    }

    fn tone(&mut self, freq_hz: u32, duration_ms: u32) {
        self.calls.push(HwCall::Tone {
            freq_hz,
            duration_ms,
        });
    }
}

impl ClockPort for MockHardware {
    fn now_ms(&self) -> u32 {
        self.now_ms
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.calls.push(HwCall::Sleep(ms));
        self.advance(ms);
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Collects rendered event lines exactly as the serial log would print them.
pub struct LogSink {
    pub lines: Vec<String>,
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.events.clear();
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.lines.push(event.to_string());
        self.events.push(*event);
    }
}
