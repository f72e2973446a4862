//! Diverter stepper driver (28BYJ-48 geared stepper + ULN2003 array).
//!
//! Four coil outputs driven in the 8-phase half-step sequence. One output
//! shaft revolution is 4096 half-steps. Moves are relative and blocking:
//! the driver sleeps the step interval between phases and releases the
//! coils when the move completes so the motor does not sit energised
//! between events.
//!
//! Generic over `embedded-hal` so the same code drives `esp-idf-hal`
//! `PinDriver`s on target and recording mocks on the host.

use core::ops::RangeInclusive;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::error::ActuatorError;

/// Half-steps per output shaft revolution.
pub const STEPS_PER_REV: u32 = 4096;

/// Speeds the 28BYJ-48 can follow without skipping.
pub const RPM_RANGE: RangeInclusive<u16> = 6..=24;

/// Half-step coil pattern, IN1..IN4.
const HALF_STEP: [[bool; 4]; 8] = [
    [true, false, false, false],
    [true, true, false, false],
    [false, true, false, false],
    [false, true, true, false],
    [false, false, true, false],
    [false, false, true, true],
    [false, false, false, true],
    [true, false, false, true],
];

/// Rotation direction, as seen facing the output shaft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Whole half-steps for a rotation of `degrees` (truncating).
pub fn degrees_to_steps(degrees: u16) -> u32 {
    u32::from(degrees) * STEPS_PER_REV / 360
}

/// Microseconds between half-steps at `rpm`.
pub fn step_interval_us(rpm: u16) -> u32 {
    60_000_000 / (STEPS_PER_REV * u32::from(rpm.max(1)))
}

pub struct StepperDriver<P, D> {
    coils: [P; 4],
    delay: D,
    rpm: u16,
    step_interval_us: u32,
    phase: usize,
    position_steps: i32,
}

impl<P: OutputPin, D: DelayNs> StepperDriver<P, D> {
    pub fn new(coils: [P; 4], delay: D, rpm: u16) -> Result<Self, ActuatorError> {
        let mut driver = Self {
            coils,
            delay,
            rpm: 0,
            step_interval_us: 0,
            phase: 0,
            position_steps: 0,
        };
        driver.set_rpm(rpm)?;
        driver.release()?;
        Ok(driver)
    }

    pub fn set_rpm(&mut self, rpm: u16) -> Result<(), ActuatorError> {
        if !RPM_RANGE.contains(&rpm) {
            return Err(ActuatorError::InvalidRpm(rpm));
        }
        self.rpm = rpm;
        self.step_interval_us = step_interval_us(rpm);
        Ok(())
    }

    /// Rotate by `degrees` in `direction`, then release the coils.
    /// Returns the number of half-steps taken.
    pub fn move_degrees(&mut self, direction: Direction, degrees: u16) -> Result<u32, ActuatorError> {
        let steps = degrees_to_steps(degrees);
        for _ in 0..steps {
            self.step(direction)?;
        }
        self.release()?;
        Ok(steps)
    }

    /// Advance one half-step and wait the step interval.
    pub fn step(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        self.phase = match direction {
            Direction::Clockwise => (self.phase + 1) % HALF_STEP.len(),
            Direction::CounterClockwise => (self.phase + HALF_STEP.len() - 1) % HALF_STEP.len(),
        };
        self.energise(HALF_STEP[self.phase])?;
        self.position_steps += match direction {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        };
        self.delay.delay_us(self.step_interval_us);
        Ok(())
    }

    /// De-energise all coils.
    pub fn release(&mut self) -> Result<(), ActuatorError> {
        self.energise([false; 4])
    }

    fn energise(&mut self, pattern: [bool; 4]) -> Result<(), ActuatorError> {
        for (coil, &on) in self.coils.iter_mut().zip(pattern.iter()) {
            coil.set_state(PinState::from(on))
                .map_err(|_| ActuatorError::GpioWriteFailed)?;
        }
        Ok(())
    }

    pub fn rpm(&self) -> u16 {
        self.rpm
    }

    pub fn step_interval(&self) -> u32 {
        self.step_interval_us
    }

    /// Net half-steps since construction (CW positive).
    pub fn position_steps(&self) -> i32 {
        self.position_steps
    }
}
