//! Flap servo driver (standard 50 Hz hobby servo).
//!
//! Absolute angle writes only. Angles are clamped to 0–180° and mapped
//! linearly onto a 544–2400 µs pulse inside the 20 ms frame. The driver
//! does not wait for travel; callers apply their own settle delay.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

/// Pulse width at 0°.
pub const MIN_PULSE_US: u16 = 544;
/// Pulse width at 180°.
pub const MAX_PULSE_US: u16 = 2400;
/// PWM frame length at 50 Hz.
pub const FRAME_US: u16 = 20_000;

/// Pulse width for `angle` (clamped to 180°).
pub fn angle_to_pulse_us(angle: u8) -> u16 {
    let angle = u32::from(angle.min(180));
    let span = u32::from(MAX_PULSE_US - MIN_PULSE_US);
    MIN_PULSE_US + (angle * span / 180) as u16
}

pub struct ServoDriver<P> {
    pwm: P,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: None }
    }

    pub fn set_angle(&mut self, angle: u8) -> Result<(), ActuatorError> {
        let angle = angle.min(180);
        self.pwm
            .set_duty_cycle_fraction(angle_to_pulse_us(angle), FRAME_US)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.angle = Some(angle);
        Ok(())
    }

    /// Last commanded angle, `None` before the first write.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
