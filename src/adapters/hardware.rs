//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the presence inputs, moisture probe, diverter stepper, flap
//! servo, buzzer, and clock, exposing them through [`SensorPort`],
//! [`ActuatorPort`] and [`ClockPort`]. Driver failures are logged and
//! swallowed here: the sequences keep running, and a stuck actuator shows
//! up as wrong mechanism behaviour rather than a halted loop.
//!
//! Generic over the `embedded-hal` pin/PWM/delay types so the firmware
//! plugs in `esp-idf-hal` drivers and the host tests plug in mocks. On
//! non-espidf targets the inputs and buzzer use cfg-gated simulation
//! stubs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::adapters::time::Esp32TimeAdapter;
use crate::app::ports::{ActuatorPort, ClockPort, SensorPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::servo::ServoDriver;
use crate::drivers::stepper::{Direction, StepperDriver};
use crate::sensors::{MoistureProbe, PresenceInputs};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, D, W> {
    presence: PresenceInputs,
    moisture: MoistureProbe,
    stepper: StepperDriver<P, D>,
    servo: ServoDriver<W>,
    buzzer: Buzzer,
    clock: Esp32TimeAdapter,
}

impl<P, D, W> HardwareAdapter<P, D, W>
where
    P: OutputPin,
    D: DelayNs,
    W: SetDutyCycle,
{
    pub fn new(
        presence: PresenceInputs,
        moisture: MoistureProbe,
        stepper: StepperDriver<P, D>,
        servo: ServoDriver<W>,
        buzzer: Buzzer,
        clock: Esp32TimeAdapter,
    ) -> Self {
        Self {
            presence,
            moisture,
            stepper,
            servo,
            buzzer,
            clock,
        }
    }

    pub fn stepper(&self) -> &StepperDriver<P, D> {
        &self.stepper
    }

    pub fn servo(&self) -> &ServoDriver<W> {
        &self.servo
    }

    pub fn buzzer(&self) -> &Buzzer {
        &self.buzzer
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, D, W> SensorPort for HardwareAdapter<P, D, W> {
    fn proximity_active(&mut self) -> bool {
        self.presence.proximity_active()
    }

    fn infrared_active(&mut self) -> bool {
        self.presence.ir_active()
    }

    fn read_moisture_raw(&mut self) -> u16 {
        self.moisture.read_raw()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P, D, W> ActuatorPort for HardwareAdapter<P, D, W>
where
    P: OutputPin,
    D: DelayNs,
    W: SetDutyCycle,
{
    fn rotate_diverter(&mut self, direction: Direction, degrees: u16) {
        if let Err(e) = self.stepper.move_degrees(direction, degrees) {
            warn!("diverter {:?} {}deg failed: {}", direction, degrees, e);
        }
    }

    fn set_flap_angle(&mut self, degrees: u8) {
        if let Err(e) = self.servo.set_angle(degrees) {
            warn!("flap angle {} failed: {}", degrees, e);
        }
    }

    fn tone(&mut self, freq_hz: u32, duration_ms: u32) {
        self.buzzer.tone(freq_hz, duration_ms);
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl<P, D, W> ClockPort for HardwareAdapter<P, D, W> {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.clock.sleep_ms(ms);
    }
}
