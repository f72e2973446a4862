//! Sorter Firmware: Main Entry Point
//!
//! Hexagonal architecture around a single cooperative polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                     LogEventSink              │
//! │  (Sensor + Actuator + Clock)         (EventSink)               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              SorterService (pure logic)                │    │
//! │  │  Debounce · Proximity sequence · Classification        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Watchdog (fed every iteration)                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{OutputPin, PinDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::info;

use sorter::adapters::hardware::HardwareAdapter;
use sorter::adapters::log_sink::LogEventSink;
use sorter::adapters::time::Esp32TimeAdapter;
use sorter::app::ports::ClockPort;
use sorter::app::service::SorterService;
use sorter::config::SorterConfig;
use sorter::drivers::buzzer::Buzzer;
use sorter::drivers::servo::ServoDriver;
use sorter::drivers::stepper::StepperDriver;
use sorter::drivers::{hw_init, watchdog::Watchdog};
use sorter::error::Error;
use sorter::pins;
use sorter::sensors::{MoistureProbe, PresenceInputs};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Sorter v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Calibration ────────────────────────────────────────
    let mut app = SorterService::new(SorterConfig::default())?;
    let config = app.config();
    info!("CONFIG | {}", serde_json::to_string(config)?);
    let (stepper_rpm, poll_yield_ms) = (config.stepper_rpm, config.poll_yield_ms);

    // ── 3. Raw peripherals (inputs, ADC, buzzer LEDC) ─────────
    hw_init::init_peripherals()?;
    let watchdog = Watchdog::new();

    // ── 4. HAL-owned peripherals (stepper coils, servo PWM) ───
    let p = Peripherals::take()?;

    // IN1..IN4 on GPIO8..GPIO11.
    let coils = [
        PinDriver::output(p.pins.gpio8.downgrade_output())?,
        PinDriver::output(p.pins.gpio9.downgrade_output())?,
        PinDriver::output(p.pins.gpio10.downgrade_output())?,
        PinDriver::output(p.pins.gpio11.downgrade_output())?,
    ];
    let stepper = StepperDriver::new(coils, Ets, stepper_rpm).map_err(Error::from)?;
    info!(
        "Diverter stepper: {} rpm, {} us/half-step",
        stepper.rpm(),
        stepper.step_interval()
    );

    // Servo on GPIO7, LEDC timer 0 / channel 0 (timer 1 is the buzzer's).
    let servo_timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::default()
            .frequency(Hertz(pins::SERVO_PWM_FREQ_HZ))
            .resolution(Resolution::Bits14),
    )?;
    let servo_pwm = LedcDriver::new(p.ledc.channel0, &servo_timer, p.pins.gpio7)?;

    // ── 5. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        PresenceInputs::new(pins::PROXIMITY_GPIO, pins::IR_GPIO),
        MoistureProbe::new(pins::MOISTURE_ADC_CHANNEL),
        stepper,
        ServoDriver::new(servo_pwm),
        Buzzer::new()?,
        Esp32TimeAdapter::new(),
    );
    let mut log_sink = LogEventSink::new();

    // ── 6. Park the flap and start polling ────────────────────
    app.start(&mut hw, &mut log_sink);
    watchdog.feed();

    info!("System ready. Entering polling loop.");

    loop {
        let outcome = app.poll(&mut hw, &mut log_sink);
        if outcome.any() {
            let stats = app.stats();
            info!(
                "STATS | welcome={} dry={} wet={} | stepper_pos={} | lines={}",
                stats.proximity_sequences,
                stats.dry_items,
                stats.wet_items,
                hw.stepper().position_steps(),
                log_sink.emitted(),
            );
        }

        watchdog.feed();
        hw.sleep_ms(poll_yield_ms);
    }
}
