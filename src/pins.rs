//! GPIO / peripheral pin assignments for the sorter board (ESP32-S3).
//!
//! Single source of truth for the pins the raw ESP-IDF calls touch.
//! Stepper coils and the servo are handed to `esp-idf-hal` drivers as
//! typed peripherals in `main.rs`; their GPIOs are listed here for
//! reference only.
//!
//! | Function        | GPIO      |
//! |-----------------|-----------|
//! | Infrared sensor | 5         |
//! | Proximity switch| 6         |
//! | Flap servo      | 7         |
//! | Stepper IN1–IN4 | 8, 9, 10, 11 |
//! | Buzzer          | 12        |
//! | Moisture sensor | 1 (ADC1_CH0) |

// ---------------------------------------------------------------------------
// Presence sensors (active-low)
// ---------------------------------------------------------------------------

/// Infrared beam-break module. Push-pull output, LOW = object present.
pub const IR_GPIO: i32 = 5;
/// Inductive proximity switch. Open-collector, internal pull-up enabled,
/// LOW = triggered.
pub const PROXIMITY_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Moisture sensor (ADC1)
// ---------------------------------------------------------------------------

/// ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const MOISTURE_ADC_CHANNEL: u32 = 0;

// ---------------------------------------------------------------------------
// Buzzer (passive piezo, LEDC square wave)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 12;
/// LEDC timer reserved for the buzzer. Timer 0 belongs to the servo.
pub const BUZZER_LEDC_TIMER: u32 = 1;
/// LEDC channel reserved for the buzzer. Channel 0 belongs to the servo.
pub const BUZZER_LEDC_CHANNEL: u32 = 1;

// ---------------------------------------------------------------------------
// Servo PWM
// ---------------------------------------------------------------------------

/// Hobby servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
