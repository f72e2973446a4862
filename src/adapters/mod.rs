//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                         |
//! |------------|--------------|-------------------------------------|
//! | `hardware` | SensorPort   | GPIO inputs, ADC1                   |
//! |            | ActuatorPort | stepper coils, servo PWM, buzzer    |
//! |            | ClockPort    | delegates to `time`                 |
//! | `log_sink` | EventSink    | Serial log output                   |
//! | `time`     | ClockPort    | ESP32 system timer / FreeRTOS delay |

pub mod hardware;
pub mod log_sink;
pub mod time;
