//! Outbound application events.
//!
//! The [`SorterService`](super::service::SorterService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. `Display`
//! renders the human-readable status line printed on the serial console.

use core::fmt;

use super::classify::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot sequence finished; the flap is at rest.
    Started,

    /// Proximity switch fired; welcome sequence starting.
    ProximityDetected,

    /// Welcome sequence finished; diverter back at its start position.
    ProximitySequenceDone,

    /// IR beam broken; classification starting.
    InfraredDetected,

    /// Averaged moisture percentage for the item under the probe.
    MoistureMeasured { percent: u8 },

    /// Routing decision for the item under the probe.
    Classified(Category),
}

impl fmt::Display for AppEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "Sorter ready, polling sensors"),
            Self::ProximityDetected => write!(f, "Proximity detected -> welcome sequence"),
            Self::ProximitySequenceDone => write!(f, "Proximity sequence done"),
            Self::InfraredDetected => write!(f, "IR detected -> start classification"),
            Self::MoistureMeasured { percent } => write!(f, "AnalogPercent: {}%", percent),
            Self::Classified(c @ Category::Dry) => {
                write!(f, "Classified as {} -> actuate diverter short", c)
            }
            Self::Classified(c @ Category::Wet) => {
                write!(f, "Classified as {} -> alert + single servo action", c)
            }
        }
    }
}
