//! Dry/wet classification of a moisture reading.

use core::fmt;

/// Routing category chosen by the infrared sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Category A: reading strictly above the threshold.
    Dry,
    /// Category B: reading at or below the threshold.
    Wet,
}

/// Strictly-greater comparison: a reading equal to the threshold is wet.
pub fn classify(percent: u8, threshold_percent: u8) -> Category {
    if percent > threshold_percent {
        Category::Dry
    } else {
        Category::Wet
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dry => write!(f, "category A (dry)"),
            Self::Wet => write!(f, "category B (wet)"),
        }
    }
}
