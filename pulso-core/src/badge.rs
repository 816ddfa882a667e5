//! Badge presentation: reading to glyph and color.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::level::{Reading, StressLevel};

/// RGB color for the badge surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Short visual indicator for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub glyph: &'static str,
    pub color: Rgb,
}

const GREEN: Rgb = Rgb { r: 0x2e, g: 0xa0, b: 0x43 };
const AMBER: Rgb = Rgb { r: 0xd2, g: 0x99, b: 0x22 };
const RED: Rgb = Rgb { r: 0xf8, g: 0x51, b: 0x49 };
const GRAY: Rgb = Rgb { r: 0x8b, g: 0x94, b: 0x9e };

impl Badge {
    /// Badge for a reading. Total over all four readings; the same reading
    /// always maps to the same badge.
    pub fn for_reading(reading: Reading) -> Self {
        match reading {
            Reading::Level(StressLevel::Low) => Self { glyph: "OK", color: GREEN },
            Reading::Level(StressLevel::Medium) => Self { glyph: "!", color: AMBER },
            Reading::Level(StressLevel::High) => Self { glyph: "!!", color: RED },
            Reading::Unknown => Self { glyph: "?", color: GRAY },
        }
    }
}
