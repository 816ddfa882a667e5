//! Stress level taxonomy shared by every component.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete stress level reported by the scoring service.
///
/// Ordered: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    /// All levels, lowest first.
    pub const ALL: [StressLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// Parse a wire label. The scoring service speaks Spanish
    /// (`bajo`/`medio`/`alto`); English labels are accepted as well.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "bajo" | "low" => Some(Self::Low),
            "medio" | "medium" => Some(Self::Medium),
            "alto" | "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Parse the numeric index the service uses (0 = low, 1 = medium,
    /// 2 = high).
    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    /// Key used for this level in the service's distribution maps.
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::Low => "bajo",
            Self::Medium => "medio",
            Self::High => "alto",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified reading: a concrete level, or the sentinel used when no
/// valid reading exists yet (or the last fetch failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum Reading {
    Level(StressLevel),
    Unknown,
}

impl Reading {
    pub fn level(&self) -> Option<StressLevel> {
        match self {
            Self::Level(level) => Some(*level),
            Self::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl From<StressLevel> for Reading {
    fn from(level: StressLevel) -> Self {
        Self::Level(level)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => level.fmt(f),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Per-level probabilities as reported by the service.
///
/// Untrusted input: values are clamped to [0, 1] and missing levels read as
/// zero. The distribution is a faithful passthrough and is not renormalized
/// to sum to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDistribution {
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub medium: f64,
    #[serde(default)]
    pub high: f64,
}

impl LevelDistribution {
    /// Build a distribution, clamping each entry to [0, 1].
    pub fn new(low: f64, medium: f64, high: f64) -> Self {
        Self {
            low: clamp01(low),
            medium: clamp01(medium),
            high: clamp01(high),
        }
    }

    pub fn get(&self, level: StressLevel) -> f64 {
        match level {
            StressLevel::Low => self.low,
            StressLevel::Medium => self.medium,
            StressLevel::High => self.high,
        }
    }

    /// True when every entry is zero.
    pub fn is_empty(&self) -> bool {
        self.low == 0.0 && self.medium == 0.0 && self.high == 0.0
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
