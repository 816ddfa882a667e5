//! Alert decision policy: cooldown window plus level-change suppression.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::level::{Reading, StressLevel};
use crate::sink::AlertPriority;
use crate::snapshot::StressSnapshot;

/// Alert bookkeeping, scoped to one agent lifetime.
///
/// Restarting the agent resets it; a duplicate alert right after a restart
/// is an accepted tradeoff.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertState {
    last_alerted: Reading,
    last_alerted_at: Option<DateTime<Utc>>,
}

impl Default for AlertState {
    fn default() -> Self {
        Self {
            last_alerted: Reading::Unknown,
            last_alerted_at: None,
        }
    }
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a delivered alert. Call only after the sink accepted it.
    pub fn record_alert(&mut self, reading: Reading, at: DateTime<Utc>) {
        self.last_alerted = reading;
        self.last_alerted_at = Some(at);
    }

    pub fn last_alerted(&self) -> Reading {
        self.last_alerted
    }

    pub fn last_alerted_at(&self) -> Option<DateTime<Utc>> {
        self.last_alerted_at
    }
}

/// Pure decision of whether a snapshot warrants a user-facing alert.
#[derive(Debug, Clone, Copy)]
pub struct AlertPolicy {
    cooldown: TimeDelta,
}

impl AlertPolicy {
    pub fn new(cooldown: Duration) -> Self {
        let cooldown = TimeDelta::from_std(cooldown).unwrap_or(TimeDelta::MAX);
        Self { cooldown }
    }

    /// An alert fires only when all of these hold: the reading is a known
    /// level, the level is Medium or above, it differs from the last
    /// alerted level, and the cooldown has elapsed since the last alert (or
    /// nothing was alerted before). A level pinned unchanged never
    /// re-alerts, regardless of elapsed time.
    pub fn should_alert(&self, state: &AlertState, snapshot: &StressSnapshot) -> bool {
        let level = match snapshot.reading {
            Reading::Level(level) => level,
            Reading::Unknown => return false,
        };
        if level < StressLevel::Medium {
            return false;
        }
        if snapshot.reading == state.last_alerted {
            return false;
        }
        match state.last_alerted_at {
            None => true,
            Some(at) => snapshot.observed_at.signed_duration_since(at) > self.cooldown,
        }
    }
}

/// Content handed to the notification sink for a given level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub title: String,
    pub message: String,
    pub priority: AlertPriority,
}

impl AlertMessage {
    pub fn for_level(level: StressLevel) -> Self {
        match level {
            StressLevel::High => Self {
                title: "High stress detected".into(),
                message: "The monitored stress level is now high.".into(),
                priority: AlertPriority::Urgent,
            },
            StressLevel::Medium => Self {
                title: "Stress level rising".into(),
                message: "The monitored stress level is now medium.".into(),
                priority: AlertPriority::Normal,
            },
            StressLevel::Low => Self {
                title: "Stress level low".into(),
                message: "The monitored stress level is back to low.".into(),
                priority: AlertPriority::Normal,
            },
        }
    }
}
