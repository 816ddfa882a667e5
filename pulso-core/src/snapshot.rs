//! Normalized snapshot and persisted record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::level::{LevelDistribution, Reading};

/// One normalized reading of the remote stress signal at a point in time.
///
/// Built fresh on every poll and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressSnapshot {
    pub reading: Reading,
    pub distribution: LevelDistribution,
    pub observed_at: DateTime<Utc>,
    /// Number of analyses the service has accumulated, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_observations: Option<u64>,
}

impl StressSnapshot {
    /// Snapshot representing "no valid reading": unknown level, empty
    /// distribution.
    pub fn unknown(observed_at: DateTime<Utc>) -> Self {
        Self {
            reading: Reading::Unknown,
            distribution: LevelDistribution::default(),
            observed_at,
            total_observations: None,
        }
    }
}

/// The single durable record: the fact a check happened plus what it saw.
///
/// Overwritten wholesale on every poll, successful or not — a failed poll
/// still records that a check happened, with an unknown snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub last_check_at: DateTime<Utc>,
    pub snapshot: StressSnapshot,
}
