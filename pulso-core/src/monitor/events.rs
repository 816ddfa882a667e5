//! Events emitted by the monitor for observers.

use serde::{Deserialize, Serialize};

use crate::level::{Reading, StressLevel};

/// Outcome of monitor activity, broadcast to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorEvent {
    /// A poll cycle finished and its snapshot was persisted.
    CycleCompleted { reading: Reading },
    /// A poll cycle failed; an unknown snapshot was recorded instead.
    CycleFailed { error: String },
    /// An alert was delivered to the notification sink.
    AlertSent { level: StressLevel },
    /// The timer loop exited.
    Stopped,
}
