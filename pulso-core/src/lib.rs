//! pulso-core: background agent watching a remote stress-scoring service.
//!
//! The agent periodically polls the service, folds whatever payload shape
//! comes back into a canonical [`StressSnapshot`], drives a badge surface,
//! decides whether the observer should be alerted, and persists the latest
//! state for external viewers.
//!
//! - **Scheduling** - [`Monitor`] owns the repeating timer and guarantees
//!   single-flight poll cycles
//! - **Normalization** - [`normalize::normalize`] tolerates the service's
//!   payload shapes without ever failing
//! - **Alerting** - [`AlertPolicy`] applies the cooldown and level-change
//!   rules; the caller records delivery
//! - **Presentation** - [`Badge`] maps readings to a glyph and color
//! - **Persistence** - [`StateStore`] holds the latest record with atomic
//!   replace semantics

pub mod alert;
pub mod badge;
pub mod client;
pub mod error;
pub mod level;
pub mod monitor;
pub mod normalize;
pub mod sink;
pub mod snapshot;
pub mod store;

// Re-export key types for convenience
pub use alert::{AlertMessage, AlertPolicy, AlertState};
pub use badge::{Badge, Rgb};
pub use client::{Oracle, OracleClient};
pub use error::{ConfigError, FetchError, PulsoError, SinkError, StoreError};
pub use level::{LevelDistribution, Reading, StressLevel};
pub use monitor::{Monitor, MonitorConfig, MonitorEvent};
pub use sink::{AlertPriority, BadgeSink, LogBadge, LogNotifier, NotificationSink};
pub use snapshot::{PersistedState, StressSnapshot};
pub use store::StateStore;
