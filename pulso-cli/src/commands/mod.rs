pub mod check;
pub mod last;
pub mod status;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;
use pulso_core::{LogBadge, LogNotifier, Monitor, StateStore};

use crate::config::Settings;

/// Wire a monitor from resolved settings with the log-backed sinks.
pub async fn build_monitor(settings: &Settings) -> Result<Monitor> {
    let store = Arc::new(StateStore::open(&settings.data_dir).await?);
    let monitor = Monitor::connect(
        settings.monitor.clone(),
        store,
        Arc::new(LogNotifier),
        Arc::new(LogBadge),
    )?;
    Ok(monitor)
}
