//! Poll scheduler and the per-cycle pipeline.

mod config;
mod events;

pub use config::MonitorConfig;
pub use events::MonitorEvent;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::alert::{AlertMessage, AlertPolicy, AlertState};
use crate::badge::Badge;
use crate::client::{Oracle, OracleClient};
use crate::error::{ConfigError, FetchError};
use crate::level::Reading;
use crate::normalize::normalize;
use crate::sink::{BadgeSink, NotificationSink};
use crate::snapshot::{PersistedState, StressSnapshot};
use crate::store::StateStore;

/// Background agent: owns the timer lifecycle and runs the
/// fetch, normalize, present, alert, persist pipeline.
pub struct Monitor {
    pipeline: Arc<Pipeline>,
    poll_interval: Duration,
    worker: Option<Worker>,
}

struct Worker {
    shutdown_tx: watch::Sender<bool>,
    _task: JoinHandle<()>,
}

struct Pipeline {
    oracle: Arc<dyn Oracle>,
    store: Arc<StateStore>,
    notifications: Arc<dyn NotificationSink>,
    badge: Arc<dyn BadgeSink>,
    policy: AlertPolicy,
    /// Held for the whole cycle: doubles as the single-flight gate, so a
    /// timer tick and a manual trigger can never fetch concurrently.
    alert_state: Mutex<AlertState>,
    event_tx: broadcast::Sender<MonitorEvent>,
}

impl Monitor {
    /// Build a monitor against the real HTTP oracle.
    pub fn connect(
        config: MonitorConfig,
        store: Arc<StateStore>,
        notifications: Arc<dyn NotificationSink>,
        badge: Arc<dyn BadgeSink>,
    ) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let oracle = OracleClient::new(config.base_url.clone(), config.request_timeout())
            .map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;
        Self::with_oracle(config, Arc::new(oracle), store, notifications, badge)
    }

    /// Build a monitor against any oracle implementation. Used by tests and
    /// embedders that bring their own transport.
    pub fn with_oracle(
        config: MonitorConfig,
        oracle: Arc<dyn Oracle>,
        store: Arc<StateStore>,
        notifications: Arc<dyn NotificationSink>,
        badge: Arc<dyn BadgeSink>,
    ) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let (event_tx, _) = broadcast::channel(64);

        Ok(Self {
            pipeline: Arc::new(Pipeline {
                oracle,
                store,
                notifications,
                badge,
                policy: AlertPolicy::new(config.cooldown()),
                alert_state: Mutex::new(AlertState::new()),
                event_tx,
            }),
            poll_interval: config.poll_interval(),
            worker: None,
        })
    }

    /// Subscribe to cycle outcomes.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.pipeline.event_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Start the repeating poll: one cycle immediately, then one per
    /// interval. Calling start while running replaces the timer instead of
    /// stacking a second one.
    pub fn start(&mut self) {
        self.stop();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(
            self.pipeline.clone(),
            self.poll_interval,
            shutdown_rx,
        ));

        info!(interval_secs = self.poll_interval.as_secs(), "monitor started");
        self.worker = Some(Worker {
            shutdown_tx,
            _task: task,
        });
    }

    /// Stop the timer. A cycle already in flight finishes and persists its
    /// result, but no further tick is scheduled. No-op when not running.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.shutdown_tx.send(true);
            info!("monitor stopped");
        }
    }

    /// Run one poll cycle outside the timer cadence. When the timer loop is
    /// mid-cycle the call queues behind it; it never starts a second
    /// concurrent fetch.
    pub async fn trigger_now(&self) -> Result<Reading, FetchError> {
        self.pipeline.run_cycle().await
    }

    /// Proxy the oracle's health probe for the viewer.
    pub async fn api_status(&self) -> Result<serde_json::Value, FetchError> {
        self.pipeline.oracle.health().await
    }

    /// Latest persisted record.
    pub async fn last_data(&self) -> Option<PersistedState> {
        self.pipeline.store.load().await
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.shutdown_tx.send(true);
        }
    }
}

async fn run_loop(
    pipeline: Arc<Pipeline>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.changed() => break,
            _ = ticker.tick() => {
                // Not cancellable mid-flight: a shutdown observed during a
                // cycle takes effect after the cycle persists.
                if let Err(e) = pipeline.run_cycle().await {
                    debug!("scheduled cycle failed: {}", e);
                }
            }
        }
    }

    let _ = pipeline.event_tx.send(MonitorEvent::Stopped);
}

impl Pipeline {
    /// One full cycle: fetch, normalize, present, alert, persist.
    ///
    /// Fetch failures are contained: they still produce a snapshot (an
    /// unknown one) that drives the badge and is persisted. The returned
    /// error only reports the outcome to the caller.
    async fn run_cycle(&self) -> Result<Reading, FetchError> {
        let mut alert_state = self.alert_state.lock().await;

        let fetched = self.oracle.stats().await;
        let now = Utc::now();

        let (snapshot, fetch_err) = match fetched {
            Ok(payload) => (normalize(&payload, now), None),
            Err(e) => {
                warn!("stats fetch failed: {}", e);
                (StressSnapshot::unknown(now), Some(e))
            }
        };

        if let Err(e) = self.badge.update(Badge::for_reading(snapshot.reading)).await {
            warn!("badge sink rejected update: {}", e);
        }

        if self.policy.should_alert(&alert_state, &snapshot)
            && let Reading::Level(level) = snapshot.reading
        {
            let alert = AlertMessage::for_level(level);
            match self
                .notifications
                .notify(&alert.title, &alert.message, alert.priority)
                .await
            {
                Ok(()) => {
                    alert_state.record_alert(snapshot.reading, now);
                    let _ = self.event_tx.send(MonitorEvent::AlertSent { level });
                }
                Err(e) => warn!("notification sink rejected alert: {}", e),
            }
        }

        let reading = snapshot.reading;
        let persisted = PersistedState {
            last_check_at: now,
            snapshot,
        };
        if let Err(e) = self.store.save(persisted).await {
            warn!("failed to persist state: {}", e);
        }

        match fetch_err {
            None => {
                let _ = self.event_tx.send(MonitorEvent::CycleCompleted { reading });
                Ok(reading)
            }
            Some(e) => {
                let _ = self.event_tx.send(MonitorEvent::CycleFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
