//! Side-effecting sinks the agent drives.
//!
//! The OS notification and badge surfaces are external collaborators: the
//! agent requests an update and leaves id and visibility management to the
//! surface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::badge::Badge;
use crate::error::SinkError;

/// Urgency hint forwarded with an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Normal,
    Urgent,
}

/// Delivers a single user-facing alert.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        priority: AlertPriority,
    ) -> Result<(), SinkError>;
}

/// Updates the visual stress indicator. Driven once per poll cycle,
/// whatever the cycle's outcome.
#[async_trait]
pub trait BadgeSink: Send + Sync {
    async fn update(&self, badge: Badge) -> Result<(), SinkError>;
}

/// Notification sink that reports through the log stream.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        priority: AlertPriority,
    ) -> Result<(), SinkError> {
        info!(?priority, "{}: {}", title, message);
        Ok(())
    }
}

/// Badge sink that reports through the log stream.
#[derive(Debug, Default)]
pub struct LogBadge;

#[async_trait]
impl BadgeSink for LogBadge {
    async fn update(&self, badge: Badge) -> Result<(), SinkError> {
        info!(glyph = badge.glyph, color = %badge.color, "badge updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Reading;

    #[tokio::test]
    async fn log_sinks_accept_updates() {
        let notifier = LogNotifier;
        notifier
            .notify("title", "message", AlertPriority::Normal)
            .await
            .unwrap();

        let badge = LogBadge;
        badge.update(Badge::for_reading(Reading::Unknown)).await.unwrap();
    }

    #[test]
    fn priority_serializes_lowercase() {
        let json = serde_json::to_string(&AlertPriority::Urgent).unwrap();
        assert_eq!(json, "\"urgent\"");
    }
}
