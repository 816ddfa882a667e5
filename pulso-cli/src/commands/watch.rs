//! Run the background monitor until interrupted.

use anyhow::Result;
use clap::Args;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use crate::config::ConnectArgs;

/// Arguments for the watch command
#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

/// Run the watch command
pub async fn run(args: WatchArgs) -> Result<()> {
    let settings = args.connect.resolve()?;
    let mut monitor = super::build_monitor(&settings).await?;

    let mut events = monitor.subscribe();
    monitor.start();
    info!(url = %settings.monitor.base_url, "watching; press Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(event) => debug!(?event, "monitor event"),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "event stream lagged"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    monitor.stop();
    Ok(())
}
