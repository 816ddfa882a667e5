//! Trigger one poll cycle immediately.

use anyhow::{Context, Result};
use clap::Args;
use pulso_core::Badge;

use crate::config::ConnectArgs;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

/// Run the check command
pub async fn run(args: CheckArgs) -> Result<()> {
    let settings = args.connect.resolve()?;
    let monitor = super::build_monitor(&settings).await?;

    // A failed cycle has already recorded an unknown snapshot; the error
    // here only sets the exit status.
    let reading = monitor.trigger_now().await.context("check failed")?;

    let badge = Badge::for_reading(reading);
    println!("{} stress: {}", badge.glyph, reading);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        check: CheckArgs,
    }

    #[test]
    fn check_args_parse_without_flags() {
        let cli = TestCli::parse_from(["test"]);
        assert!(cli.check.connect.base_url.is_none());
    }
}
