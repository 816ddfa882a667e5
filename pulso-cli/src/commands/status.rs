//! Query the scoring service health endpoint.

use anyhow::{Context, Result};
use clap::Args;
use pulso_core::{Oracle, OracleClient};

use crate::config::ConnectArgs;

/// Arguments for the status command
#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Fetch the detailed status payload instead of the health probe
    #[arg(long)]
    pub full: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let settings = args.connect.resolve()?;
    let client = OracleClient::new(
        settings.monitor.base_url.clone(),
        settings.monitor.request_timeout(),
    )?;

    let payload = if args.full {
        client.status().await
    } else {
        client.health().await
    }
    .context("scoring service is unreachable")?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        status: StatusArgs,
    }

    #[test]
    fn status_args_parse_full_flag() {
        let cli = TestCli::parse_from(["test", "--full"]);
        assert!(cli.status.full);
    }

    #[test]
    fn status_args_default_to_health_probe() {
        let cli = TestCli::parse_from(["test"]);
        assert!(!cli.status.full);
    }
}
