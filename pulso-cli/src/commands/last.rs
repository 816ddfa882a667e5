//! Print the last persisted state.

use anyhow::Result;
use clap::Args;
use pulso_core::StateStore;

use crate::config::ConnectArgs;

/// Arguments for the last command
#[derive(Debug, Args)]
pub struct LastArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Print the raw JSON record
    #[arg(long)]
    pub json: bool,
}

/// Run the last command
pub async fn run(args: LastArgs) -> Result<()> {
    let data_dir = args.connect.resolve_data_dir()?;
    let store = StateStore::open(&data_dir).await?;

    let Some(state) = store.load().await else {
        println!("no state recorded yet");
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("last check: {}", state.last_check_at);
        println!("reading:    {}", state.snapshot.reading);
        if let Some(total) = state.snapshot.total_observations {
            println!("analyses:   {}", total);
        }
    }
    Ok(())
}
