use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pulso", about = "Watchdog for a remote stress-scoring service")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the background monitor until interrupted
    Watch(commands::watch::WatchArgs),
    /// Trigger one poll cycle immediately
    Check(commands::check::CheckArgs),
    /// Print the last persisted state
    Last(commands::last::LastArgs),
    /// Query the scoring service health endpoint
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Watch(args) => commands::watch::run(args).await,
        Commands::Check(args) => commands::check::run(args).await,
        Commands::Last(args) => commands::last::run(args).await,
        Commands::Status(args) => commands::status::run(args).await,
    }
}
