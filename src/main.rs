// Main entry point for rp-reporter

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use rp_reporter::cli::{Cli, Commands};
use rp_reporter::commands::{handle_init_config, handle_locks, handle_replay};
use rp_reporter::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    debug!("Starting rp-reporter v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Replay(args) => handle_replay(args).await,
        Commands::Locks(args) => handle_locks(args),
        Commands::InitConfig(args) => handle_init_config(args),
    }
}
