//! `a2a-tasks` — talk to A2A task protocol agents from the terminal.

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use commands::{execute, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}
