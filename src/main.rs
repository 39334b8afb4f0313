#![warn(clippy::pedantic)]

use anyhow::{bail, Result};
use clap::Parser;

mod approve;
mod cli;
mod constants;
mod event;
#[cfg(test)]
mod fixtures;
mod octocrab_utils;
mod runner;
mod server;
mod traits;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    cli::init_tracing();

    let mut cli = cli::Cli::parse();

    // Set global octocrab instance using the provided auth
    octocrab::initialise(std::mem::take(&mut cli.auth).try_into_octocrab().await?);

    match cli.command {
        cli::Commands::Serve(args) => {
            server::serve(args).await?;
        }
        cli::Commands::Run(args) => {
            if runner::run(args).await?.is_failure() {
                bail!("Approval failed");
            }
        }
    }
    Ok(())
}
