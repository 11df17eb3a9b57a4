//! Binary crate for the `wxbrief` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - The thin HTTP layer over `wxbrief-core`

use clap::Parser;

mod cli;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli::Cli::parse();
    let config = wxbrief_core::Config::load()?;

    server::run(args.address, config).await;
    Ok(())
}
