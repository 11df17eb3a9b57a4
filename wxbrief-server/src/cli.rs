use std::net::SocketAddr;

use clap::Parser;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxbrief", version, about = "Aerodrome weather briefing service")]
pub struct Cli {
    /// Address to serve on.
    #[arg(long, default_value = "127.0.0.1:5555")]
    pub address: SocketAddr,
}
