//! Startup configuration for journal-api
//!
//! The only setting is the listen port, taken from `PORT` (a `.env` file in
//! the working directory is loaded into the environment first) or `--port`.

use clap::Parser;
use journal_common::config::{parse_port, DEFAULT_PORT};
use std::net::SocketAddr;

/// Command-line arguments for journal-api
#[derive(Parser, Debug)]
#[command(name = "journal-api")]
#[command(about = "Photo Journal API stub")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT, value_parser = parse_port)]
    pub port: u16,
}

impl Args {
    /// Listen on all interfaces at the configured port
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
