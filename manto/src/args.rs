use std::path::PathBuf;

use clap::Parser;

/// Manto relay
#[derive(Debug, Parser)]
#[command(name = "manto", about = "Stateless relay between a browser chat client and the Anthropic API")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "manto.toml", env = "MANTO_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "MANTO_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
