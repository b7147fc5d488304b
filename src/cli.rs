//! Command line interface

use clap::Parser;

/// Cross-venue spread monitor
#[derive(Parser, Debug)]
#[command(name = "spread-watch", version, about)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}
