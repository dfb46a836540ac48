//! Command-line interface for the server binary.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "vendord",
    version,
    about = "Vendor management and performance tracking service"
)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Override the configured bind address.
    #[arg(long)]
    pub bind: Option<String>,
}
