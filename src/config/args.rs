//! Command-line arguments
//!
//! The service has no subcommands; flags only select where configuration
//! comes from.

use clap::Parser;

/// Orderlens - order revenue reporting service
#[derive(Parser, Debug, Default)]
#[command(name = "orderlens")]
#[command(version)]
#[command(about = "Order revenue reporting service", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml, optional)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Directory whose *.toml files are merged into the configuration
    #[arg(long)]
    pub config_dir: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}
