use clap::{Parser, Subcommand};
use std::path::PathBuf;

use relaybox::request::Severity;

#[derive(Parser, Debug)]
#[command(name = "relaybox")]
#[command(about = "Handler chain dispatch CLI", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (default: config/relaybox.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch one request through the configured chain
    Dispatch(DispatchArgs),
    /// Validate the configuration and print the resolved chain
    Check,
}

#[derive(clap::Args, Debug)]
pub struct DispatchArgs {
    /// Request severity (info, warning, error, critical)
    #[arg(long, default_value = "info")]
    pub severity: Severity,

    /// Numeric magnitude: error code or amount, depending on the chain
    #[arg(long, default_value_t = 0)]
    pub magnitude: i64,

    /// Originating component
    #[arg(long, default_value = "cli")]
    pub component: String,

    /// Free-form description
    #[arg(long)]
    pub message: String,
}
