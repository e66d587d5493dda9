//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Fasthome CLI - Command-line interface for Fasthome smart devices
#[derive(Parser, Debug)]
#[command(name = "fasthome-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// API base URL (overrides the config file)
    #[arg(long, global = true, env = "FASTHOME_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true, env = "FASTHOME_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Config file (default: platform data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all devices
    List,

    /// Show details of one device
    Show(ShowArgs),

    /// Delete a device
    Delete(DeleteArgs),

    /// Interactive device browser
    Browse,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Position of the device in the list
    pub index: usize,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Position of the device in the list
    pub index: usize,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}
