//! Fasthome CLI - Command-line interface for Fasthome smart devices.
//!
//! Lists devices, deletes them with confirmation, and offers an interactive
//! browser over the same optimistic device store an app front end would use.

mod app;
mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::AppContext;
use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,fasthome_core=debug,fasthome_cli=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = AppContext::from_cli(&cli).await?;

    match cli.command {
        Commands::List => commands::run_list(&ctx).await,
        Commands::Show(args) => commands::run_show(args, &ctx).await,
        Commands::Delete(args) => commands::run_delete(args, &ctx).await,
        Commands::Browse => commands::run_browse(&ctx).await,
    }
}
