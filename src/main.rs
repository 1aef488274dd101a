//! repostrap - A CLI tool to bootstrap repositories created from a scaffolding template
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod actions;
mod cli;
mod config;
mod error;
mod providers;
mod utils;

/// Exit codes for the CLI
pub mod exit_codes {
    /// Success - repository is fully configured
    pub const SUCCESS: i32 = 0;
    /// Setup actions are still pending
    pub const PENDING_ACTIONS: i32 = 1;
    /// Configuration or runtime error
    pub const ERROR: i32 = 3;
}

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    // Honor the working directory override before anything touches the tree
    if let Some(dir) = &cli.directory {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("Error: cannot change to directory '{}': {}", dir.display(), e);
            std::process::exit(exit_codes::ERROR);
        }
    }

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Init(args) => cli::commands::init::execute(args).await,
        Commands::Plan(args) => cli::commands::plan::execute(args).await,
        Commands::Apply(args) => cli::commands::apply::execute(args).await,
        Commands::GenerateMan(args) => cli::commands::generate_man::execute(args).await,
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so that `plan --format json` stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
