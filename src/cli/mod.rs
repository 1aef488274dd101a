//! # CLI Module
//!
//! This module defines the command-line interface for repostrap using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `init` | Collect placeholder values and write the setup configuration |
//! | `plan` | Inspect the repository and show pending setup actions |
//! | `apply` | Perform the pending setup actions |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-C, --directory <DIR>` - Working directory (defaults to current directory)
//!
//! ## Examples
//!
//! ```bash
//! # Collect placeholder values interactively
//! repostrap init
//!
//! # Show what apply would do
//! repostrap plan
//!
//! # Fill placeholders, install the license and configure GitHub
//! repostrap apply --yes
//! ```

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{ApplyArgs, GenerateManArgs, InitArgs, PlanArgs};

/// repostrap - Bootstrap a repository created from a scaffolding template
#[derive(Parser, Debug)]
#[command(name = "repostrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect placeholder values and write the setup configuration
    Init(InitArgs),

    /// Inspect the repository and show pending setup actions
    Plan(PlanArgs),

    /// Perform the pending setup actions
    Apply(ApplyArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}
