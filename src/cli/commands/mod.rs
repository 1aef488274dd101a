//! CLI commands module

pub mod apply;
pub mod generate_man;
pub mod init;
pub mod plan;

use clap::Args;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Skip interactive prompts and use detected defaults
    #[arg(long)]
    pub non_interactive: bool,

    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Skip prerequisite checks (git, gh, etc.)
    #[arg(long)]
    pub skip_checks: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output format (terminal, json)
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only plan specific action categories
    #[arg(long, value_delimiter = ',')]
    pub only: Option<Vec<String>>,

    /// Skip specific action categories
    #[arg(long, value_delimiter = ',')]
    pub skip: Option<Vec<String>>,
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Skip confirmation prompts and apply all actions automatically
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run - show what would be done without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Only apply specific action categories
    #[arg(long, value_delimiter = ',')]
    pub only: Option<Vec<String>>,

    /// Skip specific action categories
    #[arg(long, value_delimiter = ',')]
    pub skip: Option<Vec<String>>,

    /// Skip opening the cleanup pull request after applying
    #[arg(long)]
    pub no_pr: bool,
}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Directory to write the man page into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

/// Output format for plan command
#[derive(Debug, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}
