//! Plan command - Inspect the repository and show pending setup actions

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

use super::{OutputFormat, PlanArgs};
use crate::actions::planner::SetupPlanner;
use crate::config::Config;
use crate::exit_codes;
use crate::providers::GitHubProvider;

pub async fn execute(args: PlanArgs) -> Result<i32> {
    let config = Config::load_or_default()?;
    let root = std::env::current_dir().context("Failed to get current directory")?;

    let provider = if GitHubProvider::is_available() {
        GitHubProvider::new().ok()
    } else {
        None
    };

    let planner = SetupPlanner::new(config);
    let mut plan = planner.create_plan(&root, provider.as_ref())?;

    if let Some(only) = &args.only {
        plan.filter_only(only);
    }
    if let Some(skip) = &args.skip {
        plan.filter_skip(skip);
    }

    match args.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            match &args.output {
                Some(path) => fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        OutputFormat::Terminal => {
            if plan.is_empty() {
                println!("{}", "Repository is fully configured.".green());
            } else {
                println!("{}", "Pending actions:".bold());
                println!();
                for action in plan.actions() {
                    println!("  {} {}", "+".green(), action.description());
                    for detail in action.details() {
                        println!("      {}", detail.dimmed());
                    }
                }
                println!();
                println!(
                    "Run {} to perform these actions.",
                    "repostrap apply".cyan()
                );
            }
        }
    }

    if plan.is_empty() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::PENDING_ACTIONS)
    }
}
