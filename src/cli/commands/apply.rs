//! Apply command - Perform the pending setup actions

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;

use super::ApplyArgs;
use crate::actions::executor::{ActionExecutor, ExecutionReport};
use crate::actions::git;
use crate::actions::planner::SetupPlanner;
use crate::config::loader::CONFIG_FILENAME;
use crate::config::Config;
use crate::exit_codes;
use crate::providers::GitHubProvider;

pub async fn execute(args: ApplyArgs) -> Result<i32> {
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

    if plan.is_empty() {
        println!("{}", "No actions to perform.".green());
        return Ok(exit_codes::SUCCESS);
    }

    // Display plan summary
    println!("{}", "Planned actions:".bold());
    println!();
    for action in plan.actions() {
        println!("  {} {}", "+".green(), action.description());
        for detail in action.details() {
            println!("      {}", detail.dimmed());
        }
    }
    println!();

    if args.dry_run {
        println!("{}", "Dry run mode - no changes made.".yellow());
        return Ok(exit_codes::SUCCESS);
    }

    if !args.yes {
        let confirm = Confirm::new()
            .with_prompt("Apply these changes?")
            .default(false)
            .interact()?;

        if !confirm {
            println!("{}", "Aborted.".yellow());
            return Ok(exit_codes::SUCCESS);
        }
    }

    // Execute actions
    let executor = ActionExecutor::new(root.clone());
    let report = executor.execute(&plan).await?;

    println!();
    for result in &report.results {
        if result.success {
            println!("  {} {}", "✓".green(), result.action_name);
        } else {
            println!(
                "  {} {} - {}",
                "✗".red(),
                result.action_name,
                result.error.as_deref().unwrap_or("Unknown error")
            );
        }
    }

    println!();
    println!(
        "{}: {} succeeded, {} failed",
        "Summary".bold(),
        report.success_count().to_string().green(),
        report.error_count().to_string().red()
    );

    // Package the file changes as a cleanup pull request
    if !args.no_pr && !report.changed_files.is_empty() && git::is_git_repository(&root) {
        match open_cleanup_pr(&root, &report) {
            Ok(url) => {
                println!();
                println!("{} Opened cleanup pull request: {}", "✓".green(), url.cyan());
            }
            Err(e) => {
                println!();
                println!(
                    "{} Could not open the cleanup pull request: {}",
                    "!".yellow(),
                    e
                );
                println!("  The changes are still in your working tree.");
            }
        }
    }

    if report.error_count() > 0 {
        Ok(exit_codes::ERROR)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn open_cleanup_pr(
    root: &std::path::Path,
    report: &ExecutionReport,
) -> Result<String, crate::error::RepostrapError> {
    let mut files = report.changed_files.clone();
    if root.join(CONFIG_FILENAME).exists() {
        files.push(CONFIG_FILENAME.to_string());
    }

    let branch = git::create_setup_branch(root)?;
    git::stage_files(root, &files)?;
    git::create_commit(root, "chore: apply repository setup")?;
    git::push_branch(root, &branch)?;

    let body = format!(
        "Applies the initial repository setup:\n\n{}\n",
        report
            .changed_files
            .iter()
            .map(|f| format!("- `{}`", f))
            .collect::<Vec<_>>()
            .join("\n")
    );

    git::create_pull_request(root, &branch, "Apply repository setup", &body)
}
