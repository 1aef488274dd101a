//! Init command - Collect placeholder values and write the setup configuration

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, FuzzySelect, Input};
use std::path::Path;

use super::InitArgs;
use crate::actions::LicenseKind;
use crate::config::loader::CONFIG_FILENAME;
use crate::config::Config;
use crate::exit_codes;
use crate::utils::{detect, prerequisites};

pub async fn execute(args: InitArgs) -> Result<i32> {
    let root = std::env::current_dir().context("Failed to get current directory")?;

    if !args.skip_checks {
        let report = prerequisites::run_all_checks(&root);
        prerequisites::display_report(&report);

        if !report.all_required_passed() {
            prerequisites::display_error_summary(&report);
            return Ok(exit_codes::ERROR);
        }
    }

    let config_path = Path::new(CONFIG_FILENAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        if args.non_interactive {
            eprintln!(
                "{} Configuration file already exists. Use --force to overwrite.",
                "Error:".red().bold()
            );
            return Ok(exit_codes::ERROR);
        }

        let overwrite = Confirm::new()
            .with_prompt("Configuration file already exists. Overwrite?")
            .default(false)
            .interact()?;

        if !overwrite {
            println!("{}", "Aborted.".yellow());
            return Ok(exit_codes::SUCCESS);
        }
    }

    let defaults = detect::defaults(&root);

    let config = if args.non_interactive {
        config_from_defaults(&defaults)
    } else {
        prompt_config(&defaults)?
    };

    config.save(config_path)?;

    println!(
        "{} Created {} for '{}'",
        "Success:".green().bold(),
        CONFIG_FILENAME.cyan(),
        config.project.name.yellow()
    );

    println!("\nNext steps:");
    println!("  1. Review and customize {}", CONFIG_FILENAME.cyan());
    println!(
        "  2. Run {} to see pending setup actions",
        "repostrap plan".cyan()
    );
    println!("  3. Run {} to perform them", "repostrap apply".cyan());

    Ok(exit_codes::SUCCESS)
}

fn config_from_defaults(defaults: &detect::Defaults) -> Config {
    let mut config = Config::default();
    config.project.name = defaults.name.clone();
    config.project.owner = defaults.owner.clone();
    config.project.repo_url = defaults.repo_url.clone();
    config.license.holder = (!defaults.holder.is_empty()).then(|| defaults.holder.clone());
    config.license.year = Some(defaults.year.clone());
    config
}

fn prompt_config(defaults: &detect::Defaults) -> Result<Config> {
    let mut config = Config::default();

    config.project.name = Input::new()
        .with_prompt("Project name")
        .default(defaults.name.clone())
        .interact_text()?;

    config.project.description = Input::new()
        .with_prompt("Project description")
        .allow_empty(true)
        .interact_text()?;

    config.project.owner = Input::new()
        .with_prompt("Repository owner")
        .default(defaults.owner.clone())
        .allow_empty(true)
        .interact_text()?;

    config.project.repo_url = Input::new()
        .with_prompt("Repository URL")
        .default(defaults.repo_url.clone())
        .allow_empty(true)
        .interact_text()?;

    let licenses: Vec<&str> = LicenseKind::ALL.iter().map(|k| k.display_name()).collect();
    let selection = FuzzySelect::new()
        .with_prompt("License")
        .items(&licenses)
        .default(0)
        .interact()?;
    config.license.kind = LicenseKind::ALL[selection].spdx_id().to_string();

    let holder: String = Input::new()
        .with_prompt("Copyright holder")
        .default(defaults.holder.clone())
        .allow_empty(true)
        .interact_text()?;
    config.license.holder = (!holder.is_empty()).then_some(holder);
    config.license.year = Some(defaults.year.clone());

    config.ruleset.enabled = Confirm::new()
        .with_prompt("Create a branch ruleset for the default branch?")
        .default(true)
        .interact()?;

    config.pages.enabled = Confirm::new()
        .with_prompt("Enable GitHub Pages publishing?")
        .default(false)
        .interact()?;

    config.labels.enabled = Confirm::new()
        .with_prompt("Create the default issue labels?")
        .default(true)
        .interact()?;

    Ok(config)
}
