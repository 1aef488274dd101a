//! Prerequisite checks run before setup commands
//!
//! Verifies that the required tools and repository state are present:
//! git and gh on the PATH, gh authentication, and the origin remote.

use colored::Colorize;
use std::path::Path;
use std::process::Command;

use crate::utils::command;

/// Level of importance for a prerequisite check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckLevel {
    /// Required for operation - failure blocks execution
    Required,
    /// Optional - failure generates a warning
    Optional,
}

/// Status of a prerequisite check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check failed
    Failed,
    /// Check was skipped because a dependency failed
    Skipped,
}

/// Result of a single prerequisite check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: &'static str,
    /// Whether this check is required or optional
    pub level: CheckLevel,
    /// Status of the check
    pub status: CheckStatus,
    /// Shown on failure
    pub message: Option<String>,
    /// Suggested fix
    pub fix: Option<&'static str>,
}

impl CheckResult {
    fn ok(name: &'static str, level: CheckLevel) -> Self {
        Self {
            name,
            level,
            status: CheckStatus::Ok,
            message: None,
            fix: None,
        }
    }

    fn failed(name: &'static str, level: CheckLevel, message: &str, fix: &'static str) -> Self {
        Self {
            name,
            level,
            status: CheckStatus::Failed,
            message: Some(message.to_string()),
            fix: Some(fix),
        }
    }

    fn skipped(name: &'static str, level: CheckLevel) -> Self {
        Self {
            name,
            level,
            status: CheckStatus::Skipped,
            message: None,
            fix: None,
        }
    }

    /// Check if this is a required check that failed
    pub fn is_required_failure(&self) -> bool {
        self.level == CheckLevel::Required && self.status == CheckStatus::Failed
    }
}

/// Aggregated report of all prerequisite checks
#[derive(Debug, Clone, Default)]
pub struct PrerequisitesReport {
    /// All check results
    pub checks: Vec<CheckResult>,
}

impl PrerequisitesReport {
    /// Check if all required checks passed
    pub fn all_required_passed(&self) -> bool {
        !self.checks.iter().any(|c| c.is_required_failure())
    }

    /// Get all failed required checks
    pub fn required_failures(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.is_required_failure())
            .collect()
    }
}

fn binary_on_path(name: &str) -> bool {
    which::which(name).is_ok()
}

fn gh_authenticated() -> bool {
    Command::new("gh")
        .args(["auth", "status"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run all prerequisite checks for the repository at `root`
pub fn run_all_checks(root: &Path) -> PrerequisitesReport {
    let mut checks = Vec::new();

    let git_installed = binary_on_path("git");
    checks.push(if git_installed {
        CheckResult::ok("Git installed", CheckLevel::Required)
    } else {
        CheckResult::failed(
            "Git installed",
            CheckLevel::Required,
            "Git is not installed",
            "Install git: https://git-scm.com/downloads",
        )
    });

    let is_repo = git_installed && root.join(".git").exists();
    checks.push(if !git_installed {
        CheckResult::skipped("Git repository", CheckLevel::Required)
    } else if is_repo {
        CheckResult::ok("Git repository", CheckLevel::Required)
    } else {
        CheckResult::failed(
            "Git repository",
            CheckLevel::Required,
            "Not a git repository",
            "Run: git init",
        )
    });

    let gh_installed = binary_on_path("gh");
    checks.push(if gh_installed {
        CheckResult::ok("GitHub CLI installed", CheckLevel::Required)
    } else {
        CheckResult::failed(
            "GitHub CLI installed",
            CheckLevel::Required,
            "GitHub CLI (gh) is not installed",
            "Install gh: https://cli.github.com/",
        )
    });

    checks.push(if !gh_installed {
        CheckResult::skipped("GitHub CLI authenticated", CheckLevel::Required)
    } else if gh_authenticated() {
        CheckResult::ok("GitHub CLI authenticated", CheckLevel::Required)
    } else {
        CheckResult::failed(
            "GitHub CLI authenticated",
            CheckLevel::Required,
            "GitHub CLI is not authenticated",
            "Run: gh auth login",
        )
    });

    let remote = if is_repo {
        command::run("git", &["remote", "get-url", "origin"], Some(root))
            .ok()
            .filter(|r| r.success())
            .map(|r| r.stdout)
    } else {
        None
    };

    checks.push(if !is_repo {
        CheckResult::skipped("Remote origin configured", CheckLevel::Optional)
    } else if remote.is_some() {
        CheckResult::ok("Remote origin configured", CheckLevel::Optional)
    } else {
        CheckResult::failed(
            "Remote origin configured",
            CheckLevel::Optional,
            "No remote origin configured",
            "Run: git remote add origin <url>",
        )
    });

    checks.push(match &remote {
        None => CheckResult::skipped("Remote is GitHub", CheckLevel::Optional),
        Some(url) if url.contains("github.com") => {
            CheckResult::ok("Remote is GitHub", CheckLevel::Optional)
        }
        Some(_) => CheckResult::failed(
            "Remote is GitHub",
            CheckLevel::Optional,
            "Remote origin is not a GitHub repository",
            "repostrap only configures GitHub repositories",
        ),
    });

    PrerequisitesReport { checks }
}

/// Display the full prerequisites report
pub fn display_report(report: &PrerequisitesReport) {
    println!("{}\n", "Checking prerequisites...".bold());

    for check in &report.checks {
        let icon = match (check.status, check.level) {
            (CheckStatus::Ok, _) => "✓".green(),
            (CheckStatus::Failed, CheckLevel::Required) => "✗".red(),
            (CheckStatus::Failed, CheckLevel::Optional) => "!".yellow(),
            (CheckStatus::Skipped, _) => "○".dimmed(),
        };

        let suffix = match (check.status, check.level) {
            (CheckStatus::Skipped, _) => " (skipped)".dimmed().to_string(),
            (CheckStatus::Failed, CheckLevel::Optional) => " (optional)".dimmed().to_string(),
            _ => String::new(),
        };

        println!("  {} {}{}", icon, check.name, suffix);

        if check.status == CheckStatus::Failed {
            if let Some(msg) = &check.message {
                println!("    {}", msg.dimmed());
            }
            if let Some(fix) = check.fix {
                println!("    {}: {}", "Fix".cyan(), fix);
            }
        }
    }

    println!();
}

/// Display error summary for failed required checks
pub fn display_error_summary(report: &PrerequisitesReport) {
    let failures = report.required_failures();
    if failures.is_empty() {
        return;
    }

    eprintln!(
        "{} {} required prerequisite(s) failed:",
        "Error:".red().bold(),
        failures.len()
    );

    for check in failures {
        eprintln!("  {} {}", "•".red(), check.name);
        if let Some(fix) = check.fix {
            eprintln!("    {}: {}", "Fix".cyan(), fix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_non_repo_fails_repository_check() {
        let temp_dir = TempDir::new().unwrap();
        let report = run_all_checks(temp_dir.path());

        let repo_check = report
            .checks
            .iter()
            .find(|c| c.name == "Git repository")
            .unwrap();
        // Either git is missing (check skipped) or the directory fails it
        assert_ne!(repo_check.status, CheckStatus::Ok);
        assert!(!report.all_required_passed());
    }

    #[test]
    fn test_dependent_checks_skip_when_repo_missing() {
        let temp_dir = TempDir::new().unwrap();
        let report = run_all_checks(temp_dir.path());

        let remote_check = report
            .checks
            .iter()
            .find(|c| c.name == "Remote origin configured")
            .unwrap();
        assert_eq!(remote_check.status, CheckStatus::Skipped);
    }
}
