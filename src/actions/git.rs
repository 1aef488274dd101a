//! Git operations for the cleanup pull request
//!
//! After `apply` has mutated files, the run is packaged as a branch, a
//! commit, a push and a pull request opened through the gh CLI.

use chrono::Local;
use std::path::Path;

use crate::error::{ActionError, RepostrapError};
use crate::utils::command;

fn git(root: &Path, args: &[&str]) -> Result<String, RepostrapError> {
    command::run_checked("git", args, Some(root)).map_err(|message| {
        RepostrapError::Action(ActionError::ExecutionFailed { message })
    })
}

/// Check if the directory is a git repository
pub fn is_git_repository(root: &Path) -> bool {
    root.join(".git").exists()
}

/// Check if there are uncommitted changes (staged or unstaged)
pub fn has_changes(root: &Path) -> Result<bool, RepostrapError> {
    let status = git(root, &["status", "--porcelain"])?;
    Ok(!status.is_empty())
}

/// Create and check out a timestamped setup branch
///
/// Returns the name of the created branch.
pub fn create_setup_branch(root: &Path) -> Result<String, RepostrapError> {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let branch_name = format!("repostrap/setup-{}", timestamp);

    git(root, &["checkout", "-b", &branch_name])?;
    Ok(branch_name)
}

/// Stage specific files, relative to the repository root
pub fn stage_files(root: &Path, files: &[String]) -> Result<(), RepostrapError> {
    if files.is_empty() {
        return Ok(());
    }

    let mut args = vec!["add", "--"];
    args.extend(files.iter().map(|s| s.as_str()));
    git(root, &args)?;
    Ok(())
}

/// Create a commit with the given message
pub fn create_commit(root: &Path, message: &str) -> Result<(), RepostrapError> {
    git(root, &["commit", "-m", message])?;
    Ok(())
}

/// Push a branch to origin, setting the upstream
pub fn push_branch(root: &Path, branch_name: &str) -> Result<(), RepostrapError> {
    git(root, &["push", "-u", "origin", branch_name])?;
    Ok(())
}

/// Get the current branch name
#[allow(dead_code)]
pub fn current_branch(root: &Path) -> Option<String> {
    let branch = command::run("git", &["rev-parse", "--abbrev-ref", "HEAD"], Some(root))
        .ok()
        .filter(|r| r.success())?
        .stdout;

    if branch.is_empty() {
        None
    } else {
        Some(branch)
    }
}

/// Get the default branch (origin HEAD, falling back to main/master)
pub fn default_branch(root: &Path) -> Option<String> {
    if let Ok(result) = command::run(
        "git",
        &["symbolic-ref", "refs/remotes/origin/HEAD", "--short"],
        Some(root),
    ) {
        if result.success() {
            let branch = result.stdout.trim_start_matches("origin/").to_string();
            if !branch.is_empty() {
                return Some(branch);
            }
        }
    }

    for branch in ["main", "master"] {
        let verified = command::run(
            "git",
            &[
                "show-ref",
                "--verify",
                "--quiet",
                &format!("refs/heads/{}", branch),
            ],
            Some(root),
        )
        .map(|r| r.success())
        .unwrap_or(false);

        if verified {
            return Some(branch.to_string());
        }
    }

    None
}

/// Check if a branch exists locally
pub fn branch_exists(root: &Path, branch: &str) -> bool {
    command::run(
        "git",
        &[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/heads/{}", branch),
        ],
        Some(root),
    )
    .map(|r| r.success())
    .unwrap_or(false)
}

/// Check if a branch exists on the origin remote
pub fn branch_exists_on_remote(root: &Path, branch: &str) -> bool {
    command::run(
        "git",
        &["ls-remote", "--exit-code", "--heads", "origin", branch],
        Some(root),
    )
    .map(|r| r.success())
    .unwrap_or(false)
}

/// Make sure `branch` exists on the remote, creating and pushing it if needed
///
/// Returns `true` when the branch had to be created.
pub fn ensure_remote_branch(root: &Path, branch: &str) -> Result<bool, RepostrapError> {
    if branch_exists_on_remote(root, branch) {
        return Ok(false);
    }

    if !branch_exists(root, branch) {
        git(root, &["branch", branch])?;
    }

    git(root, &["push", "-u", "origin", branch])?;
    tracing::info!("Created and pushed branch '{}'", branch);
    Ok(true)
}

/// Open a pull request for `branch` via the gh CLI
pub fn create_pull_request(
    root: &Path,
    branch: &str,
    title: &str,
    body: &str,
) -> Result<String, RepostrapError> {
    let base = default_branch(root);

    let mut args = vec!["pr", "create", "--head", branch, "--title", title, "--body", body];
    if let Some(base) = &base {
        args.push("--base");
        args.push(base.as_str());
    }

    let url = command::run_checked("gh", &args, Some(root)).map_err(|message| {
        RepostrapError::Action(ActionError::ExecutionFailed {
            message: format!("Failed to open pull request: {}", message),
        })
    })?;

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    fn init_git_repo(root: &Path) {
        for args in [
            vec!["init"],
            vec!["config", "user.name", "Test User"],
            vec!["config", "user.email", "test@example.com"],
        ] {
            Command::new("git")
                .args(&args)
                .current_dir(root)
                .output()
                .unwrap();
        }

        fs::write(root.join("README.md"), "# Test Repo").unwrap();
        Command::new("git")
            .args(["add", "README.md"])
            .current_dir(root)
            .output()
            .unwrap();
        Command::new("git")
            .args(["commit", "-m", "Initial commit"])
            .current_dir(root)
            .output()
            .unwrap();
    }

    #[test]
    fn test_is_git_repository() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        assert!(!is_git_repository(root));

        fs::create_dir(root.join(".git")).unwrap();
        assert!(is_git_repository(root));
    }

    #[test]
    #[serial]
    fn test_create_setup_branch() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        init_git_repo(&root);

        let branch_name = create_setup_branch(&root).unwrap();

        assert!(branch_name.starts_with("repostrap/setup-"));
        assert_eq!(current_branch(&root).as_deref(), Some(branch_name.as_str()));
    }

    #[test]
    #[serial]
    fn test_has_changes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        init_git_repo(&root);

        assert!(!has_changes(&root).unwrap());

        fs::write(root.join("new.txt"), "content").unwrap();
        assert!(has_changes(&root).unwrap());
    }

    #[test]
    #[serial]
    fn test_stage_files_is_selective() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        init_git_repo(&root);

        fs::write(root.join("one.txt"), "1").unwrap();
        fs::write(root.join("two.txt"), "2").unwrap();

        stage_files(&root, &["one.txt".to_string()]).unwrap();

        let status = command::run("git", &["status", "--porcelain"], Some(&root))
            .unwrap()
            .stdout;
        assert!(status.contains("A  one.txt"));
        assert!(status.contains("?? two.txt"));
    }

    #[test]
    #[serial]
    fn test_stage_files_empty_list_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        init_git_repo(&root);

        stage_files(&root, &[]).unwrap();
    }

    #[test]
    #[serial]
    fn test_create_commit() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        init_git_repo(&root);

        fs::write(root.join("new.txt"), "content").unwrap();
        stage_files(&root, &["new.txt".to_string()]).unwrap();
        create_commit(&root, "chore: add new file").unwrap();

        let log = command::run("git", &["log", "--oneline", "-1"], Some(&root))
            .unwrap()
            .stdout;
        assert!(log.contains("chore: add new file"));
    }

    #[test]
    #[serial]
    fn test_default_branch_found() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        init_git_repo(&root);

        let branch = default_branch(&root).unwrap();
        assert!(branch == "main" || branch == "master");
    }

    #[test]
    #[serial]
    fn test_branch_exists() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        init_git_repo(&root);

        let head = current_branch(&root).unwrap();
        assert!(branch_exists(&root, &head));
        assert!(!branch_exists(&root, "no-such-branch"));
    }
}
