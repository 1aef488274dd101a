//! Default value detection
//!
//! `init` seeds its prompts with values read from the environment: the
//! origin remote, the git identity and the current date.

use chrono::Datelike;
use std::path::Path;
use url::Url;

use crate::utils::command;

/// Repository coordinates parsed from the origin remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    /// Owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Normalized https URL
    pub https_url: String,
}

/// Parse a GitHub remote URL, in https or ssh form
pub fn parse_remote_url(raw: &str) -> Option<RemoteInfo> {
    let raw = raw.trim();

    let path = if let Some(rest) = raw.strip_prefix("git@github.com:") {
        rest.to_string()
    } else {
        let url = Url::parse(raw).ok()?;
        if url.host_str() != Some("github.com") {
            return None;
        }
        url.path().trim_start_matches('/').to_string()
    };

    let path = path.trim_end_matches('/').trim_end_matches(".git");
    let (owner, name) = path.split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }

    Some(RemoteInfo {
        owner: owner.to_string(),
        name: name.to_string(),
        https_url: format!("https://github.com/{}/{}", owner, name),
    })
}

/// Read and parse the origin remote of the repository at `root`
pub fn origin_remote(root: &Path) -> Option<RemoteInfo> {
    let result = command::run("git", &["remote", "get-url", "origin"], Some(root))
        .ok()
        .filter(|r| r.success())?;
    parse_remote_url(&result.stdout)
}

/// The configured git user name, if any
pub fn git_user_name(root: &Path) -> Option<String> {
    let result = command::run("git", &["config", "user.name"], Some(root))
        .ok()
        .filter(|r| r.success())?;

    if result.stdout.is_empty() {
        None
    } else {
        Some(result.stdout)
    }
}

/// Current year as a string
pub fn current_year() -> String {
    chrono::Local::now().year().to_string()
}

/// Detected defaults for the `init` prompts
#[derive(Debug, Clone)]
pub struct Defaults {
    pub name: String,
    pub owner: String,
    pub repo_url: String,
    pub holder: String,
    pub year: String,
}

/// Gather defaults from the repository at `root`
///
/// Falls back to the directory name when no origin remote is configured.
pub fn defaults(root: &Path) -> Defaults {
    let remote = origin_remote(root);

    let name = remote
        .as_ref()
        .map(|r| r.name.clone())
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default();

    Defaults {
        name,
        owner: remote.as_ref().map(|r| r.owner.clone()).unwrap_or_default(),
        repo_url: remote.map(|r| r.https_url).unwrap_or_default(),
        holder: git_user_name(root).unwrap_or_default(),
        year: current_year(),
    }
}
