//! GitHub provider - Interactions with the GitHub API via the gh CLI

use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{ProviderError, RepostrapError};
use crate::utils::command;

/// GitHub provider for repository operations
pub struct GitHubProvider {
    repo_owner: String,
    repo_name: String,
}

/// A ruleset as returned by `GET /repos/{owner}/{repo}/rulesets`
#[derive(Debug, Deserialize)]
pub struct RulesetInfo {
    /// Numeric ruleset id
    pub id: u64,
    /// Ruleset name
    pub name: String,
}

/// Pages configuration as returned by `GET /repos/{owner}/{repo}/pages`
#[derive(Debug, Deserialize)]
pub struct PagesInfo {
    /// Public URL of the published site
    pub html_url: Option<String>,
    /// Publishing source
    pub source: Option<PagesSource>,
}

/// Publishing source of a Pages site
#[derive(Debug, Deserialize)]
pub struct PagesSource {
    pub branch: String,
    #[serde(default)]
    pub path: Option<String>,
}

impl GitHubProvider {
    /// Create a new GitHub provider for the current repository
    pub fn new() -> Result<Self, RepostrapError> {
        let (owner, name) = Self::get_repo_info()?;
        Ok(Self {
            repo_owner: owner,
            repo_name: name,
        })
    }

    /// Check if GitHub CLI is available and authenticated
    pub fn is_available() -> bool {
        Command::new("gh")
            .args(["auth", "status"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Get repository owner and name
    fn get_repo_info() -> Result<(String, String), RepostrapError> {
        let result = command::run(
            "gh",
            &[
                "repo",
                "view",
                "--json",
                "owner,name",
                "-q",
                ".owner.login + \"/\" + .name",
            ],
            None,
        )
        .map_err(|_| {
            RepostrapError::Provider(ProviderError::CommandFailed {
                command: "gh repo view".to_string(),
            })
        })?;

        if !result.success() {
            return Err(RepostrapError::Provider(ProviderError::NotAuthenticated));
        }

        let full_name = result.stdout;
        match full_name.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Ok((owner.to_string(), name.to_string()))
            }
            _ => Err(RepostrapError::Provider(ProviderError::InvalidRepoName {
                name: full_name,
            })),
        }
    }

    /// Get the full repository name (owner/name)
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }

    /// Get the default branch name of the repository
    pub fn default_branch(&self) -> Result<String, RepostrapError> {
        let result = command::run(
            "gh",
            &[
                "repo",
                "view",
                "--json",
                "defaultBranchRef",
                "-q",
                ".defaultBranchRef.name",
            ],
            None,
        )
        .map_err(|_| {
            RepostrapError::Provider(ProviderError::CommandFailed {
                command: "gh repo view".to_string(),
            })
        })?;

        if !result.success() || result.stdout.is_empty() {
            return Err(RepostrapError::Provider(ProviderError::ApiRequestFailed {
                endpoint: "repos/{repo}".to_string(),
                stderr: result.stderr,
            }));
        }

        Ok(result.stdout)
    }

    /// Look up a ruleset by name
    ///
    /// Returns `None` when no ruleset with that name exists or the listing
    /// is not accessible.
    pub fn get_ruleset(&self, name: &str) -> Result<Option<RulesetInfo>, RepostrapError> {
        let endpoint = format!("repos/{}/rulesets", self.full_name());
        let result = command::run("gh", &["api", &endpoint], None).map_err(|_| {
            RepostrapError::Provider(ProviderError::CommandFailed {
                command: format!("gh api {}", endpoint),
            })
        })?;

        if !result.success() {
            // 404: rulesets not available for this repository
            return Ok(None);
        }

        let rulesets: Vec<RulesetInfo> = serde_json::from_str(&result.stdout).map_err(|e| {
            RepostrapError::Provider(ProviderError::ApiRequestFailed {
                endpoint,
                stderr: format!("unexpected response: {}", e),
            })
        })?;

        Ok(rulesets.into_iter().find(|r| r.name == name))
    }

    /// Create a ruleset from a JSON payload
    pub fn create_ruleset(&self, payload: &serde_json::Value) -> Result<(), RepostrapError> {
        let endpoint = format!("repos/{}/rulesets", self.full_name());
        self.api_post(&endpoint, payload)
    }

    /// Get the Pages configuration, `None` when Pages is not enabled
    pub fn get_pages(&self) -> Result<Option<PagesInfo>, RepostrapError> {
        let endpoint = format!("repos/{}/pages", self.full_name());
        let result = command::run("gh", &["api", &endpoint], None).map_err(|_| {
            RepostrapError::Provider(ProviderError::CommandFailed {
                command: format!("gh api {}", endpoint),
            })
        })?;

        if !result.success() {
            // 404 means Pages is disabled
            return Ok(None);
        }

        let info: PagesInfo = serde_json::from_str(&result.stdout).map_err(|e| {
            RepostrapError::Provider(ProviderError::ApiRequestFailed {
                endpoint,
                stderr: format!("unexpected response: {}", e),
            })
        })?;

        Ok(Some(info))
    }

    /// Enable Pages publishing from the given branch and path
    pub fn enable_pages(&self, branch: &str, path: &str) -> Result<(), RepostrapError> {
        let endpoint = format!("repos/{}/pages", self.full_name());
        let payload = serde_json::json!({
            "source": {
                "branch": branch,
                "path": path,
            }
        });
        self.api_post(&endpoint, &payload)
    }

    /// List existing label names
    pub fn list_label_names(&self) -> Result<Vec<String>, RepostrapError> {
        let result = command::run(
            "gh",
            &["label", "list", "--json", "name", "-q", ".[].name", "--limit", "200"],
            None,
        )
        .map_err(|_| {
            RepostrapError::Provider(ProviderError::CommandFailed {
                command: "gh label list".to_string(),
            })
        })?;

        if !result.success() {
            return Ok(Vec::new());
        }

        Ok(result
            .stdout
            .lines()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }

    /// Create a single label
    pub fn create_label(
        &self,
        name: &str,
        color: &str,
        description: &str,
    ) -> Result<(), RepostrapError> {
        let result = command::run(
            "gh",
            &[
                "label",
                "create",
                name,
                "--color",
                color,
                "--description",
                description,
            ],
            None,
        )
        .map_err(|_| {
            RepostrapError::Provider(ProviderError::CommandFailed {
                command: format!("gh label create {}", name),
            })
        })?;

        if !result.success() {
            return Err(RepostrapError::Provider(ProviderError::ApiRequestFailed {
                endpoint: format!("repos/{}/labels", self.full_name()),
                stderr: result.stderr,
            }));
        }

        Ok(())
    }

    /// POST a JSON payload to an API endpoint, streaming it over stdin
    fn api_post(&self, endpoint: &str, payload: &serde_json::Value) -> Result<(), RepostrapError> {
        let mut child = Command::new("gh")
            .args(["api", endpoint, "--method", "POST", "--input", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|_| {
                RepostrapError::Provider(ProviderError::CommandFailed {
                    command: format!("gh api {}", endpoint),
                })
            })?;

        let json_str = serde_json::to_string(payload).map_err(|e| {
            RepostrapError::Provider(ProviderError::ApiRequestFailed {
                endpoint: endpoint.to_string(),
                stderr: format!("failed to serialize payload: {}", e),
            })
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(json_str.as_bytes()).map_err(|e| {
                RepostrapError::Provider(ProviderError::ApiRequestFailed {
                    endpoint: endpoint.to_string(),
                    stderr: format!("failed to write request body: {}", e),
                })
            })?;
        }

        let output = child.wait_with_output().map_err(|_| {
            RepostrapError::Provider(ProviderError::CommandFailed {
                command: format!("gh api {}", endpoint),
            })
        })?;

        if !output.status.success() {
            return Err(RepostrapError::Provider(ProviderError::ApiRequestFailed {
                endpoint: endpoint.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruleset_list_parsing() {
        let body = r#"[
            {"id": 42, "name": "default-branch-protection", "target": "branch"},
            {"id": 43, "name": "tags", "target": "tag"}
        ]"#;
        let rulesets: Vec<RulesetInfo> = serde_json::from_str(body).unwrap();

        assert_eq!(rulesets.len(), 2);
        assert_eq!(rulesets[0].id, 42);
        assert_eq!(rulesets[0].name, "default-branch-protection");
    }

    #[test]
    fn test_pages_info_parsing() {
        let body = r#"{
            "html_url": "https://acme.github.io/widget/",
            "source": {"branch": "gh-pages", "path": "/"}
        }"#;
        let info: PagesInfo = serde_json::from_str(body).unwrap();

        assert_eq!(info.html_url.as_deref(), Some("https://acme.github.io/widget/"));
        assert_eq!(info.source.as_ref().unwrap().branch, "gh-pages");
    }
}
