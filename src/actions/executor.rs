//! Action executor - Executes planned actions
//!
//! Actions run sequentially; a failing action is recorded and execution
//! continues with the next one, so a permission problem on GitHub does not
//! prevent the local file work from completing.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{ProviderError, RepostrapError};
use crate::providers::GitHubProvider;

use super::plan::{Action, ActionOperation, ActionPlan};
use super::{labels, license, pages, placeholders, ruleset};

/// Result of executing a single action
#[derive(Debug)]
pub struct ActionResult {
    /// Description of the action that was executed
    pub action_name: String,
    /// Whether the action succeeded
    pub success: bool,
    /// Error message if the action failed, `None` if it succeeded
    pub error: Option<String>,
}

/// Outcome of a full executor run
#[derive(Debug, Default)]
pub struct ExecutionReport {
    /// One entry per executed action
    pub results: Vec<ActionResult>,
    /// Files the run modified, relative to the repository root
    pub changed_files: Vec<String>,
}

impl ExecutionReport {
    /// Number of failed actions
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    /// Number of succeeded actions
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}

/// Executes actions from an action plan
pub struct ActionExecutor {
    root: PathBuf,
}

impl ActionExecutor {
    /// Create a new executor rooted at the repository directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Execute all actions in the plan
    pub async fn execute(&self, plan: &ActionPlan) -> Result<ExecutionReport, RepostrapError> {
        let mut report = ExecutionReport::default();

        for action in plan.actions() {
            info!("Executing action: {}", action.id());

            match self.execute_action(action).await {
                Ok(changed) => {
                    report.changed_files.extend(changed);
                    report.results.push(ActionResult {
                        action_name: action.description().to_string(),
                        success: true,
                        error: None,
                    });
                }
                Err(e) => {
                    report.results.push(ActionResult {
                        action_name: action.description().to_string(),
                        success: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Execute a single action, returning the files it changed
    async fn execute_action(&self, action: &Action) -> Result<Vec<String>, RepostrapError> {
        match action.operation() {
            ActionOperation::ReplacePlaceholders { files, values } => {
                debug!("Substituting placeholders in {} file(s)", files.len());
                let substitutions = placeholders::apply(&self.root, files, values)?;
                Ok(substitutions.into_iter().map(|s| s.file).collect())
            }

            ActionOperation::InstallLicense { kind, holder, year } => {
                debug!("Installing {} license", kind);
                let kind = license::resolve_kind(kind)?;
                license::install(&self.root, kind, holder, year)?;
                Ok(vec![license::LICENSE_FILENAME.to_string()])
            }

            ActionOperation::CreateRuleset { settings } => {
                debug!("Creating branch ruleset '{}'", settings.name);
                let provider = authenticated_provider()?;
                match ruleset::configure(&provider, settings)? {
                    ruleset::RulesetOutcome::Created => info!("Created ruleset '{}'", settings.name),
                    ruleset::RulesetOutcome::AlreadyExists => {
                        info!("Ruleset '{}' already exists", settings.name)
                    }
                }
                Ok(Vec::new())
            }

            ActionOperation::EnablePages { settings } => {
                debug!("Enabling GitHub Pages from '{}'", settings.branch);
                let provider = authenticated_provider()?;
                match pages::enable(&self.root, &provider, settings)? {
                    pages::PagesOutcome::Enabled => info!("Enabled GitHub Pages"),
                    pages::PagesOutcome::AlreadyEnabled => info!("GitHub Pages already enabled"),
                }
                Ok(Vec::new())
            }

            ActionOperation::CreateLabels { labels: wanted } => {
                debug!("Creating {} label(s)", wanted.len());
                let provider = authenticated_provider()?;
                let created = labels::ensure(&provider, wanted)?;
                info!("Created {} label(s)", created.len());
                Ok(Vec::new())
            }
        }
    }
}

/// Connect to GitHub, failing early when the gh CLI is missing
fn authenticated_provider() -> Result<GitHubProvider, RepostrapError> {
    if !GitHubProvider::is_available() {
        return Err(RepostrapError::Provider(
            ProviderError::GitHubCliNotAvailable,
        ));
    }
    GitHubProvider::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_execute_replaces_placeholders() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README.md"), "# {{PROJECT_NAME}}\n").unwrap();

        let mut values = HashMap::new();
        values.insert("PROJECT_NAME".to_string(), "widget".to_string());

        let mut plan = ActionPlan::new();
        plan.add(Action::new(
            "placeholders/fill",
            "placeholders",
            "Fill placeholders",
            ActionOperation::ReplacePlaceholders {
                files: vec!["README.md".to_string()],
                values,
            },
        ));

        let executor = ActionExecutor::new(root.to_path_buf());
        let report = executor.execute(&plan).await.unwrap();

        assert_eq!(report.success_count(), 1);
        assert_eq!(report.changed_files, vec!["README.md".to_string()]);

        let content = fs::read_to_string(root.join("README.md")).unwrap();
        assert_eq!(content, "# widget\n");
    }

    #[tokio::test]
    async fn test_execute_installs_license() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let mut plan = ActionPlan::new();
        plan.add(Action::new(
            "license/install",
            "license",
            "Install MIT license",
            ActionOperation::InstallLicense {
                kind: "MIT".to_string(),
                holder: "Acme Inc.".to_string(),
                year: "2026".to_string(),
            },
        ));

        let executor = ActionExecutor::new(root.to_path_buf());
        let report = executor.execute(&plan).await.unwrap();

        assert_eq!(report.success_count(), 1);
        assert_eq!(report.changed_files, vec!["LICENSE".to_string()]);
        assert!(root.join("LICENSE").exists());
    }

    #[tokio::test]
    async fn test_execute_records_failures_and_continues() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let mut plan = ActionPlan::new();
        plan.add(Action::new(
            "license/install",
            "license",
            "Install unknown license",
            ActionOperation::InstallLicense {
                kind: "WTFPL".to_string(),
                holder: "Acme Inc.".to_string(),
                year: "2026".to_string(),
            },
        ));
        plan.add(Action::new(
            "license/install-2",
            "license",
            "Install MIT license",
            ActionOperation::InstallLicense {
                kind: "MIT".to_string(),
                holder: "Acme Inc.".to_string(),
                year: "2026".to_string(),
            },
        ));

        let executor = ActionExecutor::new(root.to_path_buf());
        let report = executor.execute(&plan).await.unwrap();

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.success_count(), 1);
        assert!(report.results[0].error.is_some());
        assert!(root.join("LICENSE").exists());
    }
}
