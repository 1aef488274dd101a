//! Setup planner - Derives pending actions from the repository state
//!
//! Every check is a non-mutating existence probe: tokens still present in
//! the template files, a missing LICENSE, a missing ruleset, disabled
//! Pages, absent labels. Remote probes only run when a provider is given,
//! so planning local actions works offline.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::Config;
use crate::error::RepostrapError;
use crate::providers::GitHubProvider;
use crate::utils::detect;

use super::license::{self, LICENSE_FILENAME};
use super::placeholders;
use super::plan::{Action, ActionOperation, ActionPlan, PagesSettings, RulesetSettings};
use super::{git, labels};

/// Builds an [`ActionPlan`] from the current repository state
pub struct SetupPlanner {
    config: Config,
}

impl SetupPlanner {
    /// Create a new planner with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Inspect the repository and derive the pending actions
    ///
    /// Pass `None` as provider when the gh CLI is unavailable; remote
    /// checks are then skipped with a warning.
    pub fn create_plan(
        &self,
        root: &Path,
        provider: Option<&GitHubProvider>,
    ) -> Result<ActionPlan, RepostrapError> {
        let mut plan = ActionPlan::new();

        self.plan_placeholders(root, &mut plan)?;
        self.plan_license(root, &mut plan)?;

        match provider {
            Some(provider) => {
                self.plan_ruleset(provider, &mut plan)?;
                self.plan_pages(root, provider, &mut plan)?;
                self.plan_labels(provider, &mut plan)?;
            }
            None => {
                tracing::warn!(
                    "GitHub CLI not available; skipping remote checks (ruleset, pages, labels)"
                );
            }
        }

        Ok(plan)
    }

    fn plan_placeholders(
        &self,
        root: &Path,
        plan: &mut ActionPlan,
    ) -> Result<(), RepostrapError> {
        let targets = self.config.target_files();
        let values = self.config.placeholder_map();
        let remaining = placeholders::find_remaining(root, &targets)?;

        let (fillable, unfillable): (Vec<_>, Vec<_>) = remaining.into_iter().partition(|t| {
            values
                .get(&t.token)
                .map(|v| !v.is_empty())
                .unwrap_or(false)
        });

        if !unfillable.is_empty() {
            let tokens: BTreeSet<&str> = unfillable.iter().map(|t| t.token.as_str()).collect();
            tracing::warn!(
                "No value configured for token(s): {} (run `repostrap init`)",
                tokens.into_iter().collect::<Vec<_>>().join(", ")
            );
        }

        if fillable.is_empty() {
            return Ok(());
        }

        let files: BTreeSet<&str> = fillable.iter().map(|t| t.file.as_str()).collect();
        let action = Action::new(
            "placeholders/fill",
            "placeholders",
            format!(
                "Fill {} placeholder token(s) in {} file(s)",
                fillable.len(),
                files.len()
            ),
            ActionOperation::ReplacePlaceholders {
                files: targets,
                values,
            },
        )
        .with_details(
            fillable
                .iter()
                .map(|t| format!("{}: {{{{{}}}}}", t.file, t.token)),
        );

        plan.add(action);
        Ok(())
    }

    fn plan_license(
        &self,
        root: &Path,
        plan: &mut ActionPlan,
    ) -> Result<(), RepostrapError> {
        if !self.config.license.enabled || root.join(LICENSE_FILENAME).exists() {
            return Ok(());
        }

        let kind = license::resolve_kind(&self.config.license.kind)?;
        let holder = self.resolve_holder(root);
        let year = self
            .config
            .license
            .year
            .clone()
            .filter(|y| !y.is_empty())
            .unwrap_or_else(detect::current_year);

        let action = Action::new(
            "license/install",
            "license",
            format!("Install {} as LICENSE", kind.display_name()),
            ActionOperation::InstallLicense {
                kind: kind.spdx_id().to_string(),
                holder: holder.clone(),
                year: year.clone(),
            },
        )
        .with_detail(format!("Copyright (c) {} {}", year, holder));

        plan.add(action);
        Ok(())
    }

    /// Copyright holder: configured value, then git identity, then owner,
    /// then project name
    fn resolve_holder(&self, root: &Path) -> String {
        self.config
            .license
            .holder
            .clone()
            .filter(|h| !h.is_empty())
            .or_else(|| detect::git_user_name(root))
            .or_else(|| {
                let owner = self.config.project.owner.clone();
                (!owner.is_empty()).then_some(owner)
            })
            .unwrap_or_else(|| self.config.project.name.clone())
    }

    fn plan_ruleset(
        &self,
        provider: &GitHubProvider,
        plan: &mut ActionPlan,
    ) -> Result<(), RepostrapError> {
        if !self.config.ruleset.enabled {
            return Ok(());
        }

        if provider.get_ruleset(&self.config.ruleset.name)?.is_some() {
            tracing::debug!("Ruleset '{}' already exists", self.config.ruleset.name);
            return Ok(());
        }

        let ruleset = &self.config.ruleset;
        let settings = RulesetSettings {
            name: ruleset.name.clone(),
            required_approvals: ruleset.required_approvals,
            require_linear_history: ruleset.require_linear_history,
            block_force_push: ruleset.block_force_push,
            block_deletions: ruleset.block_deletions,
            require_conversation_resolution: ruleset.require_conversation_resolution,
        };

        let action = Action::new(
            "ruleset/create",
            "ruleset",
            format!("Create branch ruleset '{}'", settings.name),
            ActionOperation::CreateRuleset {
                settings: settings.clone(),
            },
        )
        .with_detail(format!(
            "{} required approval(s) on the default branch",
            settings.required_approvals
        ));

        plan.add(action);
        Ok(())
    }

    fn plan_pages(
        &self,
        root: &Path,
        provider: &GitHubProvider,
        plan: &mut ActionPlan,
    ) -> Result<(), RepostrapError> {
        if !self.config.pages.enabled {
            return Ok(());
        }

        if provider.get_pages()?.is_some() {
            tracing::debug!("Pages already enabled");
            return Ok(());
        }

        let settings = PagesSettings {
            branch: self.config.pages.branch.clone(),
            path: self.config.pages.path.clone(),
        };

        let mut action = Action::new(
            "pages/enable",
            "pages",
            format!("Enable GitHub Pages from '{}'", settings.branch),
            ActionOperation::EnablePages {
                settings: settings.clone(),
            },
        );

        if git::is_git_repository(root) && !git::branch_exists_on_remote(root, &settings.branch) {
            action = action.with_detail(format!(
                "Branch '{}' will be created and pushed",
                settings.branch
            ));
        }

        plan.add(action);
        Ok(())
    }

    fn plan_labels(
        &self,
        provider: &GitHubProvider,
        plan: &mut ActionPlan,
    ) -> Result<(), RepostrapError> {
        if !self.config.labels.enabled || self.config.labels.labels.is_empty() {
            return Ok(());
        }

        let existing = provider.list_label_names()?;
        let missing: Vec<_> = labels::missing(&self.config.labels.labels, &existing)
            .into_iter()
            .cloned()
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        let action = Action::new(
            "labels/create",
            "labels",
            format!("Create {} missing label(s)", missing.len()),
            ActionOperation::CreateLabels {
                labels: missing.clone(),
            },
        )
        .with_details(missing.iter().map(|l| l.name.clone()));

        plan.add(action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn configured() -> Config {
        let mut config = Config::default();
        config.project.name = "widget".to_string();
        config.project.owner = "acme".to_string();
        config.project.repo_url = "https://github.com/acme/widget".to_string();
        config.license.holder = Some("Acme Inc.".to_string());
        config.license.year = Some("2026".to_string());
        config
    }

    #[test]
    fn test_plan_includes_placeholder_fill() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README.md"), "# {{PROJECT_NAME}}\n").unwrap();
        fs::write(root.join("LICENSE"), "already there").unwrap();

        let plan = SetupPlanner::new(configured())
            .create_plan(root, None)
            .unwrap();

        assert_eq!(plan.len(), 1);
        let action = &plan.actions()[0];
        assert_eq!(action.category(), "placeholders");
        assert!(action.details()[0].contains("PROJECT_NAME"));
    }

    #[test]
    fn test_plan_skips_tokens_without_values() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        // PROJECT_DESCRIPTION has no configured value
        fs::write(root.join("README.md"), "{{PROJECT_DESCRIPTION}}\n").unwrap();
        fs::write(root.join("LICENSE"), "already there").unwrap();

        let plan = SetupPlanner::new(configured())
            .create_plan(root, None)
            .unwrap();

        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_includes_license_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let plan = SetupPlanner::new(configured())
            .create_plan(root, None)
            .unwrap();

        assert_eq!(plan.len(), 1);
        let action = &plan.actions()[0];
        assert_eq!(action.category(), "license");
        assert!(action.description().contains("MIT"));
        assert!(action.details()[0].contains("2026"));
        assert!(action.details()[0].contains("Acme Inc."));
    }

    #[test]
    fn test_plan_empty_when_configured_repository_is_complete() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README.md"), "# widget\n").unwrap();
        fs::write(root.join("LICENSE"), "MIT License ...").unwrap();

        let plan = SetupPlanner::new(configured())
            .create_plan(root, None)
            .unwrap();

        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_rejects_unknown_license_kind() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = configured();
        config.license.kind = "WTFPL".to_string();

        let result = SetupPlanner::new(config).create_plan(temp_dir.path(), None);

        assert!(result.is_err());
    }

    #[test]
    fn test_disabled_license_is_not_planned() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = configured();
        config.license.enabled = false;

        let plan = SetupPlanner::new(config)
            .create_plan(temp_dir.path(), None)
            .unwrap();

        assert!(plan.is_empty());
    }
}
