//! Action plan structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::LabelSpec;

/// A single action to be performed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Action identifier
    id: String,
    /// Action category
    category: String,
    /// Human-readable description
    description: String,
    /// Additional details about what will be changed
    details: Vec<String>,
    /// The actual operation to perform
    operation: ActionOperation,
}

impl Action {
    /// Create a new action
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        operation: ActionOperation,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            description: description.into(),
            details: Vec::new(),
            operation,
        }
    }

    /// Add a detail line
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Add multiple details
    pub fn with_details(mut self, details: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.details.extend(details.into_iter().map(|d| d.into()));
        self
    }

    /// Get the action ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Get the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the details
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Get the operation
    pub fn operation(&self) -> &ActionOperation {
        &self.operation
    }
}

/// The type of operation to perform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionOperation {
    /// Replace `{{TOKEN}}` placeholders in the template files
    ReplacePlaceholders {
        files: Vec<String>,
        values: HashMap<String, String>,
    },

    /// Write the LICENSE file
    InstallLicense {
        kind: String,
        holder: String,
        year: String,
    },

    /// Create the branch ruleset on GitHub
    CreateRuleset { settings: RulesetSettings },

    /// Enable GitHub Pages
    EnablePages { settings: PagesSettings },

    /// Create missing issue labels
    CreateLabels { labels: Vec<LabelSpec> },
}

/// Branch ruleset settings, as sent to the GitHub rulesets API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesetSettings {
    pub name: String,
    pub required_approvals: u32,
    pub require_linear_history: bool,
    pub block_force_push: bool,
    pub block_deletions: bool,
    pub require_conversation_resolution: bool,
}

impl Default for RulesetSettings {
    fn default() -> Self {
        Self {
            name: "default-branch-protection".to_string(),
            required_approvals: 1,
            require_linear_history: true,
            block_force_push: true,
            block_deletions: true,
            require_conversation_resolution: true,
        }
    }
}

/// GitHub Pages settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesSettings {
    /// Branch the site is published from
    pub branch: String,
    /// Directory within the branch
    pub path: String,
}

impl Default for PagesSettings {
    fn default() -> Self {
        Self {
            branch: "gh-pages".to_string(),
            path: "/".to_string(),
        }
    }
}

/// A collection of actions to perform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    actions: Vec<Action>,
}

impl ActionPlan {
    /// Create a new empty action plan
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Add an action to the plan
    pub fn add(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Get all actions
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Check if the plan is empty
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Get the number of actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Filter to only include specific action categories
    pub fn filter_only(&mut self, categories: &[String]) {
        self.actions.retain(|a| categories.contains(&a.category));
    }

    /// Filter to skip specific action categories
    pub fn filter_skip(&mut self, categories: &[String]) {
        self.actions.retain(|a| !categories.contains(&a.category));
    }
}

impl Default for ActionPlan {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> ActionPlan {
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
        plan.add(Action::new(
            "ruleset/create",
            "ruleset",
            "Create branch ruleset",
            ActionOperation::CreateRuleset {
                settings: RulesetSettings::default(),
            },
        ));
        plan
    }

    #[test]
    fn test_filter_only() {
        let mut plan = sample_plan();
        plan.filter_only(&["license".to_string()]);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.actions()[0].category(), "license");
    }

    #[test]
    fn test_filter_skip() {
        let mut plan = sample_plan();
        plan.filter_skip(&["license".to_string()]);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.actions()[0].category(), "ruleset");
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let plan = sample_plan();
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("license/install"));
        assert!(json.contains("ruleset/create"));
    }
}
