//! Configuration module

pub mod loader;

pub use loader::Config;

use serde::{Deserialize, Serialize};

/// Project identity collected during `init`
///
/// These values feed the placeholder mapping applied to the template files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default)]
    pub name: String,

    /// One-line project description
    #[serde(default)]
    pub description: String,

    /// Repository owner (user or organization)
    #[serde(default)]
    pub owner: String,

    /// Canonical repository URL
    #[serde(default)]
    pub repo_url: String,
}

/// License configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseConfig {
    /// Whether to install a LICENSE file
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// License type (MIT, Apache-2.0, GPL-3.0)
    #[serde(default = "default_license_kind")]
    pub kind: String,

    /// Copyright holder (defaults to git user.name)
    #[serde(default)]
    pub holder: Option<String>,

    /// Copyright year (defaults to current year)
    #[serde(default)]
    pub year: Option<String>,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: "MIT".to_string(),
            holder: None,
            year: None,
        }
    }
}

fn default_license_kind() -> String {
    "MIT".to_string()
}

/// Branch ruleset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesetConfig {
    /// Whether to create the branch ruleset
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Name of the ruleset on GitHub
    #[serde(default = "default_ruleset_name")]
    pub name: String,

    /// Number of required pull request approvals
    #[serde(default = "default_approvals")]
    pub required_approvals: u32,

    /// Whether to require a linear history
    #[serde(default = "default_true")]
    pub require_linear_history: bool,

    /// Whether to block force pushes
    #[serde(default = "default_true")]
    pub block_force_push: bool,

    /// Whether to block branch deletion
    #[serde(default = "default_true")]
    pub block_deletions: bool,

    /// Whether to require review thread resolution
    #[serde(default = "default_true")]
    pub require_conversation_resolution: bool,
}

impl Default for RulesetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: default_ruleset_name(),
            required_approvals: 1,
            require_linear_history: true,
            block_force_push: true,
            block_deletions: true,
            require_conversation_resolution: true,
        }
    }
}

fn default_ruleset_name() -> String {
    "default-branch-protection".to_string()
}

fn default_approvals() -> u32 {
    1
}

/// GitHub Pages configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Whether to enable GitHub Pages
    #[serde(default)]
    pub enabled: bool,

    /// Branch the site is published from
    #[serde(default = "default_pages_branch")]
    pub branch: String,

    /// Directory within the branch ("/" or "/docs")
    #[serde(default = "default_pages_path")]
    pub path: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            branch: default_pages_branch(),
            path: default_pages_path(),
        }
    }
}

fn default_pages_branch() -> String {
    "gh-pages".to_string()
}

fn default_pages_path() -> String {
    "/".to_string()
}

/// A single issue label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelSpec {
    /// Label name
    pub name: String,

    /// Hex color without the leading '#'
    #[serde(default = "default_label_color")]
    pub color: String,

    /// Short description shown in the label list
    #[serde(default)]
    pub description: String,
}

fn default_label_color() -> String {
    "ededed".to_string()
}

/// Issue label configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Whether to create missing labels
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Labels the repository should have
    #[serde(default = "default_labels")]
    pub labels: Vec<LabelSpec>,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            labels: default_labels(),
        }
    }
}

fn default_labels() -> Vec<LabelSpec> {
    vec![
        LabelSpec {
            name: "breaking-change".to_string(),
            color: "d93f0b".to_string(),
            description: "Introduces a breaking change".to_string(),
        },
        LabelSpec {
            name: "dependencies".to_string(),
            color: "0366d6".to_string(),
            description: "Dependency updates".to_string(),
        },
        LabelSpec {
            name: "documentation".to_string(),
            color: "0075ca".to_string(),
            description: "Improvements or additions to documentation".to_string(),
        },
    ]
}

/// Placeholder substitution configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlaceholdersConfig {
    /// Additional files to substitute, relative to the repository root
    #[serde(default)]
    pub extra_files: Vec<String>,
}

fn default_true() -> bool {
    true
}
