//! Configuration loader

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, RepostrapError};

use super::{
    LabelsConfig, LicenseConfig, PagesConfig, PlaceholdersConfig, ProjectConfig, RulesetConfig,
};

/// Name of the configuration file at the repository root
pub const CONFIG_FILENAME: &str = ".repostrap.toml";

/// Files of the scaffolding template that carry `{{TOKEN}}` placeholders
pub const DEFAULT_TARGET_FILES: &[&str] = &[
    "README.md",
    "CONTRIBUTING.md",
    ".github/CODEOWNERS",
    "docs/docfx.json",
    "docs/index.md",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Project identity
    #[serde(default)]
    pub project: ProjectConfig,

    /// License installation
    #[serde(default)]
    pub license: LicenseConfig,

    /// Branch ruleset creation
    #[serde(default)]
    pub ruleset: RulesetConfig,

    /// GitHub Pages setup
    #[serde(default)]
    pub pages: PagesConfig,

    /// Issue label creation
    #[serde(default)]
    pub labels: LabelsConfig,

    /// Placeholder substitution
    #[serde(default)]
    pub placeholders: PlaceholdersConfig,
}

impl Config {
    /// Load configuration from the current directory or return defaults
    pub fn load_or_default() -> Result<Self, RepostrapError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, RepostrapError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RepostrapError::Config(ConfigError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        toml::from_str(&content).map_err(Into::into)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, RepostrapError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Write the configuration to `path`
    pub fn save(&self, path: &Path) -> Result<(), RepostrapError> {
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|e| {
            RepostrapError::Config(ConfigError::FileWrite {
                path: path.display().to_string(),
                source: e,
            })
        })
    }

    /// Build the placeholder mapping applied to the template files
    ///
    /// Keys with no configured value map to an empty string; the substitution
    /// engine leaves those tokens untouched.
    pub fn placeholder_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("PROJECT_NAME".to_string(), self.project.name.clone());
        map.insert(
            "PROJECT_DESCRIPTION".to_string(),
            self.project.description.clone(),
        );
        map.insert("REPO_OWNER".to_string(), self.project.owner.clone());
        map.insert("REPO_URL".to_string(), self.project.repo_url.clone());
        map.insert(
            "COPYRIGHT_HOLDER".to_string(),
            self.license.holder.clone().unwrap_or_default(),
        );
        map.insert(
            "YEAR".to_string(),
            self.license.year.clone().unwrap_or_default(),
        );
        map.insert("LICENSE".to_string(), self.license.kind.clone());
        map
    }

    /// Files to run placeholder substitution on
    pub fn target_files(&self) -> Vec<String> {
        let mut files: Vec<String> = DEFAULT_TARGET_FILES
            .iter()
            .map(|f| f.to_string())
            .collect();
        for extra in &self.placeholders.extra_files {
            if !files.contains(extra) {
                files.push(extra.clone());
            }
        }
        files
    }
}
