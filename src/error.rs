//! Error types for repostrap
//!
//! This module defines custom error types using `thiserror` for better error handling
//! and more descriptive error messages throughout the application.

use thiserror::Error;

/// Main error type for repostrap
#[derive(Error, Debug)]
pub enum RepostrapError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors while performing setup actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    /// Errors from external providers (GitHub CLI, git)
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors that occur while loading or writing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write the configuration file
    #[error("Failed to write configuration file '{path}': {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors that occur while executing setup actions
#[derive(Error, Debug)]
pub enum ActionError {
    /// Failed to read a file
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },

    /// Unknown license identifier
    #[error("Unknown license '{name}' (expected MIT, Apache-2.0 or GPL-3.0)")]
    UnknownLicense {
        /// The license name that was requested
        name: String,
    },

    /// A step of the action failed
    #[error("{message}")]
    ExecutionFailed {
        /// Description of the failure
        message: String,
    },
}

/// Errors from the GitHub provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The gh CLI is not installed or not authenticated
    #[error("GitHub CLI (gh) is not installed or not authenticated. Run: gh auth login")]
    GitHubCliNotAvailable,

    /// The gh CLI is installed but not logged in
    #[error("GitHub CLI is not authenticated. Run: gh auth login")]
    NotAuthenticated,

    /// An external command could not be executed
    #[error("Command failed: {command}")]
    CommandFailed {
        /// The command line that failed
        command: String,
    },

    /// A GitHub API request returned a non-success status
    #[error("GitHub API request to '{endpoint}' failed: {stderr}")]
    ApiRequestFailed {
        /// The API endpoint that was called
        endpoint: String,
        /// Trimmed stderr of the gh invocation
        stderr: String,
    },

    /// The repository name could not be parsed
    #[error("Invalid repository name '{name}' (expected owner/name)")]
    InvalidRepoName {
        /// The name that failed to parse
        name: String,
    },
}

// Allow conversion from std::io::Error for convenience
impl From<std::io::Error> for RepostrapError {
    fn from(err: std::io::Error) -> Self {
        RepostrapError::Action(ActionError::ExecutionFailed {
            message: err.to_string(),
        })
    }
}

impl From<toml::de::Error> for RepostrapError {
    fn from(err: toml::de::Error) -> Self {
        RepostrapError::Config(ConfigError::Parse(err))
    }
}

impl From<toml::ser::Error> for RepostrapError {
    fn from(err: toml::ser::Error) -> Self {
        RepostrapError::Config(ConfigError::Serialize(err))
    }
}
