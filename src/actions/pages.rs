//! GitHub Pages setup
//!
//! Ensures the documentation branch exists on the remote, then enables
//! Pages publishing from it. When the site is already configured, no
//! mutating call is made.

use std::path::Path;

use crate::error::{ActionError, ProviderError, RepostrapError};
use crate::providers::GitHubProvider;

use super::git;
use super::plan::PagesSettings;

/// Outcome of a Pages installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagesOutcome {
    /// Pages publishing was enabled
    Enabled,
    /// Pages was already configured; nothing was sent
    AlreadyEnabled,
}

/// Enable GitHub Pages unless it is already configured
pub fn enable(
    root: &Path,
    provider: &GitHubProvider,
    settings: &PagesSettings,
) -> Result<PagesOutcome, RepostrapError> {
    if let Some(info) = provider.get_pages()? {
        tracing::info!(
            "Pages already enabled{}",
            info.html_url
                .map(|u| format!(" at {}", u))
                .unwrap_or_default()
        );
        return Ok(PagesOutcome::AlreadyEnabled);
    }

    // The publishing source must exist before the API accepts it
    if git::is_git_repository(root) {
        git::ensure_remote_branch(root, &settings.branch)?;
    }

    match provider.enable_pages(&settings.branch, &settings.path) {
        Ok(()) => Ok(PagesOutcome::Enabled),
        Err(RepostrapError::Provider(ProviderError::ApiRequestFailed { stderr, .. }))
            if stderr.contains("Resource not accessible") =>
        {
            Err(RepostrapError::Action(ActionError::ExecutionFailed {
                message: "Cannot enable GitHub Pages. This requires admin access, and Pages \
                          is not available on free private repositories."
                    .to_string(),
            }))
        }
        Err(e) => Err(e),
    }
}
