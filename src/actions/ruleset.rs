//! Branch ruleset creation via the GitHub API
//!
//! The installer is check-then-act: when a ruleset with the configured name
//! already exists, no mutating call is made.

use serde_json::json;

use crate::error::{ActionError, ProviderError, RepostrapError};
use crate::providers::GitHubProvider;

use super::plan::RulesetSettings;

/// Outcome of a ruleset installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesetOutcome {
    /// The ruleset was created
    Created,
    /// A ruleset with that name already exists; nothing was sent
    AlreadyExists,
}

/// Create the branch ruleset unless it already exists
pub fn configure(
    provider: &GitHubProvider,
    settings: &RulesetSettings,
) -> Result<RulesetOutcome, RepostrapError> {
    if let Some(existing) = provider.get_ruleset(&settings.name)? {
        tracing::info!(
            "Ruleset '{}' already exists (id {}), skipping",
            existing.name,
            existing.id
        );
        return Ok(RulesetOutcome::AlreadyExists);
    }

    let payload = build_payload(settings);

    match provider.create_ruleset(&payload) {
        Ok(()) => Ok(RulesetOutcome::Created),
        Err(RepostrapError::Provider(ProviderError::ApiRequestFailed { stderr, .. }))
            if stderr.contains("Resource not accessible") =>
        {
            Err(RepostrapError::Action(ActionError::ExecutionFailed {
                message: "Cannot create the branch ruleset. This requires admin access, and \
                          rulesets may not be available on free private repositories."
                    .to_string(),
            }))
        }
        Err(e) => Err(e),
    }
}

/// Build the JSON payload for `POST /repos/{owner}/{repo}/rulesets`
///
/// The ruleset targets the repository's default branch via the
/// `~DEFAULT_BRANCH` selector.
fn build_payload(settings: &RulesetSettings) -> serde_json::Value {
    let mut rules = Vec::new();

    if settings.block_deletions {
        rules.push(json!({"type": "deletion"}));
    }

    if settings.block_force_push {
        rules.push(json!({"type": "non_fast_forward"}));
    }

    if settings.require_linear_history {
        rules.push(json!({"type": "required_linear_history"}));
    }

    if settings.required_approvals > 0 {
        rules.push(json!({
            "type": "pull_request",
            "parameters": {
                "required_approving_review_count": settings.required_approvals,
                "dismiss_stale_reviews_on_push": true,
                "require_code_owner_review": false,
                "require_last_push_approval": false,
                "required_review_thread_resolution": settings.require_conversation_resolution,
            }
        }));
    }

    json!({
        "name": settings.name,
        "target": "branch",
        "enforcement": "active",
        "conditions": {
            "ref_name": {
                "include": ["~DEFAULT_BRANCH"],
                "exclude": [],
            }
        },
        "rules": rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_targets_default_branch() {
        let payload = build_payload(&RulesetSettings::default());

        assert_eq!(payload["target"], "branch");
        assert_eq!(payload["enforcement"], "active");
        assert_eq!(
            payload["conditions"]["ref_name"]["include"][0],
            "~DEFAULT_BRANCH"
        );
    }

    #[test]
    fn test_payload_includes_configured_rules() {
        let payload = build_payload(&RulesetSettings::default());
        let rules = payload["rules"].as_array().unwrap();

        let types: Vec<&str> = rules
            .iter()
            .map(|r| r["type"].as_str().unwrap())
            .collect();
        assert_eq!(
            types,
            vec![
                "deletion",
                "non_fast_forward",
                "required_linear_history",
                "pull_request"
            ]
        );

        let pr = &rules[3]["parameters"];
        assert_eq!(pr["required_approving_review_count"], 1);
        assert_eq!(pr["required_review_thread_resolution"], true);
    }

    #[test]
    fn test_payload_omits_disabled_rules() {
        let settings = RulesetSettings {
            required_approvals: 0,
            require_linear_history: false,
            block_force_push: false,
            block_deletions: false,
            ..RulesetSettings::default()
        };
        let payload = build_payload(&settings);

        assert!(payload["rules"].as_array().unwrap().is_empty());
    }
}
