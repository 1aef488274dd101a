//! Issue label creation
//!
//! Compares the configured label set against the labels already present and
//! creates only the missing ones. Existing labels are never modified.

use crate::config::LabelSpec;
use crate::error::RepostrapError;
use crate::providers::GitHubProvider;

/// Create the labels from `wanted` that are missing on the repository
///
/// Returns the names of the labels that were created. Individual creation
/// failures (e.g. missing permissions) are logged and do not abort the rest.
pub fn ensure(
    provider: &GitHubProvider,
    wanted: &[LabelSpec],
) -> Result<Vec<String>, RepostrapError> {
    let existing = provider.list_label_names()?;

    let mut created = Vec::new();
    for label in wanted {
        if existing.iter().any(|name| name == &label.name) {
            tracing::debug!("Label '{}' already exists, skipping", label.name);
            continue;
        }

        match provider.create_label(&label.name, &label.color, &label.description) {
            Ok(()) => created.push(label.name.clone()),
            Err(e) => {
                tracing::warn!("Could not create label '{}': {}", label.name, e);
            }
        }
    }

    Ok(created)
}

/// Names from `wanted` that are not in `existing`
pub fn missing<'a>(wanted: &'a [LabelSpec], existing: &[String]) -> Vec<&'a LabelSpec> {
    wanted
        .iter()
        .filter(|label| !existing.iter().any(|name| name == &label.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> LabelSpec {
        LabelSpec {
            name: name.to_string(),
            color: "ededed".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_missing_filters_existing_labels() {
        let wanted = vec![spec("bug"), spec("dependencies"), spec("documentation")];
        let existing = vec!["bug".to_string(), "enhancement".to_string()];

        let result = missing(&wanted, &existing);

        let names: Vec<&str> = result.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["dependencies", "documentation"]);
    }

    #[test]
    fn test_missing_with_all_present_is_empty() {
        let wanted = vec![spec("bug")];
        let existing = vec!["bug".to_string()];

        assert!(missing(&wanted, &existing).is_empty());
    }
}
