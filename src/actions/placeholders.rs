//! Placeholder substitution across the template's file set
//!
//! The scaffolding template carries literal `{{TOKEN}}` markers in a fixed
//! list of text files. Substitution is a single pass of literal replacement
//! per key; tokens without a configured value are left in place so a later
//! run can fill them.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ActionError, RepostrapError};

lazy_static! {
    /// Matches `{{KEY}}` and `{{ KEY }}` tokens
    static ref TOKEN_RE: Regex = Regex::new(r"\{\{\s*([A-Z][A-Z0-9_]*)\s*\}\}").unwrap();
}

/// Result of substituting one file
#[derive(Debug, Clone)]
pub struct Substitution {
    /// File path relative to the repository root
    pub file: String,
    /// Number of tokens replaced
    pub replacements: usize,
}

/// A token still present in a target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemainingToken {
    /// File path relative to the repository root
    pub file: String,
    /// Token name without braces
    pub token: String,
}

/// Replace all mapped tokens in `content`
///
/// Both the compact (`{{KEY}}`) and spaced (`{{ KEY }}`) forms are replaced.
/// Keys bound to an empty value are skipped. Returns the new content and the
/// number of tokens replaced.
pub fn substitute(content: &str, values: &HashMap<String, String>) -> (String, usize) {
    let mut result = content.to_string();
    let mut replaced = 0;

    for (key, value) in values {
        if value.is_empty() {
            continue;
        }

        for pattern in [format!("{{{{{}}}}}", key), format!("{{{{ {} }}}}", key)] {
            let count = result.matches(&pattern).count();
            if count > 0 {
                result = result.replace(&pattern, value);
                replaced += count;
            }
        }
    }

    (result, replaced)
}

/// Apply the placeholder mapping to the given files under `root`
///
/// Files that do not exist are skipped; files without any mapped token are
/// left untouched. Returns one [`Substitution`] per file that changed.
pub fn apply(
    root: &Path,
    files: &[String],
    values: &HashMap<String, String>,
) -> Result<Vec<Substitution>, RepostrapError> {
    let mut substitutions = Vec::new();

    for file in files {
        let path = root.join(file);
        if !path.is_file() {
            tracing::debug!("Skipping missing target file: {}", file);
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            RepostrapError::Action(ActionError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        let (new_content, replaced) = substitute(&content, values);
        if replaced == 0 {
            continue;
        }

        fs::write(&path, new_content).map_err(|e| {
            RepostrapError::Action(ActionError::FileWrite {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        tracing::info!("Replaced {} token(s) in {}", replaced, file);
        substitutions.push(Substitution {
            file: file.clone(),
            replacements: replaced,
        });
    }

    Ok(substitutions)
}

/// Scan the given files for tokens that are still present
///
/// Each token is reported once per file. Missing files are skipped.
pub fn find_remaining(root: &Path, files: &[String]) -> Result<Vec<RemainingToken>, RepostrapError> {
    let mut remaining = Vec::new();

    for file in files {
        let path = root.join(file);
        if !path.is_file() {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            RepostrapError::Action(ActionError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        let mut seen = Vec::new();
        for capture in TOKEN_RE.captures_iter(&content) {
            let token = capture[1].to_string();
            if !seen.contains(&token) {
                seen.push(token);
            }
        }

        remaining.extend(seen.into_iter().map(|token| RemainingToken {
            file: file.clone(),
            token,
        }));
    }

    Ok(remaining)
}
