//! License installation
//!
//! Copies one of the built-in license templates to `LICENSE` at the
//! repository root, filling the year and copyright holder through the same
//! token substitution the rest of the template uses.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ActionError, RepostrapError};

use super::placeholders;

/// Output file name at the repository root
pub const LICENSE_FILENAME: &str = "LICENSE";

/// The licenses the template ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseKind {
    /// MIT License
    Mit,
    /// Apache License 2.0
    Apache2,
    /// GNU General Public License v3.0
    Gpl3,
}

impl LicenseKind {
    /// All supported licenses, in display order
    pub const ALL: [LicenseKind; 3] = [Self::Mit, Self::Apache2, Self::Gpl3];

    /// Get license from name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "mit" => Some(Self::Mit),
            "apache-2.0" | "apache2" | "apache" => Some(Self::Apache2),
            "gpl-3.0" | "gpl3" | "gpl" => Some(Self::Gpl3),
            _ => None,
        }
    }

    /// SPDX identifier of the license
    pub fn spdx_id(&self) -> &'static str {
        match self {
            Self::Mit => "MIT",
            Self::Apache2 => "Apache-2.0",
            Self::Gpl3 => "GPL-3.0",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mit => "MIT License",
            Self::Apache2 => "Apache License 2.0",
            Self::Gpl3 => "GNU GPL v3.0",
        }
    }

    /// Template text with `{{ YEAR }}` and `{{ COPYRIGHT_HOLDER }}` tokens
    fn template(&self) -> &'static str {
        match self {
            Self::Mit => MIT_LICENSE,
            Self::Apache2 => APACHE_LICENSE,
            Self::Gpl3 => GPL_LICENSE,
        }
    }
}

/// Write `LICENSE` at `root`, overwriting any existing file
///
/// The selected template is the only license text left in the output.
pub fn install(
    root: &Path,
    kind: LicenseKind,
    holder: &str,
    year: &str,
) -> Result<(), RepostrapError> {
    let mut values = HashMap::new();
    values.insert("YEAR".to_string(), year.to_string());
    values.insert("COPYRIGHT_HOLDER".to_string(), holder.to_string());

    let (content, _) = placeholders::substitute(kind.template(), &values);

    let path = root.join(LICENSE_FILENAME);
    fs::write(&path, content).map_err(|e| {
        RepostrapError::Action(ActionError::FileWrite {
            path: path.display().to_string(),
            source: e,
        })
    })?;

    tracing::info!("Installed {} license", kind.spdx_id());
    Ok(())
}

/// Resolve a configured license name, failing with a descriptive error
pub fn resolve_kind(name: &str) -> Result<LicenseKind, RepostrapError> {
    LicenseKind::from_name(name).ok_or_else(|| {
        RepostrapError::Action(ActionError::UnknownLicense {
            name: name.to_string(),
        })
    })
}

const MIT_LICENSE: &str = r#"MIT License

Copyright (c) {{ YEAR }} {{ COPYRIGHT_HOLDER }}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#;

const APACHE_LICENSE: &str = r#"                                 Apache License
                           Version 2.0, January 2004
                        http://www.apache.org/licenses/

   TERMS AND CONDITIONS FOR USE, REPRODUCTION, AND DISTRIBUTION

   Copyright {{ YEAR }} {{ COPYRIGHT_HOLDER }}

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
"#;

const GPL_LICENSE: &str = r#"Copyright (C) {{ YEAR }} {{ COPYRIGHT_HOLDER }}

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_name_accepts_aliases() {
        assert_eq!(LicenseKind::from_name("MIT"), Some(LicenseKind::Mit));
        assert_eq!(LicenseKind::from_name("apache"), Some(LicenseKind::Apache2));
        assert_eq!(LicenseKind::from_name("GPL-3.0"), Some(LicenseKind::Gpl3));
        assert_eq!(LicenseKind::from_name("bsd"), None);
    }

    #[test]
    fn test_install_fills_year_and_holder() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        install(root, LicenseKind::Mit, "Acme Inc.", "2026").unwrap();

        let content = std::fs::read_to_string(root.join("LICENSE")).unwrap();
        assert!(content.starts_with("MIT License"));
        assert!(content.contains("Copyright (c) 2026 Acme Inc."));
        assert!(!content.contains("{{"));
    }

    #[test]
    fn test_install_overwrites_previous_license() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        install(root, LicenseKind::Mit, "Acme Inc.", "2026").unwrap();
        install(root, LicenseKind::Gpl3, "Acme Inc.", "2026").unwrap();

        let content = std::fs::read_to_string(root.join("LICENSE")).unwrap();
        assert!(content.contains("GNU General Public License"));
        // No trace of the previously installed template
        assert!(!content.contains("MIT License"));
    }

    #[test]
    fn test_each_template_carries_both_tokens() {
        for kind in LicenseKind::ALL {
            let template = kind.template();
            assert!(template.contains("{{ YEAR }}"), "{:?}", kind);
            assert!(template.contains("{{ COPYRIGHT_HOLDER }}"), "{:?}", kind);
        }
    }

    #[test]
    fn test_resolve_kind_rejects_unknown() {
        assert!(resolve_kind("MIT").is_ok());
        assert!(resolve_kind("WTFPL").is_err());
    }
}
