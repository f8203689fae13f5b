use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ModelError, Result};
use crate::CONFIG_PATH;

/// Project-level settings from `config/code_ownership.yml`.
///
/// Every field has a default, and the file itself is optional, so an empty
/// project is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Globs selecting which files are subject to ownership at all.
    pub owned_globs: Vec<String>,
    /// Files matching these globs are exempt from the unowned-files check.
    pub unowned_globs: Vec<String>,
    pub skip_codeowners_validation: bool,
    pub require_github_teams: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            owned_globs: vec!["**/*".to_string()],
            unowned_globs: Vec::new(),
            skip_codeowners_validation: false,
            require_github_teams: false,
        }
    }
}

impl ProjectConfig {
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_PATH);
        if !path.is_file() {
            log::debug!("No {CONFIG_PATH} found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        serde_yaml::from_str(&contents).map_err(|source| ModelError::Yaml {
            path: CONFIG_PATH.to_string(),
            source,
        })
    }
}
