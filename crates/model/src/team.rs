use serde::Deserialize;

use crate::error::{ModelError, Result};

/// A named ownership unit, parsed from one YAML file under `config/teams/`.
///
/// The `name` is the key teams are referenced by in annotations, markers,
/// and manifests. The GitHub identity is optional: teams without one are
/// silently left out of the generated CODEOWNERS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    name: String,
    github_team: Option<String>,
    do_not_add_to_codeowners_file: bool,
    owned_globs: Vec<String>,
    source_path: String,
}

#[derive(Deserialize)]
struct RawTeam {
    name: String,
    github: Option<RawGithub>,
    #[serde(default)]
    owned_globs: Vec<String>,
}

#[derive(Deserialize)]
struct RawGithub {
    team: Option<String>,
    #[serde(default)]
    do_not_add_to_codeowners_file: bool,
}

impl Team {
    /// Parse a team definition. `source_path` is the definition file's
    /// clean path relative to the project root, e.g. `config/teams/bar.yml`.
    pub fn from_yaml(source_path: &str, contents: &str) -> Result<Self> {
        let raw: RawTeam = serde_yaml::from_str(contents).map_err(|source| ModelError::Yaml {
            path: source_path.to_string(),
            source,
        })?;

        let (github_team, opt_out) = match raw.github {
            Some(github) => (github.team, github.do_not_add_to_codeowners_file),
            None => (None, false),
        };

        Ok(Self {
            name: raw.name,
            github_team,
            do_not_add_to_codeowners_file: opt_out,
            owned_globs: raw.owned_globs,
            source_path: source_path.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// GitHub slug, e.g. `@MyOrg/bar-team`.
    pub fn github_team(&self) -> Option<&str> {
        self.github_team.as_deref()
    }

    pub fn opts_out_of_codeowners(&self) -> bool {
        self.do_not_add_to_codeowners_file
    }

    pub fn owned_globs(&self) -> &[String] {
        &self.owned_globs
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }
}
