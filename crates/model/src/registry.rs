use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::Result;
use crate::paths::relative_to_root;
use crate::team::Team;
use crate::TEAMS_DIR;

/// All teams known to a run, ordered lexicographically by definition path.
///
/// The ordering is load-bearing: the team-glob mapper consults teams in
/// registry order, so two teams with overlapping `owned_globs` resolve
/// deterministically.
#[derive(Debug, Clone, Default)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    /// Load every `*.yml` under `config/teams/`, recursively.
    pub fn load(root: &Path) -> Result<Self> {
        let teams_dir = root.join(TEAMS_DIR);
        let mut teams = Vec::new();

        if teams_dir.is_dir() {
            for entry in WalkDir::new(&teams_dir).sort_by_file_name() {
                let entry = entry.map_err(std::io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let is_yml = entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == "yml" || ext == "yaml");
                if !is_yml {
                    continue;
                }

                let Some(source_path) = relative_to_root(root, entry.path()) else {
                    continue;
                };
                let contents = fs::read_to_string(entry.path())?;
                teams.push(Team::from_yaml(&source_path, &contents)?);
            }
        }

        log::debug!("Loaded {} team definitions", teams.len());
        Ok(Self::from_teams(teams))
    }

    pub fn from_teams(mut teams: Vec<Team>) -> Self {
        teams.sort_by(|a, b| a.source_path().cmp(b.source_path()));
        Self { teams }
    }

    pub fn find(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.name() == name)
    }

    pub fn all(&self) -> &[Team] {
        &self.teams
    }

    /// Registered team names, sorted. Used for "did you mean" style errors.
    pub fn team_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.teams.iter().map(Team::name).collect();
        names.sort_unstable();
        names
    }

    /// Aggregate configuration problems: duplicate names, duplicate GitHub
    /// slugs, and (under `require_github_teams`) missing slugs. These are
    /// reported together rather than failing per-file resolution.
    pub fn validation_errors(&self, require_github_teams: bool) -> Vec<String> {
        let mut errors = Vec::new();

        let mut by_name: BTreeMap<&str, usize> = BTreeMap::new();
        for team in &self.teams {
            *by_name.entry(team.name()).or_default() += 1;
        }
        for (name, count) in by_name {
            if count > 1 {
                errors.push(format!("More than 1 definition for {name} found"));
            }
        }

        let mut by_slug: BTreeMap<&str, usize> = BTreeMap::new();
        for team in &self.teams {
            if let Some(slug) = team.github_team() {
                *by_slug.entry(slug).or_default() += 1;
            }
        }
        let duplicated_slugs: Vec<&str> = by_slug
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(slug, _)| slug)
            .collect();
        if !duplicated_slugs.is_empty() {
            let mut message = String::from(
                "The following teams are specified multiple times:\n\
                 Each code team must have a unique GitHub team in order to write the CODEOWNERS file correctly.\n\n",
            );
            for slug in duplicated_slugs {
                message.push_str(slug);
                message.push('\n');
            }
            errors.push(message);
        }

        if require_github_teams {
            let mut missing: Vec<&str> = self
                .teams
                .iter()
                .filter(|team| team.github_team().is_none())
                .map(Team::source_path)
                .collect();
            missing.sort_unstable();
            if !missing.is_empty() {
                let mut message =
                    String::from("The following teams are missing `github.team` entries:\n\n");
                for path in missing {
                    message.push_str(path);
                    message.push('\n');
                }
                errors.push(message);
            }
        }

        errors
    }
}
