use std::cell::RefCell;

use globset::GlobMatcher;
use ownership_model::{compile_glob, Team, TeamRegistry};

use crate::error::Result;
use crate::mapper::{GlobsToOwner, OwnershipMapper};

/// Ownership declared through each team's `owned_globs`. Teams are consulted
/// in registry order (lexicographic by definition path), so overlapping
/// globs resolve deterministically: first matching team wins.
pub struct TeamGlobMapper {
    // Compiled matchers per team name, built lazily from the registry on
    // first use. The registry is immutable within a run.
    matchers: RefCell<Option<Vec<(String, Vec<GlobMatcher>)>>>,
}

impl TeamGlobMapper {
    pub fn new() -> Self {
        Self {
            matchers: RefCell::new(None),
        }
    }

    fn ensure_compiled(&self, registry: &TeamRegistry) -> Result<()> {
        if self.matchers.borrow().is_some() {
            return Ok(());
        }
        let mut compiled = Vec::new();
        for team in registry.all() {
            let mut team_matchers = Vec::with_capacity(team.owned_globs().len());
            for pattern in team.owned_globs() {
                team_matchers.push(compile_glob(pattern)?);
            }
            compiled.push((team.name().to_string(), team_matchers));
        }
        *self.matchers.borrow_mut() = Some(compiled);
        Ok(())
    }
}

impl Default for TeamGlobMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnershipMapper for TeamGlobMapper {
    fn resolve(&self, file: &str, registry: &TeamRegistry) -> Result<Option<Team>> {
        self.ensure_compiled(registry)?;
        let matchers = self.matchers.borrow();
        if let Some(compiled) = matchers.as_ref() {
            for (name, team_matchers) in compiled {
                if team_matchers.iter().any(|matcher| matcher.is_match(file)) {
                    return Ok(registry.find(name).cloned());
                }
            }
        }
        Ok(None)
    }

    fn globs_to_owner(&self, _files: &[String], registry: &TeamRegistry) -> Result<GlobsToOwner> {
        let mut globs = Vec::new();
        for team in registry.all() {
            for pattern in team.owned_globs() {
                globs.push((pattern.clone(), team.clone()));
            }
        }
        Ok(globs)
    }

    fn label(&self) -> &'static str {
        "Team-specific owned globs"
    }

    fn reset_cache(&self) {
        *self.matchers.borrow_mut() = None;
    }
}
