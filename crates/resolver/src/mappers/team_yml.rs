use ownership_model::{Team, TeamRegistry};

use crate::error::Result;
use crate::mapper::{GlobsToOwner, OwnershipMapper};

/// Every team owns its own definition file. Lowest precedence; needs no
/// lookup beyond the registry and no cache.
pub struct TeamYmlMapper;

impl OwnershipMapper for TeamYmlMapper {
    fn resolve(&self, file: &str, registry: &TeamRegistry) -> Result<Option<Team>> {
        Ok(registry
            .all()
            .iter()
            .find(|team| team.source_path() == file)
            .cloned())
    }

    fn globs_to_owner(&self, _files: &[String], registry: &TeamRegistry) -> Result<GlobsToOwner> {
        Ok(registry
            .all()
            .iter()
            .map(|team| (team.source_path().to_string(), team.clone()))
            .collect())
    }

    fn label(&self) -> &'static str {
        "Team YML ownership"
    }

    fn reset_cache(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use ownership_model::Team;
    use pretty_assertions::assert_eq;

    fn registry() -> TeamRegistry {
        TeamRegistry::from_teams(vec![
            Team::from_yaml("config/teams/bar.yml", "name: Bar\n").unwrap(),
            Team::from_yaml("config/teams/foo.yml", "name: Foo\n").unwrap(),
        ])
    }

    #[test]
    fn definition_file_is_owned_by_its_team() {
        let registry = registry();
        let team = TeamYmlMapper
            .resolve("config/teams/foo.yml", &registry)
            .unwrap();
        assert_eq!(team.unwrap().name(), "Foo");
        assert_eq!(
            TeamYmlMapper.resolve("config/other.yml", &registry).unwrap(),
            None
        );
    }

    #[test]
    fn glob_map_lists_every_definition_file() {
        let globs = TeamYmlMapper.globs_to_owner(&[], &registry()).unwrap();
        let rendered: Vec<(&str, &str)> = globs
            .iter()
            .map(|(glob, team)| (glob.as_str(), team.name()))
            .collect();
        assert_eq!(
            rendered,
            [
                ("config/teams/bar.yml", "Bar"),
                ("config/teams/foo.yml", "Foo"),
            ]
        );
    }
}
