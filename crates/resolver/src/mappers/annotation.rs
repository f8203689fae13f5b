use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use once_cell::sync::Lazy;
use ownership_model::{Team, TeamRegistry};
use regex::Regex;

use crate::error::{ResolverError, Result};
use crate::mapper::{GlobsToOwner, OwnershipMapper};

static TEAM_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:#|//)\s*@team\s+(.+?)\s*$").expect("annotation regex"));

/// Ownership declared by a `# @team <Name>` (or `// @team <Name>`) comment
/// on the first line of a file. Highest precedence: an annotation beats
/// every directory- or manifest-level signal.
pub struct FileAnnotationMapper {
    root: PathBuf,
}

impl FileAnnotationMapper {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The annotated team name on the first line, if any. Unreadable or
    /// non-UTF-8 first lines mean "no annotation", not an error.
    fn annotation(&self, file: &str) -> Option<String> {
        let handle = File::open(self.root.join(file)).ok()?;
        let mut first_line = String::new();
        BufReader::new(handle).read_line(&mut first_line).ok()?;
        TEAM_ANNOTATION
            .captures(first_line.trim_end())
            .map(|captures| captures[1].to_string())
    }
}

impl OwnershipMapper for FileAnnotationMapper {
    fn resolve(&self, file: &str, registry: &TeamRegistry) -> Result<Option<Team>> {
        let Some(name) = self.annotation(file) else {
            return Ok(None);
        };
        match registry.find(&name) {
            Some(team) => Ok(Some(team.clone())),
            None => Err(ResolverError::team_not_found(&name, file, registry)),
        }
    }

    fn globs_to_owner(&self, files: &[String], registry: &TeamRegistry) -> Result<GlobsToOwner> {
        let mut globs = Vec::new();
        for file in files {
            if let Some(team) = self.resolve(file, registry)? {
                // An annotated file's "glob" is its own path.
                globs.push((file.clone(), team));
            }
        }
        Ok(globs)
    }

    fn label(&self) -> &'static str {
        "Annotations at the top of file"
    }

    fn reset_cache(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use ownership_model::Team;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn registry() -> TeamRegistry {
        TeamRegistry::from_teams(vec![
            Team::from_yaml("config/teams/bar.yml", "name: Bar\n").unwrap()
        ])
    }

    #[test]
    fn resolves_hash_and_slash_annotations() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::write(temp.path().join("app/a.rb"), "# @team Bar\nclass A; end\n").unwrap();
        fs::write(temp.path().join("app/b.ts"), "// @team Bar\nexport {};\n").unwrap();
        fs::write(temp.path().join("app/c.rb"), "class C; end\n").unwrap();

        let mapper = FileAnnotationMapper::new(temp.path());
        let registry = registry();

        assert_eq!(
            mapper.resolve("app/a.rb", &registry).unwrap().unwrap().name(),
            "Bar"
        );
        assert_eq!(
            mapper.resolve("app/b.ts", &registry).unwrap().unwrap().name(),
            "Bar"
        );
        assert_eq!(mapper.resolve("app/c.rb", &registry).unwrap(), None);
    }

    #[test]
    fn unregistered_team_fails_with_the_referencing_file() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::write(temp.path().join("app/a.rb"), "# @team Foo\n").unwrap();

        let mapper = FileAnnotationMapper::new(temp.path());
        let err = mapper.resolve("app/a.rb", &registry()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Could not find team with name: `Foo` in app/a.rb. \
             Make sure the team is one of `[\"Bar\"]`"
        );
    }

    #[test]
    fn paths_with_brackets_resolve() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("app/[test]")).unwrap();
        fs::write(temp.path().join("app/[test]/a.ts"), "// @team Bar\n").unwrap();

        let mapper = FileAnnotationMapper::new(temp.path());
        let team = mapper.resolve("app/[test]/a.ts", &registry()).unwrap();
        assert_eq!(team.unwrap().name(), "Bar");
    }

    #[test]
    fn glob_map_emits_one_entry_per_annotated_file() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::write(temp.path().join("app/a.rb"), "# @team Bar\n").unwrap();
        fs::write(temp.path().join("app/c.rb"), "").unwrap();

        let mapper = FileAnnotationMapper::new(temp.path());
        let globs = mapper
            .globs_to_owner(
                &["app/a.rb".to_string(), "app/c.rb".to_string()],
                &registry(),
            )
            .unwrap();

        assert_eq!(globs.len(), 1);
        assert_eq!(globs[0].0, "app/a.rb");
        assert_eq!(globs[0].1.name(), "Bar");
    }

    #[test]
    fn missing_file_is_no_annotation() {
        let temp = tempdir().unwrap();
        let mapper = FileAnnotationMapper::new(temp.path());
        assert_eq!(mapper.resolve("gone.rb", &registry()).unwrap(), None);
    }
}
