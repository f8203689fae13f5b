use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ownership_model::{relative_to_root, Team, TeamRegistry};
use walkdir::WalkDir;

use crate::error::{ResolverError, Result};
use crate::mapper::{GlobsToOwner, OwnershipMapper};

const MANIFEST: &str = "package.yml";

/// Outcome of inspecting one directory for a manifest. `NoManifest` keeps the
/// upward walk going; the other two stop it.
#[derive(Clone)]
enum DirScan {
    NoManifest,
    ManifestWithoutOwner,
    Owner(Team),
}

/// Ownership declared by the `owner:` key (top-level or under `metadata:`)
/// of the nearest `package.yml` above a file. A manifest without an owner
/// key still ends the walk: the package boundary is authoritative.
pub struct PackageYmlMapper {
    root: PathBuf,
    cache: RefCell<HashMap<PathBuf, DirScan>>,
}

impl PackageYmlMapper {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn scan_dir(&self, dir: &Path, registry: &TeamRegistry) -> Result<DirScan> {
        if let Some(cached) = self.cache.borrow().get(dir) {
            return Ok(cached.clone());
        }

        let manifest = self.root.join(dir).join(MANIFEST);
        let scan = if manifest.is_file() {
            match self.owner_name(&manifest)? {
                Some(name) => {
                    let manifest_path = relative_to_root(&self.root, &manifest)
                        .unwrap_or_else(|| MANIFEST.to_string());
                    let team = registry.find(&name).ok_or_else(|| {
                        ResolverError::team_not_found(&name, &manifest_path, registry)
                    })?;
                    DirScan::Owner(team.clone())
                }
                None => DirScan::ManifestWithoutOwner,
            }
        } else {
            DirScan::NoManifest
        };

        self.cache.borrow_mut().insert(dir.to_path_buf(), scan.clone());
        Ok(scan)
    }

    /// `owner:` at the top level, or `metadata: owner:`.
    fn owner_name(&self, manifest: &Path) -> Result<Option<String>> {
        let contents = fs::read_to_string(manifest)?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&contents).map_err(|err| ResolverError::MalformedManifest {
                path: relative_to_root(&self.root, manifest)
                    .unwrap_or_else(|| manifest.display().to_string()),
                message: err.to_string(),
            })?;

        let owner = value
            .get("owner")
            .or_else(|| value.get("metadata").and_then(|meta| meta.get("owner")))
            .and_then(serde_yaml::Value::as_str)
            .map(str::to_string);
        Ok(owner)
    }
}

impl OwnershipMapper for PackageYmlMapper {
    fn resolve(&self, file: &str, registry: &TeamRegistry) -> Result<Option<Team>> {
        let parent = Path::new(file).parent().unwrap_or_else(|| Path::new(""));
        for dir in parent.ancestors() {
            match self.scan_dir(dir, registry)? {
                DirScan::Owner(team) => return Ok(Some(team)),
                DirScan::ManifestWithoutOwner => return Ok(None),
                DirScan::NoManifest => continue,
            }
        }
        Ok(None)
    }

    /// Whole-tree scan for manifests; the passed file list never constrains
    /// CODEOWNERS coverage.
    fn globs_to_owner(&self, _files: &[String], registry: &TeamRegistry) -> Result<GlobsToOwner> {
        let mut globs = Vec::new();
        let walk = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git");
        for entry in walk {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || entry.file_name() != MANIFEST {
                continue;
            }
            let Some(name) = self.owner_name(entry.path())? else {
                continue;
            };
            let manifest_path = relative_to_root(&self.root, entry.path())
                .unwrap_or_else(|| MANIFEST.to_string());
            let team = registry
                .find(&name)
                .ok_or_else(|| ResolverError::team_not_found(&name, &manifest_path, registry))?;

            let glob = match entry.path().parent().and_then(|dir| relative_to_root(&self.root, dir))
            {
                Some(dir) => format!("{dir}/**/**"),
                None => "**/**".to_string(),
            };
            globs.push((glob, team.clone()));
        }
        Ok(globs)
    }

    fn label(&self) -> &'static str {
        "Owner metadata key in package.yml"
    }

    fn reset_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ownership_model::Team;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn registry() -> TeamRegistry {
        TeamRegistry::from_teams(vec![
            Team::from_yaml("config/teams/bar.yml", "name: Bar\n").unwrap()
        ])
    }

    #[test]
    fn flat_owner_key_resolves() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("packs/my_pack/app")).unwrap();
        fs::write(temp.path().join("packs/my_pack/package.yml"), "owner: Bar\n").unwrap();

        let mapper = PackageYmlMapper::new(temp.path());
        let team = mapper
            .resolve("packs/my_pack/app/service.rb", &registry())
            .unwrap();
        assert_eq!(team.unwrap().name(), "Bar");
    }

    #[test]
    fn nested_metadata_owner_key_resolves() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("packs/my_pack")).unwrap();
        fs::write(
            temp.path().join("packs/my_pack/package.yml"),
            "metadata:\n  owner: Bar\n",
        )
        .unwrap();

        let mapper = PackageYmlMapper::new(temp.path());
        let team = mapper.resolve("packs/my_pack/file.rb", &registry()).unwrap();
        assert_eq!(team.unwrap().name(), "Bar");
    }

    #[test]
    fn manifest_without_owner_ends_the_walk() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("packs/my_pack")).unwrap();
        fs::write(temp.path().join("package.yml"), "owner: Bar\n").unwrap();
        fs::write(
            temp.path().join("packs/my_pack/package.yml"),
            "enforce_privacy: true\n",
        )
        .unwrap();

        let mapper = PackageYmlMapper::new(temp.path());
        // The nearest manifest has no owner; the root manifest must not leak
        // through the package boundary.
        assert_eq!(
            mapper.resolve("packs/my_pack/file.rb", &registry()).unwrap(),
            None
        );
    }

    #[test]
    fn unregistered_owner_fails_with_manifest_path() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("packs/my_pack")).unwrap();
        fs::write(temp.path().join("packs/my_pack/package.yml"), "owner: Foo\n").unwrap();

        let mapper = PackageYmlMapper::new(temp.path());
        let err = mapper
            .resolve("packs/my_pack/file.rb", &registry())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find team with name: `Foo` in packs/my_pack/package.yml. \
             Make sure the team is one of `[\"Bar\"]`"
        );
    }

    #[test]
    fn glob_map_emits_one_entry_per_owned_manifest() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("packs/a")).unwrap();
        fs::create_dir_all(temp.path().join("packs/b")).unwrap();
        fs::write(temp.path().join("packs/a/package.yml"), "owner: Bar\n").unwrap();
        fs::write(temp.path().join("packs/b/package.yml"), "enforce: true\n").unwrap();

        let mapper = PackageYmlMapper::new(temp.path());
        let globs = mapper.globs_to_owner(&[], &registry()).unwrap();

        assert_eq!(globs.len(), 1);
        assert_eq!(globs[0].0, "packs/a/**/**");
        assert_eq!(globs[0].1.name(), "Bar");
    }
}
