use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ownership_model::{relative_to_root, Team, TeamRegistry};
use walkdir::WalkDir;

use crate::error::{ResolverError, Result};
use crate::mapper::{GlobsToOwner, OwnershipMapper};

const MANIFEST: &str = "package.json";

#[derive(Clone)]
enum DirScan {
    NoManifest,
    ManifestWithoutOwner,
    Owner(Team),
}

/// Ownership declared by `"owner"` (top-level or under `"metadata"`) in the
/// nearest `package.json` above a file.
///
/// Unlike `package.yml`, a team-not-found error references the package
/// directory rather than the manifest file.
pub struct PackageJsonMapper {
    root: PathBuf,
    cache: RefCell<HashMap<PathBuf, DirScan>>,
}

impl PackageJsonMapper {
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
                    let team = registry.find(&name).ok_or_else(|| {
                        ResolverError::team_not_found(&name, &package_dir_label(dir), registry)
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

    fn owner_name(&self, manifest: &Path) -> Result<Option<String>> {
        let contents = fs::read_to_string(manifest)?;
        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|err| ResolverError::MalformedManifest {
                path: relative_to_root(&self.root, manifest)
                    .unwrap_or_else(|| manifest.display().to_string()),
                message: err.to_string(),
            })?;

        let owner = value
            .get("owner")
            .or_else(|| value.get("metadata").and_then(|meta| meta.get("owner")))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Ok(owner)
    }
}

fn package_dir_label(dir: &Path) -> String {
    let rendered = dir.to_string_lossy().replace('\\', "/");
    if rendered.is_empty() {
        ".".to_string()
    } else {
        rendered
    }
}

impl OwnershipMapper for PackageJsonMapper {
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

    fn globs_to_owner(&self, _files: &[String], registry: &TeamRegistry) -> Result<GlobsToOwner> {
        let mut globs = Vec::new();
        let walk = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| {
                entry.file_name() != ".git" && entry.file_name() != "node_modules"
            });
        for entry in walk {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || entry.file_name() != MANIFEST {
                continue;
            }
            let Some(name) = self.owner_name(entry.path())? else {
                continue;
            };

            let dir = entry
                .path()
                .parent()
                .and_then(|dir| relative_to_root(&self.root, dir));
            let dir_label = dir.clone().unwrap_or_else(|| ".".to_string());
            let team = registry
                .find(&name)
                .ok_or_else(|| ResolverError::team_not_found(&name, &dir_label, registry))?;

            let glob = match dir {
                Some(dir) => format!("{dir}/**/**"),
                None => "**/**".to_string(),
            };
            globs.push((glob, team.clone()));
        }
        Ok(globs)
    }

    fn label(&self) -> &'static str {
        "Owner metadata key in package.json"
    }

    fn reset_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}
