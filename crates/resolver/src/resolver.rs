use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ownership_model::{is_clean_path, Team, TeamRegistry};

use crate::error::Result;
use crate::mapper::{GlobsToOwner, OwnershipMapper};
use crate::mappers::annotation::FileAnnotationMapper;
use crate::mappers::directory::DirectoryMapper;
use crate::mappers::package_json::PackageJsonMapper;
use crate::mappers::package_yml::PackageYmlMapper;
use crate::mappers::team_globs::TeamGlobMapper;
use crate::mappers::team_yml::TeamYmlMapper;
use crate::source_location::SourceLocation;

/// Orchestrates the mapper chain and owns all per-run caches.
///
/// Single-threaded by design: caches use interior mutability and the whole
/// pipeline is one synchronous batch pass. `reset_caches` lets a long-lived
/// process (a test harness, say) run repeated passes against a changing
/// tree without stale answers surviving.
pub struct Resolver {
    root: PathBuf,
    registry: TeamRegistry,
    mappers: Vec<Box<dyn OwnershipMapper>>,
    class_cache: RefCell<HashMap<String, Option<Team>>>,
}

impl Resolver {
    /// Resolver with the standard mapper chain in fixed precedence order.
    pub fn new(root: impl Into<PathBuf>, registry: TeamRegistry) -> Self {
        let root = root.into();
        let mappers: Vec<Box<dyn OwnershipMapper>> = vec![
            Box::new(FileAnnotationMapper::new(&root)),
            Box::new(TeamGlobMapper::new()),
            Box::new(DirectoryMapper::new(&root)),
            Box::new(PackageYmlMapper::new(&root)),
            Box::new(PackageJsonMapper::new(&root)),
            Box::new(TeamYmlMapper),
        ];
        Self::with_mappers(root, registry, mappers)
    }

    pub fn with_mappers(
        root: impl Into<PathBuf>,
        registry: TeamRegistry,
        mappers: Vec<Box<dyn OwnershipMapper>>,
    ) -> Self {
        Self {
            root: root.into(),
            registry,
            mappers,
            class_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    /// Owner of one file. Non-clean paths (leading `./`, `..` segments)
    /// resolve to no owner rather than erroring.
    pub fn for_file(&self, file: &str) -> Result<Option<Team>> {
        if !is_clean_path(file) {
            log::debug!("Refusing to resolve non-clean path {file}");
            return Ok(None);
        }
        for mapper in &self.mappers {
            if let Some(team) = mapper.resolve(file, &self.registry)? {
                return Ok(Some(team));
            }
        }
        Ok(None)
    }

    /// Owner of the file that defines `type_name`, per the source-location
    /// port. Memoized per type name, including negative answers.
    pub fn for_class(
        &self,
        type_name: &str,
        locator: &dyn SourceLocation,
    ) -> Result<Option<Team>> {
        if let Some(cached) = self.class_cache.borrow().get(type_name) {
            return Ok(cached.clone());
        }

        let owner = match locator.file_for_type(type_name) {
            Some(path) => {
                let file = self.normalize(&path);
                self.for_file(&file)?
            }
            None => None,
        };

        self.class_cache
            .borrow_mut()
            .insert(type_name.to_string(), owner.clone());
        Ok(owner)
    }

    /// Team owning the first owned frame of a backtrace.
    pub fn for_backtrace(
        &self,
        frames: &[String],
        locator: &dyn SourceLocation,
        excluded_teams: &[&str],
    ) -> Result<Option<Team>> {
        Ok(self
            .first_owned_frame(frames, locator, excluded_teams)?
            .map(|(team, _)| team))
    }

    /// Scans frames in order and returns the first `(team, file)` whose
    /// owner is not in `excluded_teams`, or `None` if nothing is owned.
    pub fn first_owned_frame(
        &self,
        frames: &[String],
        locator: &dyn SourceLocation,
        excluded_teams: &[&str],
    ) -> Result<Option<(Team, String)>> {
        for frame in frames {
            let Some(path) = locator.file_for_frame(frame) else {
                continue;
            };
            let file = self.normalize(&path);
            if let Some(team) = self.for_file(&file)? {
                if excluded_teams.contains(&team.name()) {
                    continue;
                }
                return Ok(Some((team, file)));
            }
        }
        Ok(None)
    }

    /// Ordered `(label, glob map)` pairs for every mapper, over `files`.
    /// Feeds CODEOWNERS generation and the per-team report.
    pub fn glob_maps(&self, files: &[String]) -> Result<Vec<(&'static str, GlobsToOwner)>> {
        let mut maps = Vec::with_capacity(self.mappers.len());
        for mapper in &self.mappers {
            maps.push((mapper.label(), mapper.globs_to_owner(files, &self.registry)?));
        }
        Ok(maps)
    }

    pub fn reset_caches(&self) {
        for mapper in &self.mappers {
            mapper.reset_cache();
        }
        self.class_cache.borrow_mut().clear();
    }

    fn normalize(&self, path: &Path) -> String {
        let path = path.strip_prefix(&self.root).unwrap_or(path);
        path.to_string_lossy().replace('\\', "/")
    }
}
