use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ownership_model::{relative_to_root, Team, TeamRegistry};
use walkdir::WalkDir;

use crate::error::{ResolverError, Result};
use crate::mapper::{GlobsToOwner, OwnershipMapper};

/// Name of the per-directory marker file.
pub const CODEOWNER_MARKER: &str = ".codeowner";

/// Ownership declared by a `.codeowner` marker file: the marker's directory
/// is owned recursively, and a marker in a nested directory shadows any
/// ancestor's for files beneath it.
///
/// `resolve` walks upward from the file's parent toward the root. Each
/// directory's answer is memoized so sibling-file walks amortize to O(1);
/// the cache distinguishes "marker resolved to this team" and "known to have
/// no marker" (an entry) from "not yet checked" (no entry).
pub struct DirectoryMapper {
    root: PathBuf,
    cache: RefCell<HashMap<PathBuf, Option<Team>>>,
}

impl DirectoryMapper {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Owner named by the marker in `dir` (relative), if the marker exists.
    /// Consults and fills the per-directory cache.
    fn owner_of_dir(&self, dir: &Path, registry: &TeamRegistry) -> Result<Option<Team>> {
        if let Some(cached) = self.cache.borrow().get(dir) {
            return Ok(cached.clone());
        }

        let marker = self.root.join(dir).join(CODEOWNER_MARKER);
        let owner = if marker.is_file() {
            self.owner_of_marker(&marker, registry)?
        } else {
            None
        };

        self.cache.borrow_mut().insert(dir.to_path_buf(), owner.clone());
        Ok(owner)
    }

    /// Owner named by a marker file: its first non-blank line, trimmed.
    fn owner_of_marker(&self, marker: &Path, registry: &TeamRegistry) -> Result<Option<Team>> {
        let contents = fs::read_to_string(marker)?;
        let Some(name) = contents.lines().map(str::trim).find(|line| !line.is_empty()) else {
            log::warn!("Empty {CODEOWNER_MARKER} marker at {}", marker.display());
            return Ok(None);
        };

        let marker_path = relative_to_root(&self.root, marker)
            .unwrap_or_else(|| marker.display().to_string());
        match registry.find(name) {
            Some(team) => Ok(Some(team.clone())),
            None => Err(ResolverError::team_not_found(name, &marker_path, registry)),
        }
    }
}

impl OwnershipMapper for DirectoryMapper {
    fn resolve(&self, file: &str, registry: &TeamRegistry) -> Result<Option<Team>> {
        let parent = Path::new(file).parent().unwrap_or_else(|| Path::new(""));
        for dir in parent.ancestors() {
            if let Some(team) = self.owner_of_dir(dir, registry)? {
                return Ok(Some(team));
            }
        }
        Ok(None)
    }

    /// Scans the whole tree for markers directly, ignoring `files`: iterating
    /// directories is the authoritative (and cheapest) way to enumerate
    /// marker coverage, and the emitted globs must cover files that do not
    /// exist yet.
    fn globs_to_owner(&self, _files: &[String], registry: &TeamRegistry) -> Result<GlobsToOwner> {
        let mut globs = Vec::new();
        let walk = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git");
        for entry in walk {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || entry.file_name() != CODEOWNER_MARKER {
                continue;
            }
            let Some(team) = self.owner_of_marker(entry.path(), registry)? else {
                continue;
            };

            let dir = entry.path().parent().unwrap_or(&self.root);
            let glob = match relative_to_root(&self.root, dir) {
                Some(relative) => format!("{relative}/**/**"),
                None => "**/**".to_string(), // marker at the project root
            };
            globs.push((glob, team));
        }
        Ok(globs)
    }

    fn label(&self) -> &'static str {
        "Owner in .codeowner"
    }

    fn reset_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}
