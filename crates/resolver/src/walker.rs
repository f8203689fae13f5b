use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ownership_model::{compile_glob_set, relative_to_root};

use crate::error::Result;

/// Enumerates the files subject to ownership under the project root.
///
/// Gitignore-aware (including global and repo-local excludes); hidden files
/// are included so `.codeowner` markers and `.github/` contents are seen.
/// Paths come back forward-slash, relative to the root, and sorted, so every
/// downstream artifact is deterministic.
pub struct FileWalker {
    root: PathBuf,
}

impl FileWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// All files under the root, filtered by the project's `owned_globs`.
    pub fn tracked_files(&self, owned_globs: &[String]) -> Result<Vec<String>> {
        let owned = compile_glob_set(owned_globs)?;
        let mut files = Vec::new();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .filter_entry(|entry| entry.file_name() != ".git");

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                    if !is_file {
                        continue;
                    }
                    let Some(relative) = relative_to_root(&self.root, entry.path()) else {
                        continue;
                    };
                    if owned.is_match(&relative) {
                        files.push(relative);
                    }
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort_unstable();
        log::debug!("Found {} tracked files", files.len());
        Ok(files)
    }
}
