use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Version-control port: stage one path. Only exercised in
/// autocorrect+stage mode.
pub trait Stager {
    fn stage(&self, path: &Path) -> io::Result<()>;
}

/// Shells out to `git add <path>` in the project root.
pub struct GitStager {
    root: PathBuf,
}

impl GitStager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Stager for GitStager {
    fn stage(&self, path: &Path) -> io::Result<()> {
        let status = Command::new("git")
            .arg("add")
            .arg(path)
            .current_dir(&self.root)
            .status()?;
        if !status.success() {
            return Err(io::Error::other(format!(
                "git add {} exited with {status}",
                path.display()
            )));
        }
        Ok(())
    }
}

/// Stager used when staging is disabled.
pub struct NoopStager;

impl Stager for NoopStager {
    fn stage(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}
