use std::path::Path;

/// A clean path is relative, forward-slash, and free of `.`/`..` segments.
/// Ownership resolution is only defined for clean paths; everything else
/// resolves to "no owner" rather than erroring.
pub fn is_clean_path(path: &str) -> bool {
    if path.is_empty() || path.starts_with('/') || path.contains('\\') {
        return false;
    }
    path.split('/').all(|segment| {
        !segment.is_empty() && segment != "." && segment != ".."
    })
}

/// Render `path` relative to `root` as a clean forward-slash string.
/// Returns `None` when `path` is not under `root` or is not valid UTF-8.
pub fn relative_to_root(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut rendered = String::new();
    for component in relative.components() {
        let std::path::Component::Normal(segment) = component else {
            return None;
        };
        if !rendered.is_empty() {
            rendered.push('/');
        }
        rendered.push_str(segment.to_str()?);
    }
    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_paths() {
        assert!(is_clean_path("a/b.rb"));
        assert!(is_clean_path("app/services/[test]/file.rb"));
    }

    #[test]
    fn non_clean_paths() {
        assert!(!is_clean_path("./a/b.rb"));
        assert!(!is_clean_path("a/../b.rb"));
        assert!(!is_clean_path("/a/b.rb"));
        assert!(!is_clean_path("a//b.rb"));
        assert!(!is_clean_path(""));
    }

    #[test]
    fn relative_rendering() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_to_root(root, Path::new("/repo/a/b.rb")),
            Some("a/b.rb".to_string())
        );
        assert_eq!(relative_to_root(root, Path::new("/elsewhere/a.rb")), None);
        assert_eq!(relative_to_root(root, Path::new("/repo")), None);
    }
}
