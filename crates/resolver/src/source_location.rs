use std::path::{Path, PathBuf};

/// External capability: map a runtime type or a stack frame to the source
/// file that defines it. The resolver only consumes the answer; how the
/// lookup happens (debug info, language reflection, symbol maps) is the
/// caller's business.
pub trait SourceLocation {
    /// Defining source file for a type name, or `None` if unknown.
    fn file_for_type(&self, type_name: &str) -> Option<PathBuf>;

    /// Source file referenced by one rendered stack frame, or `None`.
    fn file_for_frame(&self, frame: &str) -> Option<PathBuf>;
}

/// Parses conventional `path:line[:column] ...` frame strings and renders
/// the path relative to the project root. Frames pointing outside the root
/// yield `None`. Type lookups are unsupported by this implementation.
pub struct FrameParser {
    root: PathBuf,
}

impl FrameParser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceLocation for FrameParser {
    fn file_for_type(&self, _type_name: &str) -> Option<PathBuf> {
        None
    }

    fn file_for_frame(&self, frame: &str) -> Option<PathBuf> {
        let frame = frame.trim().trim_start_matches("at ");
        // Everything before the first `:<digit>` is the path.
        let path_end = frame
            .char_indices()
            .zip(frame.chars().skip(1))
            .find(|((_, ch), next)| *ch == ':' && next.is_ascii_digit())
            .map(|((index, _), _)| index)
            .unwrap_or(frame.len());
        let raw = &frame[..path_end];
        if raw.is_empty() {
            return None;
        }

        let path = Path::new(raw);
        if path.is_absolute() {
            let relative = path.strip_prefix(&self.root).ok()?;
            Some(relative.to_path_buf())
        } else {
            Some(path.to_path_buf())
        }
    }
}
