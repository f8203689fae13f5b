use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::git::Stager;

/// Location of the generated file, relative to the project root.
pub const CODEOWNERS_PATH: &str = ".github/CODEOWNERS";

const OUT_OF_DATE: &str =
    "CODEOWNERS out of date. Run `ownership validate` to update the CODEOWNERS file";

const REGENERATE_HINT: &str = "\
There may be extra lines, or lines are out of order.
You can try to regenerate the CODEOWNERS file from scratch:
1) `rm .github/CODEOWNERS`
2) `ownership validate`";

/// Compare `generated` to the on-disk CODEOWNERS file and classify drift.
///
/// Returns `Ok(None)` on success, `Ok(Some(message))` with the rendered
/// drift diagnostic otherwise. When autocorrect is on, the corrected file is
/// written (and staged, when requested) in every drift case — but only a
/// *missing* file is forgiven for the current run; a mismatch still fails,
/// guaranteeing merely that the next run is clean.
pub fn validate_codeowners(
    root: &Path,
    generated: &str,
    autocorrect: bool,
    stage_changes: bool,
    stager: &dyn Stager,
) -> Result<Option<String>> {
    let path = root.join(CODEOWNERS_PATH);
    let existing = if path.is_file() {
        Some(fs::read_to_string(&path)?)
    } else {
        None
    };

    let Some(existing) = existing else {
        if autocorrect {
            write_and_stage(root, generated, stage_changes, stager)?;
            return Ok(None);
        }
        return Ok(Some(OUT_OF_DATE.to_string()));
    };

    if existing == generated {
        return Ok(None);
    }

    if autocorrect {
        write_and_stage(root, generated, stage_changes, stager)?;
    }

    Ok(Some(format!(
        "{OUT_OF_DATE}\n\n{}",
        drift_details(generated, &existing)
    )))
}

fn write_and_stage(
    root: &Path,
    generated: &str,
    stage_changes: bool,
    stager: &dyn Stager,
) -> Result<()> {
    let path = root.join(CODEOWNERS_PATH);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, generated)?;
    log::info!("Rewrote {CODEOWNERS_PATH}");

    if stage_changes {
        // Best effort: a failed `git add` leaves the corrected file in place.
        if let Err(e) = stager.stage(&path) {
            log::warn!("Failed to stage {CODEOWNERS_PATH}: {e}");
        }
    }
    Ok(())
}

/// Render the mismatch. Set-equal lines in a different order get the generic
/// regenerate hint: a positional diff would misattribute cause when the only
/// issue is ordering.
fn drift_details(generated: &str, existing: &str) -> String {
    let generated_lines: Vec<&str> = generated.lines().collect();
    let existing_lines: Vec<&str> = existing.lines().collect();
    let generated_set: HashSet<&str> = generated_lines.iter().copied().collect();
    let existing_set: HashSet<&str> = existing_lines.iter().copied().collect();

    if generated_set == existing_set {
        return REGENERATE_HINT.to_string();
    }

    let missing: Vec<&str> = generated_lines
        .iter()
        .copied()
        .filter(|line| !existing_set.contains(line))
        .collect();
    let unexpected: Vec<&str> = existing_lines
        .iter()
        .copied()
        .filter(|line| !generated_set.contains(line))
        .collect();

    let mut sections = Vec::new();
    if !missing.is_empty() {
        sections.push(bullet_section(
            "CODEOWNERS should contain the following lines, but does not:",
            &missing,
        ));
    }
    if !unexpected.is_empty() {
        sections.push(bullet_section(
            "CODEOWNERS should not contain the following lines, but it does:",
            &unexpected,
        ));
    }
    sections.join("\n\n")
}

fn bullet_section(header: &str, lines: &[&str]) -> String {
    let mut section = String::from(header);
    for line in lines {
        section.push_str("\n- \"");
        section.push_str(line);
        section.push('"');
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::NoopStager;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::io;
    use std::path::PathBuf;
    use tempfile::tempdir;

    struct RecordingStager {
        staged: RefCell<Vec<PathBuf>>,
    }

    impl RecordingStager {
        fn new() -> Self {
            Self {
                staged: RefCell::new(Vec::new()),
            }
        }
    }

    impl Stager for RecordingStager {
        fn stage(&self, path: &Path) -> io::Result<()> {
            self.staged.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn missing_file_without_autocorrect_is_drift() {
        let temp = tempdir().unwrap();
        let message = validate_codeowners(temp.path(), "content\n", false, false, &NoopStager)
            .unwrap()
            .unwrap();

        assert_eq!(
            message,
            "CODEOWNERS out of date. Run `ownership validate` to update the CODEOWNERS file"
        );
        assert!(!temp.path().join(CODEOWNERS_PATH).exists());
    }

    #[test]
    fn missing_file_with_autocorrect_writes_stages_and_passes() {
        let temp = tempdir().unwrap();
        let stager = RecordingStager::new();

        let outcome =
            validate_codeowners(temp.path(), "content\n", true, true, &stager).unwrap();

        assert_eq!(outcome, None);
        assert_eq!(
            fs::read_to_string(temp.path().join(CODEOWNERS_PATH)).unwrap(),
            "content\n"
        );
        assert_eq!(
            *stager.staged.borrow(),
            [temp.path().join(CODEOWNERS_PATH)]
        );
    }

    #[test]
    fn exact_match_is_success_without_side_effects() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".github")).unwrap();
        fs::write(temp.path().join(CODEOWNERS_PATH), "content\n").unwrap();

        let stager = RecordingStager::new();
        let outcome =
            validate_codeowners(temp.path(), "content\n", true, true, &stager).unwrap();

        assert_eq!(outcome, None);
        assert!(stager.staged.borrow().is_empty());
    }

    #[test]
    fn missing_and_unexpected_lines_are_both_reported() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".github")).unwrap();
        fs::write(
            temp.path().join(CODEOWNERS_PATH),
            "# header\n/a @t\n/extra @t\n",
        )
        .unwrap();

        let message = validate_codeowners(
            temp.path(),
            "# header\n/a @t\n/required @t\n",
            false,
            false,
            &NoopStager,
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            message,
            "CODEOWNERS out of date. Run `ownership validate` to update the CODEOWNERS file\n\
             \n\
             CODEOWNERS should contain the following lines, but does not:\n\
             - \"/required @t\"\n\
             \n\
             CODEOWNERS should not contain the following lines, but it does:\n\
             - \"/extra @t\""
        );
    }

    #[test]
    fn only_missing_lines_omit_the_unexpected_header() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".github")).unwrap();
        fs::write(temp.path().join(CODEOWNERS_PATH), "# header\n").unwrap();

        let message =
            validate_codeowners(temp.path(), "# header\n/a @t\n", false, false, &NoopStager)
                .unwrap()
                .unwrap();

        assert!(message.contains("should contain the following lines"));
        assert!(!message.contains("should not contain"));
    }

    #[test]
    fn reordered_lines_get_the_generic_regenerate_hint() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".github")).unwrap();
        fs::write(temp.path().join(CODEOWNERS_PATH), "/b @t\n/a @t\n").unwrap();

        let message =
            validate_codeowners(temp.path(), "/a @t\n/b @t\n", false, false, &NoopStager)
                .unwrap()
                .unwrap();

        assert_eq!(
            message,
            "CODEOWNERS out of date. Run `ownership validate` to update the CODEOWNERS file\n\
             \n\
             There may be extra lines, or lines are out of order.\n\
             You can try to regenerate the CODEOWNERS file from scratch:\n\
             1) `rm .github/CODEOWNERS`\n\
             2) `ownership validate`"
        );
    }

    #[test]
    fn autocorrect_on_mismatch_writes_but_still_reports_drift() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".github")).unwrap();
        fs::write(temp.path().join(CODEOWNERS_PATH), "stale\n").unwrap();

        let stager = RecordingStager::new();
        let outcome =
            validate_codeowners(temp.path(), "fresh\n", true, true, &stager).unwrap();

        assert!(outcome.is_some());
        assert_eq!(
            fs::read_to_string(temp.path().join(CODEOWNERS_PATH)).unwrap(),
            "fresh\n"
        );
        assert_eq!(stager.staged.borrow().len(), 1);
    }
}
