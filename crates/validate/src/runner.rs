use ownership_model::ProjectConfig;
use ownership_resolver::Resolver;

use crate::diff::validate_codeowners;
use crate::error::{Result, ValidateError};
use crate::generator::generate_codeowners;
use crate::git::Stager;
use crate::unowned::{unowned_files, unowned_message};

/// Appended once to every combined validation failure.
pub const HELP_FOOTER: &str =
    "See https://github.com/ownership-rs/ownership#readme for more details";

#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub autocorrect: bool,
    pub stage_changes: bool,
    /// Subset of files for the unowned check; CODEOWNERS generation always
    /// covers the full tree regardless.
    pub files: Option<Vec<String>>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            autocorrect: true,
            stage_changes: true,
            files: None,
        }
    }
}

/// Run every validation and surface one combined failure.
///
/// Issue ordering is part of the contract: registry configuration errors,
/// then unowned files, then CODEOWNERS drift. `TeamNotFound` and I/O
/// problems abort immediately instead of being aggregated.
pub fn validate(
    resolver: &Resolver,
    config: &ProjectConfig,
    tracked_files: &[String],
    options: &ValidateOptions,
    stager: &dyn Stager,
) -> Result<()> {
    let mut issues = resolver
        .registry()
        .validation_errors(config.require_github_teams);

    let candidates = options.files.as_deref().unwrap_or(tracked_files);
    let unowned = unowned_files(resolver, candidates, &config.unowned_globs)?;
    if !unowned.is_empty() {
        issues.push(unowned_message(&unowned));
    }

    if config.skip_codeowners_validation {
        log::debug!("Skipping CODEOWNERS validation per configuration");
    } else {
        let generated = generate_codeowners(resolver, tracked_files)?;
        if let Some(drift) = validate_codeowners(
            resolver.root(),
            &generated,
            options.autocorrect,
            options.stage_changes,
            stager,
        )? {
            issues.push(drift);
        }
    }

    if issues.is_empty() {
        return Ok(());
    }
    let mut message = issues
        .iter()
        .map(|issue| issue.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
    message.push_str("\n\n");
    message.push_str(HELP_FOOTER);
    Err(ValidateError::ValidationFailed(message))
}
