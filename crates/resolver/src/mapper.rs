use ownership_model::{Team, TeamRegistry};

use crate::error::Result;

/// One `(glob, owning team)` pair per entry, in mapper-specific order.
/// The generator sorts within each section before emitting.
pub type GlobsToOwner = Vec<(String, Team)>;

/// One ownership signal. Implementations resolve a single file and can
/// enumerate their full glob→team map for CODEOWNERS generation.
///
/// Mappers are consulted in a fixed order (see the crate docs); a file has
/// at most one owner per mapper.
pub trait OwnershipMapper {
    /// Owner of `file`, or `None` if this signal says nothing about it.
    /// `file` is a clean path relative to the project root.
    fn resolve(&self, file: &str, registry: &TeamRegistry) -> Result<Option<Team>>;

    /// The glob→team map this mapper contributes to CODEOWNERS generation.
    ///
    /// `files` is the full tracked tree. Mappers with a cheaper authoritative
    /// whole-tree scan (directory markers, package manifests) ignore it:
    /// generation always wants whole-repository coverage, so a subset file
    /// list must not constrain it.
    fn globs_to_owner(&self, files: &[String], registry: &TeamRegistry) -> Result<GlobsToOwner>;

    /// Section header used in CODEOWNERS output and ownership reports.
    fn label(&self) -> &'static str;

    /// Clear mapper-local memoization so a later pass observes filesystem
    /// changes made since the last one.
    fn reset_cache(&self);
}
