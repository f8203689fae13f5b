//! # Ownership Validate
//!
//! CODEOWNERS generation, drift detection, and the unowned-files check,
//! combined behind one `validate` entry point.
//!
//! ## Pipeline
//!
//! ```text
//! tracked files ──> Resolver ──┬─> Unowned-files check
//!                              │
//!                              └─> Generator ──> Diff against
//!                                               .github/CODEOWNERS
//! ```
//!
//! Validation is a single deterministic pass: every failure stems from
//! configuration or content drift, so the only recovery is to fix the
//! source data and re-run. Autocorrect rewrites the CODEOWNERS file for the
//! *next* run; it never silently passes the current one (except when the
//! file was missing entirely).

mod diff;
mod error;
mod generator;
mod git;
mod report;
mod runner;
mod unowned;

pub use diff::{validate_codeowners, CODEOWNERS_PATH};
pub use error::{Result, ValidateError};
pub use generator::{generate_codeowners, CODEOWNERS_HEADER};
pub use git::{GitStager, NoopStager, Stager};
pub use report::for_team;
pub use runner::{validate, ValidateOptions, HELP_FOOTER};
pub use unowned::unowned_files;
