//! # Ownership Resolver
//!
//! Resolves files to owning teams through a fixed-precedence chain of
//! mappers, each covering one ownership signal.
//!
//! ## Precedence
//!
//! ```text
//! file
//!   │
//!   ├──> 1. Annotation        (`# @team Bar` at the top of the file)
//!   ├──> 2. Team globs        (`owned_globs` in team YAML)
//!   ├──> 3. Directory marker  (`.codeowner` file, nearest wins)
//!   ├──> 4. package.yml       (`owner:` / `metadata: owner:`)
//!   ├──> 5. package.json      (`"owner"` / `"metadata": {"owner"}`)
//!   └──> 6. Team YAML         (a team owns its own definition file)
//! ```
//!
//! The first mapper with a non-empty answer wins; results are never merged
//! across mappers. A reference to an unregistered team anywhere aborts the
//! run with [`ResolverError::TeamNotFound`].

mod error;
mod mapper;
mod mappers;
mod resolver;
mod source_location;
mod walker;

pub use error::{ResolverError, Result};
pub use mapper::{GlobsToOwner, OwnershipMapper};
pub use mappers::annotation::FileAnnotationMapper;
pub use mappers::directory::{DirectoryMapper, CODEOWNER_MARKER};
pub use mappers::package_json::PackageJsonMapper;
pub use mappers::package_yml::PackageYmlMapper;
pub use mappers::team_globs::TeamGlobMapper;
pub use mappers::team_yml::TeamYmlMapper;
pub use resolver::Resolver;
pub use source_location::{FrameParser, SourceLocation};
pub use walker::FileWalker;
