//! # Ownership Model
//!
//! Teams, the team registry, project configuration, and the path/glob
//! primitives shared by the resolver and validators.
//!
//! Teams are loaded once per run from `config/teams/**/*.yml` and are
//! immutable afterwards. All paths handled by this workspace are clean,
//! forward-slash paths relative to the project root.

mod config;
mod error;
mod glob;
mod paths;
mod registry;
mod team;

pub use config::ProjectConfig;
pub use error::{ModelError, Result};
pub use glob::{compile_glob, compile_glob_set};
pub use paths::{is_clean_path, relative_to_root};
pub use registry::TeamRegistry;
pub use team::Team;

/// Directory that holds team definition files, relative to the project root.
pub const TEAMS_DIR: &str = "config/teams";

/// Project configuration file, relative to the project root.
pub const CONFIG_PATH: &str = "config/code_ownership.yml";
