pub mod annotation;
pub mod directory;
pub mod package_json;
pub mod package_yml;
pub mod team_globs;
pub mod team_yml;
