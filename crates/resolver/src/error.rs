use ownership_model::TeamRegistry;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolverError>;

#[derive(Error, Debug)]
pub enum ResolverError {
    /// A file, marker, or manifest names a team that is not registered.
    /// Unknown references are configuration bugs and block the whole run.
    #[error("Could not find team with name: `{name}` in {path}. Make sure the team is one of `{registered}`")]
    TeamNotFound {
        name: String,
        path: String,
        registered: String,
    },

    #[error("Failed to parse {path}: {message}")]
    MalformedManifest { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] ownership_model::ModelError),
}

impl ResolverError {
    pub fn team_not_found(name: &str, path: &str, registry: &TeamRegistry) -> Self {
        Self::TeamNotFound {
            name: name.to_string(),
            path: path.to_string(),
            registered: format!("{:?}", registry.team_names()),
        }
    }
}
