use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidateError>;

#[derive(Error, Debug)]
pub enum ValidateError {
    /// The combined, human-readable validation failure: registry problems,
    /// unowned files, and CODEOWNERS drift, in that fixed order.
    #[error("{0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Resolver(#[from] ownership_resolver::ResolverError),

    #[error(transparent)]
    Model(#[from] ownership_model::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
