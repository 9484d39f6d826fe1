use thiserror::Error;

/// Archive inspection failed for one artifact.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("read archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid archive: {0}")]
    Invalid(String),
}

/// Project metadata could not be obtained for an artifact.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no project metadata for {0}")]
    NotFound(String),

    #[error("project metadata for {artifact} is invalid: {reason}")]
    Invalid { artifact: String, reason: String },
}

/// A repository URL could not be probed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("malformed repository url '{0}'")]
    MalformedUrl(String),

    #[error("repository url '{url}' is unreachable: {reason}")]
    Unreachable { url: String, reason: String },
}
