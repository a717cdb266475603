use std::path::PathBuf;

use thiserror::Error;

/// Failure to look up the latest revision of a head.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("head '{head}' not found in {repository}")]
    NotFound { head: String, repository: String },

    #[error("failed to resolve head '{head}'")]
    Git {
        head: String,
        #[source]
        source: regions_git::GitError,
    },

    #[error("provider unreachable: {reason}")]
    Unreachable { reason: String },
}

/// Failure to enumerate the changes between two revisions.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to enumerate changes of '{head}' since {previous}")]
    Git {
        head: String,
        previous: String,
        #[source]
        source: regions_git::GitError,
    },

    #[error("changed path '{}' is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("change enumeration failed: {reason}")]
    Provider { reason: String },
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Pattern(#[from] regions_core::PatternError),

    #[error(transparent)]
    Git(#[from] regions_git::GitError),

    #[error("owner of source '{source_id}' is unavailable")]
    OwnerUnavailable { source_id: String },

    #[error("could not open a file system for '{head}' of source '{source_id}'")]
    FileSystemUnavailable { source_id: String, head: String },

    #[error("failed to collect changed files")]
    Diff(#[from] DiffError),
}

pub type Result<T> = std::result::Result<T, OperationError>;
