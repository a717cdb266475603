use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to read configuration '{}'", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration '{}'", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid include pattern")]
    Pattern(#[from] regions_core::PatternError),

    #[error("operation failed")]
    Operation(#[from] regions_operations::OperationError),

    #[error("failed to list changed files")]
    Diff(#[from] regions_operations::DiffError),

    #[error("revision '{revision}' is not available in '{}'", path.display())]
    RevisionUnavailable { revision: String, path: PathBuf },

    #[error("either --head or --pr with --target is required")]
    MissingHead,
}

pub type Result<T> = std::result::Result<T, CliError>;
