mod error;
pub mod operations;
pub mod providers;
pub mod traits;
mod types;

#[cfg(test)]
pub mod mocks;

pub use error::{DiffError, OperationError, ResolutionError, Result};
pub use types::{ChangeRecord, ChangedFiles, ScmHandle};
