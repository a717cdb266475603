use regions_core::{Head, Revision, SourceOwner};

use crate::traits::ScmSource;
use crate::{ChangeRecord, DiffError, Result, ScmHandle};

pub trait FileSystemProvider: Send + Sync {
    type FileSystem: ScmFileSystem;

    /// Opens a read-only view of the repository at `scm.revision`.
    ///
    /// Returns `Ok(None)` when this provider cannot serve the handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails while opening.
    fn open(
        &self,
        source: &dyn ScmSource,
        scm: &ScmHandle,
        owner: &SourceOwner,
    ) -> Result<Option<Self::FileSystem>>;
}

/// An open file system; dropping it releases the underlying backend.
pub trait ScmFileSystem {
    fn head(&self) -> &Head;

    fn revision(&self) -> &Revision;

    /// Change records after `previous` (exclusive) up to [`Self::revision`]
    /// (inclusive). Without `previous` the provider reports the head's whole
    /// history.
    ///
    /// # Errors
    ///
    /// Returns an error if the changes cannot be enumerated.
    fn changes_since(
        &self,
        previous: Option<&Revision>,
    ) -> std::result::Result<Vec<ChangeRecord>, DiffError>;
}
