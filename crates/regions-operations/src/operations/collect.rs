use regions_core::Revision;
use tracing::debug;

use crate::traits::ScmFileSystem;
use crate::{ChangedFiles, DiffError};

/// Unions the paths of every change record between `previous` and the file
/// system's revision.
///
/// # Errors
///
/// Returns an error if the file system cannot enumerate its changes.
pub fn collect_changed_paths<S>(
    file_system: &S,
    previous: Option<&Revision>,
) -> Result<ChangedFiles, DiffError>
where
    S: ScmFileSystem + ?Sized,
{
    let records = file_system.changes_since(previous)?;
    let record_count = records.len();

    let changed: ChangedFiles = records
        .into_iter()
        .flat_map(|record| record.paths)
        .collect();

    debug!(
        head = %file_system.head(),
        revision = %file_system.revision(),
        previous = ?previous.map(ToString::to_string),
        records = record_count,
        files = changed.len(),
        "collected changed files"
    );

    Ok(changed)
}
