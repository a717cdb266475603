use std::collections::BTreeSet;

use regions_core::{Head, Revision, SourceConnection};

/// Repository-relative paths changed between two revisions.
pub type ChangedFiles = BTreeSet<String>;

/// A source bound to one head and revision, ready to be opened as a file
/// system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmHandle {
    pub source_id: String,
    pub connection: SourceConnection,
    pub head: Head,
    pub revision: Revision,
}

/// The paths touched by one change (usually a commit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub revision: Revision,
    pub paths: BTreeSet<String>,
}

impl ChangeRecord {
    #[must_use]
    pub fn new<I, S>(revision: Revision, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            revision,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}
