use std::path::PathBuf;

/// One file touched by a commit. Renames carry the path they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub old_path: Option<PathBuf>,
}

impl FileChange {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            old_path: None,
        }
    }

    #[must_use]
    pub fn with_old_path(mut self, old_path: PathBuf) -> Self {
        self.old_path = Some(old_path);
        self
    }

    /// Every path this change touches; a rename yields both of its endpoints.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.path).chain(self.old_path.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
}

/// The files one commit changed. For a merge only the files that differ from
/// every parent count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitChanges {
    pub commit: CommitInfo,
    pub changes: Vec<FileChange>,
}
