use std::collections::BTreeSet;
use std::path::Path;

use regions_core::{Head, Revision, SourceConnection, SourceOwner};
use regions_git::{FileChange, GitError, Repository};
use tracing::debug;

use crate::traits::{FileSystemProvider, RevisionResolver, ScmFileSystem, ScmSource};
use crate::{ChangeRecord, DiffError, ResolutionError, Result, ScmHandle};

/// A source backed by a local clone; the connection endpoint is the path of
/// the clone.
pub struct GitSource {
    id: String,
    connection: SourceConnection,
    owner: Option<SourceOwner>,
}

impl GitSource {
    #[must_use]
    pub fn new(id: impl Into<String>, connection: SourceConnection) -> Self {
        Self {
            id: id.into(),
            connection,
            owner: None,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: SourceOwner) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl ScmSource for GitSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn connection(&self) -> &SourceConnection {
        &self.connection
    }

    fn owner(&self) -> Option<&SourceOwner> {
        self.owner.as_ref()
    }

    fn revision_resolver(&self) -> Option<&dyn RevisionResolver> {
        Some(self)
    }
}

impl RevisionResolver for GitSource {
    fn resolve_head_revision(
        &self,
        connection: &SourceConnection,
        head: &Head,
    ) -> std::result::Result<Revision, ResolutionError> {
        let git_error = |source| ResolutionError::Git {
            head: head.name().to_string(),
            source,
        };

        let repository = Repository::open(Path::new(&connection.endpoint)).map_err(git_error)?;

        match repository.branch_tip(head.name()) {
            Ok(tip) => Ok(Revision::new(head, tip.sha)),
            Err(GitError::BranchNotFound { .. }) => Err(ResolutionError::NotFound {
                head: head.name().to_string(),
                repository: connection.to_string(),
            }),
            Err(source) => Err(git_error(source)),
        }
    }
}

pub struct Git2FileSystemProvider;

impl Git2FileSystemProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2FileSystemProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemProvider for Git2FileSystemProvider {
    type FileSystem = Git2FileSystem;

    fn open(
        &self,
        _source: &dyn ScmSource,
        scm: &ScmHandle,
        owner: &SourceOwner,
    ) -> Result<Option<Git2FileSystem>> {
        let repository = match Repository::open(Path::new(&scm.connection.endpoint)) {
            Ok(repository) => repository,
            Err(err @ GitError::NotARepository { .. }) => {
                debug!(owner = %owner.name, error = %err, "no repository behind source");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        match repository.resolve_commit(scm.revision.hash()) {
            Ok(_) => {}
            Err(err @ GitError::RefNotFound { .. }) => {
                debug!(owner = %owner.name, error = %err, "revision not present in repository");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }

        Ok(Some(Git2FileSystem {
            repository,
            head: scm.head.clone(),
            revision: scm.revision.clone(),
        }))
    }
}

pub struct Git2FileSystem {
    repository: Repository,
    head: Head,
    revision: Revision,
}

impl ScmFileSystem for Git2FileSystem {
    fn head(&self) -> &Head {
        &self.head
    }

    fn revision(&self) -> &Revision {
        &self.revision
    }

    fn changes_since(
        &self,
        previous: Option<&Revision>,
    ) -> std::result::Result<Vec<ChangeRecord>, DiffError> {
        let commits = self
            .repository
            .commit_changes(previous.map(Revision::hash), self.revision.hash())
            .map_err(|source| DiffError::Git {
                head: self.head.name().to_string(),
                previous: previous.map_or_else(
                    || "the beginning of history".to_string(),
                    ToString::to_string,
                ),
                source,
            })?;

        commits
            .into_iter()
            .map(|commit| {
                let paths = commit
                    .changes
                    .iter()
                    .flat_map(FileChange::paths)
                    .map(|path| {
                        path.to_str()
                            .map(str::to_string)
                            .ok_or_else(|| DiffError::NonUtf8Path { path: path.clone() })
                    })
                    .collect::<std::result::Result<BTreeSet<_>, _>>()?;

                Ok(ChangeRecord {
                    revision: Revision::new(&self.head, commit.commit.sha),
                    paths,
                })
            })
            .collect()
    }
}
