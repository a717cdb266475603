mod changes;

use std::path::Path;

use crate::{CommitInfo, GitError, Result};

const DEFAULT_REMOTE: &str = "origin";

pub struct Repository {
    pub(crate) inner: git2::Repository,
}

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if the path is not inside a git repository.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|_| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        Ok(Self { inner })
    }

    /// The latest commit of a branch, preferring the remote-tracking ref over
    /// the local branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::BranchNotFound`] if neither ref exists.
    pub fn branch_tip(&self, name: &str) -> Result<CommitInfo> {
        let candidates = [
            format!("refs/remotes/{DEFAULT_REMOTE}/{name}"),
            format!("refs/heads/{name}"),
        ];

        for refname in &candidates {
            match self.inner.find_reference(refname) {
                Ok(reference) => return Ok(commit_info(&reference.peel_to_commit()?)),
                Err(e) if e.code() == git2::ErrorCode::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Err(GitError::BranchNotFound {
            name: name.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if the refspec does not name a commit.
    pub fn resolve_commit(&self, refspec: &str) -> Result<CommitInfo> {
        Ok(commit_info(&self.find_commit(refspec)?))
    }

    pub(crate) fn find_commit(&self, refspec: &str) -> Result<git2::Commit<'_>> {
        let obj = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        obj.peel_to_commit().map_err(|_| GitError::RefNotFound {
            refspec: refspec.to_string(),
        })
    }
}

fn commit_info(commit: &git2::Commit<'_>) -> CommitInfo {
    CommitInfo {
        sha: commit.id().to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    pub(crate) fn setup_test_repo() -> anyhow::Result<(TempDir, Repository)> {
        let dir = TempDir::new()?;
        let repo = git2::Repository::init(dir.path())?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test")?;
        config.set_str("user.email", "test@example.com")?;

        let sig = git2::Signature::now("Test", "test@example.com")?;
        let tree_id = repo.index()?.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])?;

        let repository = Repository::open(dir.path())?;
        Ok((dir, repository))
    }

    pub(crate) fn commit_index(repo: &Repository, message: &str) -> anyhow::Result<String> {
        let sig = git2::Signature::now("Test", "test@example.com")?;
        let mut index = repo.inner.index()?;
        let tree_id = index.write_tree()?;
        let tree = repo.inner.find_tree(tree_id)?;
        let parent = repo.inner.head()?.peel_to_commit()?;
        let oid = repo
            .inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])?;
        Ok(oid.to_string())
    }

    pub(crate) fn commit_file(
        repo: &Repository,
        path: &str,
        content: &str,
        message: &str,
    ) -> anyhow::Result<String> {
        let root = repo
            .inner
            .workdir()
            .ok_or_else(|| anyhow::anyhow!("bare repository"))?;
        let absolute = root.join(path);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&absolute, content)?;

        let mut index = repo.inner.index()?;
        index.add_path(Path::new(path))?;
        index.write()?;

        commit_index(repo, message)
    }

    #[test]
    fn open_repository() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        let expected = dir.path().canonicalize()?;
        let actual = repo
            .inner
            .workdir()
            .ok_or_else(|| anyhow::anyhow!("bare repository"))?
            .canonicalize()?;
        assert_eq!(actual, expected);
        Ok(())
    }

    #[test]
    fn open_nonexistent_repository() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let result = Repository::open(dir.path());
        assert!(matches!(result, Err(GitError::NotARepository { .. })));
    }

    #[test]
    fn branch_tip_reads_local_branch() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        let sha = commit_file(&repo, "a.txt", "a", "Add a")?;
        let head = repo.inner.head()?.peel_to_commit()?;
        repo.inner.branch("release", &head, false)?;

        let tip = repo.branch_tip("release")?;

        assert_eq!(tip.sha, sha);
        Ok(())
    }

    #[test]
    fn branch_tip_prefers_remote_tracking_ref() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        let remote_sha = commit_file(&repo, "a.txt", "a", "Add a")?;
        let remote_oid = git2::Oid::from_str(&remote_sha)?;
        repo.inner
            .reference("refs/remotes/origin/main", remote_oid, true, "fetch")?;
        let local_sha = commit_file(&repo, "b.txt", "b", "Add b")?;
        let local_oid = git2::Oid::from_str(&local_sha)?;
        repo.inner
            .reference("refs/heads/main", local_oid, true, "local work")?;

        let tip = repo.branch_tip("main")?;

        assert_eq!(tip.sha, remote_sha);
        Ok(())
    }

    #[test]
    fn branch_tip_missing_branch() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        let result = repo.branch_tip("does-not-exist");

        assert!(matches!(result, Err(GitError::BranchNotFound { .. })));
        Ok(())
    }

    #[test]
    fn resolve_commit_accepts_revision_expressions() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        let first = commit_file(&repo, "a.txt", "a", "Add a")?;
        commit_file(&repo, "b.txt", "b", "Add b")?;

        let resolved = repo.resolve_commit("HEAD~1")?;

        assert_eq!(resolved.sha, first);
        Ok(())
    }

    #[test]
    fn resolve_commit_unknown_ref() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        let result = repo.resolve_commit("nonexistent-ref");

        assert!(matches!(result, Err(GitError::RefNotFound { .. })));
        Ok(())
    }
}
