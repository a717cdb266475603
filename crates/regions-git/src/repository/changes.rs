use std::collections::HashSet;
use std::path::PathBuf;

use crate::{CommitChanges, FileChange, GitError, Result};

use super::{Repository, commit_info};

impl Repository {
    /// Lists the commits reachable from `head` but not from `base`, newest
    /// first, each with the files it changed.
    ///
    /// A regular commit is compared with its parent. A merge only reports the
    /// files that differ from every one of its parents, so bringing another
    /// branch's work in does not count that work as changed here.
    ///
    /// Without a `base` the whole history of `head` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if either base or head cannot be resolved.
    pub fn commit_changes(&self, base: Option<&str>, head: &str) -> Result<Vec<CommitChanges>> {
        let head_commit = self.find_commit(head)?;

        let mut walk = self.inner.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        walk.push(head_commit.id())?;

        if let Some(refspec) = base {
            walk.hide(self.find_commit(refspec)?.id())?;
        }

        let mut commits = Vec::new();

        for oid in walk {
            let commit = self.inner.find_commit(oid?)?;
            let changes = self.changes_against_parents(&commit)?;
            commits.push(CommitChanges {
                commit: commit_info(&commit),
                changes,
            });
        }

        Ok(commits)
    }

    fn changes_against_parents(&self, commit: &git2::Commit<'_>) -> Result<Vec<FileChange>> {
        let tree = commit.tree()?;
        let mut parents = commit.parents();

        let Some(first_parent) = parents.next() else {
            return self.tree_changes(None, &tree);
        };

        let mut changes = self.tree_changes(Some(&first_parent.tree()?), &tree)?;

        for parent in parents {
            let touched: HashSet<PathBuf> = self
                .tree_changes(Some(&parent.tree()?), &tree)?
                .iter()
                .flat_map(FileChange::paths)
                .cloned()
                .collect();
            changes.retain(|change| change.paths().any(|path| touched.contains(path)));
        }

        Ok(changes)
    }

    fn tree_changes(
        &self,
        old_tree: Option<&git2::Tree<'_>>,
        new_tree: &git2::Tree<'_>,
    ) -> Result<Vec<FileChange>> {
        let mut diff = self
            .inner
            .diff_tree_to_tree(old_tree, Some(new_tree), None)?;

        let mut find_opts = git2::DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            let renamed = match delta.status() {
                git2::Delta::Added | git2::Delta::Deleted | git2::Delta::Modified => false,
                git2::Delta::Renamed => true,
                _ => continue,
            };

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(PathBuf::from)
                .ok_or(GitError::MissingDeltaPath)?;

            let mut change = FileChange::new(path);

            if renamed {
                if let Some(old_path) = delta.old_file().path() {
                    change = change.with_old_path(old_path.to_path_buf());
                }
            }

            changes.push(change);
        }

        Ok(changes)
    }
}
