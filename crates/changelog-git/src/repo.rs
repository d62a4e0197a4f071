// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository access
//!
//! This module reads commit history from a repository using the `git2`
//! crate. Two queries are supported: commits touching a path, and commits
//! selected by a revision-range expression. Both return commits newest first.

use crate::commit::Commit;
use crate::error::GitError;
use git2::{ErrorCode, Oid, Repository, RevparseMode, Revwalk, Sort, Tree};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A git repository wrapper for changelog queries
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        debug!(git_dir = %repo.path().display(), "Opened repository");
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        debug!(
            start = %path.display(),
            git_dir = %repo.path().display(),
            "Discovered repository"
        );
        Ok(Self { repo })
    }

    /// Check if the repository is bare
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the repository path (the `.git` directory)
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Commits reachable from HEAD whose changes touch `path`, newest first
    ///
    /// Relative paths are taken relative to the working directory; absolute
    /// paths must lie inside it. History is simplified the way `git log --
    /// <path>` does it: a merge whose tree matches one of its parents at
    /// `path` is not listed, and only the first such parent is followed, so
    /// side-branch changes the merge threw away never show up. Other commits
    /// are listed when they change the path (root commits: when the path
    /// exists). The walk stops once `limit` commits have been collected.
    /// A repository with no commits yet yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `GitError::PathOutsideRepository` for absolute paths outside the
    /// working directory, and `GitError::Git2` if the history cannot be walked.
    pub fn commits_touching(
        &self,
        path: impl AsRef<Path>,
        limit: Option<usize>,
    ) -> Result<Vec<Commit>, GitError> {
        let relative = self.relative_path(path.as_ref())?;
        let limit = limit.unwrap_or(usize::MAX);

        let Some(head) = self.head_commit()? else {
            debug!("HEAD is unborn; no history to walk");
            return Ok(Vec::new());
        };

        let mut queue = CommitQueue::default();
        queue.push(&head);

        let mut commits = Vec::new();
        while commits.len() < limit {
            let Some(oid) = queue.pop() else {
                break;
            };
            let git_commit = self.repo.find_commit(oid)?;
            let entry = path_entry(&git_commit.tree()?, &relative);

            if git_commit.parent_count() == 0 {
                if entry.is_some() {
                    commits.push(Commit::from_git2(&git_commit));
                }
                continue;
            }

            let parents = git_commit.parents().collect::<Vec<_>>();
            let mut same_parent = None;
            for parent in &parents {
                if path_entry(&parent.tree()?, &relative) == entry {
                    same_parent = Some(parent);
                    break;
                }
            }

            match same_parent {
                Some(parent) => queue.push(parent),
                None => {
                    commits.push(Commit::from_git2(&git_commit));
                    for parent in &parents {
                        queue.push(parent);
                    }
                }
            }
        }

        debug!(
            path = %relative.display(),
            count = commits.len(),
            "Collected commits touching path"
        );
        Ok(commits)
    }

    /// Commits selected by a revision-range expression, newest first
    ///
    /// Accepts a single revision (`main`, a SHA, `HEAD~3`: that commit and
    /// its ancestors), `a..b` (reachable from `b` but not `a`) and `a...b`
    /// (reachable from either but not from their merge base).
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidRevisionExpression` if the expression does
    /// not resolve to commits.
    pub fn commits_in_range(&self, expression: &str) -> Result<Vec<Commit>, GitError> {
        let invalid = || GitError::InvalidRevisionExpression {
            expression: expression.to_string(),
        };

        let spec = self.repo.revparse(expression).map_err(|_| invalid())?;
        let peel = |object: Option<&git2::Object<'_>>| -> Result<Oid, GitError> {
            let object = object.ok_or_else(invalid)?;
            Ok(object.peel_to_commit().map_err(|_| invalid())?.id())
        };

        let mut revwalk = self.sorted_revwalk()?;
        let mode = spec.mode();
        if mode.contains(RevparseMode::SINGLE) {
            revwalk.push(peel(spec.from())?)?;
        } else {
            let from = peel(spec.from())?;
            let to = peel(spec.to())?;
            if mode.contains(RevparseMode::MERGE_BASE) {
                revwalk.push(from)?;
                revwalk.push(to)?;
                if let Ok(base) = self.repo.merge_base(from, to) {
                    revwalk.hide(base)?;
                }
            } else {
                revwalk.push(to)?;
                revwalk.hide(from)?;
            }
        }

        let commits = revwalk
            .map(|oid| -> Result<Commit, GitError> {
                let git_commit = self.repo.find_commit(oid?)?;
                Ok(Commit::from_git2(&git_commit))
            })
            .collect::<Result<Vec<_>, GitError>>()?;

        debug!(expression, count = commits.len(), "Resolved revision range");
        Ok(commits)
    }

    fn sorted_revwalk(&self) -> Result<Revwalk<'_>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;
        Ok(revwalk)
    }

    /// The commit HEAD points at, or `None` when HEAD has no commit yet
    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>, GitError> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve `path` to a path relative to the working directory
    fn relative_path(&self, path: &Path) -> Result<PathBuf, GitError> {
        if path.is_relative() {
            return Ok(path.to_path_buf());
        }

        let workdir = self.repo.workdir().ok_or_else(|| GitError::BareRepository {
            path: self.repo.path().display().to_string(),
        })?;

        if let Ok(relative) = path.strip_prefix(workdir) {
            return Ok(relative.to_path_buf());
        }

        // Symlinked directories (e.g. /tmp on macOS) only match once resolved
        if let (Ok(workdir), Some(path)) = (workdir.canonicalize(), canonicalize_lenient(path)) {
            if let Ok(relative) = path.strip_prefix(&workdir) {
                return Ok(relative.to_path_buf());
            }
        }

        Err(GitError::PathOutsideRepository {
            path: path.display().to_string(),
        })
    }
}

/// Object id of the tree entry at `path`, if present
fn path_entry(tree: &Tree<'_>, path: &Path) -> Option<Oid> {
    tree.get_path(path).ok().map(|entry| entry.id())
}

/// Commits waiting to be visited, newest commit time first
///
/// Ties pop in insertion order. A commit is queued at most once.
#[derive(Default)]
struct CommitQueue {
    heap: BinaryHeap<(i64, Reverse<u64>, Oid)>,
    seen: HashSet<Oid>,
    pushed: u64,
}

impl CommitQueue {
    fn push(&mut self, commit: &git2::Commit<'_>) {
        if self.seen.insert(commit.id()) {
            self.heap
                .push((commit.time().seconds(), Reverse(self.pushed), commit.id()));
            self.pushed += 1;
        }
    }

    fn pop(&mut self) -> Option<Oid> {
        self.heap.pop().map(|(_, _, oid)| oid)
    }
}

/// Canonicalize `path`, tolerating a final component that does not exist
fn canonicalize_lenient(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }
    let parent = path.parent()?.canonicalize().ok()?;
    Some(parent.join(path.file_name()?))
}
