// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The version-control queries the builder depends on

use std::path::Path;

use changelog_git::{Commit, GitRepo};

use crate::error::ChangelogError;

/// Source of commit history
///
/// Both queries return commits newest first.
pub trait CommitLog {
    /// Up to `limit` commits whose changes touch `path`
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError` if the history cannot be read or the path
    /// does not belong to the repository.
    fn commits_touching(&self, path: &Path, limit: usize) -> Result<Vec<Commit>, ChangelogError>;

    /// Every commit selected by a revision-range expression
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::InvalidRevisionExpression` if the expression
    /// does not resolve.
    fn commits_in_range(&self, expression: &str) -> Result<Vec<Commit>, ChangelogError>;
}

impl CommitLog for GitRepo {
    fn commits_touching(&self, path: &Path, limit: usize) -> Result<Vec<Commit>, ChangelogError> {
        Ok(GitRepo::commits_touching(self, path, Some(limit))?)
    }

    fn commits_in_range(&self, expression: &str) -> Result<Vec<Commit>, ChangelogError> {
        Ok(GitRepo::commits_in_range(self, expression)?)
    }
}
