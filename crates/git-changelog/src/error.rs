// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types surfaced to the host framework

use changelog_git::GitError;
use thiserror::Error;

use crate::options::OptionsError;

/// Errors raised while running the changelog directive
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Directive options failed validation
    #[error("Invalid directive options: {0}")]
    Options(#[from] OptionsError),

    /// No repository could be opened for the documentation sources
    #[error("Repository unavailable: {path}. The documentation sources must live in a git working tree.")]
    RepositoryUnavailable {
        /// Where the repository was looked for
        path: String,
    },

    /// The `rev-list` expression does not resolve
    #[error("Invalid revision expression: {expression}")]
    InvalidRevisionExpression {
        /// The expression as written in the directive
        expression: String,
    },

    /// The current document cannot be mapped into the repository
    #[error("Document path cannot be resolved in the repository: {path}")]
    DocumentPathUnresolvable {
        /// The document path
        path: String,
    },

    /// Any other failure reading history
    #[error("Git error: {0}")]
    Git(GitError),

    /// No handler registered under the name
    #[error("Unknown directive: {0}")]
    UnknownDirective(String),
}

impl From<GitError> for ChangelogError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::RepositoryNotFound { path } | GitError::BareRepository { path } => {
                Self::RepositoryUnavailable { path }
            }
            GitError::InvalidRevisionExpression { expression } => {
                Self::InvalidRevisionExpression { expression }
            }
            GitError::PathOutsideRepository { path } => Self::DocumentPathUnresolvable { path },
            other => Self::Git(other),
        }
    }
}
