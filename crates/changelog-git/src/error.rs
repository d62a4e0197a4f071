// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for changelog-git

use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Repository has no working directory to resolve file paths against
    #[error("Repository is bare: {path}")]
    BareRepository {
        /// The git directory of the bare repository
        path: String,
    },

    /// Revision-range expression that git cannot resolve
    #[error("Invalid revision expression: {expression}")]
    InvalidRevisionExpression {
        /// The expression as given
        expression: String,
    },

    /// File path that does not live inside the working directory
    #[error("Path is outside the repository working directory: {path}")]
    PathOutsideRepository {
        /// The offending path
        path: String,
    },
}
