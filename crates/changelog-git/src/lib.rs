// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changelog-git: Git history queries for documentation changelogs
//!
//! This library crate answers the two questions a changelog directive asks
//! of version control: which commits touched a given file, and which commits
//! a revision-range expression selects.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use changelog_git::GitRepo;
//!
//! let repo = GitRepo::discover("docs").expect("open repo");
//! let commits = repo
//!     .commits_touching("docs/index.rst", Some(3))
//!     .expect("walk commits");
//!
//! for c in commits {
//!     println!("{} - {}", c.short_sha(), c.subject());
//! }
//! ```

pub mod commit;
pub mod error;
pub mod repo;

pub use commit::Commit;
pub use error::GitError;
pub use repo::GitRepo;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::Commit;
    pub use crate::error::GitError;
    pub use crate::repo::GitRepo;
}
