// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! git-changelog: changelog directive for documentation builds
//!
//! The `git_changelog` directive lists the commits that last touched the
//! current document (or the commits a revision-range expression selects) as
//! a generic markup fragment the host build splices into the page.
//!
//! # Example
//!
//! ```no_run
//! use git_changelog::host::{BuildEnvironment, CollectingReporter, DirectiveInvocation};
//! use git_changelog::{DirectiveRegistry, DIRECTIVE_NAME};
//!
//! let mut registry = DirectiveRegistry::new();
//! git_changelog::setup(&mut registry);
//!
//! let env = BuildEnvironment::new("/project/docs", "index");
//! let invocation = DirectiveInvocation::new(12, &env).with_option("revisions", Some("3"));
//! let mut reporter = CollectingReporter::new();
//! let nodes = registry
//!     .invoke(DIRECTIVE_NAME, &invocation, &mut reporter)
//!     .expect("render changelog");
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod directive;
pub mod error;
pub mod host;
pub mod log;
pub mod markup;
pub mod options;
pub mod render;

pub use builder::{ChangelogBuilder, DIRECTIVE_NAME, GitChangelogDirective};
pub use error::ChangelogError;
pub use host::{DirectiveRegistry, Reporter};
pub use log::CommitLog;
pub use markup::Node;
pub use options::DirectiveOptions;

/// Register the `git_changelog` directive with a host registry
///
/// This is the only registration entry point; nothing is registered as a
/// side effect of linking the crate.
pub fn setup(registry: &mut DirectiveRegistry) {
    registry.add_directive(DIRECTIVE_NAME, Box::new(GitChangelogDirective));
    tracing::debug!(directive = DIRECTIVE_NAME, "Registered directive");
}
