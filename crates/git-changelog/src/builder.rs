// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Changelog builder
//!
//! Selects commits for the current document and turns them into a markup
//! fragment: one definition-list container with a list item per commit.

use std::path::{Path, PathBuf};

use changelog_git::{Commit, GitRepo};
use tracing::debug;

use crate::error::ChangelogError;
use crate::host::{BuildEnvironment, DirectiveHandler, DirectiveInvocation, Reporter};
use crate::log::CommitLog;
use crate::markup::Node;
use crate::options::{DirectiveOptions, Selection};

/// Name the directive is registered under
pub const DIRECTIVE_NAME: &str = "git_changelog";

/// Warning emitted when `rev-list` and `revisions` are both given
pub const CONFLICTING_OPTIONS_WARNING: &str =
    "Both rev-list and revisions options given; proceeding using only rev-list.";

/// Builds the changelog fragment for one directive occurrence
#[derive(Debug, Clone)]
pub struct ChangelogBuilder {
    options: DirectiveOptions,
    lineno: usize,
}

impl ChangelogBuilder {
    /// Builder for a directive at source line `lineno`
    #[must_use]
    pub fn new(options: DirectiveOptions, lineno: usize) -> Self {
        Self { options, lineno }
    }

    /// The directive options
    #[must_use]
    pub fn options(&self) -> &DirectiveOptions {
        &self.options
    }

    /// Build the fragment for `document` from `log`
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError` if the history query fails.
    pub fn run(
        &self,
        document: &Path,
        log: &dyn CommitLog,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<Node>, ChangelogError> {
        if self.options.is_conflicting() {
            reporter.warning(CONFLICTING_OPTIONS_WARNING, Some(self.lineno));
        }
        let commits = self.select_commits(document, log)?;
        Ok(self.build_markup(&commits))
    }

    /// Build the fragment for the environment's current document
    ///
    /// The repository is discovered from the documentation source root and
    /// opened afresh on every call.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::RepositoryUnavailable` if the source root is
    /// not inside a git working tree, or any error from [`Self::run`].
    pub fn run_in_env(
        &self,
        env: &BuildEnvironment,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<Node>, ChangelogError> {
        let repo = GitRepo::discover(env.srcdir())?;
        let document = absolute_document_path(env)?;
        self.run(&document, &repo, reporter)
    }

    /// Commits to display, newest first
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError` if the history query fails.
    pub fn select_commits(
        &self,
        document: &Path,
        log: &dyn CommitLog,
    ) -> Result<Vec<Commit>, ChangelogError> {
        let commits = match self.options.selection() {
            Selection::Range(expression) => log.commits_in_range(expression)?,
            Selection::Path { limit } => {
                let mut commits = log.commits_touching(document, limit)?;
                commits.truncate(limit);
                commits
            }
        };
        debug!(
            document = %document.display(),
            count = commits.len(),
            newest = commits.first().map_or("-", Commit::short_sha),
            "Selected commits for changelog"
        );
        Ok(commits)
    }

    /// Render `commits` into a single-element fragment
    #[must_use]
    pub fn build_markup(&self, commits: &[Commit]) -> Vec<Node> {
        let items = commits
            .iter()
            .map(|commit| self.build_item(commit))
            .collect();
        vec![Node::definition_list(items)]
    }

    fn build_item(&self, commit: &Commit) -> Node {
        let (summary, detail) = commit.split_message();

        let mut children = vec![
            Node::emphasis("Last Updated by "),
            Node::strong(commit.author.as_str()),
            Node::inline(" at "),
            Node::emphasis(commit.local_timestamp()),
            Node::inline(" with message "),
            Node::strong(summary),
        ];
        if let Some(detail) = detail {
            children.push(if self.options.detailed_message_pre {
                Node::literal_block(detail)
            } else {
                Node::paragraph(detail)
            });
        }

        Node::list_item(children)
    }
}

fn absolute_document_path(env: &BuildEnvironment) -> Result<PathBuf, ChangelogError> {
    let document = env.current_document();
    std::path::absolute(&document).map_err(|_| ChangelogError::DocumentPathUnresolvable {
        path: document.display().to_string(),
    })
}

/// The `git_changelog` directive as registered with a host
#[derive(Debug, Clone, Copy, Default)]
pub struct GitChangelogDirective;

impl DirectiveHandler for GitChangelogDirective {
    fn run(
        &self,
        invocation: &DirectiveInvocation<'_>,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<Node>, ChangelogError> {
        let options = DirectiveOptions::from_pairs(invocation.option_pairs())?;
        ChangelogBuilder::new(options, invocation.lineno).run_in_env(invocation.env, reporter)
    }
}
