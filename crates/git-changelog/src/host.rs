// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Host framework seam
//!
//! The documentation build that embeds the directive supplies a build
//! environment (source root, current document), a reporter for warnings, and
//! a registry that maps directive names to handlers. Registration happens
//! through one explicit call, [`crate::setup`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::ChangelogError;
use crate::markup::Node;

/// Source-file suffix used when none is configured
pub const DEFAULT_SOURCE_SUFFIX: &str = ".rst";

// ============================================================================
// Build Environment
// ============================================================================

/// What the host knows about the build and the document being processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnvironment {
    /// Documentation source root
    pub srcdir: PathBuf,
    /// Current document name, relative to `srcdir`, without suffix
    pub docname: String,
    /// Suffix appended to document names to find their source file
    pub source_suffix: String,
}

impl BuildEnvironment {
    /// Environment for `docname` under `srcdir` with the default suffix
    #[must_use]
    pub fn new(srcdir: impl Into<PathBuf>, docname: impl Into<String>) -> Self {
        Self {
            srcdir: srcdir.into(),
            docname: docname.into(),
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
        }
    }

    /// Use a different source suffix
    #[must_use]
    pub fn with_source_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.source_suffix = suffix.into();
        self
    }

    /// Path of the source file for `docname`
    #[must_use]
    pub fn doc2path(&self, docname: &str) -> PathBuf {
        self.srcdir.join(format!("{docname}{}", self.source_suffix))
    }

    /// Path of the source file for the current document
    #[must_use]
    pub fn current_document(&self) -> PathBuf {
        self.doc2path(&self.docname)
    }

    /// Documentation source root
    #[must_use]
    pub fn srcdir(&self) -> &Path {
        &self.srcdir
    }
}

// ============================================================================
// Reporting
// ============================================================================

/// Severity of a reported diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Informational
    Info,
    /// Non-fatal problem; processing continues
    Warning,
    /// Problem that fails the directive
    Error,
}

/// A message reported against a source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity
    pub level: Level,
    /// Message text
    pub message: String,
    /// 1-based source line, when known
    pub line: Option<usize>,
}

/// Sink for build messages, keyed by source line
pub trait Reporter {
    /// Record a diagnostic
    fn report(&mut self, diagnostic: Diagnostic);

    /// Record a non-fatal warning
    fn warning(&mut self, message: &str, line: Option<usize>) {
        self.report(Diagnostic {
            level: Level::Warning,
            message: message.to_string(),
            line,
        });
    }
}

/// Reporter that keeps every diagnostic in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    /// Empty reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Only the warnings
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Warning)
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Reporter that forwards diagnostics to `tracing`
#[derive(Debug, Clone)]
pub struct TracingReporter {
    source: String,
}

impl TracingReporter {
    /// Reporter labelling messages with `source` (usually the document path)
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl Reporter for TracingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        let location = match diagnostic.line {
            Some(line) => format!("{}:{line}", self.source),
            None => self.source.clone(),
        };
        match diagnostic.level {
            Level::Info => info!(%location, "{}", diagnostic.message),
            Level::Warning => warn!(%location, "{}", diagnostic.message),
            Level::Error => error!(%location, "{}", diagnostic.message),
        }
    }
}

// ============================================================================
// Directive Registry
// ============================================================================

/// One occurrence of a directive in a document
#[derive(Debug, Clone)]
pub struct DirectiveInvocation<'a> {
    /// 1-based line of the directive marker
    pub lineno: usize,
    /// Raw options in source order
    pub options: Vec<(String, Option<String>)>,
    /// Build environment of the document
    pub env: &'a BuildEnvironment,
}

impl<'a> DirectiveInvocation<'a> {
    /// Invocation at `lineno` with no options
    #[must_use]
    pub fn new(lineno: usize, env: &'a BuildEnvironment) -> Self {
        Self {
            lineno,
            options: Vec::new(),
            env,
        }
    }

    /// Append a raw option
    #[must_use]
    pub fn with_option(mut self, name: &str, value: Option<&str>) -> Self {
        self.options
            .push((name.to_string(), value.map(str::to_string)));
        self
    }

    /// Options as borrowed pairs
    pub fn option_pairs(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.options
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

/// Content-producing directive implementation
pub trait DirectiveHandler {
    /// Produce the nodes that replace the directive in the document
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError` when the directive cannot be rendered.
    fn run(
        &self,
        invocation: &DirectiveInvocation<'_>,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<Node>, ChangelogError>;
}

/// Directive names bound to their handlers
#[derive(Default)]
pub struct DirectiveRegistry {
    handlers: BTreeMap<String, Box<dyn DirectiveHandler>>,
}

impl DirectiveRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `handler`, replacing any previous binding
    pub fn add_directive(&mut self, name: &str, handler: Box<dyn DirectiveHandler>) {
        self.handlers.insert(name.to_string(), handler);
    }

    /// Whether `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Run the handler registered as `name`
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::UnknownDirective` if nothing is registered
    /// under `name`, or whatever the handler returns.
    pub fn invoke(
        &self,
        name: &str,
        invocation: &DirectiveInvocation<'_>,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<Node>, ChangelogError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ChangelogError::UnknownDirective(name.to_string()))?;
        handler.run(invocation, reporter)
    }
}

impl std::fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("names", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
