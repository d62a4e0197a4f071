//! Configuration for the git-changelog command-line host
//!
//! The binary plays the part of a documentation build: it resolves a
//! document inside a source directory, runs every `git_changelog` directive
//! found in it and prints the rendered result.

use std::path::PathBuf;

use clap::Parser;

use crate::host::{BuildEnvironment, DEFAULT_SOURCE_SUFFIX};
use crate::render::OutputFormat;

/// git-changelog - render changelogs from git history for documentation pages
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "git-changelog")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Document to process, relative to the source directory
    ///
    /// The source suffix may be included or left out
    /// (`guide/install` and `guide/install.rst` are the same document).
    pub docname: String,

    /// Documentation source directory
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "GIT_CHANGELOG_SRCDIR")]
    pub srcdir: Option<PathBuf>,

    /// Suffix of documentation source files
    #[arg(long, env = "GIT_CHANGELOG_SOURCE_SUFFIX")]
    pub source_suffix: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "GIT_CHANGELOG_FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with rendered output.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the source directory, using the current directory as default
    #[must_use]
    pub fn srcdir_path(&self) -> PathBuf {
        self.srcdir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the source suffix, `.rst` unless configured
    #[must_use]
    pub fn source_suffix(&self) -> &str {
        self.source_suffix
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_SUFFIX)
    }

    /// Document name without the source suffix
    #[must_use]
    pub fn docname(&self) -> &str {
        let suffix = self.source_suffix();
        self.docname
            .strip_suffix(suffix)
            .filter(|stem| !suffix.is_empty() && !stem.is_empty())
            .unwrap_or(self.docname.as_str())
    }

    /// Build environment for the configured document
    ///
    /// The source directory is canonicalized so document paths can be
    /// matched against the repository working tree.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceDirNotFound` if the directory cannot be
    /// resolved.
    pub fn environment(&self) -> Result<BuildEnvironment, ConfigError> {
        let srcdir = self.srcdir_path();
        let srcdir = srcdir
            .canonicalize()
            .map_err(|_| ConfigError::SourceDirNotFound(srcdir.clone()))?;
        Ok(BuildEnvironment::new(srcdir, self.docname()).with_source_suffix(self.source_suffix()))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document name is empty
    /// - The source directory doesn't exist or is not a directory
    /// - The document's source file doesn't exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.docname().trim().is_empty() {
            return Err(ConfigError::EmptyDocname);
        }

        let srcdir = self.srcdir_path();
        if !srcdir.exists() {
            return Err(ConfigError::SourceDirNotFound(srcdir));
        }
        if !srcdir.is_dir() {
            return Err(ConfigError::SourceDirNotDirectory(srcdir));
        }

        let document = srcdir.join(format!("{}{}", self.docname(), self.source_suffix()));
        if !document.is_file() {
            return Err(ConfigError::DocumentNotFound(document));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No document given
    #[error("Document name is empty")]
    EmptyDocname,

    /// Source directory not found
    #[error("Source directory not found: {0}")]
    SourceDirNotFound(PathBuf),

    /// Source directory is not a directory
    #[error("Source directory is not a directory: {0}")]
    SourceDirNotDirectory(PathBuf),

    /// Document source file missing
    #[error("Document not found: {0}")]
    DocumentNotFound(PathBuf),
}
