// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Directive options
//!
//! Hosts hand over directive options as raw `(name, value)` pairs. This
//! module turns them into a typed [`DirectiveOptions`], rejecting unknown,
//! repeated or malformed options up front.

use thiserror::Error;

/// Maximum commits shown for path-based selection when `revisions` is absent
pub const DEFAULT_REVISIONS: usize = 1;

/// Option names recognised by the directive
pub const OPTION_NAMES: [&str; 3] = ["revisions", "rev-list", "detailed-message-pre"];

/// Option validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Option name the directive does not recognise
    #[error("Unknown option '{0}'. Known options: revisions, rev-list, detailed-message-pre")]
    UnknownOption(String),

    /// Option given more than once
    #[error("Duplicate option '{0}'")]
    DuplicateOption(String),

    /// Option that requires an argument was given without one
    #[error("Option '{0}' requires a value")]
    MissingValue(String),

    /// Option value that cannot be converted
    #[error("Invalid value '{value}' for option '{option}': {reason}")]
    InvalidValue {
        /// Option name
        option: String,
        /// The rejected value
        value: String,
        /// What was expected
        reason: String,
    },
}

/// How commits are chosen for the changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Every commit matched by a revision-range expression
    Range(&'a str),
    /// The newest `limit` commits touching the current document
    Path {
        /// Maximum number of commits
        limit: usize,
    },
}

/// Typed options of the `git_changelog` directive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveOptions {
    /// Max commits when selecting by document path
    pub revisions: Option<usize>,
    /// Revision-range expression
    pub rev_list: Option<String>,
    /// Render the commit detail verbatim instead of as a paragraph
    pub detailed_message_pre: bool,
}

impl DirectiveOptions {
    /// Options with every field at its default
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `revisions` cap
    #[must_use]
    pub fn with_revisions(mut self, revisions: usize) -> Self {
        self.revisions = Some(revisions);
        self
    }

    /// Set the `rev-list` expression
    #[must_use]
    pub fn with_rev_list(mut self, expression: impl Into<String>) -> Self {
        self.rev_list = Some(expression.into());
        self
    }

    /// Set `detailed-message-pre`
    #[must_use]
    pub fn with_detailed_message_pre(mut self, enabled: bool) -> Self {
        self.detailed_message_pre = enabled;
        self
    }

    /// Build options from raw `(name, value)` pairs
    ///
    /// # Errors
    ///
    /// Returns `OptionsError` for unknown or repeated names, missing values
    /// and values that do not parse.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut options = Self::default();
        let mut seen: Vec<&str> = Vec::new();

        for (name, value) in pairs {
            let name = name.trim();
            if !OPTION_NAMES.contains(&name) {
                return Err(OptionsError::UnknownOption(name.to_string()));
            }
            if seen.contains(&name) {
                return Err(OptionsError::DuplicateOption(name.to_string()));
            }
            seen.push(name);

            match name {
                "revisions" => options.revisions = Some(parse_revisions(value)?),
                "rev-list" => options.rev_list = Some(parse_rev_list(value)?),
                _ => options.detailed_message_pre = parse_flag(name, value)?,
            }
        }

        Ok(options)
    }

    /// Both `rev-list` and `revisions` were supplied
    #[must_use]
    pub fn is_conflicting(&self) -> bool {
        self.rev_list.is_some() && self.revisions.is_some()
    }

    /// Effective commit cap for path-based selection
    #[must_use]
    pub fn revisions_or_default(&self) -> usize {
        self.revisions.unwrap_or(DEFAULT_REVISIONS)
    }

    /// The selection mode; `rev-list` wins over `revisions`
    #[must_use]
    pub fn selection(&self) -> Selection<'_> {
        match self.rev_list.as_deref() {
            Some(expression) => Selection::Range(expression),
            None => Selection::Path {
                limit: self.revisions_or_default(),
            },
        }
    }
}

fn parse_revisions(value: Option<&str>) -> Result<usize, OptionsError> {
    let raw = value.ok_or_else(|| OptionsError::MissingValue("revisions".to_string()))?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| OptionsError::InvalidValue {
            option: "revisions".to_string(),
            value: raw.to_string(),
            reason: "expected a non-negative integer".to_string(),
        })
}

fn parse_rev_list(value: Option<&str>) -> Result<String, OptionsError> {
    match value.map(str::trim) {
        Some(expression) if !expression.is_empty() => Ok(expression.to_string()),
        _ => Err(OptionsError::MissingValue("rev-list".to_string())),
    }
}

fn parse_flag(name: &str, value: Option<&str>) -> Result<bool, OptionsError> {
    let Some(raw) = value else {
        return Ok(true);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(OptionsError::InvalidValue {
            option: name.to_string(),
            value: raw.to_string(),
            reason: "expected a boolean (true/false, yes/no, on/off, 1/0)".to_string(),
        }),
    }
}
