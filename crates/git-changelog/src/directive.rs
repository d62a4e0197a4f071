// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Directive block scanner
//!
//! Finds reStructuredText directive blocks in a source file:
//!
//! ```text
//! .. git_changelog::
//!    :revisions: 3
//!    :detailed-message-pre:
//! ```
//!
//! Only the directive marker and its option field list are read. The block
//! ends at the first blank line or the first line not indented past the
//! marker.

/// A directive occurrence found in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBlock {
    /// Directive name
    pub name: String,
    /// 1-based line of the `.. name::` marker
    pub lineno: usize,
    /// Text after `::` on the marker line, if any
    pub argument: Option<String>,
    /// Option fields in source order
    pub options: Vec<(String, Option<String>)>,
}

/// Scan `source` for blocks of the directive called `name`
#[must_use]
pub fn scan(source: &str, name: &str) -> Vec<DirectiveBlock> {
    scan_all(source)
        .into_iter()
        .filter(|block| block.name == name)
        .collect()
}

/// Scan `source` for every directive block
#[must_use]
pub fn scan_all(source: &str) -> Vec<DirectiveBlock> {
    let mut blocks = Vec::new();
    let mut lines = source.lines().enumerate().peekable();

    while let Some((index, line)) = lines.next() {
        let Some((name, argument)) = parse_marker(line) else {
            continue;
        };
        let marker_indent = indent_of(line);

        let mut options = Vec::new();
        while let Some(&(_, next)) = lines.peek() {
            if next.trim().is_empty() || indent_of(next) <= marker_indent {
                break;
            }
            let Some(field) = parse_field(next.trim()) else {
                break;
            };
            options.push(field);
            lines.next();
        }

        blocks.push(DirectiveBlock {
            name: name.to_string(),
            lineno: index + 1,
            argument,
            options,
        });
    }

    blocks
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Parse `.. name:: argument`
fn parse_marker(line: &str) -> Option<(&str, Option<String>)> {
    let rest = line.trim_start().strip_prefix("..")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (name, argument) = rest.trim_start().split_once("::")?;
    if name.is_empty() || !name.chars().all(is_name_char) {
        return None;
    }
    let argument = argument.trim();
    Some((name, (!argument.is_empty()).then(|| argument.to_string())))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+')
}

/// Parse `:name: value` / `:name:`
fn parse_field(line: &str) -> Option<(String, Option<String>)> {
    let (name, value) = line.strip_prefix(':')?.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let value = value.trim();
    Some((
        name.to_string(),
        (!value.is_empty()).then(|| value.to_string()),
    ))
}
