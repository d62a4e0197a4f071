// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Markup renderers
//!
//! Hosts normally render the markup tree themselves. These renderers back the
//! command-line host: HTML, plain text, and JSON.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::markup::Node;

/// Output format of rendered fragments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, one line per entry
    #[default]
    Text,
    /// HTML fragment
    Html,
    /// JSON markup tree
    Json,
}

/// Render `nodes` in `format`
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(nodes: &[Node], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(to_text(nodes)),
        OutputFormat::Html => Ok(to_html(nodes)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(nodes)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render `nodes` as an HTML fragment
#[must_use]
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_html(node, &mut out);
    }
    out
}

fn write_html(node: &Node, out: &mut String) {
    match node {
        Node::DefinitionList { children } => {
            out.push_str("<ul class=\"git-changelog\">\n");
            for child in children {
                write_html(child, out);
            }
            out.push_str("</ul>\n");
        }
        Node::ListItem { children } => {
            out.push_str("<li>");
            for child in children {
                write_html(child, out);
            }
            out.push_str("</li>\n");
        }
        Node::Emphasis { text } => wrap(out, "em", text),
        Node::Strong { text } => wrap(out, "strong", text),
        Node::Inline { text } => wrap(out, "span", text),
        Node::Paragraph { text } => wrap(out, "p", text),
        Node::LiteralBlock { text } => wrap(out, "pre", text),
    }
}

fn wrap(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&html_escape::encode_text(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Render `nodes` as plain text
///
/// Inline content of a list item goes on one `- ` line; block children
/// follow, indented by four spaces.
#[must_use]
pub fn to_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_text(node, &mut out);
    }
    out
}

fn write_text(node: &Node, out: &mut String) {
    match node {
        Node::DefinitionList { children } => {
            for child in children {
                write_text(child, out);
            }
        }
        Node::ListItem { children } => {
            out.push_str("- ");
            for child in children.iter().filter(|c| !c.is_block()) {
                out.push_str(&child.astext());
            }
            out.push('\n');
            for child in children.iter().filter(|c| c.is_block()) {
                for line in child.astext().lines() {
                    if !line.is_empty() {
                        out.push_str("    ");
                        out.push_str(line);
                    }
                    out.push('\n');
                }
            }
        }
        other => {
            out.push_str(&other.astext());
            if other.is_block() {
                out.push('\n');
            }
        }
    }
}
