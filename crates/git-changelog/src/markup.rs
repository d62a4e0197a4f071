// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Generic markup tree
//!
//! A small subset of document-tree nodes, enough for a host to splice the
//! changelog into a page: a definition-list container, list items, inline
//! emphasis/strong/plain text, and paragraph or literal blocks.

use serde::{Deserialize, Serialize};

/// A node in the markup tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Container holding one list item per entry
    DefinitionList {
        /// Child nodes
        children: Vec<Node>,
    },
    /// A single entry
    ListItem {
        /// Child nodes
        children: Vec<Node>,
    },
    /// Emphasized inline text
    Emphasis {
        /// Text content
        text: String,
    },
    /// Strong inline text
    Strong {
        /// Text content
        text: String,
    },
    /// Plain inline text
    Inline {
        /// Text content
        text: String,
    },
    /// Paragraph block
    Paragraph {
        /// Text content
        text: String,
    },
    /// Preformatted block, rendered verbatim
    LiteralBlock {
        /// Text content
        text: String,
    },
}

impl Node {
    /// Definition-list container
    #[must_use]
    pub fn definition_list(children: Vec<Node>) -> Self {
        Self::DefinitionList { children }
    }

    /// List item
    #[must_use]
    pub fn list_item(children: Vec<Node>) -> Self {
        Self::ListItem { children }
    }

    /// Emphasized text
    #[must_use]
    pub fn emphasis(text: impl Into<String>) -> Self {
        Self::Emphasis { text: text.into() }
    }

    /// Strong text
    #[must_use]
    pub fn strong(text: impl Into<String>) -> Self {
        Self::Strong { text: text.into() }
    }

    /// Plain inline text
    #[must_use]
    pub fn inline(text: impl Into<String>) -> Self {
        Self::Inline { text: text.into() }
    }

    /// Paragraph
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    /// Literal block
    #[must_use]
    pub fn literal_block(text: impl Into<String>) -> Self {
        Self::LiteralBlock { text: text.into() }
    }

    /// Child nodes; empty for text nodes
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::DefinitionList { children } | Self::ListItem { children } => children,
            _ => &[],
        }
    }

    /// Own text for text nodes; `None` for containers
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Emphasis { text }
            | Self::Strong { text }
            | Self::Inline { text }
            | Self::Paragraph { text }
            | Self::LiteralBlock { text } => Some(text.as_str()),
            Self::DefinitionList { .. } | Self::ListItem { .. } => None,
        }
    }

    /// Whether the node renders as a block rather than inline
    #[must_use]
    pub fn is_block(&self) -> bool {
        !matches!(
            self,
            Self::Emphasis { .. } | Self::Strong { .. } | Self::Inline { .. }
        )
    }

    /// All text in the subtree, concatenated in document order
    #[must_use]
    pub fn astext(&self) -> String {
        match self.text() {
            Some(text) => text.to_string(),
            None => self.children().iter().map(Node::astext).collect(),
        }
    }
}
