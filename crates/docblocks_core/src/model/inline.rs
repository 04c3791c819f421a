//! Inline text runs.
//!
//! # Responsibility
//! - Define the styled text node shared by every text-bearing block.
//! - Accept both flat style flags and the editor's nested `styles` object.
//!
//! # Invariants
//! - `added` / `removed` exist only on diff-rendered copies and are never
//!   serialized.
//! - Missing `text` reads as the empty string.

use serde::{Deserialize, Serialize};

/// One styled run of text inside a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InlineWire")]
pub struct InlineNode {
    pub text: String,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub code: bool,
    /// Diff-only: text present in the newer side.
    #[serde(skip)]
    pub added: bool,
    /// Diff-only: text present in the older side.
    #[serde(skip)]
    pub removed: bool,
}

impl InlineNode {
    /// Creates an unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.code = true;
        self
    }

    /// Returns whether this run carries a diff highlight.
    pub fn is_diff_marked(&self) -> bool {
        self.added || self.removed
    }
}

/// Joins run texts with no separator.
///
/// This is the text length used by the heading validity check.
pub fn plain_text(nodes: &[InlineNode]) -> String {
    nodes.iter().map(|node| node.text.as_str()).collect()
}

/// Joins run texts with single spaces, the input shape for word diffs.
pub fn spaced_text(nodes: &[InlineNode]) -> String {
    nodes
        .iter()
        .map(|node| node.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Deserialize)]
struct InlineWire {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    bold: Option<bool>,
    #[serde(default)]
    italic: Option<bool>,
    #[serde(default)]
    underline: Option<bool>,
    #[serde(default)]
    code: Option<bool>,
    #[serde(default)]
    styles: Option<InlineStyles>,
}

#[derive(Default, Deserialize)]
struct InlineStyles {
    #[serde(default)]
    bold: Option<bool>,
    #[serde(default)]
    italic: Option<bool>,
    #[serde(default)]
    underline: Option<bool>,
    #[serde(default)]
    code: Option<bool>,
}

impl From<InlineWire> for InlineNode {
    fn from(wire: InlineWire) -> Self {
        let styles = wire.styles.unwrap_or_default();
        let flag = |flat: Option<bool>, nested: Option<bool>| {
            flat.unwrap_or(false) || nested.unwrap_or(false)
        };
        Self {
            text: wire.text.unwrap_or_default(),
            bold: flag(wire.bold, styles.bold),
            italic: flag(wire.italic, styles.italic),
            underline: flag(wire.underline, styles.underline),
            code: flag(wire.code, styles.code),
            added: false,
            removed: false,
        }
    }
}
