//! Word-granularity text diff.
//!
//! # Responsibility
//! - Split text into word, whitespace and punctuation tokens.
//! - Diff the token sequences with Myers LCS and coalesce runs.
//! - Project the token stream into the two side-by-side display modes.
//!
//! # Invariants
//! - Tokens not marked `removed` concatenate to the new text.
//! - Tokens not marked `added` concatenate to the old text.
//! - Output depends only on the two input strings.

use crate::model::inline::InlineNode;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, Algorithm, DiffOp};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}_]+|\s+|[^\p{L}\p{N}_\s]").expect("valid word token regex")
});

/// One coalesced run of the word diff.
///
/// Neither flag set means the text is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffToken {
    pub value: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub added: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub removed: bool,
}

/// Change carried by a [`DiffToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Unchanged,
    Added,
    Removed,
}

impl DiffToken {
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self::with_change(value, Change::Unchanged)
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self::with_change(value, Change::Added)
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self::with_change(value, Change::Removed)
    }

    pub fn with_change(value: impl Into<String>, change: Change) -> Self {
        Self {
            value: value.into(),
            added: change == Change::Added,
            removed: change == Change::Removed,
        }
    }

    pub fn change(&self) -> Change {
        if self.added {
            Change::Added
        } else if self.removed {
            Change::Removed
        } else {
            Change::Unchanged
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.change() == Change::Unchanged
    }
}

/// Side of a side-by-side view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffMode {
    /// Older side: unchanged and removed text, removed highlighted.
    Current,
    /// Newer side: unchanged and added text, added highlighted.
    Generated,
}

/// Splits text into word runs, whitespace runs and single punctuation marks.
///
/// Concatenating the tokens yields `text` again.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Computes the word diff from `old_text` to `new_text`.
pub fn word_diff(old_text: &str, new_text: &str) -> Vec<DiffToken> {
    let old_tokens = tokenize(old_text);
    let new_tokens = tokenize(new_text);
    let ops = capture_diff_slices(Algorithm::Myers, &old_tokens, &new_tokens);

    let mut out: Vec<DiffToken> = Vec::new();
    for op in &ops {
        match *op {
            DiffOp::Equal {
                old_index, len, ..
            } => push_run(&mut out, &old_tokens[old_index..old_index + len], Change::Unchanged),
            DiffOp::Delete {
                old_index, old_len, ..
            } => push_run(&mut out, &old_tokens[old_index..old_index + old_len], Change::Removed),
            DiffOp::Insert {
                new_index, new_len, ..
            } => push_run(&mut out, &new_tokens[new_index..new_index + new_len], Change::Added),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                push_run(&mut out, &old_tokens[old_index..old_index + old_len], Change::Removed);
                push_run(&mut out, &new_tokens[new_index..new_index + new_len], Change::Added);
            }
        }
    }
    out
}

/// Appends tokens, extending the last run when its change kind matches.
fn push_run(out: &mut Vec<DiffToken>, tokens: &[&str], change: Change) {
    if tokens.is_empty() {
        return;
    }
    let text: String = tokens.concat();
    match out.last_mut() {
        Some(last) if last.change() == change => last.value.push_str(&text),
        _ => out.push(DiffToken::with_change(text, change)),
    }
}

/// Display runs for one side of a comparison.
///
/// Tokens belonging to the other side are dropped; the rest become plain
/// runs flagged `removed` (current) or `added` (generated).
pub fn project(tokens: &[DiffToken], mode: DiffMode) -> Vec<InlineNode> {
    tokens
        .iter()
        .filter_map(|token| match (mode, token.change()) {
            (_, Change::Unchanged) => Some(InlineNode::plain(token.value.as_str())),
            (DiffMode::Current, Change::Removed) => {
                let mut node = InlineNode::plain(token.value.as_str());
                node.removed = true;
                Some(node)
            }
            (DiffMode::Generated, Change::Added) => {
                let mut node = InlineNode::plain(token.value.as_str());
                node.added = true;
                Some(node)
            }
            (DiffMode::Current, Change::Added) | (DiffMode::Generated, Change::Removed) => None,
        })
        .collect()
}

/// Rebuilds the old text from a token stream.
pub fn old_text(tokens: &[DiffToken]) -> String {
    tokens
        .iter()
        .filter(|token| !token.added)
        .map(|token| token.value.as_str())
        .collect()
}

/// Rebuilds the new text from a token stream.
pub fn new_text(tokens: &[DiffToken]) -> String {
    tokens
        .iter()
        .filter(|token| !token.removed)
        .map(|token| token.value.as_str())
        .collect()
}

fn is_false(value: &bool) -> bool {
    !*value
}
