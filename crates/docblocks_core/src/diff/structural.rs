//! Positional block alignment for side-by-side comparison.
//!
//! # Responsibility
//! - Pair block `i` of the left sequence with block `i` of the right one.
//! - Word-diff compatible pairs and pass everything else through.
//!
//! # Invariants
//! - Both output sides have length `max(left.len(), right.len())`.
//! - Pairing is strictly by index; there is no id matching and no
//!   insertion/move detection, so one inserted block shifts every later pair.
//! - Only paragraph/paragraph and heading/heading pairs are diffed; a type
//!   mismatch passes through. Word-diffed runs are plain text:
//!   inline styling of the source runs is not carried into diff output.
//! - Inputs are never modified.

use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::diff::word::{project, word_diff, DiffMode};
use crate::model::block::Block;
use crate::model::inline::{spaced_text, InlineNode};

/// Options for [`structural_diff_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Mark text of a block present on one side only as fully removed
    /// (left) or fully added (right). Off by default.
    pub mark_unpaired: bool,
}

/// How one index pair was treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairOutcome {
    /// Both sides are paragraphs, or both headings, and were word-diffed.
    Diffed,
    /// Both sides exist but are not a diffable pair (including type mismatches).
    PassThrough,
    LeftOnly,
    RightOnly,
}

/// Two aligned display sequences; `None` marks an absent block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuralDiff {
    pub left: Vec<Option<Block>>,
    pub right: Vec<Option<Block>>,
    outcomes: Vec<PairOutcome>,
}

impl StructuralDiff {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Treatment of each index pair.
    pub fn outcomes(&self) -> &[PairOutcome] {
        &self.outcomes
    }

    /// Iterates `(outcome, left, right)` per index.
    pub fn pairs(&self) -> impl Iterator<Item = (PairOutcome, Option<&Block>, Option<&Block>)> {
        self.outcomes
            .iter()
            .zip(self.left.iter().zip(self.right.iter()))
            .map(|(outcome, (left, right))| (*outcome, left.as_ref(), right.as_ref()))
    }

    /// Whether any side carries an added/removed run.
    pub fn has_changes(&self) -> bool {
        self.left
            .iter()
            .chain(self.right.iter())
            .flatten()
            .filter_map(Block::inline_content)
            .flatten()
            .any(InlineNode::is_diff_marked)
    }
}

/// Aligns two block sequences with default options.
pub fn structural_diff(left: &[Block], right: &[Block]) -> StructuralDiff {
    structural_diff_with(left, right, &DiffOptions::default(), &LogSink)
}

pub fn structural_diff_with(
    left: &[Block],
    right: &[Block],
    options: &DiffOptions,
    sink: &dyn DiagnosticSink,
) -> StructuralDiff {
    let max_len = left.len().max(right.len());
    let mut out = StructuralDiff {
        left: Vec::with_capacity(max_len),
        right: Vec::with_capacity(max_len),
        outcomes: Vec::with_capacity(max_len),
    };

    for index in 0..max_len {
        let (outcome, left_slot, right_slot) = match (left.get(index), right.get(index)) {
            (Some(l), Some(r))
                if l.is_word_diffable() && l.type_name() == r.type_name() =>
            {
                let (l, r) = diff_pair(l, r);
                (PairOutcome::Diffed, Some(l), Some(r))
            }
            (Some(l), Some(r)) => {
                sink.report(&Diagnostic::PassThrough {
                    index,
                    left: Some(l.type_name().to_string()),
                    right: Some(r.type_name().to_string()),
                });
                (PairOutcome::PassThrough, Some(l.clone()), Some(r.clone()))
            }
            (Some(l), None) => {
                let block = if options.mark_unpaired {
                    mark_all(l, DiffMode::Current)
                } else {
                    l.clone()
                };
                (PairOutcome::LeftOnly, Some(block), None)
            }
            (None, Some(r)) => {
                let block = if options.mark_unpaired {
                    mark_all(r, DiffMode::Generated)
                } else {
                    r.clone()
                };
                (PairOutcome::RightOnly, None, Some(block))
            }
            (None, None) => continue,
        };
        out.outcomes.push(outcome);
        out.left.push(left_slot);
        out.right.push(right_slot);
    }
    out
}

fn diff_pair(left: &Block, right: &Block) -> (Block, Block) {
    let tokens = word_diff(&flatten(left), &flatten(right));
    (
        left.with_inline_content(project(&tokens, DiffMode::Current)),
        right.with_inline_content(project(&tokens, DiffMode::Generated)),
    )
}

/// Block text joined with spaces; the word diff input.
fn flatten(block: &Block) -> String {
    block.inline_content().map(spaced_text).unwrap_or_default()
}

fn mark_all(block: &Block, mode: DiffMode) -> Block {
    let Some(content) = block.inline_content() else {
        return block.clone();
    };
    let marked = content
        .iter()
        .cloned()
        .map(|mut node| {
            match mode {
                DiffMode::Current => node.removed = true,
                DiffMode::Generated => node.added = true,
            }
            node
        })
        .collect();
    block.with_inline_content(marked)
}

#[cfg(test)]
mod tests {
    use super::{structural_diff_with, DiffOptions, PairOutcome};
    use crate::diagnostics::NoopSink;
    use crate::model::block::{Block, BlockKind};
    use crate::model::inline::InlineNode;

    fn para(text: &str) -> Block {
        Block::paragraph(vec![InlineNode::plain(text)])
    }

    #[test]
    fn heading_and_paragraph_pair_passes_through() {
        let left = vec![Block::heading(2, vec![InlineNode::plain("Old title")])];
        let right = vec![para("New title")];
        let diff = structural_diff_with(&left, &right, &DiffOptions::default(), &NoopSink);
        assert_eq!(diff.outcomes(), &[PairOutcome::PassThrough]);
        assert_eq!(diff.left[0].as_ref(), left.first());
        assert_eq!(diff.right[0].as_ref(), right.first());
        assert!(!diff.has_changes());
    }

    #[test]
    fn heading_pair_is_diffed() {
        let left = vec![Block::heading(2, vec![InlineNode::plain("Old title")])];
        let right = vec![Block::heading(3, vec![InlineNode::plain("New title")])];
        let diff = structural_diff_with(&left, &right, &DiffOptions::default(), &NoopSink);
        assert_eq!(diff.outcomes(), &[PairOutcome::Diffed]);
        let heading = diff.left[0].as_ref().unwrap();
        assert_eq!(heading.type_name(), "heading");
        assert!(heading.inline_content().unwrap()[0].removed);
        let generated = diff.right[0].as_ref().unwrap();
        assert!(generated.inline_content().unwrap().iter().any(|node| node.added));
    }

    #[test]
    fn mark_unpaired_flags_one_sided_text() {
        let left = vec![para("same"), para("gone"), Block::new(BlockKind::Code {
            source: "x".to_string(),
        })];
        let right = vec![para("same")];
        let options = DiffOptions {
            mark_unpaired: true,
        };
        let diff = structural_diff_with(&left, &right, &options, &NoopSink);
        assert_eq!(
            diff.outcomes(),
            &[PairOutcome::Diffed, PairOutcome::LeftOnly, PairOutcome::LeftOnly]
        );
        let gone = diff.left[1].as_ref().unwrap();
        assert!(gone.inline_content().unwrap().iter().all(|node| node.removed));
        assert_eq!(diff.left[2].as_ref(), left.get(2));
        assert!(diff.right[1].is_none());
    }

    #[test]
    fn default_options_leave_one_sided_blocks_untouched() {
        let left = vec![para("only")];
        let diff = structural_diff_with(&left, &[], &DiffOptions::default(), &NoopSink);
        assert_eq!(diff.left[0].as_ref(), left.first());
        assert!(!diff.has_changes());
    }
}
