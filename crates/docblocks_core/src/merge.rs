//! Index-by-index reconciliation of two block sequences.
//!
//! # Responsibility
//! - Reduce current/generated sequences and a per-index choice vector into
//!   one merged sequence.
//! - Hold the interactive review state (choice per row) for merge dialogs.
//!
//! # Invariants
//! - Inputs are never modified; equal inputs give equal output.
//! - An index whose chosen side has no block is omitted, not filled.
//! - Indices without an explicit choice use [`Choice::Generated`].
//! - Persisting the merged sequence is the caller's job.

use crate::diff::structural::{structural_diff, StructuralDiff};
use crate::model::block::Block;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Side selected for one index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Keep the human-edited block.
    Current,
    /// Take the AI-generated block.
    #[default]
    Generated,
}

/// Choice vector with every index set to [`Choice::Generated`].
pub fn default_choices(current_len: usize, generated_len: usize) -> Vec<Choice> {
    vec![Choice::default(); current_len.max(generated_len)]
}

/// Generic selection-and-reduction over any two sequences.
pub fn merge_by_choice<T: Clone>(current: &[T], generated: &[T], choices: &[Choice]) -> Vec<T> {
    let max_len = current.len().max(generated.len());
    (0..max_len)
        .filter_map(|index| {
            let side = match choices.get(index).copied().unwrap_or_default() {
                Choice::Generated => generated,
                Choice::Current => current,
            };
            side.get(index).cloned()
        })
        .collect()
}

/// Merges blocks according to `choices`.
pub fn merge_blocks(current: &[Block], generated: &[Block], choices: &[Choice]) -> Vec<Block> {
    merge_by_choice(current, generated, choices)
}

/// Error for merge review operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Row index outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for MergeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "merge row {index} out of range (rows: {len})")
            }
        }
    }
}

impl Error for MergeError {}

/// One review row: aligned display blocks plus the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRow<'a> {
    pub index: usize,
    pub current: Option<&'a Block>,
    pub generated: Option<&'a Block>,
    pub choice: Choice,
}

/// Review state for reconciling edited content with generated content.
#[derive(Debug, Clone)]
pub struct MergeSession<'a> {
    current: &'a [Block],
    generated: &'a [Block],
    choices: Vec<Choice>,
    display: StructuralDiff,
}

impl<'a> MergeSession<'a> {
    /// Starts a review with every row set to generated.
    pub fn new(current: &'a [Block], generated: &'a [Block]) -> Self {
        Self {
            current,
            generated,
            choices: default_choices(current.len(), generated.len()),
            display: structural_diff(current, generated),
        }
    }

    /// Number of rows (`max` of both lengths).
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn choice(&self, index: usize) -> Option<Choice> {
        self.choices.get(index).copied()
    }

    /// Sets the choice of one row.
    ///
    /// # Errors
    /// - Returns `MergeError::IndexOutOfRange` when `index >= len()`.
    pub fn choose(&mut self, index: usize, choice: Choice) -> Result<(), MergeError> {
        let len = self.choices.len();
        let slot = self
            .choices
            .get_mut(index)
            .ok_or(MergeError::IndexOutOfRange { index, len })?;
        *slot = choice;
        Ok(())
    }

    pub fn accept_all(&mut self) {
        self.choices.fill(Choice::Generated);
    }

    pub fn keep_all(&mut self) {
        self.choices.fill(Choice::Current);
    }

    /// Word-diffed side-by-side view of both sequences.
    pub fn display(&self) -> &StructuralDiff {
        &self.display
    }

    /// Review rows in index order.
    pub fn rows(&self) -> Vec<MergeRow<'_>> {
        self.choices
            .iter()
            .enumerate()
            .map(|(index, choice)| MergeRow {
                index,
                current: self.display.left.get(index).and_then(Option::as_ref),
                generated: self.display.right.get(index).and_then(Option::as_ref),
                choice: *choice,
            })
            .collect()
    }

    /// Merged sequence for the current choices.
    pub fn resolve(&self) -> Vec<Block> {
        merge_blocks(self.current, self.generated, &self.choices)
    }
}
