//! Core document logic for Docblocks.
//! This crate owns structured article content: block normalization,
//! rendering, word/structural diffing and block merge resolution.
//!
//! All operations are synchronous, pure and in-memory; the crate performs no
//! I/O and keeps no state between calls.

pub mod diagnostics;
pub mod diff;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod render;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, NoopSink};
pub use diff::structural::{
    structural_diff, structural_diff_with, DiffOptions, PairOutcome, StructuralDiff,
};
pub use diff::word::{new_text, old_text, project, tokenize, word_diff, DiffMode, DiffToken};
pub use merge::{
    default_choices, merge_blocks, merge_by_choice, Choice, MergeError, MergeRow, MergeSession,
};
pub use model::block::{
    Block, BlockKind, ListItemTag, ListStyle, Unsupported, UnsupportedReason,
};
pub use model::inline::{plain_text, spaced_text, InlineNode};
pub use model::table::{Cell, CellProps, Row, TableContent};
pub use normalize::{
    normalize, normalize_block, normalize_optional, normalize_str, normalize_str_with,
    normalize_values, normalize_with, ContentError, Normalized,
};
pub use render::block::{render, render_content, render_slots, render_with, RenderOptions};
pub use render::inline::render_inline;
pub use render::tree::{Element, RenderKey, RenderNode, RenderTree, Tag};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
