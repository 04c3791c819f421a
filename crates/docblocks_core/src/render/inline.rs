//! Inline run rendering.
//!
//! # Invariants
//! - Wrappers nest innermost to outermost in the fixed order
//!   bold, italic, underline, code, added, removed.
//! - Output node `i` is a fragment keyed `Index(i)` for input run `i`.

use crate::model::inline::InlineNode;
use crate::render::tree::{Element, RenderKey, RenderNode, Tag};

pub const DIFF_HIGHLIGHT_CLASS: &str = "diff-highlight";
pub const DIFF_ADDED_CLASS: &str = "diff-added";
pub const DIFF_REMOVED_CLASS: &str = "diff-removed";

/// Renders runs in order; `None` renders nothing.
pub fn render_inline(nodes: Option<&[InlineNode]>) -> Vec<RenderNode> {
    nodes
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, node)| render_run(index, node))
        .collect()
}

fn render_run(index: usize, node: &InlineNode) -> RenderNode {
    let mut el = RenderNode::text(node.text.as_str());
    if node.bold {
        el = Element::new(Tag::Strong).child(el).into();
    }
    if node.italic {
        el = Element::new(Tag::Em).child(el).into();
    }
    if node.underline {
        el = Element::new(Tag::Underline).child(el).into();
    }
    if node.code {
        el = Element::new(Tag::Code).class("inline-code").child(el).into();
    }
    if node.added {
        el = Element::new(Tag::Span)
            .class(DIFF_HIGHLIGHT_CLASS)
            .class(DIFF_ADDED_CLASS)
            .child(el)
            .into();
    }
    if node.removed {
        el = Element::new(Tag::Span)
            .class(DIFF_HIGHLIGHT_CLASS)
            .class(DIFF_REMOVED_CLASS)
            .style("text-decoration", "line-through")
            .child(el)
            .into();
    }
    Element::new(Tag::Fragment)
        .key(RenderKey::Index(index))
        .child(el)
        .into()
}
