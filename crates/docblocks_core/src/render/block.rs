//! Block dispatch rendering.
//!
//! # Responsibility
//! - Map each normalized block to exactly one rendering rule.
//! - Degrade invalid headings to paragraphs and malformed blocks to inline
//!   markers without touching sibling blocks.
//!
//! # Invariants
//! - A heading renders as a heading only when its level is within
//!   `1..=max_heading_level` and its text is at most `heading_max_chars`
//!   characters; otherwise it renders as a paragraph.
//! - Every top-level node is keyed by block id, else by position.

use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::model::block::{Block, BlockKind, ListStyle, UnsupportedReason};
use crate::model::inline::{plain_text, InlineNode};
use crate::model::table::{TableContent, DEFAULT_HEADER_ROWS};
use crate::normalize::Normalized;
use crate::render::inline::render_inline;
use crate::render::tree::{Element, RenderKey, RenderNode, RenderTree, Tag};
use serde_json::Value;

/// Longest heading text, in characters, still rendered as a heading.
pub const HEADING_MAX_CHARS: usize = 150;
/// Deepest heading level with a heading element.
pub const MAX_HEADING_LEVEL: u8 = 6;

pub const UNSUPPORTED_BLOCK_TEXT: &str = "Unsupported or malformed block";
pub const MALFORMED_TABLE_TEXT: &str = "Malformed table block";
pub const INVALID_CONTENT_TEXT: &str = "Invalid content format";

/// Rendering policy knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub heading_max_chars: usize,
    /// Clamped to 6 when rendering.
    pub max_heading_level: u8,
    pub default_header_rows: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_max_chars: HEADING_MAX_CHARS,
            max_heading_level: MAX_HEADING_LEVEL,
            default_header_rows: DEFAULT_HEADER_ROWS,
        }
    }
}

/// Renders a block sequence with default options.
pub fn render(blocks: &[Block]) -> RenderTree {
    render_with(blocks, &RenderOptions::default(), &LogSink)
}

pub fn render_with(
    blocks: &[Block],
    options: &RenderOptions,
    sink: &dyn DiagnosticSink,
) -> RenderTree {
    let children = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| render_block(block, index, options, sink));
    RenderTree::new(document_root().children(children))
}

/// Renders a normalization outcome, including the empty and invalid markers.
pub fn render_content(content: &Normalized) -> RenderTree {
    match content {
        Normalized::Empty => RenderTree::new(
            Element::new(Tag::Div)
                .class("content-empty")
                .style("min-height", "24px"),
        ),
        Normalized::Invalid(_) => RenderTree::new(
            Element::new(Tag::Div)
                .class("content-invalid")
                .child(RenderNode::text(INVALID_CONTENT_TEXT)),
        ),
        Normalized::Blocks(blocks) => render(blocks),
    }
}

/// Renders aligned slots where `None` is an absent block.
///
/// Absent slots become empty fragments so slot `i` stays node `i`.
pub fn render_slots(slots: &[Option<Block>]) -> RenderTree {
    render_slots_with(slots, &RenderOptions::default(), &LogSink)
}

pub fn render_slots_with(
    slots: &[Option<Block>],
    options: &RenderOptions,
    sink: &dyn DiagnosticSink,
) -> RenderTree {
    let children = slots.iter().enumerate().map(|(index, slot)| match slot {
        Some(block) => render_block(block, index, options, sink),
        None => Element::new(Tag::Fragment)
            .key(RenderKey::Index(index))
            .into(),
    });
    RenderTree::new(document_root().children(children))
}

/// Sibling key for the block at `index`.
///
/// A non-empty string id wins; a non-zero numeric id left in the raw keys is
/// used next; otherwise the position.
pub fn render_key(block: &Block, index: usize) -> RenderKey {
    if let Some(id) = block.id.as_deref().filter(|id| !id.is_empty()) {
        return RenderKey::Id(id.to_string());
    }
    let raw_id = match &block.kind {
        BlockKind::Unsupported(unsupported) => unsupported.raw.get("id"),
        _ => block.extra.get("id"),
    };
    match raw_id {
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => {
            RenderKey::Id(number.to_string())
        }
        _ => RenderKey::Index(index),
    }
}

/// Heading element level, or `None` when the heading must fall back.
pub fn heading_level(
    level: Option<i64>,
    content: &[InlineNode],
    options: &RenderOptions,
) -> Option<u8> {
    let max_level = i64::from(options.max_heading_level.min(MAX_HEADING_LEVEL));
    let level = level.filter(|value| (1..=max_level).contains(value))?;
    if plain_text(content).chars().count() > options.heading_max_chars {
        return None;
    }
    u8::try_from(level).ok()
}

pub fn render_block(
    block: &Block,
    index: usize,
    options: &RenderOptions,
    sink: &dyn DiagnosticSink,
) -> RenderNode {
    let key = render_key(block, index);
    match &block.kind {
        BlockKind::Paragraph { content } => paragraph(key, content),
        BlockKind::Heading { level, content } => match heading_level(*level, content, options) {
            Some(level) => {
                let size = match level {
                    1 => "heading-large",
                    2 => "heading-medium",
                    _ => "heading-small",
                };
                Element::new(Tag::Heading(level))
                    .key(key)
                    .class("heading")
                    .class(size)
                    .children(render_inline(Some(content)))
                    .into()
            }
            None => {
                sink.report(&Diagnostic::HeadingFallback {
                    index,
                    level: *level,
                    text_chars: plain_text(content).chars().count(),
                });
                paragraph(key, content)
            }
        },
        BlockKind::ListItem { tag, content } => Element::new(Tag::ListItem)
            .key(key)
            .class(list_item_class(tag.style()))
            .children(render_inline(Some(content)))
            .into(),
        BlockKind::List { style, items } => {
            let tag = match style {
                ListStyle::Bulleted => Tag::UnorderedList,
                ListStyle::Numbered => Tag::OrderedList,
            };
            let items = items.iter().enumerate().map(|(item_index, item)| {
                RenderNode::from(
                    Element::new(Tag::ListItem)
                        .key(RenderKey::Index(item_index))
                        .children(render_inline(Some(item))),
                )
            });
            Element::new(tag)
                .key(key)
                .class(list_item_class(*style))
                .children(items)
                .into()
        }
        BlockKind::Quote { content } => Element::new(Tag::Blockquote)
            .key(key)
            .class("quote")
            .children(render_inline(Some(content)))
            .into(),
        BlockKind::Code { source } => Element::new(Tag::Pre)
            .key(key)
            .class("code-block")
            .child(Element::new(Tag::Code).child(RenderNode::text(source.as_str())))
            .into(),
        BlockKind::Table(table) => render_table(key, table, options),
        BlockKind::Unsupported(unsupported) => {
            let text = match unsupported.reason {
                UnsupportedReason::MalformedTable => MALFORMED_TABLE_TEXT,
                _ => UNSUPPORTED_BLOCK_TEXT,
            };
            Element::new(Tag::Div)
                .key(key)
                .class("block-error")
                .child(RenderNode::text(text))
                .into()
        }
    }
}

fn document_root() -> Element {
    Element::new(Tag::Div).class("document")
}

fn paragraph(key: RenderKey, content: &[InlineNode]) -> RenderNode {
    Element::new(Tag::Paragraph)
        .key(key)
        .class("paragraph")
        .children(render_inline(Some(content)))
        .into()
}

fn list_item_class(style: ListStyle) -> &'static str {
    match style {
        ListStyle::Bulleted => "list-bulleted",
        ListStyle::Numbered => "list-numbered",
    }
}

fn render_table(key: RenderKey, table: &TableContent, options: &RenderOptions) -> RenderNode {
    let header_rows = table.header_row_count(options.default_header_rows);
    let rows = table.rows.iter().enumerate().map(|(row_index, row)| {
        let is_header = row_index < header_rows;
        let cells = row.cells.iter().enumerate().map(|(cell_index, cell)| {
            let mut element = Element::new(if is_header {
                Tag::HeaderCell
            } else {
                Tag::DataCell
            })
            .key(RenderKey::Index(cell_index))
            .class("table-cell")
            .attr("colspan", cell.colspan().to_string())
            .attr("rowspan", cell.rowspan().to_string())
            .style("text-align", cell.alignment());
            if let Some(color) = cell.background_color() {
                element = element.style("background-color", color);
            }
            if let Some(color) = cell.text_color() {
                element = element.style("color", color);
            }
            if is_header {
                element = element.class("table-header");
            }
            RenderNode::from(element.children(render_inline(Some(&cell.content))))
        });
        RenderNode::from(
            Element::new(Tag::TableRow)
                .key(RenderKey::Index(row_index))
                .children(cells),
        )
    });

    Element::new(Tag::Div)
        .key(key)
        .class("table-scroll")
        .child(
            Element::new(Tag::Table)
                .class("table")
                .child(Element::new(Tag::TableBody).children(rows)),
        )
        .into()
}
