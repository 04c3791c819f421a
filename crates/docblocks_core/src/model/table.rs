//! Table payload types.
//!
//! # Invariants
//! - A table is only built when `content.rows` is an array; anything else is
//!   classified as malformed by the normalizer.
//! - Effective `colspan` / `rowspan` are never below 1.

use crate::model::inline::InlineNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header rows assumed when a table does not declare `headerRows`.
pub const DEFAULT_HEADER_ROWS: usize = 1;

/// Table block payload stored at the block root `content` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableContent {
    pub rows: Vec<Row>,
    #[serde(
        rename = "headerRows",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub header_rows: Option<usize>,
    /// Uninterpreted keys such as `type` or `columnWidths`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableContent {
    /// Number of leading rows rendered as header cells.
    pub fn header_row_count(&self, default_header_rows: usize) -> usize {
        self.header_rows.unwrap_or(default_header_rows)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One table cell.
///
/// Accepts `{ "content": [...], "props": {...} }` and the older bare
/// inline-array shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CellWire")]
pub struct Cell {
    pub content: Vec<InlineNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<CellProps>,
}

impl Cell {
    pub fn colspan(&self) -> u32 {
        effective_span(self.props.as_ref().and_then(|props| props.colspan))
    }

    pub fn rowspan(&self) -> u32 {
        effective_span(self.props.as_ref().and_then(|props| props.rowspan))
    }

    /// Text alignment, `left` when unset.
    pub fn alignment(&self) -> &str {
        self.props
            .as_ref()
            .and_then(|props| props.text_alignment.as_deref())
            .filter(|value| !value.is_empty())
            .unwrap_or("left")
    }

    /// Background color unless unset or `default`.
    pub fn background_color(&self) -> Option<&str> {
        self.props
            .as_ref()
            .and_then(|props| non_default_color(props.background_color.as_deref()))
    }

    /// Text color unless unset or `default`.
    pub fn text_color(&self) -> Option<&str> {
        self.props
            .as_ref()
            .and_then(|props| non_default_color(props.text_color.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<u32>,
    #[serde(
        rename = "textAlignment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub text_alignment: Option<String>,
    #[serde(
        rename = "backgroundColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<String>,
    #[serde(
        rename = "textColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub text_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn effective_span(value: Option<u32>) -> u32 {
    match value {
        Some(span) if span > 0 => span,
        _ => 1,
    }
}

fn non_default_color(value: Option<&str>) -> Option<&str> {
    value.filter(|color| !color.is_empty() && *color != "default")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellWire {
    Bare(Vec<InlineNode>),
    Full {
        #[serde(default)]
        content: Vec<InlineNode>,
        #[serde(default)]
        props: Option<CellProps>,
    },
}

impl From<CellWire> for Cell {
    fn from(wire: CellWire) -> Self {
        match wire {
            CellWire::Bare(content) => Self {
                content,
                props: None,
            },
            CellWire::Full { content, props } => Self { content, props },
        }
    }
}
