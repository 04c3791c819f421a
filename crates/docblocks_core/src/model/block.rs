//! Block document model.
//!
//! # Responsibility
//! - Define the closed set of block kinds the renderer and diff engine accept.
//! - Serialize blocks back to the canonical persisted JSON shape.
//!
//! # Invariants
//! - Text-bearing blocks expose their runs through `inline_content()`; there
//!   is no second location to look at once a block has been normalized.
//! - `Unsupported` keeps the raw element verbatim and serializes it unchanged.
//! - `id` is a rendering key only; no diff or merge logic reads it.

use crate::model::inline::InlineNode;
use crate::model::table::TableContent;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Marker kind of a list block or list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListStyle {
    Bulleted,
    Numbered,
}

/// Wire spelling of a single list item block.
///
/// Both spellings are accepted per style; the input spelling is kept so the
/// block serializes the way it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListItemTag {
    BulletedListItem,
    BulletListItem,
    NumberedListItem,
    NumberListItem,
}

impl ListItemTag {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "bulletedListItem" => Some(Self::BulletedListItem),
            "bulletListItem" => Some(Self::BulletListItem),
            "numberedListItem" => Some(Self::NumberedListItem),
            "numberListItem" => Some(Self::NumberListItem),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BulletedListItem => "bulletedListItem",
            Self::BulletListItem => "bulletListItem",
            Self::NumberedListItem => "numberedListItem",
            Self::NumberListItem => "numberListItem",
        }
    }

    pub fn style(self) -> ListStyle {
        match self {
            Self::BulletedListItem | Self::BulletListItem => ListStyle::Bulleted,
            Self::NumberedListItem | Self::NumberListItem => ListStyle::Numbered,
        }
    }
}

/// Why an element could not be mapped to a supported block kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The array element is not a JSON object.
    NotAnObject,
    /// The element has no string `type`.
    MissingType,
    /// The `type` is outside the supported set.
    UnknownType(String),
    /// A table without a `content.rows` array.
    MalformedTable,
    /// Known type whose payload does not have the expected shape.
    MalformedContent(String),
}

impl UnsupportedReason {
    /// Stable short code used in diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAnObject => "not_an_object",
            Self::MissingType => "missing_type",
            Self::UnknownType(_) => "unknown_type",
            Self::MalformedTable => "malformed_table",
            Self::MalformedContent(_) => "malformed_content",
        }
    }
}

impl Display for UnsupportedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "block is not an object"),
            Self::MissingType => write!(f, "block has no type"),
            Self::UnknownType(name) => write!(f, "unsupported block type `{name}`"),
            Self::MalformedTable => write!(f, "table block has no rows array"),
            Self::MalformedContent(details) => write!(f, "malformed block content: {details}"),
        }
    }
}

/// Element kept verbatim because it is not a supported block.
#[derive(Debug, Clone, PartialEq)]
pub struct Unsupported {
    /// `type` string when one was present.
    pub type_name: Option<String>,
    pub reason: UnsupportedReason,
    pub raw: Value,
}

/// Closed set of block payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph {
        content: Vec<InlineNode>,
    },
    Heading {
        /// Integer `props.level`; `None` when missing or not an integer.
        level: Option<i64>,
        content: Vec<InlineNode>,
    },
    ListItem {
        tag: ListItemTag,
        content: Vec<InlineNode>,
    },
    List {
        style: ListStyle,
        items: Vec<Vec<InlineNode>>,
    },
    Quote {
        content: Vec<InlineNode>,
    },
    Code {
        source: String,
    },
    Table(TableContent),
    Unsupported(Unsupported),
}

/// One normalized document block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Option<String>,
    pub kind: BlockKind,
    /// `props` keys the model does not interpret.
    pub extra_props: Map<String, Value>,
    /// Root keys the model does not interpret, e.g. `children`.
    pub extra: Map<String, Value>,
}

impl Block {
    /// Creates a block without id or extra keys.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: None,
            kind,
            extra_props: Map::new(),
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn paragraph(content: Vec<InlineNode>) -> Self {
        Self::new(BlockKind::Paragraph { content })
    }

    pub fn heading(level: i64, content: Vec<InlineNode>) -> Self {
        Self::new(BlockKind::Heading {
            level: Some(level),
            content,
        })
    }

    /// Wire `type` string of this block.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::ListItem { tag, .. } => tag.as_str(),
            BlockKind::List {
                style: ListStyle::Bulleted,
                ..
            } => "bulleted-list",
            BlockKind::List {
                style: ListStyle::Numbered,
                ..
            } => "numbered-list",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Code { .. } => "code",
            BlockKind::Table(_) => "table",
            BlockKind::Unsupported(unsupported) => {
                unsupported.type_name.as_deref().unwrap_or("")
            }
        }
    }

    /// Inline runs of text-bearing blocks.
    pub fn inline_content(&self) -> Option<&[InlineNode]> {
        match &self.kind {
            BlockKind::Paragraph { content }
            | BlockKind::Heading { content, .. }
            | BlockKind::ListItem { content, .. }
            | BlockKind::Quote { content } => Some(content),
            _ => None,
        }
    }

    /// Paragraphs and headings are the only kinds paired for word diffs.
    pub fn is_word_diffable(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::Paragraph { .. } | BlockKind::Heading { .. }
        )
    }

    /// Returns a copy whose inline runs are replaced by `content`.
    ///
    /// Blocks without inline runs are returned unchanged.
    pub fn with_inline_content(&self, content: Vec<InlineNode>) -> Self {
        let mut copy = self.clone();
        match &mut copy.kind {
            BlockKind::Paragraph { content: slot }
            | BlockKind::Heading { content: slot, .. }
            | BlockKind::ListItem { content: slot, .. }
            | BlockKind::Quote { content: slot } => *slot = content,
            _ => {}
        }
        copy
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, BlockKind::Unsupported(_))
    }

    /// Canonical JSON shape of this block.
    pub fn to_value(&self) -> Value {
        if let BlockKind::Unsupported(unsupported) = &self.kind {
            return unsupported.raw.clone();
        }

        let mut root = self.extra.clone();
        if let Some(id) = &self.id {
            root.insert("id".to_string(), Value::String(id.clone()));
        }
        root.insert(
            "type".to_string(),
            Value::String(self.type_name().to_string()),
        );

        let mut props = self.extra_props.clone();
        match &self.kind {
            BlockKind::Paragraph { content }
            | BlockKind::ListItem { content, .. }
            | BlockKind::Quote { content } => {
                props.insert("content".to_string(), inline_value(content));
            }
            BlockKind::Heading { level, content } => {
                if let Some(level) = level {
                    props.insert("level".to_string(), Value::from(*level));
                }
                props.insert("content".to_string(), inline_value(content));
            }
            BlockKind::List { items, .. } => {
                let items = items.iter().map(|item| inline_value(item)).collect();
                props.insert("items".to_string(), Value::Array(items));
            }
            BlockKind::Code { source } => {
                props.insert("content".to_string(), Value::String(source.clone()));
            }
            BlockKind::Table(table) => {
                root.insert(
                    "content".to_string(),
                    serde_json::to_value(table).unwrap_or(Value::Null),
                );
            }
            BlockKind::Unsupported(_) => {}
        }

        if !props.is_empty() || !matches!(self.kind, BlockKind::Table(_)) {
            root.insert("props".to_string(), Value::Object(props));
        }
        Value::Object(root)
    }
}

fn inline_value(nodes: &[InlineNode]) -> Value {
    Value::Array(
        nodes
            .iter()
            .map(|node| serde_json::to_value(node).unwrap_or(Value::Null))
            .collect(),
    )
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Block {
    /// Never fails for well-formed JSON: unsupported shapes become
    /// `BlockKind::Unsupported`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(crate::normalize::normalize_block(&value))
    }
}
