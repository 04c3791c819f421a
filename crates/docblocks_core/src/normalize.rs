//! Raw content canonicalization.
//!
//! # Responsibility
//! - Turn persisted/editor JSON into the fixed [`Block`] shape.
//! - Own every "which legacy shape is this" decision; no other module reads
//!   raw JSON.
//!
//! # Invariants
//! - Never panics and never returns an error; failures degrade to
//!   [`Normalized::Empty`], [`Normalized::Invalid`] or an unsupported block.
//! - Source values are never modified (copy-on-write).
//! - One malformed element never affects its siblings.
//! - `normalize_str(&to_string(blocks))` yields `blocks` again.

use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::model::block::{
    Block, BlockKind, ListItemTag, ListStyle, Unsupported, UnsupportedReason,
};
use crate::model::inline::{plain_text, InlineNode};
use crate::model::table::TableContent;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Literal inputs treated as "no content".
pub const EMPTY_SENTINELS: &[&str] = &["null", "[]", "{}", "undefined"];

/// Why a raw document could not be read as a block array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Input is not valid JSON.
    Syntax(String),
    /// Input is JSON, but its root is not an array.
    NotAnArray(&'static str),
}

impl Display for ContentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(details) => write!(f, "invalid content json: {details}"),
            Self::NotAnArray(kind) => write!(f, "content root must be an array, got {kind}"),
        }
    }
}

impl Error for ContentError {}

/// Result of normalizing one raw document.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Nothing to render.
    Empty,
    /// Content exists but is unreadable.
    Invalid(ContentError),
    Blocks(Vec<Block>),
}

impl Normalized {
    /// Blocks of a readable document; empty for the other outcomes.
    pub fn blocks(&self) -> &[Block] {
        match self {
            Self::Blocks(blocks) => blocks,
            Self::Empty | Self::Invalid(_) => &[],
        }
    }

    pub fn into_blocks(self) -> Vec<Block> {
        match self {
            Self::Blocks(blocks) => blocks,
            Self::Empty | Self::Invalid(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Normalizes an arbitrary JSON value holding a content string.
///
/// Any non-string value (including `null`) is treated as empty content.
pub fn normalize(raw: &Value) -> Normalized {
    normalize_with(raw, &LogSink)
}

pub fn normalize_with(raw: &Value, sink: &dyn DiagnosticSink) -> Normalized {
    match raw {
        Value::String(text) => normalize_str_with(text, sink),
        _ => {
            sink.report(&Diagnostic::EmptyContent);
            Normalized::Empty
        }
    }
}

/// Normalizes content that may be absent.
pub fn normalize_optional(raw: Option<&str>) -> Normalized {
    match raw {
        Some(text) => normalize_str(text),
        None => normalize(&Value::Null),
    }
}

/// Normalizes a serialized block array.
pub fn normalize_str(raw: &str) -> Normalized {
    normalize_str_with(raw, &LogSink)
}

pub fn normalize_str_with(raw: &str, sink: &dyn DiagnosticSink) -> Normalized {
    if is_empty_content(raw) {
        sink.report(&Diagnostic::EmptyContent);
        return Normalized::Empty;
    }

    let error = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => return Normalized::Blocks(normalize_values_with(&items, sink)),
        Ok(other) => ContentError::NotAnArray(json_kind(&other)),
        Err(err) => ContentError::Syntax(err.to_string()),
    };
    sink.report(&Diagnostic::InvalidContent {
        reason: error.to_string(),
    });
    Normalized::Invalid(error)
}

/// Returns whether `raw` is blank or one of [`EMPTY_SENTINELS`].
pub fn is_empty_content(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || EMPTY_SENTINELS.contains(&trimmed)
}

/// Normalizes already-parsed array elements one by one.
pub fn normalize_values(values: &[Value]) -> Vec<Block> {
    normalize_values_with(values, &LogSink)
}

pub fn normalize_values_with(values: &[Value], sink: &dyn DiagnosticSink) -> Vec<Block> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let block = normalize_block(value);
            if let BlockKind::Unsupported(unsupported) = &block.kind {
                sink.report(&Diagnostic::MalformedBlock {
                    index,
                    reason: unsupported.reason.clone(),
                });
            }
            block
        })
        .collect()
}

/// Normalizes one element. Unreadable elements become unsupported blocks.
pub fn normalize_block(value: &Value) -> Block {
    build_block(value).unwrap_or_else(|rejection| {
        let block = Block::new(BlockKind::Unsupported(Unsupported {
            type_name: rejection.type_name,
            reason: rejection.reason,
            raw: value.clone(),
        }));
        // Keyed rendering still needs the id of a rejected block.
        match value.get("id").and_then(Value::as_str) {
            Some(id) => block.with_id(id),
            None => block,
        }
    })
}

struct Rejection {
    type_name: Option<String>,
    reason: UnsupportedReason,
}

impl Rejection {
    fn new(type_name: Option<&str>, reason: UnsupportedReason) -> Self {
        Self {
            type_name: type_name.map(str::to_string),
            reason,
        }
    }
}

fn build_block(value: &Value) -> Result<Block, Rejection> {
    let object = value
        .as_object()
        .ok_or_else(|| Rejection::new(None, UnsupportedReason::NotAnObject))?;
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Rejection::new(None, UnsupportedReason::MissingType))?;
    let malformed = |details: String| {
        Rejection::new(
            Some(type_name),
            UnsupportedReason::MalformedContent(details),
        )
    };

    let mut extra = object.clone();
    extra.remove("type");
    let id = match extra.get("id") {
        Some(Value::String(id)) => {
            let id = id.clone();
            extra.remove("id");
            Some(id)
        }
        _ => None,
    };
    let mut props = match extra.remove("props") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(props)) => props,
        Some(_) => return Err(malformed("props is not an object".to_string())),
    };

    let kind = match type_name {
        "paragraph" => BlockKind::Paragraph {
            content: lift_inline_content(&mut props, &mut extra).map_err(malformed)?,
        },
        "heading" => {
            let level = take_level(&mut props);
            BlockKind::Heading {
                level,
                content: lift_inline_content(&mut props, &mut extra).map_err(malformed)?,
            }
        }
        "quote" => BlockKind::Quote {
            content: lift_inline_content(&mut props, &mut extra).map_err(malformed)?,
        },
        "bulleted-list" | "numbered-list" => {
            let style = if type_name == "bulleted-list" {
                ListStyle::Bulleted
            } else {
                ListStyle::Numbered
            };
            let items = match props.remove("items") {
                None | Some(Value::Null) => Vec::new(),
                Some(items) => serde_json::from_value::<Vec<Vec<InlineNode>>>(items)
                    .map_err(|err| malformed(err.to_string()))?,
            };
            BlockKind::List { style, items }
        }
        "code" => BlockKind::Code {
            source: take_code_source(&mut props).map_err(malformed)?,
        },
        "table" => BlockKind::Table(take_table(&mut extra).map_err(|reason| {
            Rejection::new(Some(type_name), reason)
        })?),
        other => match ListItemTag::from_type_name(other) {
            Some(tag) => BlockKind::ListItem {
                tag,
                content: lift_inline_content(&mut props, &mut extra).map_err(malformed)?,
            },
            None => {
                return Err(Rejection::new(
                    Some(other),
                    UnsupportedReason::UnknownType(other.to_string()),
                ))
            }
        },
    };

    Ok(Block {
        id,
        kind,
        extra_props: props,
        extra,
    })
}

/// Reads inline runs from `props.content`, lifting a root-level `content`
/// array when the props slot is absent.
fn lift_inline_content(
    props: &mut Map<String, Value>,
    extra: &mut Map<String, Value>,
) -> Result<Vec<InlineNode>, String> {
    let source = match props.remove("content") {
        None | Some(Value::Null) => match extra.get("content") {
            Some(Value::Array(_)) => extra.remove("content"),
            _ => None,
        },
        present => present,
    };
    match source {
        None => Ok(Vec::new()),
        Some(value) => parse_inline(value),
    }
}

fn parse_inline(value: Value) -> Result<Vec<InlineNode>, String> {
    serde_json::from_value(value).map_err(|err| format!("inline content: {err}"))
}

/// Integer heading level; anything else stays in props untouched.
fn take_level(props: &mut Map<String, Value>) -> Option<i64> {
    let value = props.remove("level")?;
    let level = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.fract() == 0.0 && number.abs() < i64::MAX as f64)
            .map(|number| number as i64)
    });
    if level.is_none() {
        props.insert("level".to_string(), value);
    }
    level
}

fn take_code_source(props: &mut Map<String, Value>) -> Result<String, String> {
    match props.remove("content") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(source)) => Ok(source),
        Some(value @ Value::Array(_)) => parse_inline(value).map(|nodes| plain_text(&nodes)),
        Some(other) => Err(format!(
            "code content must be a string, got {}",
            json_kind(&other)
        )),
    }
}

fn take_table(extra: &mut Map<String, Value>) -> Result<TableContent, UnsupportedReason> {
    let has_rows = extra
        .get("content")
        .and_then(|content| content.get("rows"))
        .is_some_and(Value::is_array);
    if !has_rows {
        return Err(UnsupportedReason::MalformedTable);
    }
    let content = extra.remove("content").unwrap_or(Value::Null);
    serde_json::from_value(content)
        .map_err(|err| UnsupportedReason::MalformedContent(format!("table content: {err}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{is_empty_content, normalize_block, take_level};
    use crate::model::block::{BlockKind, UnsupportedReason};
    use serde_json::{json, Map, Value};

    #[test]
    fn sentinels_are_compared_after_trimming() {
        assert!(is_empty_content("  null \n"));
        assert!(is_empty_content("{}"));
        assert!(!is_empty_content("[ ]x"));
    }

    #[test]
    fn root_content_is_lifted_without_touching_source() {
        let source = json!({ "type": "quote", "content": [{ "text": "q" }] });
        let before = source.clone();
        let block = normalize_block(&source);
        assert_eq!(source, before);
        assert_eq!(block.inline_content().unwrap()[0].text, "q");
        assert!(!block.extra.contains_key("content"));
    }

    #[test]
    fn props_content_wins_over_root_content() {
        let block = normalize_block(&json!({
            "type": "paragraph",
            "props": { "content": [{ "text": "props" }] },
            "content": [{ "text": "root" }]
        }));
        assert_eq!(block.inline_content().unwrap()[0].text, "props");
        assert!(block.extra.contains_key("content"));
    }

    #[test]
    fn non_integer_level_is_kept_in_props() {
        let mut props = Map::new();
        props.insert("level".to_string(), Value::String("2".to_string()));
        assert_eq!(take_level(&mut props), None);
        assert_eq!(props.get("level"), Some(&json!("2")));

        props.insert("level".to_string(), json!(3.0));
        assert_eq!(take_level(&mut props), Some(3));
        assert!(props.is_empty());
    }

    #[test]
    fn string_inline_content_is_malformed() {
        let block = normalize_block(&json!({ "type": "paragraph", "props": { "content": "oops" } }));
        match block.kind {
            BlockKind::Unsupported(unsupported) => {
                assert!(matches!(
                    unsupported.reason,
                    UnsupportedReason::MalformedContent(_)
                ));
                assert_eq!(unsupported.type_name.as_deref(), Some("paragraph"));
            }
            other => panic!("expected unsupported block, got {other:?}"),
        }
    }

    #[test]
    fn code_accepts_inline_array() {
        let block = normalize_block(&json!({
            "type": "code",
            "props": { "content": [{ "text": "let x" }, { "text": " = 1;" }] }
        }));
        assert_eq!(
            block.kind,
            BlockKind::Code {
                source: "let x = 1;".to_string()
            }
        );
    }
}
