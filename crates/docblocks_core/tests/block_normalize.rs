use docblocks_core::{
    normalize, normalize_optional, normalize_str, normalize_str_with, BlockKind, ContentError,
    Diagnostic, ListItemTag, Normalized, UnsupportedReason,
};
use serde_json::{json, Value};
use std::cell::RefCell;

#[test]
fn empty_inputs_normalize_to_empty() {
    assert_eq!(normalize(&Value::Null), Normalized::Empty);
    assert_eq!(normalize_optional(None), Normalized::Empty);
    assert_eq!(normalize(&json!(42)), Normalized::Empty);
    assert_eq!(normalize(&json!([{ "type": "paragraph" }])), Normalized::Empty);
    for raw in ["", "   ", "null", "[]", "{}", "undefined"] {
        assert_eq!(normalize_str(raw), Normalized::Empty, "input `{raw}`");
        assert_eq!(normalize(&json!(raw)), Normalized::Empty, "input `{raw}`");
    }
}

#[test]
fn unparsable_json_is_invalid_not_empty() {
    let result = normalize_str("[{\"type\": ");
    assert!(matches!(result, Normalized::Invalid(ContentError::Syntax(_))));
    assert!(result.blocks().is_empty());
}

#[test]
fn non_array_root_is_invalid() {
    assert_eq!(
        normalize_str(r#"{"type":"paragraph"}"#),
        Normalized::Invalid(ContentError::NotAnArray("object"))
    );
    assert_eq!(
        normalize_str("\"just text\""),
        Normalized::Invalid(ContentError::NotAnArray("string"))
    );
}

#[test]
fn legacy_root_content_is_lifted_for_text_kinds() {
    let raw = json!([
        { "type": "paragraph", "content": [{ "type": "text", "text": "p" }] },
        { "type": "heading", "props": { "level": 2 }, "content": [{ "text": "h" }] },
        { "type": "bulletListItem", "content": [{ "text": "b" }] },
        { "type": "numberedListItem", "content": [{ "text": "n" }] },
        { "type": "quote", "content": [{ "text": "q" }] }
    ])
    .to_string();

    let blocks = normalize_str(&raw).into_blocks();
    let texts: Vec<_> = blocks
        .iter()
        .map(|block| block.inline_content().unwrap()[0].text.clone())
        .collect();
    assert_eq!(texts, vec!["p", "h", "b", "n", "q"]);
    assert_eq!(
        blocks[2].kind,
        BlockKind::ListItem {
            tag: ListItemTag::BulletListItem,
            content: blocks[2].inline_content().unwrap().to_vec(),
        }
    );
    assert_eq!(blocks[1].to_value()["props"]["content"][0]["text"], "h");
    assert!(blocks[1].to_value().get("content").is_none());
}

#[test]
fn normalization_is_idempotent_through_serialization() {
    let raw = json!([
        { "id": "a", "type": "paragraph", "content": [{ "type": "text", "text": "Hi", "styles": { "bold": true } }] },
        { "id": "b", "type": "heading", "props": { "level": "2", "textColor": "red" }, "content": [] },
        { "type": "bulleted-list", "props": { "items": [[{ "text": "one" }], [{ "text": "two", "italic": true }]] } },
        { "type": "code", "props": { "content": "let x = 1;", "language": "rust" } },
        { "type": "table", "content": { "type": "tableContent", "headerRows": 2, "rows": [
            { "cells": [[{ "text": "bare" }], { "content": [{ "text": "obj" }], "props": { "colspan": 2 } }] }
        ] } },
        { "type": "table", "content": {} },
        { "type": "callout", "props": { "emoji": "!" } },
        7,
        { "type": "paragraph", "props": { "content": [] }, "children": [{ "type": "paragraph" }] }
    ])
    .to_string();

    let first = normalize_str(&raw).into_blocks();
    assert_eq!(first.len(), 9);
    let reserialized = serde_json::to_string(&first).unwrap();
    let second = normalize_str(&reserialized).into_blocks();
    assert_eq!(first, second);
}

#[test]
fn malformed_elements_are_isolated() {
    let raw = json!([
        { "type": "paragraph", "props": { "content": [{ "text": "before" }] } },
        null,
        { "props": {} },
        { "type": "mystery" },
        { "type": "table", "content": { "cells": [] } },
        { "type": "paragraph", "props": { "content": [{ "text": "after" }] } }
    ])
    .to_string();

    let seen = RefCell::new(Vec::new());
    let sink = |diagnostic: &Diagnostic| seen.borrow_mut().push(diagnostic.clone());
    let blocks = normalize_str_with(&raw, &sink).into_blocks();

    assert_eq!(blocks.len(), 6);
    assert_eq!(blocks[0].inline_content().unwrap()[0].text, "before");
    assert_eq!(blocks[5].inline_content().unwrap()[0].text, "after");

    let reasons: Vec<_> = blocks[1..5]
        .iter()
        .map(|block| match &block.kind {
            BlockKind::Unsupported(unsupported) => unsupported.reason.clone(),
            other => panic!("expected unsupported, got {other:?}"),
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            UnsupportedReason::NotAnObject,
            UnsupportedReason::MissingType,
            UnsupportedReason::UnknownType("mystery".to_string()),
            UnsupportedReason::MalformedTable,
        ]
    );
    assert_eq!(seen.borrow().len(), 4);
    assert!(matches!(
        seen.borrow()[0],
        Diagnostic::MalformedBlock { index: 1, .. }
    ));
}

#[test]
fn unsupported_blocks_serialize_verbatim() {
    let element = json!({ "type": "callout", "props": { "emoji": "!" }, "id": 5 });
    let raw = Value::Array(vec![element.clone()]).to_string();
    let blocks = normalize_str(&raw).into_blocks();
    assert_eq!(serde_json::to_value(&blocks[0]).unwrap(), element);
}

#[test]
fn blocks_deserialize_directly_through_serde() {
    let blocks: Vec<docblocks_core::Block> = serde_json::from_value(json!([
        { "type": "quote", "content": [{ "text": "q" }] },
        { "type": "unknown" }
    ]))
    .unwrap();
    assert_eq!(blocks[0].type_name(), "quote");
    assert!(blocks[1].is_unsupported());
}
