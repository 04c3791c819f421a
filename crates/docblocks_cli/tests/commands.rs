use docblocks_cli::{
    compare_files, load_content, merge_files, render_file, word_diff_texts, CliError,
    SnapshotError,
};
use docblocks_core::{DiffOptions, MergeError, Normalized};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn paragraphs(texts: &[&str]) -> String {
    Value::Array(
        texts
            .iter()
            .map(|text| json!({ "type": "paragraph", "props": { "content": [{ "text": text }] } }))
            .collect(),
    )
    .to_string()
}

#[test]
fn render_decodes_buffer_envelopes() {
    let dir = tempfile::tempdir().unwrap();
    let content = paragraphs(&["from bytes"]);
    let envelope = json!({ "snapshot_data": { "type": "Buffer", "data": content.as_bytes() } });
    let path = write(&dir, "snapshot.json", &envelope.to_string());

    assert_eq!(
        render_file(&path).unwrap(),
        "<div class=\"document\"><p class=\"paragraph\">from bytes</p></div>"
    );
}

#[test]
fn render_marks_empty_and_invalid_files() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write(&dir, "empty.json", "[]");
    let invalid = write(&dir, "invalid.json", "{ broken");

    assert!(render_file(&empty).unwrap().contains("content-empty"));
    assert!(render_file(&invalid).unwrap().contains("Invalid content format"));
    assert!(matches!(
        load_content(&invalid).unwrap(),
        Normalized::Invalid(_)
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn bad_snapshot_bytes_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "bad.json", r#"{"type":"Buffer","data":[1,-2]}"#);
    assert!(matches!(
        render_file(&path).unwrap_err(),
        CliError::Snapshot(SnapshotError::InvalidByte { index: 1 })
    ));
}

#[test]
fn compare_prints_both_panes() {
    let dir = tempfile::tempdir().unwrap();
    let left = write(&dir, "left.json", &paragraphs(&["The cat sat."]));
    let right = write(&dir, "right.json", &paragraphs(&["The cat sat quietly.", "Extra"]));

    let output = compare_files(&left, &right, &DiffOptions::default()).unwrap();
    let (current, generated) = output.split_once("+++ generated\n").unwrap();
    assert!(current.starts_with("--- current\n"));
    assert!(!current.contains("Extra"));
    assert!(generated.contains("diff-added"));
    assert!(generated.contains("Extra"));
}

#[test]
fn word_diff_prints_token_json() {
    let output = word_diff_texts("a red car", "a blue car").unwrap();
    let tokens: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        tokens,
        json!([
            { "value": "a " },
            { "value": "red", "removed": true },
            { "value": "blue", "added": true },
            { "value": " car" }
        ])
    );
}

#[test]
fn merge_keeps_selected_rows_and_rejects_unknown_ones() {
    let dir = tempfile::tempdir().unwrap();
    let current = write(&dir, "current.json", &paragraphs(&["mine 0", "mine 1"]));
    let generated = write(&dir, "generated.json", &paragraphs(&["ai 0", "ai 1"]));

    let output = merge_files(&current, &generated, &[1]).unwrap();
    let merged: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(merged[0]["props"]["content"][0]["text"], "ai 0");
    assert_eq!(merged[1]["props"]["content"][0]["text"], "mine 1");

    assert!(matches!(
        merge_files(&current, &generated, &[2]).unwrap_err(),
        CliError::Merge(MergeError::IndexOutOfRange { index: 2, len: 2 })
    ));
}
