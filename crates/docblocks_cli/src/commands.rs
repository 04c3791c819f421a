//! Command implementations behind the `docblocks` binary.
//!
//! Every command returns its full output as a string; printing is left to
//! `main`.

use crate::error::CliError;
use crate::snapshot::decode_snapshot;
use docblocks_core::{
    normalize_str, render_content, render_slots, structural_diff_with, word_diff, Choice,
    DiffOptions, LogSink, MergeSession, Normalized,
};
use log::info;
use std::path::Path;

/// Reads a snapshot file and normalizes its content.
pub fn load_content(path: &Path) -> Result<Normalized, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|err| CliError::io(path, err))?;
    let content = decode_snapshot(&raw)?;
    Ok(normalize_str(&content))
}

/// HTML of one snapshot, including the empty/invalid markers.
pub fn render_file(path: &Path) -> Result<String, CliError> {
    let content = load_content(path)?;
    info!(
        "event=render module=cli status=ok blocks={}",
        content.blocks().len()
    );
    Ok(render_content(&content).to_html())
}

/// Side-by-side HTML panes of two snapshots.
pub fn compare_files(left: &Path, right: &Path, options: &DiffOptions) -> Result<String, CliError> {
    let left = load_content(left)?.into_blocks();
    let right = load_content(right)?.into_blocks();
    let diff = structural_diff_with(&left, &right, options, &LogSink);
    info!(
        "event=compare module=cli status=ok rows={} changed={}",
        diff.len(),
        diff.has_changes()
    );
    Ok(format!(
        "--- current\n{}\n+++ generated\n{}\n",
        render_slots(&diff.left).to_html(),
        render_slots(&diff.right).to_html()
    ))
}

/// Pretty JSON token stream of a word diff.
pub fn word_diff_texts(old: &str, new: &str) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&word_diff(old, new))?)
}

/// Merged block JSON; rows listed in `keep_current` keep the current block.
///
/// # Errors
/// - `CliError::Merge` when an index is outside the merge rows.
pub fn merge_files(
    current: &Path,
    generated: &Path,
    keep_current: &[usize],
) -> Result<String, CliError> {
    let current = load_content(current)?.into_blocks();
    let generated = load_content(generated)?.into_blocks();
    let mut session = MergeSession::new(&current, &generated);
    for &index in keep_current {
        session.choose(index, Choice::Current)?;
    }
    let merged = session.resolve();
    info!(
        "event=merge module=cli status=ok rows={} kept_current={} merged={}",
        session.len(),
        keep_current.len(),
        merged.len()
    );
    Ok(serde_json::to_string_pretty(&merged)?)
}
