//! Injectable diagnostics for degraded content.
//!
//! # Responsibility
//! - Report every degradation (empty input, invalid JSON, malformed blocks,
//!   heading fallbacks, diff pass-through) to a caller-chosen sink.
//! - Provide a `log`-facade sink emitting stable, metadata-only events.
//!
//! # Invariants
//! - The core never installs a logger or keeps logging state.
//! - Events carry indices, type names, reasons and lengths; never content.

use crate::model::block::UnsupportedReason;
use log::{debug, warn};

/// One degradation observed while processing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Input was absent, blank, or one of the empty sentinels.
    EmptyContent,
    /// Input was not a JSON array of blocks.
    InvalidContent { reason: String },
    /// Element at `index` was kept as an unsupported block.
    MalformedBlock {
        index: usize,
        reason: UnsupportedReason,
    },
    /// Heading at `index` rendered as a paragraph.
    HeadingFallback {
        index: usize,
        level: Option<i64>,
        text_chars: usize,
    },
    /// Pair at `index` was not word-diffed.
    PassThrough {
        index: usize,
        left: Option<String>,
        right: Option<String>,
    },
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::EmptyContent => {
                debug!("event=content_empty module=normalize status=skipped");
            }
            Diagnostic::InvalidContent { reason } => {
                warn!(
                    "event=content_invalid module=normalize status=degraded reason_chars={}",
                    reason.chars().count()
                );
            }
            Diagnostic::MalformedBlock { index, reason } => {
                warn!(
                    "event=block_malformed module=normalize status=degraded index={} reason={}",
                    index,
                    reason.code()
                );
            }
            Diagnostic::HeadingFallback {
                index,
                level,
                text_chars,
            } => {
                debug!(
                    "event=heading_fallback module=render status=degraded index={} level={} text_chars={}",
                    index,
                    level.map_or_else(|| "none".to_string(), |value| value.to_string()),
                    text_chars
                );
            }
            Diagnostic::PassThrough { index, left, right } => {
                debug!(
                    "event=diff_pass_through module=diff status=ok index={} left={} right={}",
                    index,
                    left.as_deref().unwrap_or("absent"),
                    right.as_deref().unwrap_or("absent")
                );
            }
        }
    }
}
