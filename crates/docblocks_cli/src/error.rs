//! Error types for the CLI host.

use crate::logging::LoggingError;
use crate::snapshot::SnapshotError;
use docblocks_core::MergeError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Failure of one CLI command.
#[derive(Debug)]
pub enum CliError {
    /// A file could not be read or a path could not be resolved.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Output could not be serialized.
    Json(serde_json::Error),
    /// A snapshot file held an undecodable byte blob.
    Snapshot(SnapshotError),
    /// Rolling file logger could not start.
    Logging(LoggingError),
    /// A `--keep-current` index is outside the merge rows.
    Merge(MergeError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Snapshot(err) => write!(f, "snapshot error: {err}"),
            Self::Logging(err) => write!(f, "logging error: {err}"),
            Self::Merge(err) => write!(f, "merge error: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Merge(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<SnapshotError> for CliError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<MergeError> for CliError {
    fn from(value: MergeError) -> Self {
        Self::Merge(value)
    }
}
