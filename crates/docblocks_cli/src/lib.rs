//! Host around `docblocks_core`: file I/O, snapshot decoding and logging.

pub mod commands;
pub mod error;
pub mod logging;
pub mod snapshot;

pub use commands::{compare_files, load_content, merge_files, render_file, word_diff_texts};
pub use error::CliError;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use snapshot::{decode_snapshot, decode_snapshot_value, SnapshotError};
