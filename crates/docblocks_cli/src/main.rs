//! `docblocks` entry point.

use clap::{Parser, Subcommand};
use docblocks_cli::{
    compare_files, default_log_level, init_logging, merge_files, render_file, word_diff_texts,
    CliError,
};
use docblocks_core::DiffOptions;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "docblocks", version, about = "Render, compare and merge block documents")]
struct Cli {
    /// Log level (trace|debug|info|warn|error); needs --log-dir
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off without it
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a snapshot file to HTML
    Render {
        file: PathBuf,
    },

    /// Compare two snapshots side by side
    Compare {
        left: PathBuf,
        right: PathBuf,

        /// Mark blocks present on one side only as removed/added
        #[arg(long)]
        mark_unpaired: bool,
    },

    /// Print the word diff of two strings as JSON
    WordDiff {
        old: String,
        new: String,
    },

    /// Merge edited and generated snapshots (generated wins by default)
    Merge {
        current: PathBuf,
        generated: PathBuf,

        /// Row index that keeps the current block. Repeatable.
        #[arg(long = "keep-current", value_name = "N")]
        keep_current: Vec<usize>,
    },
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    if let Some(dir) = &cli.log_dir {
        let dir = std::path::absolute(dir).map_err(|err| CliError::io(dir, err))?;
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &dir)?;
    }

    let output = match cli.command {
        Command::Render { file } => render_file(&file)?,
        Command::Compare {
            left,
            right,
            mark_unpaired,
        } => compare_files(&left, &right, &DiffOptions { mark_unpaired })?,
        Command::WordDiff { old, new } => word_diff_texts(&old, &new)?,
        Command::Merge {
            current,
            generated,
            keep_current,
        } => merge_files(&current, &generated, &keep_current)?,
    };
    Ok(with_newline(output))
}

fn with_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
