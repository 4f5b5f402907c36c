//! CLI argument parsing for pdfdeck.
//!
//! Two surfaces share the session: a one-shot mode where files given
//! on the command line are queued and merged immediately, and an
//! interactive mode where queue commands are read line by line.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Queueing {} files", cli.inputs.len());
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_OUTPUT};
use crate::error::{PdfDeckError, Result};

/// Merge PDF files with a reorderable queue and undo/redo.
///
/// pdfdeck validates each input (type, size caps, structural parse)
/// before it enters the queue, merges the queue in order, and writes
/// a single output document.
#[derive(Parser, Debug)]
#[command(name = "pdfdeck")]
#[command(version)]
#[command(about = "Merge PDF files with a reorderable queue and undo/redo", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Input PDF files to queue (in order)
    ///
    /// Files are validated and queued in the order provided, then
    /// merged immediately unless --interactive is set.
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Compact the merged output
    ///
    /// Applies object compression to the merged document before it is
    /// written, and scales the displayed size estimate.
    #[arg(short, long)]
    pub compress: bool,

    /// Start an interactive session
    ///
    /// Reads queue commands (add, remove, move, undo, redo, list,
    /// merge) from stdin instead of merging immediately.
    #[arg(short, long)]
    pub interactive: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails
    /// validation.
    pub fn to_config(&self) -> Result<Config> {
        let config = Config {
            output: self.output.clone(),
            compress: self.compress,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error if neither inputs nor interactive mode were
    /// requested; there would be nothing for the session to do.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && !self.interactive {
            return Err(PdfDeckError::invalid_config(
                "No input files specified (use --interactive for an empty session)",
            ));
        }

        Ok(())
    }
}

/// One parsed line of the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Queue the given files.
    Add(Vec<PathBuf>),
    /// Remove the file at a 0-based queue position.
    Remove(usize),
    /// Move a file between 0-based queue positions.
    Move { from: usize, to: usize },
    /// Reverse the last queue mutation.
    Undo,
    /// Re-apply the last undone mutation.
    Redo,
    /// Flip the compression setting.
    Compress,
    /// Print the current queue.
    List,
    /// Merge the queue and write the output.
    Merge,
    /// Print command help.
    Help,
    /// End the session.
    Quit,
}

impl ReplCommand {
    /// Parse one input line.
    ///
    /// Positions are entered 1-based, matching the listed queue, and
    /// converted to 0-based here.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for unknown commands, missing
    /// arguments, or unparseable positions.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(PdfDeckError::invalid_config("Empty command"));
        };

        match command {
            "add" => {
                let paths: Vec<PathBuf> = words.map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(PdfDeckError::invalid_config("add requires at least one file"));
                }
                Ok(Self::Add(paths))
            }
            "remove" | "rm" => {
                let position = parse_position(words.next(), "remove")?;
                Ok(Self::Remove(position))
            }
            "move" | "mv" => {
                let from = parse_position(words.next(), "move")?;
                let to = parse_position(words.next(), "move")?;
                Ok(Self::Move { from, to })
            }
            "undo" => Ok(Self::Undo),
            "redo" => Ok(Self::Redo),
            "compress" => Ok(Self::Compress),
            "list" | "ls" => Ok(Self::List),
            "merge" => Ok(Self::Merge),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(PdfDeckError::invalid_config(format!(
                "Unknown command: {other} (try help)"
            ))),
        }
    }

    /// Help text listing the interactive commands.
    pub fn help_text() -> &'static str {
        "Commands:\n  \
         add <file>...    validate and queue files\n  \
         remove <pos>     remove the file at a position\n  \
         move <from> <to> move a file between positions\n  \
         undo             reverse the last queue change\n  \
         redo             re-apply the last undone change\n  \
         compress         toggle output compaction\n  \
         list             show the queue\n  \
         merge            merge the queue and write the output\n  \
         quit             end the session"
    }
}

/// Expand glob patterns among the given inputs.
///
/// Arguments without wildcard characters pass through untouched, so a
/// missing literal path is still reported by the later read instead
/// of vanishing as an empty match.
///
/// # Errors
///
/// Returns `InvalidConfig` for an unparseable pattern or an
/// unreadable glob entry.
pub fn resolve_inputs(patterns: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();

    for pattern in patterns {
        let text = pattern.to_string_lossy();
        if !text.contains(['*', '?', '[']) {
            resolved.push(pattern.clone());
            continue;
        }

        let paths = glob::glob(&text).map_err(|e| {
            PdfDeckError::invalid_config(format!("Invalid glob pattern {text}: {e}"))
        })?;
        for entry in paths {
            let path = entry.map_err(|e| {
                PdfDeckError::invalid_config(format!("Failed to read glob entry: {e}"))
            })?;
            resolved.push(path);
        }
    }

    Ok(resolved)
}

/// Parse a 1-based position argument into a 0-based index.
fn parse_position(word: Option<&str>, command: &str) -> Result<usize> {
    let Some(word) = word else {
        return Err(PdfDeckError::invalid_config(format!(
            "{command} requires a position"
        )));
    };

    let position: usize = word
        .parse()
        .map_err(|_| PdfDeckError::invalid_config(format!("Invalid position: {word}")))?;

    if position == 0 {
        return Err(PdfDeckError::invalid_config("Positions start at 1"));
    }
    Ok(position - 1)
}
