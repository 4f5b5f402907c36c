//! # pdfdeck
//!
//! Merge PDF files through a validated, reorderable queue with
//! undo/redo.
//!
//! The crate is built around an explicit [`session::MergeSession`]:
//! callers submit [`session::Intent`] values, receive
//! [`output::Notice`]s describing what happened, and pull
//! [`render::RenderState`] snapshots to draw from. The CLI in this
//! crate is one such caller; the session itself never touches a
//! terminal.
//!
//! ## Features
//!
//! - Per-file and aggregate size caps with structural PDF validation
//! - Ordered queue with append, remove, and drag-style reordering
//! - Undo/redo over every queue mutation
//! - Sequential merge with per-file progress and optional compaction
//! - Atomic output writes
//!
//! ## Example
//!
//! ```no_run
//! use pdfdeck::config::Config;
//! use pdfdeck::session::{Intent, MergeSession};
//! use pdfdeck::validation::FileCandidate;
//!
//! # async fn example() -> pdfdeck::Result<()> {
//! let mut session = MergeSession::new(Config::default());
//!
//! let a = FileCandidate::from_path("a.pdf".as_ref()).await?;
//! let b = FileCandidate::from_path("b.pdf".as_ref()).await?;
//! session.dispatch(Intent::AddFiles(vec![a, b])).await;
//! session.dispatch(Intent::Merge).await;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod io;
pub mod merge;
pub mod output;
pub mod queue;
pub mod render;
pub mod session;
pub mod validation;

pub use error::{PdfDeckError, Result};

use std::io::Write as _;

use clap::Parser;

use crate::cli::{resolve_inputs, Cli, ReplCommand};
use crate::output::{Notice, OutputFormatter, ProgressCounter};
use crate::render::RenderState;
use crate::session::{Intent, MergeSession, ProgressPhase};
use crate::validation::FileCandidate;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the CLI.
///
/// Parses arguments, builds a session, and either merges the given
/// inputs immediately or hands control to the interactive loop.
///
/// # Errors
///
/// Returns an error for invalid arguments or when a one-shot merge
/// fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;
    let config = cli.to_config()?;

    let formatter = OutputFormatter::from_config(&config);

    // One counter per pass, so each readout carries its own label and
    // its own elapsed time.
    let make_counter = |label: &str| {
        if config.quiet {
            ProgressCounter::disabled(label)
        } else {
            ProgressCounter::new(label)
        }
    };
    let mut validating = make_counter("Validating");
    let mut merging = make_counter("Merging");

    let session = MergeSession::new(config)
        .with_confirm(Box::new(confirm_on_stdin))
        .with_progress(Box::new(move |phase, done, total| {
            let counter = match phase {
                ProgressPhase::Validating => &mut validating,
                ProgressPhase::Merging => &mut merging,
            };
            counter.tick(done, total);
            if done == total {
                counter.finish();
            }
        }));

    let inputs = resolve_inputs(&cli.inputs)?;

    if cli.interactive {
        run_interactive(session, &formatter, &inputs).await
    } else {
        run_once(session, &formatter, &inputs).await
    }
}

/// Queue the given paths and merge immediately.
async fn run_once(
    mut session: MergeSession,
    formatter: &OutputFormatter,
    inputs: &[std::path::PathBuf],
) -> Result<()> {
    let candidates = load_candidates(formatter, inputs).await;
    let notices = session.dispatch(Intent::AddFiles(candidates)).await;
    formatter.show_all(&notices);

    let notices = session.dispatch(Intent::Merge).await;
    formatter.show_all(&notices);

    if let Some(failure) = notices.iter().find(|n| n.is_error()) {
        return Err(PdfDeckError::other(failure.message.clone()));
    }
    Ok(())
}

/// Read queue commands line by line until quit or end of input.
async fn run_interactive(
    mut session: MergeSession,
    formatter: &OutputFormatter,
    inputs: &[std::path::PathBuf],
) -> Result<()> {
    if !inputs.is_empty() {
        let candidates = load_candidates(formatter, inputs).await;
        let notices = session.dispatch(Intent::AddFiles(candidates)).await;
        formatter.show_all(&notices);
    }

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("pdfdeck> ");
        std::io::stdout().flush().ok();

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // End of input.
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match ReplCommand::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                formatter.show(&Notice::error(err.to_string()));
                continue;
            }
        };

        match command {
            ReplCommand::Add(paths) => {
                let paths = match resolve_inputs(&paths) {
                    Ok(paths) => paths,
                    Err(err) => {
                        formatter.show(&Notice::error(err.to_string()));
                        continue;
                    }
                };
                let candidates = load_candidates(formatter, &paths).await;
                let notices = session.dispatch(Intent::AddFiles(candidates)).await;
                formatter.show_all(&notices);
            }
            ReplCommand::Remove(index) => {
                let notices = session.dispatch(Intent::RemoveFile(index)).await;
                formatter.show_all(&notices);
            }
            ReplCommand::Move { from, to } => {
                let notices = session.dispatch(Intent::ReorderFile { from, to }).await;
                formatter.show_all(&notices);
            }
            ReplCommand::Undo => {
                let notices = session.dispatch(Intent::Undo).await;
                formatter.show_all(&notices);
            }
            ReplCommand::Redo => {
                let notices = session.dispatch(Intent::Redo).await;
                formatter.show_all(&notices);
            }
            ReplCommand::Compress => {
                let notices = session.dispatch(Intent::ToggleCompression).await;
                formatter.show_all(&notices);
            }
            ReplCommand::List => {
                print_queue(formatter, &session.snapshot());
            }
            ReplCommand::Merge => {
                let notices = session.dispatch(Intent::Merge).await;
                formatter.show_all(&notices);
            }
            ReplCommand::Help => {
                println!("{}", ReplCommand::help_text());
            }
            ReplCommand::Quit => break,
        }
    }

    Ok(())
}

/// Build candidates from paths, reporting unreadable ones.
async fn load_candidates(
    formatter: &OutputFormatter,
    paths: &[std::path::PathBuf],
) -> Vec<FileCandidate> {
    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        match FileCandidate::from_path(path).await {
            Ok(candidate) => candidates.push(candidate),
            Err(err) => formatter.show(&Notice::error(format!(
                "Cannot read {}: {err}",
                path.display()
            ))),
        }
    }
    candidates
}

/// Print the rendered queue.
fn print_queue(formatter: &OutputFormatter, state: &RenderState) {
    if state.items.is_empty() {
        formatter.show(&Notice::info("The queue is empty"));
        return;
    }

    for item in &state.items {
        formatter.list_item(item.position, &format!("{} ({})", item.name, item.size_display));
    }

    let compression = if state.compress { "on" } else { "off" };
    formatter.show(&Notice::info(format!(
        "Total: {} | Estimated output: {} | Compression: {compression}",
        state.total_size_display, state.estimated_size_display
    )));
}

/// Ask a yes/no question on stdin, defaulting to no.
fn confirm_on_stdin(question: &str) -> bool {
    print!("{question} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
