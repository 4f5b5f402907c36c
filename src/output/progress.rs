//! Progress indicator for validation and merge passes.
//!
//! A trimmed counter-style indicator: both passes already know how
//! many files they will touch, so a `done/total` readout with elapsed
//! time is all the feedback needed.
//!
//! # Examples
//!
//! ```
//! use pdfdeck::output::progress::ProgressCounter;
//!
//! let mut progress = ProgressCounter::new("Merging");
//! progress.tick(1, 3);
//! progress.tick(2, 3);
//! progress.tick(3, 3);
//! progress.finish();
//! ```

use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Counter-style progress indicator.
pub struct ProgressCounter {
    /// Label shown before the counter.
    label: String,
    /// Last reported (done, total).
    last: Option<(usize, usize)>,
    /// Start time of the operation.
    start_time: Instant,
    /// Whether output is written at all.
    enabled: bool,
}

impl ProgressCounter {
    /// Create a progress counter with the given label.
    ///
    /// Output is only produced when stdout is a terminal.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            last: None,
            start_time: Instant::now(),
            enabled: Self::is_terminal(),
        }
    }

    /// Create a disabled counter (no output).
    pub fn disabled(label: impl Into<String>) -> Self {
        let mut counter = Self::new(label);
        counter.enabled = false;
        counter
    }

    /// Check if stdout is a terminal.
    fn is_terminal() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal()
    }

    /// Report progress: `done` of `total` items are finished.
    ///
    /// The first tick after construction or [`finish`](Self::finish)
    /// starts a fresh timing window, so a reused counter reports the
    /// elapsed time of the current pass only.
    pub fn tick(&mut self, done: usize, total: usize) {
        if self.last.is_none() {
            self.start_time = Instant::now();
        }
        self.last = Some((done, total));
        if self.enabled {
            let elapsed = format_duration(self.start_time.elapsed());
            print!("\r{} {done}/{total} {elapsed}", self.label);
            io::stdout().flush().ok();
        }
    }

    /// End the readout, moving to a fresh line and resetting the
    /// counter for the next pass.
    pub fn finish(&mut self) {
        if self.enabled && self.last.is_some() {
            println!();
        }
        self.last = None;
    }

    /// The most recent (done, total) pair reported.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.last
    }

    /// Elapsed time since the current pass started ticking.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
