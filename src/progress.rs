//! Progress reporting for paginated fetches
//!
//! Purely observational: the pager calls [`ProgressReporter::tick`] once for
//! every page after the first and [`ProgressReporter::finish`] once when the
//! sequence ends. Nothing a reporter does feeds back into pagination.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives liveness signals from a running fetch sequence
pub trait ProgressReporter: Send {
    /// Another page beyond the first was fetched and merged
    fn tick(&mut self);

    /// The fetch sequence ended (successfully or not)
    fn finish(&mut self);
}

/// Reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn tick(&mut self) {}

    fn finish(&mut self) {}
}

/// Counts calls; handy for tests and for summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingProgress {
    /// Number of `tick` calls
    pub ticks: usize,
    /// Number of `finish` calls
    pub finishes: usize,
}

impl ProgressReporter for CountingProgress {
    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn finish(&mut self) {
        self.finishes += 1;
    }
}

/// Slots the puck travels through before wrapping
pub const DEFAULT_BAR_SLOTS: usize = 20;

const PUCK: &str = "<===>";

/// One frame of the looping bar: `[---<===>-----]`
pub fn puck_frame(position: usize, slots: usize) -> String {
    let position = position.min(slots);
    format!(
        "[{}{PUCK}{}]",
        "-".repeat(position),
        "-".repeat(slots - position)
    )
}

/// Terminal bar whose puck advances one slot per page and wraps around
pub struct BarProgress {
    bar: ProgressBar,
    ticks: usize,
}

impl BarProgress {
    /// Bar drawn on stdout with the default width
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_target(message, DEFAULT_BAR_SLOTS, ProgressDrawTarget::stdout())
    }

    /// Bar with an explicit width and draw target
    pub fn with_target(
        message: impl Into<String>,
        slots: usize,
        target: ProgressDrawTarget,
    ) -> Self {
        // indicatif treats the last tick string as the "finished" frame
        let mut frames: Vec<String> = (0..slots.max(1)).map(|p| puck_frame(p, slots)).collect();
        frames.push(format!("[{}]", "=".repeat(slots + PUCK.len())));
        let frames: Vec<&str> = frames.iter().map(String::as_str).collect();

        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&frames);

        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(style);
        bar.set_message(message.into());

        Self { bar, ticks: 0 }
    }

    /// Pages reported so far
    pub fn ticks(&self) -> usize {
        self.ticks
    }
}

impl ProgressReporter for BarProgress {
    fn tick(&mut self) {
        self.ticks += 1;
        self.bar.tick();
    }

    fn finish(&mut self) {
        if self.ticks == 0 {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish();
        }
    }
}

impl std::fmt::Debug for BarProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarProgress")
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
