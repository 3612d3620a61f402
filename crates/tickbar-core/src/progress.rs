//! Progress bar state: counting, timing, ETC and display geometry.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::constants::DEFAULT_TERMINAL_WIDTH;
use crate::error::BarError;
use crate::etc::EtcEstimator;
use crate::events::BarEvent;
use crate::layout::LayoutContext;
use crate::options::{BarOptions, Total};

/// How the bar glyphs are split for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarFill {
    /// `filled` progress glyphs followed by `empty` empty glyphs.
    Proportional { filled: usize, empty: usize },
    /// A single progress glyph at `marker` within `length` empty glyphs.
    Cycling { marker: usize, length: usize },
}

impl BarFill {
    /// Number of glyphs in the bar.
    #[must_use]
    pub fn len(&self) -> usize {
        match *self {
            Self::Proportional { filled, empty } => filled + empty,
            Self::Cycling { length, .. } => length,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a presenter needs to draw one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFrame<'a> {
    pub name: &'a str,
    pub progress_char: char,
    pub empty_space_char: char,
    /// Whole percent complete; `None` in unbounded mode.
    pub percent: Option<u8>,
    pub fill: BarFill,
    pub elapsed: Duration,
    pub etc: Option<Duration>,
    /// The terminal is too narrow for the label.
    pub compact: bool,
    /// Padding after the bar up to the available width.
    pub spaces_after_bar: usize,
}

/// A console progress bar.
///
/// The bar is a pure state machine: it never writes to the terminal.
/// Presenters call [`frame`](Self::frame) after each tick and render it.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tickbar_core::{BarOptions, ManualClock, ProgressBar};
///
/// let clock = ManualClock::new();
/// let mut bar = ProgressBar::with_clock(BarOptions::new(4u64), clock.clone(), 80).unwrap();
/// while !bar.is_done() {
///     clock.advance(Duration::from_millis(10));
///     bar.tick();
/// }
/// assert_eq!(bar.progress(), 4);
/// assert_eq!(bar.etc(), Some(Duration::ZERO));
/// ```
#[derive(Debug)]
pub struct ProgressBar<C: Clock = SystemClock> {
    options: BarOptions,
    progress: u64,
    clock: C,
    start: Instant,
    estimator: EtcEstimator,
    layout: LayoutContext,
    etc: Option<Duration>,
}

impl ProgressBar<SystemClock> {
    /// Create a bar on the system clock, laid out for the default width.
    pub fn new(options: BarOptions) -> Result<Self, BarError> {
        Self::with_clock(options, SystemClock, DEFAULT_TERMINAL_WIDTH)
    }
}

impl<C: Clock> ProgressBar<C> {
    /// Create a bar with an explicit time source and terminal width.
    pub fn with_clock(options: BarOptions, clock: C, terminal_width: u16) -> Result<Self, BarError> {
        options.validate()?;
        let start = clock.now();
        let layout = LayoutContext::new(options.name.chars().count(), terminal_width);
        debug!(total = %options.total, name = %options.name, "progress bar created");
        Ok(Self {
            estimator: EtcEstimator::new(options.total),
            options,
            progress: 0,
            clock,
            start,
            layout,
            etc: None,
        })
    }

    /// Advance by one unit and refresh the ETC.
    ///
    /// A bounded bar stops counting at its total.
    pub fn tick(&mut self) {
        let advanced = match self.options.total {
            Total::Bounded(total) if self.progress < total => {
                self.progress += 1;
                if self.progress == total {
                    debug!(total, elapsed = ?self.elapsed(), "progress bar complete");
                }
                true
            }
            Total::Bounded(_) => false,
            Total::Unbounded => {
                self.progress = self.progress.saturating_add(1).min(Total::SENTINEL - 1);
                true
            }
        };
        if advanced {
            self.compute_etc();
        }
    }

    /// Whether every unit is complete. Never true in unbounded mode.
    #[must_use]
    pub fn is_done(&self) -> bool {
        match self.options.total {
            Total::Bounded(total) => self.progress >= total,
            Total::Unbounded => false,
        }
    }

    /// Feed the estimator and store the result.
    pub fn compute_etc(&mut self) -> Option<Duration> {
        let elapsed = self.elapsed();
        self.etc = self.estimator.estimate(self.progress, elapsed);
        self.etc
    }

    /// Latest ETC without recomputing.
    #[must_use]
    pub fn etc(&self) -> Option<Duration> {
        self.etc
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start)
    }

    #[must_use]
    pub fn progress(&self) -> u64 {
        self.progress
    }

    #[must_use]
    pub fn total(&self) -> Total {
        self.options.total
    }

    /// Fraction complete in `[0, 1]`. A zero total counts as complete.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> Option<f64> {
        match self.options.total {
            Total::Bounded(0) => Some(1.0),
            Total::Bounded(total) => Some((self.progress as f64 / total as f64).min(1.0)),
            Total::Unbounded => None,
        }
    }

    /// Recompute the layout for a new terminal width.
    pub fn resize(&mut self, terminal_width: u16) {
        self.layout.recompute(terminal_width);
    }

    pub fn handle_event(&mut self, event: BarEvent) {
        match event {
            BarEvent::Tick => self.tick(),
            BarEvent::Resize { width, .. } => self.resize(width),
        }
    }

    #[must_use]
    pub fn options(&self) -> &BarOptions {
        &self.options
    }

    #[must_use]
    pub fn estimator(&self) -> &EtcEstimator {
        &self.estimator
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutContext {
        &self.layout
    }

    /// Display state for the current progress.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn frame(&self) -> BarFrame<'_> {
        let length = self.layout.bar_length();
        let (percent, fill) = match self.ratio() {
            Some(ratio) => {
                let filled = ((length as f64 * ratio) as usize).min(length);
                (
                    Some((ratio * 100.0) as u8),
                    BarFill::Proportional {
                        filled,
                        empty: length - filled,
                    },
                )
            }
            None => {
                let marker = (self.progress % length as u64) as usize;
                (None, BarFill::Cycling { marker, length })
            }
        };
        BarFrame {
            name: &self.options.name,
            progress_char: self.options.progress_char,
            empty_space_char: self.options.empty_space_char,
            percent,
            fill,
            elapsed: self.elapsed(),
            etc: self.etc,
            compact: self.layout.is_compact(),
            spaces_after_bar: self.layout.spaces_after_bar(),
        }
    }
}
