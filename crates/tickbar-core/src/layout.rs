//! Bar geometry derived from the terminal width.

use tracing::debug;

use crate::constants::{ANSI_SEQUENCES, BAR_PERCENTAGE, FIXED_CHARACTERS, MIN_BAR_LENGTH, MIN_WIDTH};

/// Layout metrics owned by one progress bar.
///
/// Recomputing only touches these fields, so it is safe between any two
/// ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    name_length: usize,
    terminal_width: u16,
    available_width: usize,
    bar_length: usize,
    spaces_after_bar: usize,
}

impl LayoutContext {
    /// Compute the layout for a bar label of `name_length` characters.
    #[must_use]
    pub fn new(name_length: usize, terminal_width: u16) -> Self {
        let mut layout = Self {
            name_length,
            terminal_width: 0,
            available_width: 0,
            bar_length: 0,
            spaces_after_bar: 0,
        };
        layout.recompute(terminal_width);
        layout
    }

    /// Re-derive every metric for a new terminal width.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn recompute(&mut self, terminal_width: u16) {
        let reserved = self.name_length + FIXED_CHARACTERS + ANSI_SEQUENCES;
        let available = usize::from(terminal_width).saturating_sub(reserved);

        let scaled = (available as f64 * BAR_PERCENTAGE) as usize;
        let mut bar_length = scaled.max(MIN_BAR_LENGTH);
        bar_length -= bar_length % 2;

        self.terminal_width = terminal_width;
        self.available_width = available;
        self.bar_length = bar_length;
        self.spaces_after_bar = available.saturating_sub(bar_length);

        debug!(
            terminal_width,
            available, bar_length, "progress bar layout recomputed"
        );
    }

    #[must_use]
    pub fn terminal_width(&self) -> u16 {
        self.terminal_width
    }

    #[must_use]
    pub fn available_width(&self) -> usize {
        self.available_width
    }

    /// Number of glyphs in the bar. Always even and non-zero.
    #[must_use]
    pub fn bar_length(&self) -> usize {
        self.bar_length
    }

    /// Padding after the closing bracket.
    #[must_use]
    pub fn spaces_after_bar(&self) -> usize {
        self.spaces_after_bar
    }

    #[must_use]
    pub fn name_length(&self) -> usize {
        self.name_length
    }

    /// Too narrow for the label; only percent and bar are drawn.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.available_width < MIN_WIDTH
    }
}
