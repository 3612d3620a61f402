//! Terminal width query.

use tickbar_core::DEFAULT_TERMINAL_WIDTH;
use tracing::warn;

/// Current terminal size as `(columns, rows)`, if it can be queried.
#[must_use]
pub fn terminal_size() -> Option<(u16, u16)> {
    crossterm::terminal::size()
        .ok()
        .filter(|&(columns, _)| columns > 0)
}

/// Current terminal width, or [`DEFAULT_TERMINAL_WIDTH`] when stdout is
/// not a terminal or the query fails.
#[must_use]
pub fn terminal_width() -> u16 {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => columns,
        Ok(_) => {
            warn!(
                fallback = DEFAULT_TERMINAL_WIDTH,
                "terminal reported zero columns"
            );
            DEFAULT_TERMINAL_WIDTH
        }
        Err(err) => {
            warn!(%err, fallback = DEFAULT_TERMINAL_WIDTH, "error getting terminal size");
            DEFAULT_TERMINAL_WIDTH
        }
    }
}
