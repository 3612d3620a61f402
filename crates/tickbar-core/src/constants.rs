//! Constants for ETC refresh cadence, window sizing and bar layout.

/// Number of ticks between two refreshes of the blended estimate.
pub const UPDATE_INTERVAL: u8 = 5;

/// Upper bound on the number of delta samples kept by the estimator.
pub const DELTA_WINDOW_CAPACITY: usize = 10;

/// Terminal width used when the real width cannot be queried.
pub const DEFAULT_TERMINAL_WIDTH: u16 = 30;

/// Share of the available width given to the bar itself.
pub const BAR_PERCENTAGE: f64 = 0.15;

/// Minimum bar length before rounding down to an even number.
pub const MIN_BAR_LENGTH: usize = 15;

/// Below this available width the bar is drawn without its name.
pub const MIN_WIDTH: usize = 10;

/// Characters taken by `"100% []"` and padding.
pub const FIXED_CHARACTERS: usize = 10;

/// Columns reserved for escape sequences emitted around the bar.
pub const ANSI_SEQUENCES: usize = 14;

/// Default bar name.
pub const DEFAULT_NAME: &str = "Progress";

/// Default glyph for completed units.
pub const DEFAULT_PROGRESS_CHAR: char = '#';

/// Default glyph for remaining units.
pub const DEFAULT_EMPTY_SPACE_CHAR: char = '-';

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Run cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_capacity_fits_update_cadence() {
        assert!(DELTA_WINDOW_CAPACITY > 0);
        assert!(UPDATE_INTERVAL > 1);
    }

    #[test]
    fn min_bar_length_leaves_room_for_marker() {
        assert!(MIN_BAR_LENGTH >= 2);
        assert!((0.0..1.0).contains(&BAR_PERCENTAGE));
    }
}
