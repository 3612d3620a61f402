//! # tickbar-core
//!
//! Core library for the tickbar console progress bar.
//! Provides a fixed-capacity rolling statistics window, a blended ETC
//! estimator and the progress bar state machine that presenters render.

pub mod cancel;
pub mod clock;
pub mod constants;
pub mod error;
pub mod etc;
pub mod events;
pub mod layout;
pub mod options;
pub mod progress;
pub mod shared;
pub mod window;

// Re-exports
pub use cancel::CancellationToken;
pub use clock::{Clock, ManualClock, SystemClock};
pub use constants::{exit_codes, DEFAULT_TERMINAL_WIDTH, UPDATE_INTERVAL};
pub use error::BarError;
pub use etc::{EtcEstimator, EtcPhase};
pub use events::BarEvent;
pub use layout::LayoutContext;
pub use options::{parse_glyph, BarOptions, Total};
pub use progress::{BarFill, BarFrame, ProgressBar};
pub use shared::SharedProgressBar;
pub use window::{RollingStats, RollingWindow, WindowSummary};
