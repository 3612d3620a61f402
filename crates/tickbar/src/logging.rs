//! Tracing subscriber setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or names no global level.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Build the filter from `directives`, falling back to [`DEFAULT_LEVEL`].
#[must_use]
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(DEFAULT_LEVEL.into())
        .parse_lossy(directives)
}

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// Logs go to stderr so they never interleave with the bar on stdout.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(DEFAULT_LEVEL.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
