//! Error type shared by the core crate.

/// Errors produced by `tickbar-core`.
///
/// An unavailable ETC is never an error; it is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarError {
    /// A rolling window was requested with no room for samples.
    #[error("rolling window capacity must be greater than zero")]
    ZeroCapacity,

    /// A glyph was empty, longer than one character, or a control character.
    #[error("invalid glyph {0:?}: expected a single printable character")]
    InvalidGlyph(String),

    /// Any other invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The run was cancelled.
    #[error("run cancelled")]
    Cancelled,
}
