//! Construction-time options for a progress bar.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EMPTY_SPACE_CHAR, DEFAULT_NAME, DEFAULT_PROGRESS_CHAR};
use crate::error::BarError;

/// Number of units a bar counts up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Total {
    /// A known number of units.
    Bounded(u64),
    /// No known end; only elapsed time and a cycling marker are shown.
    Unbounded,
}

impl Total {
    /// Raw count that callers may use to request unbounded mode.
    pub const SENTINEL: u64 = u64::MAX;

    /// The bounded count, if any.
    #[must_use]
    pub const fn bounded(self) -> Option<u64> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl From<u64> for Total {
    fn from(n: u64) -> Self {
        if n == Self::SENTINEL {
            Self::Unbounded
        } else {
            Self::Bounded(n)
        }
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Options for a progress bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarOptions {
    /// Units to complete.
    pub total: Total,
    /// Label printed before the bar.
    pub name: String,
    /// Glyph for completed units (and the cycling marker).
    pub progress_char: char,
    /// Glyph for remaining units.
    pub empty_space_char: char,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            total: Total::Unbounded,
            name: DEFAULT_NAME.to_string(),
            progress_char: DEFAULT_PROGRESS_CHAR,
            empty_space_char: DEFAULT_EMPTY_SPACE_CHAR,
        }
    }
}

impl BarOptions {
    /// Options for a bar counting up to `total`.
    #[must_use]
    pub fn new(total: impl Into<Total>) -> Self {
        Self {
            total: total.into(),
            ..Self::default()
        }
    }

    /// Options for a bar with no known end.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_progress_char(mut self, c: char) -> Self {
        self.progress_char = c;
        self
    }

    #[must_use]
    pub fn with_empty_space_char(mut self, c: char) -> Self {
        self.empty_space_char = c;
        self
    }

    /// Reject glyphs that would break the line layout.
    pub fn validate(&self) -> Result<(), BarError> {
        for c in [self.progress_char, self.empty_space_char] {
            if c.is_control() {
                return Err(BarError::InvalidGlyph(c.to_string()));
            }
        }
        if self.name.chars().any(|c| c == '\n' || c == '\r') {
            return Err(BarError::Config(
                "bar name must fit on a single line".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a glyph given as text. Exactly one printable character is accepted.
pub fn parse_glyph(s: &str) -> Result<char, BarError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Ok(c),
        _ => Err(BarError::InvalidGlyph(s.to_string())),
    }
}
