//! Cooperative cancellation shared between the tick loop and helper threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::BarError;

/// Cooperative cancellation token using an atomic flag.
///
/// # Example
/// ```
/// use tickbar_core::cancel::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Checkpoint for loops: `Err(BarError::Cancelled)` once cancelled.
    pub fn check_cancelled(&self) -> Result<(), BarError> {
        if self.is_cancelled() {
            Err(BarError::Cancelled)
        } else {
            Ok(())
        }
    }
}
