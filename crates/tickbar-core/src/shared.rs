//! Thread-safe handle to a progress bar.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::events::BarEvent;
use crate::progress::ProgressBar;

/// Cloneable handle serializing access to one [`ProgressBar`].
///
/// Every mutation happens under the lock, so a single writer updates the
/// bar at any time even when ticks arrive from several threads.
#[derive(Debug)]
pub struct SharedProgressBar<C: Clock = SystemClock> {
    inner: Arc<Mutex<ProgressBar<C>>>,
}

impl<C: Clock> Clone for SharedProgressBar<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedProgressBar<C> {
    #[must_use]
    pub fn new(bar: ProgressBar<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bar)),
        }
    }

    pub fn tick(&self) {
        self.inner.lock().tick();
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.inner.lock().is_done()
    }

    #[must_use]
    pub fn progress(&self) -> u64 {
        self.inner.lock().progress()
    }

    #[must_use]
    pub fn etc(&self) -> Option<Duration> {
        self.inner.lock().etc()
    }

    pub fn resize(&self, terminal_width: u16) {
        self.inner.lock().resize(terminal_width);
    }

    pub fn handle_event(&self, event: BarEvent) {
        self.inner.lock().handle_event(event);
    }

    /// Run `f` with exclusive access, e.g. to tick and render atomically.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut ProgressBar<C>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Recover the bar once every other handle has been dropped.
    #[must_use]
    pub fn into_inner(self) -> Option<ProgressBar<C>> {
        Arc::try_unwrap(self.inner).ok().map(Mutex::into_inner)
    }
}
