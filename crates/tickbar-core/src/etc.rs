//! Estimated time to completion (ETC).
//!
//! The estimator blends two extrapolations:
//!
//! - **overall**: elapsed time since start scaled by remaining / done units,
//!   which assumes the rate has been constant since the beginning;
//! - **recent**: the mean per-unit duration over a small rolling window of
//!   samples, scaled by the remaining units.
//!
//! Until the window has been filled the overall estimate is returned as is.
//! Afterwards the two are averaged with equal weight. The blend is computed
//! as soon as the window fills and then refreshed every [`UPDATE_INTERVAL`]
//! calls so the displayed value does not jitter.

use std::num::NonZeroUsize;
use std::time::Duration;

use tracing::{debug, trace};

use crate::constants::{DELTA_WINDOW_CAPACITY, UPDATE_INTERVAL};
use crate::options::Total;
use crate::window::{RollingStats, RollingWindow};

/// Lifecycle of an [`EtcEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtcPhase {
    /// No progress has been observed yet.
    Cold,
    /// Collecting per-unit samples; the overall extrapolation is used.
    Warming,
    /// The sample window is full; the blended estimate is used.
    Steady,
}

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    elapsed: Duration,
    progress: u64,
}

/// Stateful ETC estimator for a single progress bar.
#[derive(Debug, Clone)]
pub struct EtcEstimator {
    total: Total,
    /// Milliseconds per unit, one sample per call that advanced progress.
    delta_window: RollingWindow<f64>,
    last_checkpoint: Option<Checkpoint>,
    last_etc_ms: Option<f64>,
    update_counter: u8,
}

impl EtcEstimator {
    /// Create an estimator for a bar counting up to `total`.
    #[must_use]
    pub fn new(total: impl Into<Total>) -> Self {
        let total = total.into();
        Self {
            total,
            delta_window: RollingWindow::with_capacity(delta_window_capacity(total)),
            last_checkpoint: None,
            last_etc_ms: None,
            update_counter: 0,
        }
    }

    /// Feed the current progress and the time elapsed since start.
    ///
    /// Returns `None` while no estimate can be made: before the first unit
    /// completes, for a zero total, and always in unbounded mode.
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(&mut self, progress: u64, elapsed: Duration) -> Option<Duration> {
        let total = self.total.bounded()?;
        if progress == 0 || total == 0 {
            return None;
        }

        let remaining_units = total.saturating_sub(progress);
        if remaining_units == 0 {
            return Some(self.cache(0.0));
        }
        let remaining = remaining_units as f64;
        let overall = as_millis(elapsed) * remaining / progress as f64;

        let Some(checkpoint) = self.last_checkpoint else {
            debug!(total, "ETC estimator warming up");
            self.last_checkpoint = Some(Checkpoint { elapsed, progress });
            self.update_counter = 0;
            return Some(self.cache(overall));
        };

        let was_full = self.delta_window.is_full();
        if progress > checkpoint.progress {
            let span = as_millis(elapsed.saturating_sub(checkpoint.elapsed));
            self.delta_window
                .push(span / (progress - checkpoint.progress) as f64);
            self.last_checkpoint = Some(Checkpoint { elapsed, progress });
        }

        let recent_avg = match self.delta_window.mean() {
            Some(avg) if self.delta_window.is_full() => avg,
            _ => return Some(self.cache(overall)),
        };

        if was_full {
            self.update_counter += 1;
            if self.update_counter < UPDATE_INTERVAL {
                return self.last_etc();
            }
        } else {
            debug!(
                samples = self.delta_window.len(),
                "ETC estimator reached steady state"
            );
        }
        self.update_counter = 0;

        let recent = recent_avg * remaining;
        let combined = (overall + recent) / 2.0;
        trace!(overall, recent, combined, "blended ETC refresh");
        Some(self.cache(combined))
    }

    /// Estimate produced by the latest call to [`estimate`](Self::estimate).
    #[must_use]
    pub fn last_etc(&self) -> Option<Duration> {
        self.last_etc_ms.map(from_millis)
    }

    #[must_use]
    pub fn phase(&self) -> EtcPhase {
        if self.last_checkpoint.is_none() {
            EtcPhase::Cold
        } else if self.delta_window.is_full() {
            EtcPhase::Steady
        } else {
            EtcPhase::Warming
        }
    }

    #[must_use]
    pub fn total(&self) -> Total {
        self.total
    }

    /// Per-unit duration samples in milliseconds.
    #[must_use]
    pub fn delta_window(&self) -> &RollingWindow<f64> {
        &self.delta_window
    }

    /// Forget all history and return to [`EtcPhase::Cold`].
    pub fn reset(&mut self) {
        self.delta_window.reset();
        self.last_checkpoint = None;
        self.last_etc_ms = None;
        self.update_counter = 0;
    }

    fn cache(&mut self, ms: f64) -> Duration {
        let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
        self.last_etc_ms = Some(ms);
        from_millis(ms)
    }
}

/// Window size for a bar: half the total, at least one and at most
/// [`DELTA_WINDOW_CAPACITY`].
#[must_use]
pub fn delta_window_capacity(total: Total) -> NonZeroUsize {
    let capacity = match total {
        Total::Bounded(n) => usize::try_from(n / 2)
            .unwrap_or(usize::MAX)
            .clamp(1, DELTA_WINDOW_CAPACITY),
        Total::Unbounded => DELTA_WINDOW_CAPACITY,
    };
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

fn as_millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn from_millis(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}
