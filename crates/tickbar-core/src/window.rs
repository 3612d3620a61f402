//! Fixed-capacity rolling window with on-demand summary statistics.
//!
//! [`RollingWindow`] keeps the most recent `capacity` samples in arrival
//! order. Pushing into a full window evicts the oldest sample first.
//! Statistics are recomputed from the retained samples on every call, in
//! `f64`, so integer windows never truncate.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

use num_traits::AsPrimitive;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::BarError;

/// Upper bound on the up-front allocation for very large windows.
const PREALLOCATE_LIMIT: usize = 4096;

/// Element types that support the numeric statistics of a window.
pub trait Sample: Copy + PartialOrd + AsPrimitive<f64> + Send + Sync {}

impl<T> Sample for T where T: Copy + PartialOrd + AsPrimitive<f64> + Send + Sync {}

/// Summary statistics over the samples currently held by a window.
///
/// Every statistic is `None` when the window is empty.
pub trait RollingStats {
    /// Element type of the window.
    type Sample;

    /// Arithmetic mean.
    fn mean(&self) -> Option<f64>;

    /// Median of a sorted copy; the average of the two middle values for
    /// an even count.
    fn median(&self) -> Option<f64>;

    /// Smallest retained sample.
    fn minimum(&self) -> Option<Self::Sample>;

    /// Largest retained sample.
    fn maximum(&self) -> Option<Self::Sample>;

    /// Population variance (sum of squared deviations divided by N).
    fn variance(&self) -> Option<f64>;

    /// Square root of the population variance.
    fn standard_deviation(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}

/// Fixed-capacity FIFO buffer.
///
/// # Example
/// ```
/// use tickbar_core::window::{RollingStats, RollingWindow};
///
/// let mut window = RollingWindow::new(3).unwrap();
/// for v in [1, 2, 3, 4] {
///     window.push(v);
/// }
/// assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
/// assert_eq!(window.minimum(), Some(2));
/// assert_eq!(window.median(), Some(3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow<T> {
    capacity: usize,
    samples: VecDeque<T>,
}

impl<T> RollingWindow<T> {
    /// Create an empty window holding at most `capacity` samples.
    ///
    /// A zero capacity has no meaningful push/evict behavior and is
    /// rejected with [`BarError::ZeroCapacity`].
    pub fn new(capacity: usize) -> Result<Self, BarError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(BarError::ZeroCapacity)
    }

    /// Infallible constructor for a capacity already known to be non-zero.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: capacity.get(),
            samples: VecDeque::with_capacity(capacity.get().min(PREALLOCATE_LIMIT)),
        }
    }

    /// Append a sample, evicting the oldest one if the window is full.
    pub fn push(&mut self, value: T) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Remove and return the oldest sample.
    pub fn pop(&mut self) -> Option<T> {
        self.samples.pop_front()
    }

    /// Oldest retained sample.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.samples.front()
    }

    /// Newest retained sample.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.samples.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the next push will evict a sample.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every sample. The capacity is unchanged.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Iterate from the oldest to the newest sample.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.samples.iter()
    }
}

impl<T: Sample> RollingWindow<T> {
    /// Snapshot of all statistics, suitable for serialization.
    #[must_use]
    pub fn summary(&self) -> WindowSummary {
        WindowSummary {
            len: self.len(),
            capacity: self.capacity,
            mean: self.mean(),
            median: self.median(),
            minimum: self.minimum().map(|v| v.as_()),
            maximum: self.maximum().map(|v| v.as_()),
            variance: self.variance(),
            standard_deviation: self.standard_deviation(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn sum_by<F>(&self, f: F) -> f64
    where
        F: Fn(T) -> f64 + Send + Sync,
    {
        self.samples.iter().map(|&v| f(v)).sum()
    }

    #[cfg(feature = "parallel")]
    fn sum_by<F>(&self, f: F) -> f64
    where
        F: Fn(T) -> f64 + Send + Sync,
    {
        self.samples.par_iter().map(|&v| f(v)).sum()
    }

    /// First sample that wins every comparison against the others in the
    /// `keep` direction. Incomparable values (NaN) never replace the current
    /// pick.
    fn extremum(&self, keep: Ordering) -> Option<T> {
        let mut iter = self.samples.iter().copied();
        let first = iter.next()?;
        Some(iter.fold(first, |best, v| {
            if v.partial_cmp(&best) == Some(keep) {
                v
            } else {
                best
            }
        }))
    }
}

impl<T: Sample> RollingStats for RollingWindow<T> {
    type Sample = T;

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.sum_by(|v| v.as_()) / self.len() as f64)
    }

    fn median(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let mut sorted: Vec<f64> = self.samples.iter().map(|&v| v.as_()).collect();
        #[cfg(feature = "parallel")]
        sorted.par_sort_by(f64::total_cmp);
        #[cfg(not(feature = "parallel"))]
        sorted.sort_by(f64::total_cmp);

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Some(sorted[mid])
        }
    }

    fn minimum(&self) -> Option<T> {
        self.extremum(Ordering::Less)
    }

    fn maximum(&self) -> Option<T> {
        self.extremum(Ordering::Greater)
    }

    #[allow(clippy::cast_precision_loss)]
    fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let squared = self.sum_by(|v| {
            let d = v.as_() - mean;
            d * d
        });
        Some(squared / self.len() as f64)
    }
}

impl<T> Extend<T> for RollingWindow<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a RollingWindow<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Serializable snapshot produced by [`RollingWindow::summary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// Number of retained samples.
    pub len: usize,
    /// Maximum number of samples.
    pub capacity: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub variance: Option<f64>,
    pub standard_deviation: Option<f64>,
}
