//! Serializable run summaries for `--json` output.

use std::time::Duration;

use serde::Serialize;
use tickbar_core::{Clock, ProgressBar, Total, WindowSummary};

/// Outcome of one bar run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub name: String,
    pub total: Total,
    pub progress: u64,
    pub done: bool,
    pub elapsed_ms: u64,
    /// Last estimate shown; absent when none was available.
    pub etc_ms: Option<u64>,
    pub delta_window: WindowSummary,
}

impl RunSummary {
    #[must_use]
    pub fn from_bar<C: Clock>(bar: &ProgressBar<C>) -> Self {
        Self {
            name: bar.options().name.clone(),
            total: bar.total(),
            progress: bar.progress(),
            done: bar.is_done(),
            elapsed_ms: millis(bar.elapsed()),
            etc_ms: bar.etc().map(millis),
            delta_window: bar.estimator().delta_window().summary(),
        }
    }
}

/// Wall time of the demo with and without bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverheadReport {
    pub with_bar_ms: f64,
    pub without_bar_ms: f64,
    pub overhead_ms: f64,
}

impl OverheadReport {
    #[must_use]
    pub fn new(with_bar: Duration, without_bar: Duration) -> Self {
        let with_bar_ms = with_bar.as_secs_f64() * 1000.0;
        let without_bar_ms = without_bar.as_secs_f64() * 1000.0;
        Self {
            with_bar_ms,
            without_bar_ms,
            overhead_ms: with_bar_ms - without_bar_ms,
        }
    }
}

/// Output of the demo scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoReport {
    pub bars: Vec<RunSummary>,
    pub overhead: OverheadReport,
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickbar_core::{BarOptions, ManualClock};

    #[test]
    fn summary_of_finished_bar() {
        let clock = ManualClock::new();
        let mut bar =
            ProgressBar::with_clock(BarOptions::new(4u64).with_name("job"), clock.clone(), 80)
                .unwrap();
        for _ in 0..4 {
            clock.advance(Duration::from_millis(25));
            bar.tick();
        }
        let summary = RunSummary::from_bar(&bar);
        assert_eq!(summary.name, "job");
        assert_eq!(summary.total, Total::Bounded(4));
        assert_eq!(summary.progress, 4);
        assert!(summary.done);
        assert_eq!(summary.elapsed_ms, 100);
        assert_eq!(summary.etc_ms, Some(0));
        assert_eq!(summary.delta_window.capacity, 2);
    }

    #[test]
    fn summary_json_shape() {
        let bar = ProgressBar::with_clock(BarOptions::unbounded(), ManualClock::new(), 80).unwrap();
        let json = serde_json::to_value(RunSummary::from_bar(&bar)).unwrap();
        assert_eq!(json["total"], "unbounded");
        assert!(json["etc_ms"].is_null());
        assert_eq!(json["delta_window"]["len"], 0);
    }

    #[test]
    fn overhead_is_difference() {
        let report = OverheadReport::new(Duration::from_millis(1200), Duration::from_millis(1000));
        assert!((report.overhead_ms - 200.0).abs() < 1e-9);
    }
}
