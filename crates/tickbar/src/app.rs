//! Application entry point and scenario dispatch.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use tracing::{debug, info};

use tickbar_cli::output::format_duration;
use tickbar_cli::resize::DEFAULT_POLL_INTERVAL;
use tickbar_cli::{terminal_width, ConsolePresenter, ResizeWatcher};
use tickbar_core::{
    BarError, BarEvent, BarOptions, CancellationToken, Clock, ProgressBar, SystemClock, Total,
};

use crate::config::{AppConfig, Scenario};
use crate::report::{DemoReport, OverheadReport, RunSummary};

/// Delay of the first demo bar; the other demo delays scale with it.
const DEMO_REFERENCE_DELAY: Duration = Duration::from_millis(50);

/// Per-unit delay schedule of a simulated workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Constant(Duration),
    /// Unit `i` takes `base + i * step`.
    Increasing { base: Duration, step: Duration },
}

impl Pacing {
    #[must_use]
    pub fn delay(self, unit: u64) -> Duration {
        match self {
            Self::Constant(delay) => delay,
            Self::Increasing { base, step } => {
                let factor = u32::try_from(unit).unwrap_or(u32::MAX);
                base.saturating_add(step.saturating_mul(factor))
            }
        }
    }
}

/// A simulated job: bar options plus how long each unit takes.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub options: BarOptions,
    pub units: u64,
    pub pacing: Pacing,
}

impl Workload {
    /// Workload described by the non-demo flags.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let options = config.bar_options();
        let units = match options.total {
            Total::Bounded(n) => n,
            Total::Unbounded => config.iterations,
        };
        let pacing = match config.scenario {
            Scenario::Increasing => Pacing::Increasing {
                base: config.delay(),
                step: Duration::from_millis(1),
            },
            Scenario::Constant | Scenario::Unbounded | Scenario::Demo => {
                Pacing::Constant(config.delay())
            }
        };
        Self {
            options,
            units,
            pacing,
        }
    }

    /// Perform the same sleeps without a bar.
    pub fn simulate(
        &self,
        cancel: &CancellationToken,
        mut sleep: impl FnMut(Duration),
    ) -> Result<(), BarError> {
        for unit in 0..self.units {
            cancel.check_cancelled()?;
            sleep(self.pacing.delay(unit));
        }
        Ok(())
    }
}

/// The four preset demo bars. `delay` sets the pace of the first bar.
#[must_use]
pub fn demo_workloads(delay: Duration) -> Vec<Workload> {
    let factor = delay.as_secs_f64() / DEMO_REFERENCE_DELAY.as_secs_f64();
    let scaled = |ms: u64| {
        Duration::try_from_secs_f64(Duration::from_millis(ms).as_secs_f64() * factor)
            .unwrap_or(Duration::MAX)
    };
    vec![
        Workload {
            options: BarOptions::new(100u64).with_name("Quick constant time"),
            units: 100,
            pacing: Pacing::Constant(scaled(50)),
        },
        Workload {
            options: BarOptions::new(500u64)
                .with_name("Long constant time")
                .with_progress_char('=')
                .with_empty_space_char(' '),
            units: 500,
            pacing: Pacing::Constant(scaled(100)),
        },
        Workload {
            options: BarOptions::new(500u64)
                .with_name("Increasing time")
                .with_progress_char('-')
                .with_empty_space_char('-'),
            units: 500,
            pacing: Pacing::Increasing {
                base: scaled(1),
                step: scaled(1),
            },
        },
        Workload {
            options: BarOptions::unbounded().with_name("Without total"),
            units: 150,
            pacing: Pacing::Constant(scaled(20)),
        },
    ]
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        tickbar_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone())?;

    let mut presenter = ConsolePresenter::stdout(config.quiet || config.json);
    match config.scenario {
        Scenario::Demo => run_demo(config, &mut presenter, &cancel),
        Scenario::Constant | Scenario::Increasing | Scenario::Unbounded => {
            run_single(config, &mut presenter, &cancel)
        }
    }
}

fn run_single(
    config: &AppConfig,
    presenter: &mut ConsolePresenter,
    cancel: &CancellationToken,
) -> Result<()> {
    let work = Workload::from_config(config);
    let summary = run_workload(&work, config.width, presenter, cancel)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !config.quiet {
        tickbar_cli::ui::print_success(&format!(
            "{} units in {}",
            summary.progress,
            format_duration(Duration::from_millis(summary.elapsed_ms))
        ));
    }
    Ok(())
}

fn run_demo(
    config: &AppConfig,
    presenter: &mut ConsolePresenter,
    cancel: &CancellationToken,
) -> Result<()> {
    let workloads = demo_workloads(config.delay());
    let show = !config.quiet && !config.json;

    let started = Instant::now();
    let mut bars = Vec::with_capacity(workloads.len());
    for work in &workloads {
        bars.push(run_workload(work, config.width, presenter, cancel)?);
    }
    let with_bar = started.elapsed();

    if show {
        tickbar_cli::ui::print_header("Testing without the progress bar");
    }
    let started = Instant::now();
    for work in &workloads {
        work.simulate(cancel, thread::sleep)?;
    }
    let overhead = OverheadReport::new(with_bar, started.elapsed());
    info!(overhead_ms = overhead.overhead_ms, "demo finished");

    if config.json {
        let report = DemoReport { bars, overhead };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if show {
        presenter.println(&format!(
            "Execution time with progress bar: {:.3} ms",
            overhead.with_bar_ms
        ))?;
        presenter.println(&format!(
            "Execution time without progress bar: {:.3} ms",
            overhead.without_bar_ms
        ))?;
        presenter.println(&format!(
            "Overhead due to progress bar: {:.3} ms",
            overhead.overhead_ms
        ))?;
    }
    Ok(())
}

/// Run one workload on the system clock.
///
/// Without a width override the terminal is queried and watched for
/// resizes while the bar runs.
fn run_workload(
    work: &Workload,
    width: Option<u16>,
    presenter: &mut ConsolePresenter,
    cancel: &CancellationToken,
) -> Result<RunSummary> {
    let mut bar = ProgressBar::with_clock(
        work.options.clone(),
        SystemClock,
        width.unwrap_or_else(terminal_width),
    )?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let watcher = match width {
        None => Some(
            ResizeWatcher::spawn(tx, DEFAULT_POLL_INTERVAL, cancel.clone())
                .context("failed to start resize watcher")?,
        ),
        Some(_) => None,
    };

    let outcome = drive(&mut bar, work, presenter, &rx, cancel, thread::sleep);
    if let Some(watcher) = watcher {
        watcher.stop();
    }
    outcome?;
    Ok(RunSummary::from_bar(&bar))
}

/// Tick `bar` once per unit of `work`, applying pending events between
/// ticks and redrawing after each one.
pub fn drive<C: Clock>(
    bar: &mut ProgressBar<C>,
    work: &Workload,
    presenter: &mut ConsolePresenter,
    events: &Receiver<BarEvent>,
    cancel: &CancellationToken,
    mut sleep: impl FnMut(Duration),
) -> Result<()> {
    debug!(name = %work.options.name, units = work.units, "running workload");
    for unit in 0..work.units {
        cancel.check_cancelled()?;
        sleep(work.pacing.delay(unit));
        for event in events.try_iter() {
            bar.handle_event(event);
        }
        bar.tick();
        presenter.draw(&bar.frame())?;
    }
    presenter.finish(&bar.frame())?;
    Ok(())
}

fn ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .context("error setting Ctrl+C handler")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::exit_code;
    use clap::Parser;
    use crossbeam_channel::unbounded;
    use tickbar_core::ManualClock;

    fn config(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("tickbar").chain(args.iter().copied())).unwrap()
    }

    fn manual_bar(options: BarOptions, clock: &ManualClock) -> ProgressBar<ManualClock> {
        ProgressBar::with_clock(options, clock.clone(), 80).unwrap()
    }

    #[test]
    fn pacing_delays() {
        let constant = Pacing::Constant(Duration::from_millis(7));
        assert_eq!(constant.delay(0), Duration::from_millis(7));
        assert_eq!(constant.delay(99), Duration::from_millis(7));

        let increasing = Pacing::Increasing {
            base: Duration::from_millis(1),
            step: Duration::from_millis(1),
        };
        assert_eq!(increasing.delay(0), Duration::from_millis(1));
        assert_eq!(increasing.delay(10), Duration::from_millis(11));
    }

    #[test]
    fn workload_from_flags() {
        let work = Workload::from_config(&config(&["--total", "12", "-s", "increasing"]));
        assert_eq!(work.units, 12);
        assert!(matches!(work.pacing, Pacing::Increasing { .. }));

        let work = Workload::from_config(&config(&["--unbounded", "--iterations", "9"]));
        assert_eq!(work.units, 9);
        assert_eq!(work.options.total, Total::Unbounded);
    }

    #[test]
    fn demo_matches_preset_bars() {
        let workloads = demo_workloads(Duration::from_millis(50));
        assert_eq!(workloads.len(), 4);
        assert_eq!(workloads[0].pacing, Pacing::Constant(Duration::from_millis(50)));
        assert_eq!(workloads[1].pacing, Pacing::Constant(Duration::from_millis(100)));
        assert_eq!(workloads[2].pacing.delay(4), Duration::from_millis(5));
        assert_eq!(workloads[3].options.total, Total::Unbounded);
        assert_eq!(workloads[3].units, 150);
    }

    #[test]
    fn demo_scales_to_zero_delay() {
        for work in demo_workloads(Duration::ZERO) {
            assert_eq!(work.pacing.delay(0), Duration::ZERO);
            assert_eq!(work.pacing.delay(400), Duration::ZERO);
        }
    }

    #[test]
    fn drive_completes_bounded_workload() {
        let clock = ManualClock::new();
        let work = Workload {
            options: BarOptions::new(100u64),
            units: 100,
            pacing: Pacing::Constant(Duration::from_millis(100)),
        };
        let mut bar = manual_bar(work.options.clone(), &clock);
        let mut presenter = ConsolePresenter::stdout(true);
        let (_tx, rx) = unbounded();

        drive(&mut bar, &work, &mut presenter, &rx, &CancellationToken::new(), |d| {
            clock.advance(d);
        })
        .unwrap();

        assert!(bar.is_done());
        assert_eq!(bar.elapsed(), Duration::from_secs(10));
        assert_eq!(bar.etc(), Some(Duration::ZERO));
        assert!(bar.estimator().delta_window().is_full());
    }

    #[test]
    fn drive_applies_resize_between_ticks() {
        let clock = ManualClock::new();
        let work = Workload {
            options: BarOptions::new(3u64),
            units: 3,
            pacing: Pacing::Constant(Duration::from_millis(1)),
        };
        let mut bar = manual_bar(work.options.clone(), &clock);
        let mut presenter = ConsolePresenter::stdout(true);
        let (tx, rx) = unbounded();
        tx.send(BarEvent::Resize {
            width: 200,
            height: 40,
        })
        .unwrap();

        drive(&mut bar, &work, &mut presenter, &rx, &CancellationToken::new(), |d| {
            clock.advance(d);
        })
        .unwrap();

        assert_eq!(bar.layout().terminal_width(), 200);
        assert_eq!(bar.progress(), 3);
    }

    #[test]
    fn drive_stops_on_cancel() {
        let clock = ManualClock::new();
        let work = Workload {
            options: BarOptions::new(50u64),
            units: 50,
            pacing: Pacing::Constant(Duration::from_millis(1)),
        };
        let mut bar = manual_bar(work.options.clone(), &clock);
        let mut presenter = ConsolePresenter::stdout(true);
        let (_tx, rx) = unbounded();
        let cancel = CancellationToken::new();

        let mut calls = 0;
        let err = drive(&mut bar, &work, &mut presenter, &rx, &cancel, |_| {
            calls += 1;
            if calls == 10 {
                cancel.cancel();
            }
        })
        .unwrap_err();

        assert_eq!(exit_code(&err), 130);
        assert_eq!(bar.progress(), 10);
    }

    #[test]
    fn simulate_honors_cancel() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let work = Workload::from_config(&config(&["--total", "5"]));
        assert_eq!(work.simulate(&cancel, |_| {}), Err(BarError::Cancelled));
    }
}
