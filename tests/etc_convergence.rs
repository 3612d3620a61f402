//! Integration tests driving full progress bars on a manual clock.

use std::time::Duration;

use tickbar_cli::output::{render_bar_line, render_time_line};
use tickbar_core::{
    BarEvent, BarOptions, EtcPhase, ManualClock, ProgressBar, SharedProgressBar, Total,
};

fn bar(options: BarOptions, width: u16) -> (ProgressBar<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let bar = ProgressBar::with_clock(options, clock.clone(), width).unwrap();
    (bar, clock)
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[test]
#[allow(clippy::cast_precision_loss)]
fn constant_rate_converges_to_remaining_time() {
    let (mut bar, clock) = bar(BarOptions::new(100u64), 80);
    assert_eq!(bar.compute_etc(), None);

    for k in 1..=100u64 {
        clock.advance(Duration::from_millis(100));
        bar.tick();
        let etc = ms(bar.etc().unwrap());
        let exact = 100.0 * (100 - k) as f64;
        assert!(
            (etc - exact).abs() <= 100.0 * 5.0 + 1e-3,
            "k={k} etc={etc} exact={exact}"
        );
        if k > 60 {
            assert_eq!(bar.estimator().phase(), EtcPhase::Steady);
        }
    }
    assert!(bar.is_done());
    assert_eq!(bar.etc(), Some(Duration::ZERO));
}

#[test]
#[allow(clippy::cast_precision_loss)]
fn blended_estimate_reacts_to_slowdown() {
    // Unit i takes 1 + i ms, so the overall extrapolation lags behind.
    let (mut bar, clock) = bar(BarOptions::new(500u64), 80);
    for i in 0..500u64 {
        clock.advance(Duration::from_millis(1 + i));
        bar.tick();
        let k = bar.progress();
        if (100..=400).contains(&k) {
            let elapsed = ms(bar.elapsed());
            let overall = elapsed * (500 - k) as f64 / k as f64;
            let exact: u64 = (k..500).map(|j| 1 + j).sum();
            let etc = ms(bar.etc().unwrap());
            assert!(etc > overall, "k={k} etc={etc} overall={overall}");
            assert!(etc < exact as f64, "k={k} etc={etc} exact={exact}");
        }
    }
}

#[test]
fn unbounded_bar_cycles_without_estimate() {
    let (mut bar, clock) = bar(BarOptions::unbounded().with_name("Scan"), 80);
    let length = bar.layout().bar_length();
    for _ in 0..=150 {
        clock.advance(Duration::from_millis(20));
        bar.tick();
        assert!(!bar.is_done());
        assert_eq!(bar.etc(), None);
    }

    let frame = bar.frame();
    let line = render_bar_line(&frame);
    assert!(line.starts_with("Scan: ["));
    assert_eq!(line.matches('#').count(), 1);
    let marker = line.find('#').unwrap() - "Scan: [".len();
    assert_eq!(marker, 151 % length);
    assert_eq!(render_time_line(&frame), "Elapsed: 03:020");
}

#[test]
fn rendering_follows_resize_events() {
    let (mut bar, _clock) = bar(BarOptions::new(10u64).with_name("Job"), 80);
    for _ in 0..5 {
        bar.tick();
    }
    let narrow = render_bar_line(&bar.frame());
    assert_eq!(narrow.trim_end(), "Job:  50% [#######-------]");
    assert_eq!(
        narrow.len() - narrow.trim_end().len(),
        bar.layout().spaces_after_bar()
    );

    bar.handle_event(BarEvent::Resize {
        width: 240,
        height: 50,
    });
    let wide = render_bar_line(&bar.frame());
    assert!(wide.len() > narrow.len());
    assert_eq!(bar.progress(), 5);

    bar.handle_event(BarEvent::Resize {
        width: 20,
        height: 50,
    });
    assert!(bar.frame().compact);
    assert!(render_bar_line(&bar.frame()).starts_with(" 50% ["));
}

#[test]
fn shared_bar_counts_every_tick_once() {
    let clock = ManualClock::new();
    let bar = ProgressBar::with_clock(BarOptions::new(1_000u64), clock.clone(), 80).unwrap();
    let shared = SharedProgressBar::new(bar);

    std::thread::scope(|s| {
        for _ in 0..8 {
            let handle = shared.clone();
            let clock = clock.clone();
            s.spawn(move || {
                for _ in 0..125 {
                    clock.advance(Duration::from_micros(10));
                    handle.tick();
                }
            });
        }
    });

    let bar = shared.into_inner().unwrap();
    assert!(bar.is_done());
    assert_eq!(bar.progress(), 1_000);
    assert_eq!(bar.total(), Total::Bounded(1_000));
    assert_eq!(bar.etc(), Some(Duration::ZERO));
}
