//! Plain-text rendering of bar frames and durations.

use std::fmt::Write as _;
use std::time::Duration;

use tickbar_core::{BarFill, BarFrame};

const SECONDS_PER_DAY: u64 = 86_400;

/// Format a duration as a compact clock: `[D:][HH:][MM:]SS[:mmm]`.
///
/// Leading units are omitted while zero; milliseconds only appear when
/// non-zero.
#[must_use]
pub fn format_clock(d: Duration) -> String {
    let total_secs = d.as_secs();
    let days = total_secs / SECONDS_PER_DAY;
    let hours = (total_secs % SECONDS_PER_DAY) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = d.subsec_millis();

    let mut out = String::with_capacity(16);
    if days > 0 {
        let _ = write!(out, "{days}:");
    }
    if days > 0 || hours > 0 {
        let _ = write!(out, "{hours:02}:");
    }
    if days > 0 || hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes:02}:");
    }
    let _ = write!(out, "{seconds:02}");
    if millis > 0 {
        let _ = write!(out, ":{millis:03}");
    }
    out
}

/// Format a duration for summaries.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// The glyphs between the brackets.
#[must_use]
pub fn render_bar(frame: &BarFrame<'_>) -> String {
    let mut bar = String::with_capacity(frame.fill.len());
    match frame.fill {
        BarFill::Proportional { filled, empty } => {
            bar.extend(std::iter::repeat(frame.progress_char).take(filled));
            bar.extend(std::iter::repeat(frame.empty_space_char).take(empty));
        }
        BarFill::Cycling { marker, length } => {
            bar.extend((0..length).map(|i| {
                if i == marker {
                    frame.progress_char
                } else {
                    frame.empty_space_char
                }
            }));
        }
    }
    bar
}

/// First line: label, percentage and bar.
#[must_use]
pub fn render_bar_line(frame: &BarFrame<'_>) -> String {
    let mut line = String::new();
    if !frame.compact {
        let _ = write!(line, "{}: ", frame.name);
    }
    if let Some(percent) = frame.percent {
        let _ = write!(line, "{percent:>3}% ");
    }
    let _ = write!(line, "[{}]", render_bar(frame));
    // Blank out what a wider previous frame left behind.
    line.push_str(&" ".repeat(frame.spaces_after_bar));
    line
}

/// Second line: elapsed time, plus the ETC for bounded bars.
#[must_use]
pub fn render_time_line(frame: &BarFrame<'_>) -> String {
    let mut line = format!("Elapsed: {}", format_clock(frame.elapsed));
    if frame.percent.is_some() {
        match frame.etc {
            Some(etc) => {
                let _ = write!(line, " ETC: {}", format_clock(etc));
            }
            None => line.push_str(" ETC: N/A"),
        }
    }
    line
}
