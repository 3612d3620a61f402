//! Application configuration from CLI flags and environment.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tickbar_core::constants::{DEFAULT_EMPTY_SPACE_CHAR, DEFAULT_NAME, DEFAULT_PROGRESS_CHAR};
use tickbar_core::{parse_glyph, BarOptions, Total};

/// Workload shape driven through the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Every unit takes `--delay-ms`.
    Constant,
    /// Unit `i` takes `--delay-ms + i` milliseconds.
    Increasing,
    /// No known total; runs `--iterations` units.
    Unbounded,
    /// Four preset bars followed by an overhead comparison.
    Demo,
}

/// Console progress bar with a blended time-to-completion estimate.
#[derive(Parser, Debug)]
#[command(name = "tickbar", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Number of units to complete.
    #[arg(short, long, default_value_t = 100, env = "TICKBAR_TOTAL")]
    pub total: u64,

    /// Run without a known total.
    #[arg(short, long)]
    pub unbounded: bool,

    /// Label printed before the bar.
    #[arg(long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Glyph for completed units.
    #[arg(long, default_value_t = DEFAULT_PROGRESS_CHAR, value_parser = parse_glyph)]
    pub progress_char: char,

    /// Glyph for remaining units.
    #[arg(long, default_value_t = DEFAULT_EMPTY_SPACE_CHAR, value_parser = parse_glyph)]
    pub empty_char: char,

    /// Simulated work per unit, in milliseconds.
    #[arg(short, long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Workload shape.
    #[arg(short, long, value_enum, default_value_t = Scenario::Constant)]
    pub scenario: Scenario,

    /// Units to run in unbounded mode.
    #[arg(long, default_value_t = 150)]
    pub iterations: u64,

    /// Terminal width override (queried from the terminal by default).
    #[arg(long)]
    pub width: Option<u16>,

    /// Quiet mode (no bar, no status lines).
    #[arg(short, long)]
    pub quiet: bool,

    /// Print a JSON run summary instead of drawing the bar.
    #[arg(long)]
    pub json: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Total requested by the flags.
    #[must_use]
    pub fn bar_total(&self) -> Total {
        if self.unbounded || self.scenario == Scenario::Unbounded {
            Total::Unbounded
        } else {
            Total::from(self.total)
        }
    }

    /// Bar options for the non-demo scenarios.
    #[must_use]
    pub fn bar_options(&self) -> BarOptions {
        BarOptions::new(self.bar_total())
            .with_name(self.name.clone())
            .with_progress_char(self.progress_char)
            .with_empty_space_char(self.empty_char)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("tickbar").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.name, "Progress");
        assert_eq!(config.progress_char, '#');
        assert_eq!(config.empty_char, '-');
        assert_eq!(config.delay(), Duration::from_millis(50));
        assert_eq!(config.scenario, Scenario::Constant);
        assert_eq!(config.iterations, 150);
        assert!(!config.quiet && !config.json);
    }

    #[test]
    fn unbounded_flag_and_scenario() {
        assert_eq!(parse(&["--unbounded"]).bar_total(), Total::Unbounded);
        assert_eq!(
            parse(&["--scenario", "unbounded"]).bar_total(),
            Total::Unbounded
        );
        assert_eq!(parse(&["--total", "7"]).bar_total(), Total::Bounded(7));
    }

    #[test]
    fn glyph_flags() {
        let config = parse(&["--progress-char", "=", "--empty-char", " "]);
        let opts = config.bar_options();
        assert_eq!(opts.progress_char, '=');
        assert_eq!(opts.empty_space_char, ' ');
    }

    #[test]
    fn multi_char_glyph_rejected() {
        let result = AppConfig::try_parse_from(["tickbar", "--progress-char", "##"]);
        assert!(result.is_err());
    }

    #[test]
    fn scenario_names() {
        assert_eq!(parse(&["-s", "increasing"]).scenario, Scenario::Increasing);
        assert_eq!(parse(&["-s", "demo"]).scenario, Scenario::Demo);
    }
}
