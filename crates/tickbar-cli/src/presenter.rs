//! Two-line console presenter for progress bar frames.

use std::io;

use console::Term;
use tickbar_core::BarFrame;

use crate::output::{render_bar_line, render_time_line};

const FRAME_LINES: usize = 2;

/// Redraws a bar in place on a terminal.
///
/// When the target is not a terminal, intermediate frames are skipped and
/// only the final frame is written, so piped output stays readable.
pub struct ConsolePresenter {
    term: Term,
    interactive: bool,
    quiet: bool,
    drawn: bool,
}

impl ConsolePresenter {
    #[must_use]
    pub fn new(term: Term, quiet: bool) -> Self {
        let interactive = term.is_term();
        Self {
            term,
            interactive,
            quiet,
            drawn: false,
        }
    }

    /// Presenter on stdout.
    #[must_use]
    pub fn stdout(quiet: bool) -> Self {
        Self::new(Term::stdout(), quiet)
    }

    /// Redraw the frame, replacing the previous one.
    pub fn draw(&mut self, frame: &BarFrame<'_>) -> io::Result<()> {
        if self.quiet || !self.interactive {
            return Ok(());
        }
        self.write_frame(frame)
    }

    /// Write the final frame and leave it on screen.
    pub fn finish(&mut self, frame: &BarFrame<'_>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_frame(frame)?;
        self.drawn = false;
        self.term.flush()
    }

    /// Print an unrelated line below the bar area.
    pub fn println(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(text)
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn write_frame(&mut self, frame: &BarFrame<'_>) -> io::Result<()> {
        if self.drawn && self.interactive {
            self.term.clear_last_lines(FRAME_LINES)?;
        }
        self.term.write_line(&render_bar_line(frame))?;
        self.term.write_line(&render_time_line(frame))?;
        self.drawn = true;
        Ok(())
    }
}
