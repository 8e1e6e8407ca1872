//! Execution log printing: one line per step, plus the end-of-run summary

use std::io::{self, Write};

use chrono::Local;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::playback::{PlaybackObserver, RunMetrics, StepEvent};
use crate::traversal::StepKind;

/// Playback observer that writes a colored log line per step and a metrics
/// summary once the run finishes.
pub struct LogPrinter {
    use_color: bool,
    /// Also print the simulated stack after each step.
    show_stack: bool,
}

impl LogPrinter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            show_stack: false,
        }
    }

    pub fn with_stack(mut self) -> Self {
        self.show_stack = true;
        self
    }

    fn stdout(&self) -> StandardStream {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        StandardStream::stdout(choice)
    }

    fn write_step(&self, event: &StepEvent) -> io::Result<()> {
        let mut stdout = self.stdout();

        let mut dim = ColorSpec::new();
        dim.set_fg(Some(Color::Ansi256(244)));
        stdout.set_color(&dim)?;
        write!(stdout, "[{}] ", Local::now().format("%H:%M:%S"))?;
        write!(
            stdout,
            "{:>4}/{} ",
            event.cursor + 1,
            event.total_steps
        )?;
        stdout.reset()?;

        let mut kind_spec = ColorSpec::new();
        kind_spec.set_fg(Some(kind_color(event.step.kind)));
        stdout.set_color(&kind_spec)?;
        write!(stdout, "{:<8}", event.step.kind.label())?;
        stdout.reset()?;

        write!(stdout, " {}", event.step.action)?;

        stdout.set_color(&dim)?;
        writeln!(
            stdout,
            "  (depth {}, stack {})",
            event.step.depth, event.step.stack_size
        )?;
        stdout.reset()?;

        if self.show_stack {
            stdout.set_color(&dim)?;
            if event.stack.is_empty() {
                writeln!(stdout, "           stack: (empty)")?;
            } else {
                writeln!(stdout, "           stack: [{}]", event.stack.join(" | "))?;
            }
            stdout.reset()?;
        }

        Ok(())
    }

    fn write_summary(&self, metrics: &RunMetrics) -> io::Result<()> {
        let mut stdout = self.stdout();
        let plan = metrics.plan();

        let mut bold = ColorSpec::new();
        bold.set_bold(true);
        writeln!(stdout)?;
        stdout.set_color(&bold)?;
        writeln!(stdout, "Traversal complete")?;
        stdout.reset()?;
        writeln!(stdout, "──────────────────")?;
        writeln!(
            stdout,
            "Elapsed:        {:.2}ms",
            metrics.elapsed().as_secs_f64() * 1000.0
        )?;
        writeln!(stdout, "Total steps:    {}", plan.total_steps)?;
        writeln!(stdout, "Max depth:      {}", plan.max_depth)?;
        writeln!(stdout, "Max stack size: {} calls", plan.max_stack_size)?;
        Ok(())
    }
}

impl PlaybackObserver for LogPrinter {
    fn on_step(&mut self, event: &StepEvent) {
        if let Err(err) = self.write_step(event) {
            log::warn!("failed to write log line: {err}");
        }
    }

    fn on_finished(&mut self, metrics: &RunMetrics) {
        if let Err(err) = self.write_summary(metrics) {
            log::warn!("failed to write summary: {err}");
        }
    }
}

fn kind_color(kind: StepKind) -> Color {
    match kind {
        StepKind::Visit => Color::Green,
        StepKind::Recurse => Color::Cyan,
        StepKind::Return => Color::Magenta,
        StepKind::Complete => Color::Blue,
        StepKind::Push => Color::Yellow,
    }
}
