//! Handles all user-facing output for the CLI.
//!
//! The [`Sensei`] turns a [`RunResult`] into the report the learner reads
//! after every run: the koans that passed, the one that did not and why,
//! where to look, and how far along the path they are.

use std::fs;
use std::io;

use difference::{Changeset, Difference};
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use termcolor::{Color, ColorSpec, WriteColor};
use thiserror::Error;

use crate::discovery::Discovery;
use crate::engine::{Obstacle, RunResult, StopPoint};
use crate::koan::SourceLocation;

const PROGRESS_WIDTH: usize = 50;

const KOAN_LINES: &[&str] = &[
    "Before enlightenment, chop wood. After enlightenment, borrow wood.",
    "The compiler is not your enemy. It is your first reader.",
    "A value has one owner. A lesson has one order.",
    "Cloning the bowl does not empty it.",
    "A lifetime ends where the last use ends.",
    "What is moved cannot be used again.",
    "Unsafe is a promise, not a shortcut.",
    "An Option is a question the code must answer.",
    "Match every case, and no case will surprise you.",
    "The set holds each stone once, in no particular order.",
    "A trait says what can be done, never how it was done.",
    "Errors are values. Carry them with care.",
];

/// Renders run reports.
#[derive(Debug, Clone)]
pub struct Sensei {
    show_source: bool,
}

impl Sensei {
    pub fn new(show_source: bool) -> Self {
        Self { show_source }
    }

    /// Writes the full report for `result`.
    pub fn report<W: WriteColor>(&self, result: &RunResult, out: &mut W) -> io::Result<()> {
        for record in result.records.iter().filter(|r| r.outcome.is_passed()) {
            paint(out, Color::Green, false)?;
            writeln!(
                out,
                "{}::{} has expanded your awareness.",
                record.lesson, record.case
            )?;
        }
        out.reset()?;

        match &result.stop {
            None => self.enlightenment(result, out),
            Some(stop) => self.meditation(result, stop, out),
        }
    }

    /// Writes the list of discovered lessons.
    pub fn list<W: WriteColor>(&self, discovery: &Discovery, out: &mut W) -> io::Result<()> {
        for lesson in &discovery.lessons {
            writeln!(
                out,
                "{:>3}. {} ({} koans)",
                lesson.rank(),
                lesson.name(),
                lesson.len()
            )?;
        }
        if let Some(obstacle) = &discovery.obstacle {
            paint(out, Color::Red, true)?;
            writeln!(out, "  !  {obstacle}")?;
            out.reset()?;
        }
        writeln!(
            out,
            "{} koans across {} lessons",
            discovery.case_count(),
            discovery.lessons.len()
        )
    }

    fn meditation<W: WriteColor>(
        &self,
        result: &RunResult,
        stop: &StopPoint,
        out: &mut W,
    ) -> io::Result<()> {
        paint(out, Color::Red, true)?;
        match &stop.case {
            Some(case) => writeln!(out, "{}::{} has damaged your karma.", stop.lesson, case)?,
            None => writeln!(out, "{} could not be brought onto the path.", stop.lesson)?,
        }
        out.reset()?;

        writeln!(out)?;
        writeln!(out, "You have not yet reached enlightenment ...")?;
        self.obstacle_detail(&stop.obstacle, out)?;

        if let Some(location) = stop.obstacle.location() {
            writeln!(out)?;
            writeln!(out, "Please meditate on the following code:")?;
            paint(out, Color::Yellow, false)?;
            writeln!(out, "  {location}")?;
            out.reset()?;
            if self.show_source {
                if let Some(snippet) = source_snippet(location, &stop.obstacle) {
                    writeln!(out, "{snippet}")?;
                }
            }
        }

        writeln!(out)?;
        self.progress(result, out)?;
        writeln!(out)?;
        paint(out, Color::Cyan, false)?;
        writeln!(out, "{}", koan_line(result.passed_count))?;
        out.reset()
    }

    fn obstacle_detail<W: WriteColor>(&self, obstacle: &Obstacle, out: &mut W) -> io::Result<()> {
        match obstacle {
            Obstacle::Assertion(failure) => {
                writeln!(out, "  {}", failure.message)?;
                if let (Some(expected), Some(actual)) = (&failure.expected, &failure.actual) {
                    if expected.contains('\n') || actual.contains('\n') {
                        writeln!(out)?;
                        print_diff(out, expected, actual)?;
                    }
                }
                Ok(())
            }
            Obstacle::Execution(error) => {
                writeln!(out, "  The koan raised an unexpected error:")?;
                writeln!(out, "  {}", error.message)
            }
            Obstacle::Load(error) => {
                writeln!(out, "  {error}")?;
                if let Some(help) = error.help() {
                    writeln!(out, "  help: {help}")?;
                }
                Ok(())
            }
        }
    }

    fn enlightenment<W: WriteColor>(&self, result: &RunResult, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        paint(out, Color::Green, true)?;
        writeln!(out, "          .")?;
        writeln!(out, "         ( )")?;
        writeln!(out, "        (   )      Mountains are again merely mountains.")?;
        writeln!(out, "      (       )")?;
        writeln!(out, "  ~~~~~~~~~~~~~~~~~~~~")?;
        out.reset()?;
        writeln!(out)?;
        writeln!(
            out,
            "You have reached enlightenment: {} koans across {} lessons.",
            result.passed_count, result.lessons_completed
        )?;
        self.progress(result, out)
    }

    fn progress<W: WriteColor>(&self, result: &RunResult, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", progress_line(result))?;
        writeln!(
            out,
            "You have completed {} of {} lessons.",
            result.lessons_completed, result.lessons_total
        )
    }
}

/// `your path thus far [XXXX>_____] 3/6 (50%)`
pub fn progress_line(result: &RunResult) -> String {
    let filled = (result.progress() * PROGRESS_WIDTH as f64).floor() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    let mut bar = "X".repeat(filled);
    if filled < PROGRESS_WIDTH {
        bar.push('>');
        bar.push_str(&"_".repeat(PROGRESS_WIDTH - filled - 1));
    }
    format!(
        "your path thus far [{bar}] {}/{} ({}%)",
        result.passed_count,
        result.total_count,
        percent(result)
    )
}

/// Whole percent walked, rounded down so a halted run never reads 100%.
fn percent(result: &RunResult) -> usize {
    if result.total_count == 0 {
        return if result.is_complete() { 100 } else { 0 };
    }
    result.passed_count * 100 / result.total_count
}

/// Picks a koan line from the number of koans passed.
pub fn koan_line(passed: usize) -> &'static str {
    KOAN_LINES[passed % KOAN_LINES.len()]
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn paint<W: WriteColor>(out: &mut W, color: Color, bold: bool) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))
}

fn print_diff<W: WriteColor>(out: &mut W, expected: &str, actual: &str) -> io::Result<()> {
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                out.reset()?;
                for line in x.lines() {
                    writeln!(out, "    {line}")?;
                }
            }
            Difference::Rem(x) => {
                paint(out, Color::Green, false)?;
                for line in x.lines() {
                    writeln!(out, "  - {line}")?;
                }
            }
            Difference::Add(x) => {
                paint(out, Color::Red, false)?;
                for line in x.lines() {
                    writeln!(out, "  + {line}")?;
                }
            }
        }
    }
    out.reset()
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
struct Meditation {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
}

/// Renders the lines around `location`, or `None` if the file is unreadable.
fn source_snippet(location: &SourceLocation, obstacle: &Obstacle) -> Option<String> {
    let source = fs::read_to_string(&location.file).ok()?;
    let offset = byte_offset(&source, location.line, location.column)?;
    let message = match obstacle {
        Obstacle::Assertion(failure) => failure.message.clone(),
        Obstacle::Execution(error) => error.message.clone(),
        Obstacle::Load(error) => error.to_string(),
    };
    let meditation = Meditation {
        message,
        src: NamedSource::new(location.file.clone(), source),
        span: SourceSpan::new(offset.into(), 1),
    };

    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .with_context_lines(2);
    let mut rendered = String::new();
    handler.render_report(&mut rendered, &meditation).ok()?;
    Some(rendered)
}

/// Converts a 1-based line and character column into a byte offset.
fn byte_offset(source: &str, line: u32, column: u32) -> Option<usize> {
    let line_index = usize::try_from(line).ok()?.checked_sub(1)?;
    let mut start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index == line_index {
            let column = usize::try_from(column).ok()?.saturating_sub(1);
            let within = text
                .char_indices()
                .nth(column)
                .map(|(offset, _)| offset)
                .unwrap_or(0);
            return Some(start + within);
        }
        start += text.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offsets_follow_lines_and_columns() {
        let source = "first\n  second\nthird";
        assert_eq!(byte_offset(source, 1, 1), Some(0));
        assert_eq!(byte_offset(source, 2, 3), Some(8));
        assert_eq!(byte_offset(source, 3, 1), Some(15));
        assert_eq!(byte_offset(source, 4, 1), None);
        assert_eq!(byte_offset(source, 0, 1), None);
    }

    #[test]
    fn koan_lines_cycle() {
        assert_eq!(koan_line(0), koan_line(KOAN_LINES.len()));
    }

    #[test]
    fn progress_bar_fills_with_progress() {
        let half = RunResult {
            total_count: 6,
            passed_count: 3,
            ..RunResult::default()
        };
        let line = progress_line(&half);
        assert!(line.ends_with("3/6 (50%)"), "{line}");
        assert!(line.contains(&format!("[{}>", "X".repeat(25))), "{line}");

        let almost = RunResult {
            total_count: 1000,
            passed_count: 999,
            ..RunResult::default()
        };
        let line = progress_line(&almost);
        assert!(line.ends_with("999/1000 (99%)"), "{line}");

        let uneven = RunResult {
            total_count: 100,
            passed_count: 29,
            ..RunResult::default()
        };
        assert!(progress_line(&uneven).ends_with("29/100 (29%)"));
    }
}
