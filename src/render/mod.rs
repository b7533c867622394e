//! Terminal rendering of attempt reports: accuracy metric plus the
//! transcript with match spans in green and mismatch spans in red.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::scoring::{AlignmentSpan, SpanTag};
use crate::session::AttemptReport;
use crate::texts::UiText;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Write the full result block: header, accuracy, and the tagged diff. The
/// standard sentence is printed unmodified; only the transcript is colored.
pub fn render_report<W: Write>(
    out: &mut W,
    report: &AttemptReport,
    texts: &UiText,
    options: RenderOptions,
) -> io::Result<()> {
    writeln!(out, "{}", texts.result_header)?;
    writeln!(out, "{}: {:.1} %", texts.accuracy, report.score.accuracy)?;
    writeln!(out)?;
    writeln!(out, "{}", texts.compare_header)?;
    writeln!(out, "{}: {}", texts.compare_standard, report.standard)?;
    write!(out, "{}: ", texts.compare_predicted)?;
    if report.transcript.is_empty() {
        writeln!(out, "{}", texts.empty_transcript)?;
    } else {
        render_spans(out, &report.spans, options)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Write the tagged spans in order; concatenated output is exactly the
/// transcript text.
pub fn render_spans<W: Write>(
    out: &mut W,
    spans: &[AlignmentSpan],
    options: RenderOptions,
) -> io::Result<()> {
    for span in spans {
        if !options.color {
            write!(out, "{}", span.text)?;
            continue;
        }
        match span.tag {
            SpanTag::Match => queue!(
                out,
                SetForegroundColor(Color::Green),
                Print(&span.text),
                ResetColor
            )?,
            SpanTag::Mismatch => queue!(
                out,
                SetForegroundColor(Color::Red),
                SetAttribute(Attribute::Underlined),
                Print(&span.text),
                SetAttribute(Attribute::NoUnderline),
                ResetColor
            )?,
        }
    }
    Ok(())
}
