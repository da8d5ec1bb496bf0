//! Terminal emitter.
//!
//! Renders `error[E2001]: message`, then for each label a `--> file:line:col`
//! locator, the source line, and a caret underline.

use super::DiagnosticEmitter;
use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label};
use std::io::Write;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BOLD_BLUE: &str = "\x1b[1;34m";
const BOLD_RED: &str = "\x1b[1;31m";
const BOLD_GREEN: &str = "\x1b[1;32m";

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: &'src str,
    file_name: &'src str,
    lines: LineOffsetTable,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// Create an emitter that resolves spans against `source`.
    pub fn new(writer: W, colors: bool, source: &'src str, file_name: &'src str) -> Self {
        TerminalEmitter {
            writer,
            colors,
            source,
            file_name,
            lines: LineOffsetTable::build(source),
        }
    }

    /// Recover the writer, e.g. to read back a `Vec<u8>` buffer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&mut self, style: &str, text: &str) {
        if self.colors {
            let _ = write!(self.writer, "{style}{text}{RESET}");
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_label(&mut self, label: &Label) {
        let (line, col) = self.lines.offset_to_line_col(self.source, label.span.start);
        self.paint(BOLD_BLUE, "  --> ");
        let _ = writeln!(self.writer, "{}:{line}:{col}", self.file_name);

        let Some(text) = self.lines.line_text(self.source, line) else {
            return;
        };
        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());
        self.paint(BOLD_BLUE, &format!("{gutter} | "));
        let _ = writeln!(self.writer, "{text}");

        // Underline at least one column, clipped to the end of the line.
        let line_chars = text.chars().count();
        let start_col = (col as usize).saturating_sub(1).min(line_chars);
        let span_chars = self
            .source
            .get(label.span.to_range())
            .map_or(0, |s| s.chars().take_while(|&c| c != '\n').count());
        let width = span_chars.clamp(1, line_chars.saturating_sub(start_col).max(1));

        self.paint(BOLD_BLUE, &format!("{pad} | "));
        let underline = format!("{}{}", " ".repeat(start_col), "^".repeat(width));
        self.paint(BOLD_RED, &underline);
        if !label.message.is_empty() {
            let _ = write!(self.writer, " ");
            self.paint(BOLD_RED, &label.message);
        }
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.paint(BOLD_RED, &format!("error[{}]", diagnostic.code));
        self.paint(BOLD, &format!(": {}", diagnostic.message));
        let _ = writeln!(self.writer);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.paint(BOLD, "note");
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.paint(BOLD_GREEN, "help");
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.paint(BOLD_RED, "error");
        if error_count == 1 {
            let _ = writeln!(self.writer, ": aborting due to previous error");
        } else {
            let _ = writeln!(self.writer, ": aborting due to {error_count} previous errors");
        }
    }
}
