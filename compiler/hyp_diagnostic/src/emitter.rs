//! Diagnostic emitters.
//!
//! Only human-readable terminal output is provided; the trait leaves room for
//! machine-readable formats.

mod terminal;

pub use terminal::TerminalEmitter;

use crate::Diagnostic;
use std::io::IsTerminal;

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit the closing "aborting due to" line; nothing when `error_count` is 0.
    fn emit_summary(&mut self, error_count: usize);
}

/// Whether stderr is a terminal that should receive ANSI colors.
pub fn stderr_supports_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
