//! Runtime errors as diagnostics, and rendering for the terminal.

use hyp_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use hyp_diagnostic::{Diagnostic, ErrorCode};
use hyp_eval::{EvalError, EvalErrorKind};

use crate::config::MAX_CALL_DEPTH_VAR;

/// Map an [`EvalError`] to its `E2xxx` diagnostic.
pub fn eval_error_to_diagnostic(error: &EvalError) -> Diagnostic {
    let code = match &error.kind {
        EvalErrorKind::DivisionByZero => ErrorCode::E2001,
        EvalErrorKind::InvalidBinaryOp { .. } | EvalErrorKind::InvalidUnaryOp { .. } => {
            ErrorCode::E2002
        }
        EvalErrorKind::NotCallable { .. } => ErrorCode::E2003,
        EvalErrorKind::ArityMismatch { .. } => ErrorCode::E2004,
        EvalErrorKind::TypeMismatch { .. } | EvalErrorKind::NotIterable { .. } => ErrorCode::E2005,
        EvalErrorKind::AssignToConstant { .. } => ErrorCode::E2006,
        EvalErrorKind::StackOverflow { .. } => ErrorCode::E2007,
        EvalErrorKind::PropertyAccess { .. }
        | EvalErrorKind::PropertyAssign { .. }
        | EvalErrorKind::InvalidIndex { .. }
        | EvalErrorKind::IndexOutOfBounds { .. }
        | EvalErrorKind::NotIndexable { .. }
        | EvalErrorKind::InvalidKey { .. } => ErrorCode::E2008,
    };

    let mut diagnostic = Diagnostic::error(code).with_message(error.message.clone());
    if let Some(span) = error.span {
        diagnostic = diagnostic.with_label(span, "");
    }

    match &error.kind {
        EvalErrorKind::AssignToConstant { name } => diagnostic
            .with_note(format!("'{name}' is bound with `const` or is a built-in"))
            .with_suggestion(format!("declare it with `let {name}` to allow reassignment")),
        EvalErrorKind::StackOverflow { .. } => diagnostic
            .with_note("recursion may be missing a base case")
            .with_suggestion(format!("raise the limit with {MAX_CALL_DEPTH_VAR}")),
        EvalErrorKind::IndexOutOfBounds { len, .. } => {
            diagnostic.with_note(format!("assignment may replace indices below {len} or append at {len}"))
        }
        _ => diagnostic,
    }
}

/// Render diagnostics followed by the "aborting" summary.
pub fn render_diagnostics(
    source: &str,
    file: &str,
    diagnostics: &[Diagnostic],
    colors: bool,
) -> String {
    let mut emitter = TerminalEmitter::new(Vec::new(), colors, source, file);
    emitter.emit_all(diagnostics);
    emitter.emit_summary(diagnostics.len());
    emitter.flush();
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}
