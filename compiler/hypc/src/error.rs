//! The outcome of a failed execution.

use hyp_diagnostic::span_utils::LineOffsetTable;
use hyp_diagnostic::Diagnostic;
use hyp_eval::EvalError;
use hyp_parse::ParseError;
use thiserror::Error;

use crate::diagnostics::eval_error_to_diagnostic;

/// Why [`execute`](crate::execute) failed.
///
/// Parsing reports every diagnostic it collected; evaluation stops at the
/// first runtime error.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{file}: {}", parse_summary(.diagnostics))]
    Parse {
        diagnostics: Vec<ParseError>,
        file: String,
    },

    #[error("{file}:{line}{}: {message}", column_suffix(.column))]
    Runtime {
        message: String,
        line: u32,
        column: Option<u32>,
        file: String,
        #[source]
        source: EvalError,
    },
}

impl ExecError {
    /// Locate a runtime error in `source`.
    pub(crate) fn runtime(error: EvalError, source: &str, file: &str) -> Self {
        let (line, column) = match error.span {
            Some(span) => {
                let (line, column) =
                    LineOffsetTable::build(source).offset_to_line_col(source, span.start);
                (line, Some(column))
            }
            None => (1, None),
        };
        ExecError::Runtime {
            message: error.message.clone(),
            line,
            column,
            file: file.to_owned(),
            source: error,
        }
    }

    /// Message of the first error.
    pub fn message(&self) -> &str {
        match self {
            ExecError::Parse { diagnostics, .. } => {
                diagnostics.first().map_or("", |first| first.message.as_str())
            }
            ExecError::Runtime { message, .. } => message,
        }
    }

    /// 1-based line of the first error.
    pub fn line(&self) -> u32 {
        match self {
            ExecError::Parse { diagnostics, .. } => diagnostics.first().map_or(1, |first| first.line),
            ExecError::Runtime { line, .. } => *line,
        }
    }

    /// 1-based column of the first error, when known.
    pub fn column(&self) -> Option<u32> {
        match self {
            ExecError::Parse { diagnostics, .. } => diagnostics.first().map(|first| first.column),
            ExecError::Runtime { column, .. } => *column,
        }
    }

    pub fn file(&self) -> &str {
        match self {
            ExecError::Parse { file, .. } | ExecError::Runtime { file, .. } => file,
        }
    }

    /// Every error as a renderable diagnostic.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            ExecError::Parse { diagnostics, .. } => {
                diagnostics.iter().map(ParseError::to_diagnostic).collect()
            }
            ExecError::Runtime { source, .. } => vec![eval_error_to_diagnostic(source)],
        }
    }
}

fn parse_summary(diagnostics: &[ParseError]) -> String {
    let Some(first) = diagnostics.first() else {
        return "parse failed".to_owned();
    };
    match diagnostics.len() {
        1 => first.to_string(),
        n => format!("{first} (and {} more)", n - 1),
    }
}

// Takes a reference because thiserror hands format args borrowed fields.
fn column_suffix(column: &Option<u32>) -> String {
    column.map(|column| format!(":{column}")).unwrap_or_default()
}
