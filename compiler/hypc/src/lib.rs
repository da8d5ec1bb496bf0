//! Hyper front door.
//!
//! Parses a source buffer, evaluates it, and reports failures either as the
//! `{ message, line, column }` triple of [`ExecError`] or as rendered
//! diagnostics.
//!
//! ```text
//! source --hyp_parse--> ParsedProgram --hyp_eval--> Value
//!             |                             |
//!             v                             v
//!     ExecError::Parse              ExecError::Runtime
//! ```

mod config;
mod diagnostics;
mod error;
mod tracing_setup;

#[cfg(test)]
mod tests;

pub use config::{Config, MAX_CALL_DEPTH_VAR};
pub use diagnostics::{eval_error_to_diagnostic, render_diagnostics};
pub use error::ExecError;
pub use hyp_eval::{buffer_handler, silent_handler, stdout_handler, SharedPrintHandler, Value};
pub use tracing_setup::{init_tracing, LOG_TREE_VAR};

use hyp_eval::Interpreter;

/// File name reported when the caller gives none.
pub const DEFAULT_FILE_NAME: &str = "<input>";

/// Run `source`, printing to stdout with the default configuration.
pub fn execute(source: &str, filename: Option<&str>) -> Result<(), ExecError> {
    execute_with(source, filename, &Config::default(), stdout_handler()).map(|_| ())
}

/// Run `source` with an explicit configuration and print destination.
///
/// Returns what `main` returned when the program defines one, otherwise the
/// value of the last top-level statement.
pub fn execute_with(
    source: &str,
    filename: Option<&str>,
    config: &Config,
    print_handler: SharedPrintHandler,
) -> Result<Value, ExecError> {
    let file = filename.unwrap_or(DEFAULT_FILE_NAME);
    let _span = tracing::debug_span!("execute", file).entered();

    let parsed = hyp_parse::parse(source)
        .into_result()
        .map_err(|diagnostics| {
            tracing::debug!(count = diagnostics.len(), "parse failed");
            ExecError::Parse {
                diagnostics,
                file: file.to_owned(),
            }
        })?;

    let mut interpreter = Interpreter::builder(&parsed.interner, &parsed.arena)
        .config(config.eval_config())
        .print_handler(print_handler)
        .build();
    interpreter
        .execute_program(&parsed.program)
        .map_err(|error| ExecError::runtime(error, source, file))
}
