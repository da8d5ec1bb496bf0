//! Hyper Eval - tree-walking evaluator.
//!
//! # Architecture
//!
//! - [`Interpreter`]: borrows a parse's arena and interner, owns the runtime
//!   [`Environment`], and walks statements and expressions
//! - [`Environment`]: parent-linked [`Scope`]s behind [`LocalScope`] handles,
//!   so closures keep their defining scope alive
//! - [`ControlFlow`]: how each statement finished; carries `return`,
//!   `break` and `continue` out of nested blocks and loops
//! - [`EvalError`]: the single runtime error, propagated with `?`
//! - [`SharedPrintHandler`]: where `print` writes
//!
//! Deep expression nesting and recursion grow the native stack through
//! `hyp_stack`; user-level recursion is capped by
//! [`EvalConfig::max_call_depth`].

mod builtins;
mod config;
mod environment;
pub mod errors;
pub mod exec;
pub mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use config::{EvalConfig, DEFAULT_MAX_CALL_DEPTH};
pub use environment::{AssignError, Binding, Environment, LocalScope, Scope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use exec::ControlFlow;
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use value::{format_number, FunctionValue, Heap, NativeFn, NativeFunction, ObjectMap, Value};
