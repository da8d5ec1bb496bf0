//! Expression and statement evaluation.
//!
//! Statements report how control leaves them through [`ControlFlow`].
//! Blocks, loops and `if` hand any non-`Normal` flow straight to their
//! caller, which is how `return` escapes nested loops and blocks.

mod access;
mod expr;
mod stmt;

use crate::Value;

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlFlow {
    /// Fell through, producing the statement's value.
    Normal(Value),
    Return(Value),
    Break,
    Continue,
}
