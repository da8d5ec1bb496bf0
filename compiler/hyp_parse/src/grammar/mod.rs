//! Grammar productions, as `impl Parser` blocks.
//!
//! - `stmt.rs`: declarations, statements, blocks, function bodies
//! - `expr.rs`: assignment down through the postfix chain and primaries
//! - `operators.rs`: token to operator mapping per precedence level
//! - `literal.rs`: string unescaping and number conversion

mod expr;
mod literal;
mod operators;
mod stmt;
