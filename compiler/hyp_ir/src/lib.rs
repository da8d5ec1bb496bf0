//! Hyper IR - shared data structures for the front end and evaluator.
//!
//! - Spans for source locations
//! - Names for interned identifiers and string literals
//! - Tokens produced by the lexer
//! - AST nodes stored in a flat arena
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and literal text become `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **One arena per parse**: the whole tree is dropped at once

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use arena::AstArena;
pub use ast::{
    AssignOp, BinaryOp, Expr, ExprId, ExprKind, ExprRange, FunctionDef, FunctionId, Mutability,
    ObjectProp, ParamRange, Program, PropRange, Stmt, StmtId, StmtKind, StmtRange, UnaryOp,
};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use token::{LexError, Token, TokenKind};

/// Convert a collection length into a `u32` index, saturating at `u32::MAX`.
///
/// Spans are `u32` offsets, so a source small enough to lex never produces
/// more nodes than that.
#[inline]
pub(crate) fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::to_u32;

    #[test]
    fn to_u32_saturates() {
        assert_eq!(to_u32(0), 0);
        assert_eq!(to_u32(7), 7);
        assert_eq!(to_u32(u32::MAX as usize), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(to_u32(usize::MAX), u32::MAX);
    }
}
