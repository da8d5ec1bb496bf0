//! AST node types.
//!
//! Nodes never own their children; they hold ids into the
//! [`AstArena`](crate::AstArena) that the parser filled.

mod ids;
mod operators;

pub use ids::{ExprId, ExprRange, FunctionId, ParamRange, PropRange, StmtId, StmtRange};
pub use operators::{AssignOp, BinaryOp, UnaryOp};

use crate::{Name, Span};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Null,
    Bool(bool),
    Number(f64),
    /// String literal with escapes already processed.
    String(Name),
    Ident(Name),

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    /// `target op value`; the target is an `Ident`, `Member`, or `Index`.
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },
    Call {
        callee: ExprId,
        args: ExprRange,
    },
    Member {
        object: ExprId,
        name: Name,
    },
    Index {
        object: ExprId,
        index: ExprId,
    },
    /// `cond ? then_expr : else_expr`
    Conditional {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    Array(ExprRange),
    Object(PropRange),
    /// Anonymous `fn (params) { body }`.
    Lambda(FunctionId),

    /// Stand-in for an expression that failed to parse. Only ever appears
    /// in trees that are discarded.
    Error,
}

/// `key: value` inside an object literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ObjectProp {
    pub key: Name,
    pub value: ExprId,
    pub span: Span,
}

/// Whether a declared binding can be reassigned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    /// `let`
    Mutable,
    /// `const`
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Statement variants.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expr(ExprId),
    /// `let name = init;` or `const name = init;`
    VarDecl {
        name: Name,
        mutability: Mutability,
        init: Option<ExprId>,
    },
    /// `fn name(params) { body }`
    Function(FunctionId),
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    /// `for (binding in iterable) body`
    For {
        binding: Name,
        iterable: ExprId,
        body: StmtId,
    },
    Return(Option<ExprId>),
    Break,
    Continue,
    Block(StmtRange),
}

/// A named declaration or a lambda.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    /// `None` for lambdas.
    pub name: Option<Name>,
    pub params: ParamRange,
    pub body: StmtRange,
    pub span: Span,
}

/// Root of a parsed compilation unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub stmts: StmtRange,
    pub span: Span,
}
