//! Runtime errors and their constructors.
//!
//! Every runtime failure is built by one of the factory functions below, so
//! message wording lives in one place: the `Display` impl of
//! [`EvalErrorKind`].

use std::fmt;

use hyp_ir::{BinaryOp, Span, UnaryOp};

use crate::Value;

pub type EvalResult<T = Value> = Result<T, EvalError>;

/// What went wrong, with the data needed to describe it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    DivisionByZero,
    InvalidBinaryOp {
        op: BinaryOp,
    },
    InvalidUnaryOp {
        op: UnaryOp,
    },
    NotCallable {
        type_name: &'static str,
    },
    ArityMismatch {
        function: &'static str,
        expected: usize,
    },
    TypeMismatch {
        function: &'static str,
        expected: &'static str,
    },
    AssignToConstant {
        name: String,
    },
    StackOverflow {
        limit: usize,
    },
    PropertyAccess {
        name: String,
        type_name: &'static str,
    },
    PropertyAssign {
        name: String,
        type_name: &'static str,
    },
    InvalidIndex {
        index: String,
    },
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    NotIndexable {
        type_name: &'static str,
    },
    InvalidKey {
        type_name: &'static str,
    },
    NotIterable {
        type_name: &'static str,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::DivisionByZero => f.write_str("Division by zero"),
            EvalErrorKind::InvalidBinaryOp { op } => {
                write!(f, "Invalid operands for binary operator '{}'", op.as_symbol())
            }
            EvalErrorKind::InvalidUnaryOp { op } => {
                write!(f, "Invalid operand for unary operator '{}'", op.as_symbol())
            }
            EvalErrorKind::NotCallable { type_name } => {
                write!(f, "Can only call functions, got {type_name}")
            }
            EvalErrorKind::ArityMismatch { function, expected } => {
                let plural = if *expected == 1 { "" } else { "s" };
                write!(f, "{function} expects exactly {expected} argument{plural}")
            }
            EvalErrorKind::TypeMismatch { function, expected } => {
                write!(f, "{function} can only be called on {expected}")
            }
            EvalErrorKind::AssignToConstant { name } => {
                write!(f, "Cannot assign to constant '{name}'")
            }
            EvalErrorKind::StackOverflow { limit } => {
                write!(f, "Maximum call depth of {limit} exceeded")
            }
            EvalErrorKind::PropertyAccess { name, type_name } => {
                write!(f, "Cannot access property '{name}' on {type_name}")
            }
            EvalErrorKind::PropertyAssign { name, type_name } => {
                write!(f, "Cannot set property '{name}' on {type_name}")
            }
            EvalErrorKind::InvalidIndex { index } => {
                write!(f, "Index must be a non-negative integer, got {index}")
            }
            EvalErrorKind::IndexOutOfBounds { index, len } => {
                write!(f, "Array index {index} out of bounds for length {len}")
            }
            EvalErrorKind::NotIndexable { type_name } => {
                write!(f, "Cannot index into {type_name}")
            }
            EvalErrorKind::InvalidKey { type_name } => {
                write!(f, "Object key must be a string, got {type_name}")
            }
            EvalErrorKind::NotIterable { type_name } => {
                write!(f, "Cannot iterate over {type_name}")
            }
        }
    }
}

/// A runtime error. The first one raised ends execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; always `kind.to_string()`.
    pub message: String,
    /// Innermost expression or statement being evaluated.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Arithmetic and operators

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn invalid_binary_op(op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp { op })
}

#[cold]
pub fn invalid_unary_op(op: UnaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp { op })
}

// Calls

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn arity_mismatch(function: &'static str, expected: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch { function, expected })
}

#[cold]
pub fn type_mismatch(function: &'static str, expected: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { function, expected })
}

#[cold]
pub fn stack_overflow(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { limit })
}

// Variables

#[cold]
pub fn assign_to_constant(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssignToConstant {
        name: name.to_owned(),
    })
}

// Properties, indexing and iteration

#[cold]
pub fn property_access(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyAccess {
        name: name.to_owned(),
        type_name,
    })
}

#[cold]
pub fn property_assign(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyAssign {
        name: name.to_owned(),
        type_name,
    })
}

#[cold]
pub fn invalid_index(index: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndex {
        index: index.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: usize, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn not_indexable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable { type_name })
}

#[cold]
pub fn invalid_key(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidKey { type_name })
}

#[cold]
pub fn not_iterable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable { type_name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages() {
        assert_eq!(division_by_zero().message, "Division by zero");
        assert_eq!(
            invalid_binary_op(BinaryOp::Add).message,
            "Invalid operands for binary operator '+'"
        );
        assert_eq!(
            invalid_unary_op(UnaryOp::Neg).message,
            "Invalid operand for unary operator '-'"
        );
        assert_eq!(
            not_callable("number").message,
            "Can only call functions, got number"
        );
        assert_eq!(
            arity_mismatch("typeof", 1).message,
            "typeof expects exactly 1 argument"
        );
        assert_eq!(
            type_mismatch("len", "strings, arrays, or objects").message,
            "len can only be called on strings, arrays, or objects"
        );
        assert_eq!(
            assign_to_constant("k").message,
            "Cannot assign to constant 'k'"
        );
        assert_eq!(
            stack_overflow(1000).message,
            "Maximum call depth of 1000 exceeded"
        );
        assert_eq!(
            invalid_index(&Value::Number(1.5)).message,
            "Index must be a non-negative integer, got 1.5"
        );
    }

    #[test]
    fn innermost_span_wins() {
        let err = division_by_zero()
            .or_span(Span::new(4, 9))
            .or_span(Span::new(0, 20));
        assert_eq!(err.span, Some(Span::new(4, 9)));
        assert_eq!(err.to_string(), "Division by zero");
    }
}
