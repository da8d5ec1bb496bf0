//! Binary and unary operator semantics.
//!
//! The value set is closed, so operators dispatch by matching on the
//! operand variants directly.

use hyp_ir::{BinaryOp, UnaryOp};

use crate::errors::{division_by_zero, invalid_binary_op, invalid_unary_op};
use crate::{EvalResult, Value};

/// Apply a binary operator to two evaluated operands.
///
/// `and`/`or` are accepted for completeness but the evaluator short-circuits
/// them before both sides exist.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::And => Ok(if left.is_truthy() { right } else { left }.clone()),
        BinaryOp::Or => Ok(if left.is_truthy() { left } else { right }.clone()),
        BinaryOp::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::string(joined))
            }
            _ => Err(invalid_binary_op(op)),
        },
        _ => {
            let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
                return Err(invalid_binary_op(op));
            };
            eval_number_binary(a, b, op)
        }
    }
}

fn eval_number_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div | BinaryOp::Mod if b == 0.0 => return Err(division_by_zero()),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Mod => Value::Number(a % b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::Add | BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::And | BinaryOp::Or => {
            return Err(invalid_binary_op(op));
        }
    };
    Ok(value)
}

/// Apply a unary operator. `!` works on any value; `-` needs a number.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => operand
            .as_number()
            .map(|n| Value::Number(-n))
            .ok_or_else(|| invalid_unary_op(op)),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::EvalErrorKind;
    use pretty_assertions::assert_eq;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(evaluate_binary(&num(1.0), &num(2.0), BinaryOp::Add), Ok(num(3.0)));
        assert_eq!(evaluate_binary(&num(7.0), &num(2.0), BinaryOp::Sub), Ok(num(5.0)));
        assert_eq!(evaluate_binary(&num(7.0), &num(2.0), BinaryOp::Div), Ok(num(3.5)));
        assert_eq!(evaluate_binary(&num(7.0), &num(3.0), BinaryOp::Mod), Ok(num(1.0)));
        assert_eq!(evaluate_binary(&num(-7.0), &num(3.0), BinaryOp::Mod), Ok(num(-1.0)));
    }

    #[test]
    fn division_and_modulo_by_zero() {
        for op in [BinaryOp::Div, BinaryOp::Mod] {
            let err = evaluate_binary(&num(5.0), &num(0.0), op).unwrap_err();
            assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
        }
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            evaluate_binary(&Value::string("ab"), &Value::string("cd"), BinaryOp::Add),
            Ok(Value::string("abcd"))
        );
    }

    #[test]
    fn mixed_operands_are_rejected() {
        let err = evaluate_binary(&Value::string("a"), &num(1.0), BinaryOp::Add).unwrap_err();
        assert_eq!(err.message, "Invalid operands for binary operator '+'");
        let err = evaluate_binary(&Value::Null, &num(1.0), BinaryOp::Lt).unwrap_err();
        assert_eq!(err.message, "Invalid operands for binary operator '<'");
        let err = evaluate_binary(&Value::string("a"), &Value::string("b"), BinaryOp::Sub)
            .unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::InvalidBinaryOp { op: BinaryOp::Sub });
    }

    #[test]
    fn equality_accepts_any_operands() {
        assert_eq!(
            evaluate_binary(&num(1.0), &Value::string("1"), BinaryOp::Eq),
            Ok(Value::Bool(false))
        );
        assert_eq!(
            evaluate_binary(&Value::Null, &Value::Null, BinaryOp::NotEq),
            Ok(Value::Bool(false))
        );
    }

    #[test]
    fn logical_operators_return_operands() {
        assert_eq!(
            evaluate_binary(&num(0.0), &Value::string("x"), BinaryOp::Or),
            Ok(Value::string("x"))
        );
        assert_eq!(
            evaluate_binary(&num(0.0), &Value::string("x"), BinaryOp::And),
            Ok(num(0.0))
        );
    }

    #[test]
    fn unary() {
        assert_eq!(evaluate_unary(UnaryOp::Neg, &num(2.0)), Ok(num(-2.0)));
        assert_eq!(evaluate_unary(UnaryOp::Not, &Value::string("")), Ok(Value::Bool(true)));
        let err = evaluate_unary(UnaryOp::Neg, &Value::string("2")).unwrap_err();
        assert_eq!(err.message, "Invalid operand for unary operator '-'");
    }
}
