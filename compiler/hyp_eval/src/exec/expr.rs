//! Expression evaluation.

use std::rc::Rc;

use hyp_ir::{AssignOp, BinaryOp, Expr, ExprId, ExprKind, ExprRange, PropRange};
use hyp_stack::ensure_sufficient_stack;

use crate::errors::assign_to_constant;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::{EvalResult, FunctionValue, Interpreter, ObjectMap, Value};

impl<'a> Interpreter<'a> {
    /// Evaluate an expression.
    pub fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        let arena = self.arena;
        ensure_sufficient_stack(|| {
            let expr = arena.get_expr(id);
            self.eval_expr_inner(expr).map_err(|err| err.or_span(expr.span))
        })
    }

    fn eval_expr_inner(&mut self, expr: &'a Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::String(text) => Ok(Value::string(self.interner.lookup(*text))),
            // Unbound names read as null.
            ExprKind::Ident(name) => Ok(self.env.lookup(*name).unwrap_or(Value::Null)),
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right),
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(*operand)?;
                evaluate_unary(*op, &operand)
            }
            ExprKind::Assign { op, target, value } => self.eval_assign(*op, *target, *value),
            ExprKind::Call { callee, args } => self.eval_call(*callee, *args),
            ExprKind::Member { object, name } => {
                let object = self.eval_expr(*object)?;
                self.get_property(&object, *name)
            }
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(*object)?;
                let index = self.eval_expr(*index)?;
                self.get_index(&object, &index)
            }
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                if self.eval_expr(*cond)?.is_truthy() {
                    self.eval_expr(*then_expr)
                } else {
                    self.eval_expr(*else_expr)
                }
            }
            ExprKind::Array(elements) => self.eval_array(*elements),
            ExprKind::Object(props) => self.eval_object(*props),
            ExprKind::Lambda(id) => {
                let function = FunctionValue::new(None, *id, self.env.current());
                Ok(Value::Function(Rc::new(function)))
            }
            // Only present in trees that also carry parse errors.
            ExprKind::Error => Ok(Value::Null),
        }
    }

    /// `and`/`or` short-circuit and yield an operand unchanged.
    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult {
        let left = self.eval_expr(left)?;
        match op {
            BinaryOp::And if !left.is_truthy() => Ok(left),
            BinaryOp::Or if left.is_truthy() => Ok(left),
            BinaryOp::And | BinaryOp::Or => self.eval_expr(right),
            _ => {
                let right = self.eval_expr(right)?;
                evaluate_binary(&left, &right, op)
            }
        }
    }

    fn eval_array(&mut self, elements: ExprRange) -> EvalResult {
        let arena = self.arena;
        let ids = arena.get_expr_list(elements);
        let mut values = Vec::with_capacity(ids.len());
        for &id in ids {
            values.push(self.eval_expr(id)?);
        }
        Ok(Value::array(values))
    }

    fn eval_object(&mut self, props: PropRange) -> EvalResult {
        let arena = self.arena;
        let mut map = ObjectMap::new();
        for prop in arena.get_props(props) {
            let value = self.eval_expr(prop.value)?;
            map.insert(self.interner.lookup(prop.key), value);
        }
        Ok(Value::object(map))
    }

    /// Plain and compound assignment to a variable, property or element.
    ///
    /// The target's container and key are evaluated first. A compound
    /// assignment then reads the old value before evaluating the right side.
    /// The assigned value is the result.
    fn eval_assign(&mut self, op: AssignOp, target: ExprId, value: ExprId) -> EvalResult {
        let arena = self.arena;
        match &arena.get_expr(target).kind {
            ExprKind::Ident(name) => {
                let new_value = match op.binary_op() {
                    None => self.eval_expr(value)?,
                    Some(bin_op) => {
                        let current = self.env.lookup(*name).unwrap_or(Value::Null);
                        let rhs = self.eval_expr(value)?;
                        evaluate_binary(&current, &rhs, bin_op)?
                    }
                };
                if self.env.assign(*name, new_value.clone()).is_err() {
                    return Err(assign_to_constant(self.interner.lookup(*name)));
                }
                Ok(new_value)
            }
            ExprKind::Member { object, name } => {
                let object = self.eval_expr(*object)?;
                let new_value = match op.binary_op() {
                    None => self.eval_expr(value)?,
                    Some(bin_op) => {
                        let current = self.get_property(&object, *name)?;
                        let rhs = self.eval_expr(value)?;
                        evaluate_binary(&current, &rhs, bin_op)?
                    }
                };
                self.set_property(&object, *name, new_value.clone())?;
                Ok(new_value)
            }
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(*object)?;
                let index = self.eval_expr(*index)?;
                let new_value = match op.binary_op() {
                    None => self.eval_expr(value)?,
                    Some(bin_op) => {
                        let current = self.get_index(&object, &index)?;
                        let rhs = self.eval_expr(value)?;
                        evaluate_binary(&current, &rhs, bin_op)?
                    }
                };
                self.set_index(&object, &index, new_value.clone())?;
                Ok(new_value)
            }
            // The parser replaces any other target with an error node.
            _ => self.eval_expr(value),
        }
    }
}
