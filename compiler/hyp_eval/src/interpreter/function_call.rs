//! Calling functions and built-ins.

use hyp_ir::{ExprId, ExprRange, Mutability};
use smallvec::SmallVec;

use super::Interpreter;
use crate::errors::{not_callable, stack_overflow};
use crate::exec::ControlFlow;
use crate::{EvalResult, FunctionValue, Value};

/// Argument buffer; most calls pass a handful of values.
type ArgBuffer = SmallVec<[Value; 4]>;

impl Interpreter<'_> {
    /// Evaluate `callee(args...)`. The callee is evaluated first, then the
    /// arguments left to right.
    pub(crate) fn eval_call(&mut self, callee: ExprId, args: ExprRange) -> EvalResult {
        let callee = self.eval_expr(callee)?;
        let arena = self.arena;
        let mut values = ArgBuffer::with_capacity(args.len());
        for &arg in arena.get_expr_list(args) {
            values.push(self.eval_expr(arg)?);
        }
        self.call_value(&callee, &values)
    }

    /// Call any callable value.
    pub fn call_value(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Function(function) => self.call_function(function, args),
            Value::Native(native) => (native.func)(self, args),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Call a user function.
    ///
    /// The body runs in a fresh child of the closure scope. Parameters bind
    /// positionally; extra arguments are dropped and missing ones stay
    /// unbound. Falling off the end returns `null`.
    pub(crate) fn call_function(&mut self, function: &FunctionValue, args: &[Value]) -> EvalResult {
        let limit = self.config.max_call_depth;
        if self.call_depth >= limit {
            return Err(stack_overflow(limit));
        }

        let arena = self.arena;
        let def = arena.get_function(function.def);
        tracing::trace!(
            function = function.name.map_or("<lambda>", |name| self.interner.lookup(name)),
            depth = self.call_depth + 1,
            "call"
        );

        self.call_depth += 1;
        let flow = self.with_scope(function.closure.clone(), |scoped| {
            for (&param, arg) in arena.get_params(def.params).iter().zip(args) {
                scoped.env.define(param, arg.clone(), Mutability::Mutable);
            }
            scoped.exec_stmts(def.body)
        });
        self.call_depth -= 1;

        match flow? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Normal(_) | ControlFlow::Break | ControlFlow::Continue => Ok(Value::Null),
        }
    }
}
