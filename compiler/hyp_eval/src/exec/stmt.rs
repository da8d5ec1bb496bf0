//! Statement execution.

use std::rc::Rc;

use hyp_ir::{ExprId, Mutability, Name, Stmt, StmtId, StmtKind, StmtRange};
use hyp_stack::ensure_sufficient_stack;

use super::ControlFlow;
use crate::errors::not_iterable;
use crate::{EvalResult, FunctionValue, Interpreter, Value};

impl<'a> Interpreter<'a> {
    /// Execute one statement.
    pub fn exec_stmt(&mut self, id: StmtId) -> EvalResult<ControlFlow> {
        let arena = self.arena;
        ensure_sufficient_stack(|| {
            let stmt = arena.get_stmt(id);
            self.exec_stmt_inner(stmt).map_err(|err| err.or_span(stmt.span))
        })
    }

    fn exec_stmt_inner(&mut self, stmt: &'a Stmt) -> EvalResult<ControlFlow> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.eval_expr(*expr).map(ControlFlow::Normal),
            StmtKind::VarDecl {
                name,
                mutability,
                init,
            } => {
                let value = match init {
                    Some(init) => self.eval_expr(*init)?,
                    None => Value::Null,
                };
                self.env.define(*name, value, *mutability);
                Ok(ControlFlow::Normal(Value::Null))
            }
            StmtKind::Function(id) => {
                let def = self.arena().get_function(*id);
                if let Some(name) = def.name {
                    let function = FunctionValue::new(Some(name), *id, self.env.current());
                    let value = Value::Function(Rc::new(function));
                    self.env.define(name, value, Mutability::Mutable);
                }
                Ok(ControlFlow::Normal(Value::Null))
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(*cond)?.is_truthy() {
                    self.exec_stmt(*then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(*else_branch)
                } else {
                    Ok(ControlFlow::Normal(Value::Null))
                }
            }
            StmtKind::While { cond, body } => self.exec_while(*cond, *body),
            StmtKind::For {
                binding,
                iterable,
                body,
            } => self.exec_for(*binding, *iterable, *body),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(value) => self.eval_expr(*value)?,
                    None => Value::Null,
                };
                Ok(ControlFlow::Return(value))
            }
            StmtKind::Break => Ok(ControlFlow::Break),
            StmtKind::Continue => Ok(ControlFlow::Continue),
            StmtKind::Block(stmts) => {
                let parent = self.env.current();
                self.with_scope(parent, |scoped| scoped.exec_stmts(*stmts))
            }
        }
    }

    /// Run statements in the current scope, stopping at the first one that
    /// does not complete normally.
    pub(crate) fn exec_stmts(&mut self, stmts: StmtRange) -> EvalResult<ControlFlow> {
        let arena = self.arena;
        let mut last = Value::Null;
        for &stmt in arena.get_stmt_list(stmts) {
            match self.exec_stmt(stmt)? {
                ControlFlow::Normal(value) => last = value,
                flow => return Ok(flow),
            }
        }
        Ok(ControlFlow::Normal(last))
    }

    fn exec_while(&mut self, cond: ExprId, body: StmtId) -> EvalResult<ControlFlow> {
        while self.eval_expr(cond)?.is_truthy() {
            match self.exec_stmt(body)? {
                ControlFlow::Break => break,
                ControlFlow::Return(value) => return Ok(ControlFlow::Return(value)),
                ControlFlow::Normal(_) | ControlFlow::Continue => {}
            }
        }
        Ok(ControlFlow::Normal(Value::Null))
    }

    /// `for (binding in iterable) body`, with a fresh scope per iteration.
    fn exec_for(&mut self, binding: Name, iterable: ExprId, body: StmtId) -> EvalResult<ControlFlow> {
        let iterable = self.eval_expr(iterable)?;
        for item in iteration_items(&iterable)? {
            let parent = self.env.current();
            let flow = self.with_scope(parent, |scoped| {
                scoped.env.define(binding, item, Mutability::Mutable);
                scoped.exec_stmt(body)
            })?;
            match flow {
                ControlFlow::Break => break,
                ControlFlow::Return(value) => return Ok(ControlFlow::Return(value)),
                ControlFlow::Normal(_) | ControlFlow::Continue => {}
            }
        }
        Ok(ControlFlow::Normal(Value::Null))
    }
}

/// Array elements (a snapshot, so the body may mutate the array),
/// string characters, or object keys in insertion order.
fn iteration_items(iterable: &Value) -> EvalResult<Vec<Value>> {
    match iterable {
        Value::Array(items) => Ok(items.borrow().clone()),
        Value::Str(text) => Ok(text
            .chars()
            .map(|c| Value::string(c.to_string()))
            .collect()),
        Value::Object(map) => Ok(map.borrow().keys().cloned().map(Value::Str).collect()),
        other => Err(not_iterable(other.type_name())),
    }
}
