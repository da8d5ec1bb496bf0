//! The tree-walking interpreter.
//!
//! An [`Interpreter`] borrows one parse's arena and interner and owns the
//! runtime environment. Expression and statement evaluation live in
//! [`crate::exec`]; calls live in `function_call`.

mod builder;
mod function_call;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use hyp_ir::{AstArena, Program, StringInterner};

use crate::exec::ControlFlow;
use crate::{EvalConfig, EvalResult, Environment, PrintHandlerImpl, SharedPrintHandler, Value};

pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) arena: &'a AstArena,
    pub(crate) env: Environment,
    pub(crate) config: EvalConfig,
    pub(crate) print_handler: SharedPrintHandler,
    /// User-function calls currently on the stack.
    pub(crate) call_depth: usize,
}

impl<'a> Interpreter<'a> {
    /// An interpreter with the default config that prints to stdout.
    pub fn new(interner: &'a StringInterner, arena: &'a AstArena) -> Self {
        InterpreterBuilder::new(interner, arena).build()
    }

    pub fn builder(interner: &'a StringInterner, arena: &'a AstArena) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner, arena)
    }

    /// Run a program.
    ///
    /// Top-level statements run first. Then, if the global scope binds a
    /// user function named `main`, it is called with no arguments and its
    /// result is returned; otherwise the value of the last top-level
    /// statement is returned. The first runtime error stops everything.
    pub fn execute_program(&mut self, program: &Program) -> EvalResult {
        tracing::debug!(statements = program.stmts.len(), "executing program");

        let arena = self.arena;
        let mut last = Value::Null;
        for &stmt in arena.get_stmt_list(program.stmts) {
            match self.exec_stmt(stmt)? {
                ControlFlow::Normal(value) => last = value,
                ControlFlow::Return(value) => return Ok(value),
                ControlFlow::Break | ControlFlow::Continue => {}
            }
        }

        let main = self.interner.intern("main");
        let entry = self.env.global().borrow().lookup(main);
        if let Some(Value::Function(function)) = entry {
            tracing::debug!("invoking main");
            return self
                .call_function(&function, &[])
                .map_err(|err| err.or_span(program.span));
        }
        Ok(last)
    }

    #[inline]
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    #[inline]
    pub fn arena(&self) -> &'a AstArena {
        self.arena
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    #[inline]
    pub fn print_handler(&self) -> &PrintHandlerImpl {
        &self.print_handler
    }

    #[inline]
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Output captured by a buffer print handler.
    pub fn get_print_output(&self) -> String {
        self.print_handler.output()
    }

    pub fn clear_print_output(&self) {
        self.print_handler.clear();
    }
}
