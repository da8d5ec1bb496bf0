//! `InterpreterBuilder` for configuring an [`Interpreter`].

use hyp_ir::{AstArena, StringInterner};

use super::Interpreter;
use crate::{builtins, stdout_handler, EvalConfig, Environment, SharedPrintHandler};

/// Builder for interpreters.
///
/// Defaults: [`EvalConfig::default`] and output to stdout.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    arena: &'a AstArena,
    config: EvalConfig,
    print_handler: Option<SharedPrintHandler>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner, arena: &'a AstArena) -> Self {
        InterpreterBuilder {
            interner,
            arena,
            config: EvalConfig::default(),
            print_handler: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Build the interpreter with the built-ins bound in its global scope.
    pub fn build(self) -> Interpreter<'a> {
        let mut env = Environment::new();
        builtins::register(&mut env, self.interner);
        Interpreter {
            interner: self.interner,
            arena: self.arena,
            env,
            config: self.config,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: 0,
        }
    }
}
