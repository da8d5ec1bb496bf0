//! RAII scope management for the interpreter.
//!
//! [`ScopedInterpreter`] makes a child scope current and reinstates the
//! previous scope when dropped, so early returns through `?` and `return`
//! signals can never leave the environment pointing at a dead frame.
//!
//! ```text
//! let parent = interpreter.env.current();
//! let mut scoped = interpreter.scoped(parent);
//! scoped.env.define(name, value, Mutability::Mutable);
//! scoped.exec_stmt(body)?;
//! // previous scope restored here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::{LocalScope, Scope};

/// Guard that restores the enclosing scope on drop.
///
/// Derefs to the interpreter, so it is used exactly like one.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    previous: Option<LocalScope<Scope>>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.interpreter.env.restore(previous);
        }
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Make a fresh child of `parent` the current scope until the guard drops.
    ///
    /// Blocks pass the current scope; calls pass the callee's closure.
    pub fn scoped(&mut self, parent: LocalScope<Scope>) -> ScopedInterpreter<'_, 'a> {
        let previous = self.env.enter(parent);
        ScopedInterpreter {
            interpreter: self,
            previous: Some(previous),
        }
    }

    /// Run `f` inside a child of `parent`.
    pub fn with_scope<T, F>(&mut self, parent: LocalScope<Scope>, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped(parent);
        f(&mut scoped)
    }
}
