//! Variable scopes.
//!
//! Scopes form a parent-linked chain. The [`Environment`] tracks the scope
//! currently in effect; closures keep their declaring scope alive through
//! the shared [`LocalScope`] handle.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use hyp_ir::{Mutability, Name};
use rustc_hash::FxHashMap;

use crate::Value;

/// Single-threaded shared handle to a scope.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Scopes hold closures that point back at them; print the handle only.
impl<T> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalScope({:p})", Rc::as_ptr(&self.0))
    }
}

/// A variable binding.
#[derive(Clone, Debug)]
pub struct Binding {
    pub value: Value,
    pub mutability: Mutability,
}

/// Why an assignment was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The nearest binding was declared with `const`.
    Immutable,
    /// No scope in the chain binds the name.
    Undefined,
}

/// One level of the scope chain.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this scope, replacing any earlier binding here.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.bindings.insert(name, Binding { value, mutability });
    }

    /// Find the nearest binding of `name`, searching outward.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(binding) = self.bindings.get(&name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Whether `name` is bound in this scope itself.
    pub fn has_own(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Update the nearest binding of `name`.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(&name) {
            if !binding.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}

/// The scope chain in effect during evaluation.
pub struct Environment {
    current: LocalScope<Scope>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            current: global.clone(),
            global,
        }
    }

    /// The innermost scope.
    #[inline]
    pub fn current(&self) -> LocalScope<Scope> {
        self.current.clone()
    }

    #[inline]
    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    /// Make a fresh child of `parent` current, returning the scope it
    /// replaces. Pair every call with [`Environment::restore`].
    pub fn enter(&mut self, parent: LocalScope<Scope>) -> LocalScope<Scope> {
        let child = LocalScope::new(Scope::with_parent(parent));
        std::mem::replace(&mut self.current, child)
    }

    /// Reinstate a scope returned by [`Environment::enter`].
    #[inline]
    pub fn restore(&mut self, previous: LocalScope<Scope>) {
        self.current = previous;
    }

    /// Nesting depth of the current scope; the global scope is 1.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = self.current.clone();
        loop {
            let parent = scope.borrow().parent.clone();
            match parent {
                Some(parent) => {
                    depth += 1;
                    scope = parent;
                }
                None => return depth,
            }
        }
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.current.borrow_mut().define(name, value, mutability);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current.borrow().lookup(name)
    }

    /// Assign to the nearest binding of `name`.
    ///
    /// A name bound nowhere in the chain is created in the current scope,
    /// so assignment never leaks out to the global scope.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        let result = self.current.borrow_mut().assign(name, value.clone());
        match result {
            Err(AssignError::Undefined) => {
                self.define(name, value, Mutability::Mutable);
                Ok(())
            }
            other => other,
        }
    }

    /// Bind `name` in the global scope.
    pub fn define_global(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.global.borrow_mut().define(name, value, mutability);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
