#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use hyp_ir::StringInterner;
use pretty_assertions::assert_eq;

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn lookup_walks_outward() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::new();
    env.define(x, num(1.0), Mutability::Mutable);

    let outer = env.enter(env.current());
    assert_eq!(env.lookup(x), Some(num(1.0)));
    assert_eq!(env.depth(), 2);

    env.restore(outer);
    assert_eq!(env.depth(), 1);
}

#[test]
fn inner_definition_shadows_and_disappears() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::new();
    env.define(x, num(1.0), Mutability::Mutable);

    let outer = env.enter(env.current());
    env.define(x, num(2.0), Mutability::Mutable);
    assert_eq!(env.lookup(x), Some(num(2.0)));
    env.restore(outer);

    assert_eq!(env.lookup(x), Some(num(1.0)));
}

#[test]
fn assign_updates_nearest_binding() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::new();
    env.define(x, num(1.0), Mutability::Mutable);

    let outer = env.enter(env.current());
    env.assign(x, num(5.0)).unwrap();
    assert!(!env.current().borrow().has_own(x));
    env.restore(outer);

    assert_eq!(env.lookup(x), Some(num(5.0)));
}

#[test]
fn assign_to_unbound_name_defines_in_current_scope() {
    let interner = StringInterner::new();
    let y = interner.intern("y");
    let mut env = Environment::new();

    let outer = env.enter(env.current());
    env.assign(y, num(3.0)).unwrap();
    assert!(env.current().borrow().has_own(y));
    env.restore(outer);

    assert_eq!(env.lookup(y), None);
    assert!(!env.global().borrow().has_own(y));
}

#[test]
fn const_bindings_refuse_assignment() {
    let interner = StringInterner::new();
    let k = interner.intern("k");
    let mut env = Environment::new();
    env.define_global(k, num(1.0), Mutability::Immutable);

    let outer = env.enter(env.current());
    assert_eq!(env.assign(k, num(2.0)), Err(AssignError::Immutable));
    env.restore(outer);
    assert_eq!(env.lookup(k), Some(num(1.0)));
}

#[test]
fn scope_assign_reports_undefined() {
    let interner = StringInterner::new();
    let mut scope = Scope::new();
    assert_eq!(
        scope.assign(interner.intern("nope"), Value::Null),
        Err(AssignError::Undefined)
    );
}

#[test]
fn captured_scope_outlives_environment_switch() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::new();

    let outer = env.enter(env.current());
    env.define(x, num(9.0), Mutability::Mutable);
    let captured = env.current();
    env.restore(outer);

    assert_eq!(env.lookup(x), None);
    assert_eq!(captured.borrow().lookup(x), Some(num(9.0)));
    assert!(!captured.ptr_eq(env.global()));
}
