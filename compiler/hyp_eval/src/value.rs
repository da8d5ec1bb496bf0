//! Runtime values.
//!
//! Scalars are stored inline. Arrays and objects live behind [`Heap`], so
//! copies of a value alias the same storage and compare by identity.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use hyp_ir::{FunctionId, Name};
use rustc_hash::FxHashMap;

use crate::environment::{LocalScope, Scope};
use crate::{EvalResult, Interpreter};

/// Shared, mutable storage for reference values.
///
/// Cloning a `Heap` clones the handle, never the contents.
#[repr(transparent)]
pub struct Heap<T>(Rc<RefCell<T>>);

impl<T> Heap<T> {
    pub fn new(value: T) -> Self {
        Heap(Rc::new(RefCell::new(value)))
    }

    /// # Panics
    /// Panics if the contents are currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// # Panics
    /// Panics if the contents are currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

// Contents are not printed: a heap value can contain itself.
impl<T> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heap({:p})", Rc::as_ptr(&self.0))
    }
}

/// Object properties in insertion order.
///
/// Keys are owned strings rather than interned names: keys built at run time
/// (`o[k] = v`) must not outlive the object that holds them.
#[derive(Clone, Debug, Default)]
pub struct ObjectMap {
    entries: Vec<(Rc<str>, Value)>,
    index: FxHashMap<Rc<str>, usize>,
}

impl ObjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Insert or overwrite. An overwritten key keeps its original position
    /// and no new key string is allocated.
    pub fn insert(&mut self, key: &str, value: Value) {
        if let Some(&slot) = self.index.get(key) {
            self.entries[slot].1 = value;
        } else {
            let key: Rc<str> = Rc::from(key);
            self.index.insert(Rc::clone(&key), self.entries.len());
            self.entries.push((key, value));
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &Rc<str>> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A user function together with the scope it closes over.
pub struct FunctionValue {
    pub name: Option<Name>,
    pub def: FunctionId,
    pub closure: LocalScope<Scope>,
}

impl FunctionValue {
    pub fn new(name: Option<Name>, def: FunctionId, closure: LocalScope<Scope>) -> Self {
        FunctionValue { name, def, closure }
    }
}

// The closure scope usually contains this function, so it is left out.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("def", &self.def)
            .finish_non_exhaustive()
    }
}

/// Signature shared by every built-in.
pub type NativeFn = fn(&Interpreter<'_>, &[Value]) -> EvalResult;

/// A built-in function.
#[derive(Copy, Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Array(Heap<Vec<Value>>),
    Object(Heap<ObjectMap>),
    Function(Rc<FunctionValue>),
    Native(NativeFunction),
}

impl Value {
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Heap::new(elements))
    }

    pub fn object(map: ObjectMap) -> Self {
        Value::Object(Heap::new(map))
    }

    /// `null`, `false`, `0`, `NaN` and `""` are falsy. Everything else,
    /// including empty arrays and objects, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Native(_) => true,
        }
    }

    /// The name `typeof` reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) | Value::Native(_) => "function",
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Scalars compare by value (IEEE for numbers, so `NaN != NaN`), reference
/// values by identity, built-ins by name.
impl PartialEq for Value {
    #[expect(clippy::float_cmp, reason = "numbers compare with IEEE equality")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// The text `print` writes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) => f.write_str("[Array]"),
            Value::Object(_) => f.write_str("[Object]"),
            Value::Function(_) => f.write_str("[Function]"),
            Value::Native(_) => f.write_str("[Native Function]"),
        }
    }
}

/// Format a number the way C's `%g` does: six significant digits, fixed
/// notation for exponents in `-4..6`, trailing zeros removed.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    // Rounding to six digits first decides the exponent, as `%g` does.
    let scientific = format!("{n:.5e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return n.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return n.to_string();
    };

    if (-4..6).contains(&exponent) {
        let precision = usize::try_from(5 - exponent).unwrap_or(0);
        trim_fraction(&format!("{n:.precision$}")).to_owned()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
