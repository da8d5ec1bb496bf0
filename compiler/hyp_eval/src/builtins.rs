//! Built-in functions bound in every global scope.

use std::fmt::Write;

use hyp_ir::{Mutability, StringInterner};

use crate::errors::{arity_mismatch, type_mismatch};
use crate::{Environment, EvalResult, Interpreter, NativeFunction, Value};

const BUILTINS: [NativeFunction; 3] = [
    NativeFunction {
        name: "print",
        func: print,
    },
    NativeFunction {
        name: "typeof",
        func: type_of,
    },
    NativeFunction {
        name: "len",
        func: len,
    },
];

pub(crate) fn register(env: &mut Environment, interner: &StringInterner) {
    for native in BUILTINS {
        let name = interner.intern(native.name);
        env.define_global(name, Value::Native(native), Mutability::Immutable);
    }
}

/// `print(a, b, ...)`: space-separated, newline-terminated.
fn print(interpreter: &Interpreter<'_>, args: &[Value]) -> EvalResult {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{arg}");
    }
    interpreter.print_handler().println(&line);
    Ok(Value::Null)
}

fn type_of(_: &Interpreter<'_>, args: &[Value]) -> EvalResult {
    let [value] = args else {
        return Err(arity_mismatch("typeof", 1));
    };
    Ok(Value::string(value.type_name()))
}

/// Characters of a string, elements of an array, or properties of an object.
#[expect(
    clippy::cast_precision_loss,
    reason = "lengths are far below 2^53"
)]
fn len(_: &Interpreter<'_>, args: &[Value]) -> EvalResult {
    let [value] = args else {
        return Err(arity_mismatch("len", 1));
    };
    let len = match value {
        Value::Str(text) => text.chars().count(),
        Value::Array(items) => items.borrow().len(),
        Value::Object(map) => map.borrow().len(),
        _ => return Err(type_mismatch("len", "strings, arrays, or objects")),
    };
    Ok(Value::Number(len as f64))
}
