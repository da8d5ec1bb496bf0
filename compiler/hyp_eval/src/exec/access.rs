//! Property and index access.

use hyp_ir::Name;

use crate::errors::{
    index_out_of_bounds, invalid_index, invalid_key, not_indexable, property_access,
    property_assign,
};
use crate::{EvalResult, Interpreter, Value};

impl Interpreter<'_> {
    /// `object.name`. Missing properties read as `null`.
    pub(crate) fn get_property(&self, object: &Value, name: Name) -> EvalResult {
        match object {
            Value::Object(map) => Ok(map
                .borrow()
                .get(self.interner.lookup(name))
                .cloned()
                .unwrap_or(Value::Null)),
            other => Err(property_access(
                self.interner.lookup(name),
                other.type_name(),
            )),
        }
    }

    pub(crate) fn set_property(&self, object: &Value, name: Name, value: Value) -> EvalResult<()> {
        match object {
            Value::Object(map) => {
                map.borrow_mut().insert(self.interner.lookup(name), value);
                Ok(())
            }
            other => Err(property_assign(
                self.interner.lookup(name),
                other.type_name(),
            )),
        }
    }

    /// `object[index]`.
    ///
    /// Arrays and strings take integer indices and read `null` past the end;
    /// a string element is a one-character string. Objects take string keys.
    pub(crate) fn get_index(&self, object: &Value, index: &Value) -> EvalResult {
        match object {
            Value::Array(items) => {
                let slot = element_index(index)?;
                Ok(items.borrow().get(slot).cloned().unwrap_or(Value::Null))
            }
            Value::Str(text) => {
                let slot = element_index(index)?;
                Ok(text
                    .chars()
                    .nth(slot)
                    .map_or(Value::Null, |c| Value::string(c.to_string())))
            }
            Value::Object(map) => {
                let Value::Str(key) = index else {
                    return Err(invalid_key(index.type_name()));
                };
                Ok(map.borrow().get(key).cloned().unwrap_or(Value::Null))
            }
            other => Err(not_indexable(other.type_name())),
        }
    }

    /// `object[index] = value`.
    ///
    /// Array writes must land inside the array or exactly one past the end,
    /// which appends.
    pub(crate) fn set_index(&self, object: &Value, index: &Value, value: Value) -> EvalResult<()> {
        match object {
            Value::Array(items) => {
                let slot = element_index(index)?;
                let mut items = items.borrow_mut();
                let len = items.len();
                if slot < len {
                    items[slot] = value;
                } else if slot == len {
                    items.push(value);
                } else {
                    return Err(index_out_of_bounds(slot, len));
                }
                Ok(())
            }
            Value::Object(map) => {
                let Value::Str(key) = index else {
                    return Err(invalid_key(index.type_name()));
                };
                map.borrow_mut().insert(key, value);
                Ok(())
            }
            other => Err(not_indexable(other.type_name())),
        }
    }
}

/// A non-negative integral number as a position.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "non-negative and integral; positions past usize::MAX saturate and miss"
)]
fn element_index(index: &Value) -> EvalResult<usize> {
    match index {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Ok(*n as usize),
        other => Err(invalid_index(other)),
    }
}
