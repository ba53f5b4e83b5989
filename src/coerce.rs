//! The coercion table: kind × target kind → converted value or failure.

use crate::error::{CoerceResult, CoercionError};
use crate::value::{Kind, Number, Value};

/// Converts `value` into a value of the `target` kind.
///
/// Values already of the target kind are returned unchanged. Null always
/// fails; the field resolver deals with null before coercion is attempted.
///
/// A numeric string headed for an integer is read as a float when it is not
/// an integer literal, so `"1.5"` fails with `OutOfRange` rather than
/// `NotNumeric`.
pub fn coerce(value: &Value, target: Kind) -> CoerceResult<Value> {
    if value.is_null() {
        return Err(CoercionError::Null);
    }
    if value.kind() == target {
        return Ok(value.clone());
    }

    match (value, target) {
        (Value::Number(n), Kind::Integer) => integer_from_number(n).map(Value::Number),
        (Value::Number(n), Kind::Float) => Ok(Value::Number(n.to_float())),
        (Value::Number(n), Kind::String) => Ok(Value::String(n.to_string())),
        (Value::String(s), Kind::Integer) => integer_from_str(s).map(Value::Number),
        (Value::String(s), Kind::Float) => float_from_str(s).map(Value::Number),
        (Value::String(s), Kind::Bool) => bool_from_str(s).map(Value::Bool),
        (Value::Bool(b), Kind::String) => Ok(Value::String(b.to_string())),
        _ => Err(CoercionError::mismatch(target, value.kind())),
    }
}

fn integer_from_number(n: &Number) -> CoerceResult<Number> {
    n.to_integer()
        .ok_or_else(|| CoercionError::OutOfRange(n.to_string()))
}

fn integer_from_str(s: &str) -> CoerceResult<Number> {
    if let Ok(n) = s.parse::<u64>() {
        return Ok(Number::from(n));
    }
    if let Ok(n) = s.parse::<i64>() {
        return Ok(Number::from(n));
    }
    float_from_str(s).and_then(|n| integer_from_number(&n))
}

fn float_from_str(s: &str) -> CoerceResult<Number> {
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| CoercionError::NotNumeric(s.to_owned()))
}

fn bool_from_str(s: &str) -> CoerceResult<bool> {
    match s {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(CoercionError::NotBoolean(s.to_owned())),
    }
}
