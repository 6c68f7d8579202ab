//! Type coercion for the comparison primitives
//!
//! Pure functions with explicit error conditions. Numeric comparison
//! coerces both operands to f64 (numeric-looking strings parse); length
//! comparison covers strings and arrays; membership requires an array
//! operand but compares elements structurally, so differently-authored
//! sequences still match by underlying value.

use verdict_core::{error::Result, EvalError, Operator, Value};

/// Coerce to f64 or report the offending value.
pub(crate) fn as_f64(value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| EvalError::not_numeric(value))
}

pub(crate) fn compare_numeric(actual: &Value, expected: &Value, op: Operator) -> Result<bool> {
    let a = as_f64(actual)?;
    let b = as_f64(expected)?;
    Ok(match op {
        Operator::Gt => a > b,
        Operator::Gte => a >= b,
        Operator::Lt => a < b,
        Operator::Lte => a <= b,
        _ => false,
    })
}

/// Inclusive on both ends; `range` must be a two-element array.
pub(crate) fn is_between(actual: &Value, range: &Value) -> Result<bool> {
    let bounds = range
        .as_array()
        .filter(|items| items.len() == 2)
        .ok_or_else(|| EvalError::invalid_type(range))?;
    let v = as_f64(actual)?;
    let min = as_f64(&bounds[0])?;
    let max = as_f64(&bounds[1])?;
    Ok(v >= min && v <= max)
}

/// Exact-value membership of `actual` in the expected array.
pub(crate) fn in_list(actual: &Value, list: &Value) -> Result<bool> {
    let items = list
        .as_array()
        .ok_or_else(|| EvalError::invalid_type(list.type_name()))?;
    Ok(items.iter().any(|item| item == actual))
}

/// Whether the actual array shares any element with the expected array.
pub(crate) fn any_in_list(actual: &Value, list: &Value) -> Result<bool> {
    let expected = list
        .as_array()
        .ok_or_else(|| EvalError::invalid_type(list.type_name()))?;
    let inputs = actual
        .as_array()
        .ok_or_else(|| EvalError::invalid_type(actual.type_name()))?;
    Ok(inputs
        .iter()
        .any(|input| expected.iter().any(|item| item == input)))
}

/// Length of a string (in characters) or an array (in elements).
fn length_of(value: &Value) -> Result<i64> {
    match value {
        Value::String(s) => Ok(s.chars().count() as i64),
        Value::Array(items) => Ok(items.len() as i64),
        other => Err(EvalError::invalid_type(other.type_name())),
    }
}

pub(crate) fn compare_length(actual: &Value, target: &Value, op: Operator) -> Result<bool> {
    let length = length_of(actual)?;
    // String digits are accepted as a numeric target.
    let expected = as_f64(target)? as i64;
    Ok(match op {
        Operator::LengthEq => length == expected,
        Operator::LengthGt => length > expected,
        Operator::LengthLt => length < expected,
        _ => false,
    })
}
