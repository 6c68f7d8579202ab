//! Field resolution
//!
//! Resolves a dotted path against a scope value. Absence is never an error:
//! a missing key, a non-object intermediate segment, or an explicit null all
//! resolve to `None` and the caller decides what absence means.

use verdict_core::Value;

/// Resolve `path` against `scope`.
///
/// The path is split on `.` and descends through nested string-keyed
/// objects. The empty path addresses the scope itself, which is how a
/// quantifier's nested rule reaches the current collection element.
pub fn resolve<'a>(path: &str, scope: &'a Value) -> Option<&'a Value> {
    let mut current = scope;
    if !path.is_empty() {
        for key in path.split('.') {
            match current {
                Value::Object(map) => current = map.get(key)?,
                _ => return None,
            }
        }
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
