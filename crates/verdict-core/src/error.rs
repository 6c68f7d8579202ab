//! Error types for verdict evaluation
//!
//! Evaluation never panics and never aborts a rule tree: every error is a
//! value captured in the `RuleResult` node that produced it. Sibling and
//! ancestor nodes keep evaluating regardless.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Evaluation error, carried per node in [`crate::RuleResult::error`].
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvalError {
    /// A value could not be interpreted as a number where a numeric
    /// comparison was required.
    #[error("invalid numerical value: [{value}]")]
    NotNumeric { value: String },

    /// Structural misuse of a combinator, e.g. `IF_THEN` without exactly
    /// two children, or a comparison operator in a combinator position.
    #[error("invalid operator: [{operator}]")]
    InvalidOperator { operator: String },

    /// Operand shape mismatch, e.g. `BETWEEN` without a two-element range
    /// or a membership check against a non-array.
    #[error("invalid value type: [{value}]")]
    InvalidType { value: String },

    /// The resolved field was absent where a present value was required.
    /// Distinguished from a plain `false` result via `RuleResult::is_empty`.
    #[error("empty value")]
    EmptyValue,

    /// A custom function failed or was not registered.
    #[error("custom function error: [{message}]")]
    Function { message: String },
}

impl EvalError {
    pub fn not_numeric(value: impl std::fmt::Display) -> Self {
        EvalError::NotNumeric {
            value: value.to_string(),
        }
    }

    pub fn invalid_operator(operator: impl std::fmt::Display) -> Self {
        EvalError::InvalidOperator {
            operator: operator.to_string(),
        }
    }

    pub fn invalid_type(value: impl std::fmt::Display) -> Self {
        EvalError::InvalidType {
            value: value.to_string(),
        }
    }

    pub fn function(message: impl std::fmt::Display) -> Self {
        EvalError::Function {
            message: message.to_string(),
        }
    }

    /// True when this error marks an absent input value.
    pub fn is_empty_value(&self) -> bool {
        matches!(self, EvalError::EmptyValue)
    }
}

/// Result type for leaf comparisons.
pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EvalError::not_numeric("abc");
        assert_eq!(err.to_string(), "invalid numerical value: [abc]");

        let err = EvalError::invalid_operator("IF_THEN requires exactly two child rules");
        assert!(err.to_string().contains("invalid operator"));

        let err = EvalError::invalid_type("roles");
        assert_eq!(err.to_string(), "invalid value type: [roles]");

        assert_eq!(EvalError::EmptyValue.to_string(), "empty value");
    }

    #[test]
    fn test_is_empty_value() {
        assert!(EvalError::EmptyValue.is_empty_value());
        assert!(!EvalError::not_numeric("x").is_empty_value());
    }

    #[test]
    fn test_error_serde_round_trip() {
        let err = EvalError::not_numeric("abc");
        let json = serde_json::to_string(&err).unwrap();
        let back: EvalError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
        assert_eq!(err.to_string(), back.to_string());
    }
}
