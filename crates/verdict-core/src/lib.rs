//! Verdict Core - Core types for the verdict rule engine
//!
//! This crate provides the fundamental types shared across the verdict
//! ecosystem:
//! - `Value` for runtime data and rule operands
//! - `Operator` taxonomy for predicate kinds
//! - `Rule` / `RuleResult` trees
//! - Error types

pub mod error;
pub mod operator;
pub mod rule;
pub mod value;

// Re-export commonly used types
pub use error::EvalError;
pub use operator::Operator;
pub use rule::{Operand, Rule, RuleResult, RuleSnapshot};
pub use value::Value;
