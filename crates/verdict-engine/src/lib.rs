//! Verdict Engine - recursive predicate evaluation
//!
//! Given a tree of rule nodes and a bag of input data (arbitrarily nested
//! key/value records), the engine decides whether the data satisfies the
//! rule tree and produces a structured trace of sub-results.
//!
//! # Architecture
//!
//! - `engine`: the recursive [`Engine::evaluate`] walk and leaf dispatch
//! - `resolver`: dotted-path field resolution against nested records
//! - `coerce`: heterogeneous type coercion for the comparison primitives
//! - `temporal`: relative-time expressions and flexible duration strings
//! - `registry`: engine-scoped custom-function registry
//! - `regex_cache`: memoized pattern compilation for `MATCHES`
//! - `options`: per-call configuration (timing capture, leaf logger)
//!
//! # Example
//!
//! ```
//! use verdict_engine::{Engine, EvalOptions, Operator, Rule, Value};
//!
//! let rule = Rule::combinator(
//!     Operator::And,
//!     vec![
//!         Rule::leaf(Operator::Eq, "user.name", "alice"),
//!         Rule::leaf(Operator::Gte, "user.age", 18),
//!     ],
//! );
//! let data = Value::from(serde_json::json!({
//!     "user": {"name": "alice", "age": 30}
//! }));
//!
//! let engine = Engine::new();
//! let result = engine.evaluate(&rule, &data, &EvalOptions::new());
//! assert!(result.result);
//! ```

pub mod engine;
pub mod options;
pub mod regex_cache;
pub mod registry;
pub mod resolver;

mod coerce;
mod temporal;

// Re-export public types
pub use engine::Engine;
pub use options::{EvalOptions, Logger};
pub use regex_cache::RegexCache;
pub use registry::{CustomFn, FunctionRegistry};
pub use resolver::resolve;

// Re-export commonly used types from verdict-core
pub use verdict_core::{EvalError, Operand, Operator, Rule, RuleResult, RuleSnapshot, Value};
