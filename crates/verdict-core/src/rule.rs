//! Rule and result trees
//!
//! A `Rule` is either a combinator (non-empty `children`, logical operator)
//! or a leaf (empty `children`, comparison/type/custom operator). Rules are
//! immutable inputs: the engine only reads them and may share one rule
//! across many evaluations.
//!
//! A `RuleResult` mirrors the rule tree shape and is produced fresh per
//! evaluation call, with one extra synthetic child per collection element
//! under quantifier nodes.

use crate::error::EvalError;
use crate::operator::Operator;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The `value` slot of a rule: a comparison operand for leaf operators, or
/// a nested rule for the quantifiers (`ANY`/`ALL`/`NONE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Nested rule, applied independently to each collection element.
    /// Tried first during deserialization so `{"operator": ...}` objects
    /// become rules rather than plain maps.
    Rule(Box<Rule>),
    /// Plain comparison operand.
    Value(Value),
}

impl Operand {
    /// The scalar operand, if this is not a nested rule.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Operand::Value(v) => Some(v),
            Operand::Rule(_) => None,
        }
    }

    /// The nested rule, if any.
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Operand::Rule(r) => Some(r),
            Operand::Value(_) => None,
        }
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

impl From<Rule> for Operand {
    fn from(r: Rule) -> Self {
        Operand::Rule(Box::new(r))
    }
}

/// A single rule node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// The predicate kind, see [`Operator`].
    pub operator: Operator,
    /// Dotted path of the variable under evaluation (`path.to.variable`).
    /// Empty for pure logical combinators; inside a quantifier's nested
    /// rule, empty addresses the current collection element itself.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    /// Comparison operand; shape depends on the operator (scalar,
    /// two-element range, nested rule, custom-function argument list).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Operand>,
    /// Nested rules; non-empty only for logical combinators.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Rule>,
}

impl Rule {
    /// Leaf comparison rule.
    pub fn leaf(operator: Operator, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Rule {
            operator,
            field: field.into(),
            value: Some(Operand::Value(value.into())),
            children: Vec::new(),
        }
    }

    /// Leaf rule without an operand (existence, null, type and boolean
    /// checks).
    pub fn unary(operator: Operator, field: impl Into<String>) -> Self {
        Rule {
            operator,
            field: field.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// Logical combinator over child rules.
    pub fn combinator(operator: Operator, children: Vec<Rule>) -> Self {
        Rule {
            operator,
            field: String::new(),
            value: None,
            children,
        }
    }

    /// Quantifier over a collection field, applying `element_rule` to each
    /// element.
    pub fn quantifier(
        operator: Operator,
        field: impl Into<String>,
        element_rule: Rule,
    ) -> Self {
        Rule {
            operator,
            field: field.into(),
            value: Some(Operand::Rule(Box::new(element_rule))),
            children: Vec::new(),
        }
    }

    /// Shallow copy of this node for result traceability (children are not
    /// carried; the result tree holds them).
    pub fn snapshot(&self) -> RuleSnapshot {
        RuleSnapshot {
            operator: self.operator,
            field: self.field.clone(),
            value: None,
        }
    }
}

/// Shallow copy of the originating rule node carried in each result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Operand>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Evaluation result for one rule node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    /// The rule the result belongs to (operator, field, operand).
    pub rule: RuleSnapshot,
    /// Whether the rule passed.
    pub result: bool,
    /// Whether there was a value to compare at all, e.g. a missing field.
    #[serde(rename = "isEmpty", default, skip_serializing_if = "is_false")]
    pub is_empty: bool,
    /// The resolved actual value that was compared; `None` for combinators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    /// Nested results mirroring the rule tree, plus one synthetic child per
    /// collection element for quantifier operators.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RuleResult>,
    /// Elapsed wall-clock duration, populated only when timing is enabled.
    #[serde(rename = "timeTaken", default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<Duration>,
    /// Error encountered while evaluating this node, if any. An error means
    /// the evaluation of this node did not finish successfully; siblings and
    /// ancestors are unaffected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EvalError>,
}

impl RuleResult {
    /// Fresh result shell for a rule node.
    pub fn for_rule(rule: &Rule) -> Self {
        RuleResult {
            rule: rule.snapshot(),
            result: false,
            is_empty: false,
            input: None,
            children: Vec::new(),
            time_taken: None,
            error: None,
        }
    }
}
