//! Rule evaluation
//!
//! [`Engine::evaluate`] recursively walks a rule tree against a scope value
//! and assembles a result tree of the same shape. Malformed input never
//! panics and never aborts the walk: each node captures its own error and
//! siblings keep evaluating, so the trace is always fully populated.
//!
//! The engine owns the only shared mutable state (the custom-function
//! registry and the compiled-regex cache) behind reader/writer locks, so a
//! single engine is safe to use from many threads at once and evaluation
//! itself is a pure synchronous recursion.

use crate::coerce;
use crate::options::EvalOptions;
use crate::regex_cache::RegexCache;
use crate::registry::FunctionRegistry;
use crate::resolver::resolve;
use crate::temporal;
use chrono::Utc;
use std::time::Instant;
use verdict_core::{error::Result, EvalError, Operand, Operator, Rule, RuleResult, Value};

/// Predicate-evaluation engine.
#[derive(Default)]
pub struct Engine {
    registry: FunctionRegistry,
    patterns: RegexCache,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The custom-function registry consulted for `CUSTOM_FUNC` nodes.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// The memoized pattern cache used by `MATCHES`.
    pub fn patterns(&self) -> &RegexCache {
        &self.patterns
    }

    /// Evaluate `node` and all its children against `data`, returning a
    /// [`RuleResult`] tree mirroring the rule tree.
    ///
    /// `data` is usually an object; inside a quantifier it is the current
    /// collection element.
    pub fn evaluate(&self, node: &Rule, data: &Value, opts: &EvalOptions) -> RuleResult {
        let started = opts.timing.then(Instant::now);
        let mut evaluation = RuleResult::for_rule(node);
        tracing::debug!(operator = %node.operator, field = %node.field, "evaluating rule node");

        match node.operator {
            Operator::And => {
                evaluation.result = true;
                for child in &node.children {
                    let child_evaluation = self.evaluate(child, data, opts);
                    evaluation.result = child_evaluation.result && evaluation.result;
                    evaluation.children.push(child_evaluation);
                }
            }

            // NOT combines its children with OR and negates the outcome;
            // for a single child this is plain negation.
            Operator::Or | Operator::Not => {
                for child in &node.children {
                    let child_evaluation = self.evaluate(child, data, opts);
                    evaluation.result = child_evaluation.result || evaluation.result;
                    evaluation.children.push(child_evaluation);
                }
                if node.operator == Operator::Not {
                    evaluation.result = !evaluation.result;
                }
            }

            Operator::IfThen => {
                if node.children.len() != 2 {
                    evaluation.error = Some(EvalError::invalid_operator(
                        "IF_THEN requires exactly two child rules",
                    ));
                } else {
                    // Both sides are always evaluated so the trace stays
                    // complete.
                    let antecedent = self.evaluate(&node.children[0], data, opts);
                    let consequent = self.evaluate(&node.children[1], data, opts);
                    // Material implication: A -> B is equivalent to !A or B
                    evaluation.result = !antecedent.result || consequent.result;
                    evaluation.children.push(antecedent);
                    evaluation.children.push(consequent);
                }
            }

            Operator::Any | Operator::All | Operator::None => {
                self.evaluate_quantifier(node, data, opts, &mut evaluation);
            }

            _ => {
                evaluation.rule.value = node.value.clone();
                let actual = resolve(&node.field, data);
                evaluation.input = actual.cloned();
                if let Some(logger) = &opts.logger {
                    logger(&node.field, node.operator, actual, node.value.as_ref());
                }
                match self.evaluate_leaf(node.operator, actual, node.value.as_ref()) {
                    Ok(result) => evaluation.result = result,
                    Err(error) => {
                        evaluation.is_empty = error.is_empty_value();
                        evaluation.error = Some(error);
                    }
                }
            }
        }

        if let Some(started) = started {
            evaluation.time_taken = Some(started.elapsed());
        }
        evaluation
    }

    /// `ANY` / `ALL` / `NONE`: the field must resolve to an array and the
    /// operand must be a nested rule, applied independently to each element
    /// with the element as the current scope. One child result per element.
    fn evaluate_quantifier(
        &self,
        node: &Rule,
        data: &Value,
        opts: &EvalOptions,
        evaluation: &mut RuleResult,
    ) {
        evaluation.rule.value = node.value.clone();

        let Some(Value::Array(elements)) = resolve(&node.field, data) else {
            evaluation.error = Some(EvalError::invalid_type(&node.field));
            return;
        };
        let Some(element_rule) = node.value.as_ref().and_then(Operand::as_rule) else {
            evaluation.error = Some(EvalError::invalid_type(
                "quantifier value must be a nested rule",
            ));
            return;
        };

        let mut passed = 0usize;
        for element in elements {
            let element_evaluation = self.evaluate(element_rule, element, opts);
            if element_evaluation.result {
                passed += 1;
            }
            evaluation.children.push(element_evaluation);
        }

        evaluation.result = match node.operator {
            Operator::Any => passed > 0,
            Operator::All => passed == elements.len(),
            _ => passed == 0,
        };
    }

    fn evaluate_leaf(
        &self,
        operator: Operator,
        actual: Option<&Value>,
        operand: Option<&Operand>,
    ) -> Result<bool> {
        let Some(actual) = actual else {
            if operator.tolerates_absent() {
                return Ok(matches!(operator, Operator::IsNull | Operator::NotExists));
            }
            return Err(EvalError::EmptyValue);
        };
        if matches!(operand, Some(Operand::Rule(_))) {
            return Err(EvalError::invalid_type(
                "nested rule operand outside a quantifier",
            ));
        }
        let expected = operand.and_then(Operand::as_value).unwrap_or(&Value::Null);

        match operator {
            // ---------- Equality ----------
            Operator::Eq => Ok(actual == expected),
            Operator::Neq => Ok(actual != expected),

            // ---------- Numeric ----------
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
                coerce::compare_numeric(actual, expected, operator)
            }
            Operator::Between => coerce::is_between(actual, expected),

            // ---------- Membership ----------
            Operator::In => coerce::in_list(actual, expected),
            Operator::NotIn => coerce::in_list(actual, expected).map(|found| !found),
            Operator::AnyIn => coerce::any_in_list(actual, expected),

            // ---------- String ----------
            Operator::Contains => Ok(actual.to_string().contains(&expected.to_string())),
            Operator::NotContains => Ok(!actual.to_string().contains(&expected.to_string())),
            Operator::StartsWith => Ok(actual.to_string().starts_with(&expected.to_string())),
            Operator::EndsWith => Ok(actual.to_string().ends_with(&expected.to_string())),
            Operator::Matches => {
                let pattern = expected.to_string();
                let re = self.patterns.get_or_compile(&pattern)?;
                Ok(re.is_match(&actual.to_string()))
            }
            Operator::LengthEq | Operator::LengthGt | Operator::LengthLt => {
                coerce::compare_length(actual, expected, operator)
            }

            // ---------- Boolean ----------
            Operator::IsTrue => Ok(*actual == Value::Bool(true)),
            Operator::IsFalse => Ok(*actual == Value::Bool(false)),

            // ---------- Date / time ----------
            Operator::Before | Operator::After => {
                temporal::compare_time(actual, expected, operator, Utc::now())
            }
            Operator::DateBetween => temporal::time_between(actual, expected, Utc::now()),
            Operator::WithinLast | Operator::WithinNext => {
                temporal::within_window(actual, expected, operator, Utc::now())
            }
            Operator::YearEq | Operator::MonthEq => {
                temporal::time_part_eq(actual, expected, operator, Utc::now())
            }

            // ---------- Existence / null ----------
            // A present value reached this point, so only an explicit null
            // counts as absent here.
            Operator::IsNull | Operator::NotExists => Ok(actual.is_null()),
            Operator::IsNotNull | Operator::Exists => Ok(!actual.is_null()),

            // ---------- Type checks ----------
            Operator::IsNumber => Ok(matches!(actual, Value::Number(_))),
            Operator::IsString => Ok(matches!(actual, Value::String(_))),
            Operator::IsBool => Ok(matches!(actual, Value::Bool(_))),
            Operator::IsDate => Ok(matches!(actual, Value::Timestamp(_))),
            Operator::IsList => Ok(matches!(actual, Value::Array(_))),
            Operator::IsObject => Ok(matches!(actual, Value::Object(_))),

            // ---------- Custom ----------
            Operator::CustomFunc => self.call_custom(actual, expected),

            // Combinators and quantifiers are handled before leaf dispatch;
            // reaching one here is a structural misuse.
            Operator::And
            | Operator::Or
            | Operator::Not
            | Operator::IfThen
            | Operator::Any
            | Operator::All
            | Operator::None => Err(EvalError::invalid_operator(operator)),
        }
    }

    /// `CUSTOM_FUNC`: the operand is an argument list whose head is the
    /// registered function name; the resolved actual value is prepended to
    /// the remaining arguments.
    fn call_custom(&self, actual: &Value, expected: &Value) -> Result<bool> {
        let args = expected
            .as_array()
            .ok_or_else(|| EvalError::invalid_type(expected))?;
        let name = args
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| EvalError::invalid_type(expected))?;
        let func = self
            .registry
            .get(name)
            .ok_or_else(|| EvalError::function(format!("function not registered: {name}")))?;

        let mut call_args = Vec::with_capacity(args.len());
        call_args.push(actual.clone());
        call_args.extend(args[1..].iter().cloned());
        func(&call_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The engine must be shareable across threads.
    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_leaf_absent_value_is_empty_error() {
        let engine = Engine::new();
        let err = engine
            .evaluate_leaf(Operator::Eq, None, Some(&Operand::Value(Value::from(1))))
            .unwrap_err();
        assert_eq!(err, EvalError::EmptyValue);
    }

    #[test]
    fn test_leaf_existence_family_tolerates_absence() {
        let engine = Engine::new();
        assert_eq!(engine.evaluate_leaf(Operator::IsNull, None, None), Ok(true));
        assert_eq!(engine.evaluate_leaf(Operator::NotExists, None, None), Ok(true));
        assert_eq!(engine.evaluate_leaf(Operator::Exists, None, None), Ok(false));
        assert_eq!(engine.evaluate_leaf(Operator::IsNotNull, None, None), Ok(false));
    }

    #[test]
    fn test_leaf_rejects_nested_rule_operand() {
        let engine = Engine::new();
        let operand = Operand::from(Rule::unary(Operator::Exists, ""));
        let actual = Value::from(1);
        let err = engine
            .evaluate_leaf(Operator::Eq, Some(&actual), Some(&operand))
            .unwrap_err();
        assert!(matches!(err, EvalError::InvalidType { .. }));
    }

    #[test]
    fn test_leaf_combinator_operator_is_invalid() {
        let engine = Engine::new();
        let actual = Value::from(1);
        let err = engine
            .evaluate_leaf(Operator::And, Some(&actual), None)
            .unwrap_err();
        assert_eq!(err, EvalError::invalid_operator(Operator::And));
    }
}
