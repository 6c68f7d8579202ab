//! Integration tests for logical combinators and quantifiers

use verdict_engine::{Engine, EvalError, EvalOptions, Operator, Rule, Value};

fn eval(rule: &Rule, data: &Value) -> verdict_engine::RuleResult {
    Engine::new().evaluate(rule, data, &EvalOptions::new())
}

fn eq(field: &str, value: i64) -> Rule {
    Rule::leaf(Operator::Eq, field, value)
}

// ============================================================================
// AND / OR
// ============================================================================

#[test]
fn test_and_truth_table() {
    let data = Value::from(serde_json::json!({"x": 1, "y": 2}));

    let both = Rule::combinator(Operator::And, vec![eq("x", 1), eq("y", 2)]);
    assert!(eval(&both, &data).result);

    let one = Rule::combinator(Operator::And, vec![eq("x", 1), eq("y", 9)]);
    assert!(!eval(&one, &data).result);

    // Empty AND is the identity: true.
    let empty = Rule::combinator(Operator::And, vec![]);
    assert!(eval(&empty, &data).result);
}

#[test]
fn test_or_truth_table() {
    let data = Value::from(serde_json::json!({"x": 1, "y": 2}));

    let none = Rule::combinator(Operator::Or, vec![eq("x", 9), eq("y", 9)]);
    assert!(!eval(&none, &data).result);

    let one = Rule::combinator(Operator::Or, vec![eq("x", 9), eq("y", 2)]);
    assert!(eval(&one, &data).result);

    let empty = Rule::combinator(Operator::Or, vec![]);
    assert!(!eval(&empty, &data).result);
}

#[test]
fn test_and_evaluates_all_children_without_short_circuit() {
    let data = Value::from(serde_json::json!({"x": 1, "y": 2}));
    let rule = Rule::combinator(Operator::And, vec![eq("x", 9), eq("y", 2), eq("z", 3)]);

    let result = eval(&rule, &data);
    assert!(!result.result);
    // The full trace is populated even after the first failure.
    assert_eq!(result.children.len(), 3);
    assert!(!result.children[0].result);
    assert!(result.children[1].result);
    assert!(result.children[2].is_empty);
}

// ============================================================================
// NOT
// ============================================================================

#[test]
fn test_not_negates_single_child() {
    let data = Value::from(serde_json::json!({"x": 1}));
    let rule = Rule::combinator(Operator::Not, vec![eq("x", 1)]);
    assert!(!eval(&rule, &data).result);

    let rule = Rule::combinator(Operator::Not, vec![eq("x", 9)]);
    assert!(eval(&rule, &data).result);
}

#[test]
fn test_not_over_multiple_children_negates_their_or() {
    let data = Value::from(serde_json::json!({"x": 1, "y": 2}));

    // Any passing child makes the OR true, so NOT yields false.
    let rule = Rule::combinator(Operator::Not, vec![eq("x", 1), eq("y", 9)]);
    assert!(!eval(&rule, &data).result);

    // All children false: OR is false, NOT yields true.
    let rule = Rule::combinator(Operator::Not, vec![eq("x", 9), eq("y", 9)]);
    assert!(eval(&rule, &data).result);
}

// ============================================================================
// IF_THEN
// ============================================================================

#[test]
fn test_if_then_material_implication() {
    let rule = Rule::combinator(Operator::IfThen, vec![eq("x", 1), eq("y", 2)]);

    // Antecedent and consequent both hold.
    assert!(eval(&rule, &Value::from(serde_json::json!({"x": 1, "y": 2}))).result);
    // Antecedent false: implication holds vacuously.
    assert!(eval(&rule, &Value::from(serde_json::json!({"x": 2, "y": 2}))).result);
    // Antecedent true, consequent false.
    assert!(!eval(&rule, &Value::from(serde_json::json!({"x": 1, "y": 3}))).result);
}

#[test]
fn test_if_then_requires_exactly_two_children() {
    let data = Value::from(serde_json::json!({"x": 1}));
    let rule = Rule::combinator(Operator::IfThen, vec![eq("x", 1)]);

    let result = eval(&rule, &data);
    assert!(!result.result);
    assert!(matches!(result.error, Some(EvalError::InvalidOperator { .. })));
    assert!(result.children.is_empty());
}

#[test]
fn test_if_then_evaluates_both_sides() {
    let data = Value::from(serde_json::json!({"x": 2, "y": 2}));
    let rule = Rule::combinator(Operator::IfThen, vec![eq("x", 1), eq("y", 2)]);

    let result = eval(&rule, &data);
    assert!(result.result);
    assert_eq!(result.children.len(), 2);
    assert!(!result.children[0].result);
    assert!(result.children[1].result);
}

// ============================================================================
// Quantifiers
// ============================================================================

#[test]
fn test_all_over_scalar_elements() {
    let data = Value::from(serde_json::json!({
        "roles": ["test", "roles", "longer", "than", "three"]
    }));

    // Empty field in the nested rule addresses the element itself.
    let rule = Rule::quantifier(
        Operator::All,
        "roles",
        Rule::leaf(Operator::LengthGt, "", 3),
    );
    assert!(eval(&rule, &data).result);

    let rule = Rule::quantifier(
        Operator::All,
        "roles",
        Rule::leaf(Operator::LengthGt, "", 5),
    );
    assert!(!eval(&rule, &data).result);
}

#[test]
fn test_any_and_none() {
    let data = Value::from(serde_json::json!({"nums": [1, 5, 9]}));

    let gt_8 = Rule::quantifier(Operator::Any, "nums", Rule::leaf(Operator::Gt, "", 8));
    assert!(eval(&gt_8, &data).result);

    let gt_10 = Rule::quantifier(Operator::Any, "nums", Rule::leaf(Operator::Gt, "", 10));
    assert!(!eval(&gt_10, &data).result);

    let none_gt_10 = Rule::quantifier(Operator::None, "nums", Rule::leaf(Operator::Gt, "", 10));
    assert!(eval(&none_gt_10, &data).result);
}

#[test]
fn test_quantifier_over_object_elements_uses_dotted_paths() {
    let data = Value::from(serde_json::json!({
        "orders": [
            {"status": "closed", "total": 10},
            {"status": "open", "total": 250}
        ]
    }));

    let any_open = Rule::quantifier(
        Operator::Any,
        "orders",
        Rule::leaf(Operator::Eq, "status", "open"),
    );
    assert!(eval(&any_open, &data).result);

    let all_small = Rule::quantifier(
        Operator::All,
        "orders",
        Rule::leaf(Operator::Lt, "total", 100),
    );
    assert!(!eval(&all_small, &data).result);
}

#[test]
fn test_quantifier_emits_one_child_per_element() {
    let data = Value::from(serde_json::json!({"nums": [1, 5, 9]}));
    let rule = Rule::quantifier(Operator::Any, "nums", Rule::leaf(Operator::Gt, "", 4));

    let result = eval(&rule, &data);
    assert!(result.result);
    assert_eq!(result.children.len(), 3);
    assert!(!result.children[0].result);
    assert!(result.children[1].result);
    assert!(result.children[2].result);
    assert_eq!(result.children[1].input, Some(Value::from(5)));
}

#[test]
fn test_all_over_empty_collection_is_true() {
    let data = Value::from(serde_json::json!({"nums": []}));
    assert!(eval(
        &Rule::quantifier(Operator::All, "nums", Rule::leaf(Operator::Gt, "", 0)),
        &data
    )
    .result);
    assert!(!eval(
        &Rule::quantifier(Operator::Any, "nums", Rule::leaf(Operator::Gt, "", 0)),
        &data
    )
    .result);
    assert!(eval(
        &Rule::quantifier(Operator::None, "nums", Rule::leaf(Operator::Gt, "", 0)),
        &data
    )
    .result);
}

#[test]
fn test_quantifier_field_must_be_a_collection() {
    let data = Value::from(serde_json::json!({"nums": 7}));
    let rule = Rule::quantifier(Operator::Any, "nums", Rule::leaf(Operator::Gt, "", 0));

    let result = eval(&rule, &data);
    assert!(!result.result);
    assert!(matches!(result.error, Some(EvalError::InvalidType { .. })));
}

#[test]
fn test_quantifier_value_must_be_a_nested_rule() {
    let data = Value::from(serde_json::json!({"nums": [1, 2]}));
    let rule = Rule::leaf(Operator::Any, "nums", 3);

    let result = eval(&rule, &data);
    assert!(!result.result);
    assert!(matches!(result.error, Some(EvalError::InvalidType { .. })));
}

// ============================================================================
// Nesting
// ============================================================================

#[test]
fn test_deeply_nested_combinators() {
    let data = Value::from(serde_json::json!({
        "user": {"age": 30, "country": "DE"},
        "amount": 150
    }));

    let rule = Rule::combinator(
        Operator::And,
        vec![
            Rule::combinator(
                Operator::Or,
                vec![
                    Rule::leaf(Operator::Eq, "user.country", "DE"),
                    Rule::leaf(Operator::Eq, "user.country", "FR"),
                ],
            ),
            Rule::combinator(
                Operator::IfThen,
                vec![
                    Rule::leaf(Operator::Gt, "amount", 100),
                    Rule::leaf(Operator::Gte, "user.age", 18),
                ],
            ),
        ],
    );

    let result = eval(&rule, &data);
    assert!(result.result);
    assert_eq!(result.children.len(), 2);
    assert_eq!(result.children[0].children.len(), 2);
}

#[test]
fn test_rule_tree_from_json_wire_format() -> anyhow::Result<()> {
    let rule: Rule = serde_json::from_str(
        r#"{
            "operator": "AND",
            "children": [
                {"operator": "ANY", "field": "tags",
                 "value": {"operator": "EQ", "value": "urgent"}},
                {"operator": "NOT", "children": [
                    {"operator": "EQ", "field": "status", "value": "closed"}
                ]}
            ]
        }"#,
    )?;

    let data = Value::from(serde_json::json!({
        "tags": ["low", "urgent"],
        "status": "open"
    }));
    assert!(eval(&rule, &data).result);
    Ok(())
}
