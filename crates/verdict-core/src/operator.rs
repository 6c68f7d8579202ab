//! Operator taxonomy for verdict rules
//!
//! A closed enumeration of predicate kinds, grouped by category. Wire names
//! are SCREAMING_SNAKE (`"IF_THEN"`, `"ANY_IN"`, ...), so rules deserialized
//! from configuration use the canonical spelling; unknown operator strings
//! are rejected at deserialization time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    // Logical combinators
    And,
    Or,
    Not,
    IfThen,

    // Equality
    Eq,
    Neq,

    // Numeric comparison
    Gt,
    Gte,
    Lt,
    Lte,
    Between,

    // Membership
    In,
    NotIn,
    AnyIn,

    // String
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Matches,
    LengthEq,
    LengthGt,
    LengthLt,

    // Boolean
    IsTrue,
    IsFalse,

    // Date / time
    Before,
    After,
    DateBetween,
    WithinLast,
    WithinNext,
    YearEq,
    MonthEq,

    // Quantifiers over collections
    Any,
    All,
    None,

    // Existence / null
    Exists,
    NotExists,
    IsNull,
    IsNotNull,

    // Type checks
    IsNumber,
    IsString,
    IsBool,
    IsDate,
    IsList,
    IsObject,

    // Custom / script
    CustomFunc,
}

impl Operator {
    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::IfThen => "IF_THEN",
            Operator::Eq => "EQ",
            Operator::Neq => "NEQ",
            Operator::Gt => "GT",
            Operator::Gte => "GTE",
            Operator::Lt => "LT",
            Operator::Lte => "LTE",
            Operator::Between => "BETWEEN",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
            Operator::AnyIn => "ANY_IN",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
            Operator::Matches => "MATCHES",
            Operator::LengthEq => "LENGTH_EQ",
            Operator::LengthGt => "LENGTH_GT",
            Operator::LengthLt => "LENGTH_LT",
            Operator::IsTrue => "IS_TRUE",
            Operator::IsFalse => "IS_FALSE",
            Operator::Before => "BEFORE",
            Operator::After => "AFTER",
            Operator::DateBetween => "DATE_BETWEEN",
            Operator::WithinLast => "WITHIN_LAST",
            Operator::WithinNext => "WITHIN_NEXT",
            Operator::YearEq => "YEAR_EQ",
            Operator::MonthEq => "MONTH_EQ",
            Operator::Any => "ANY",
            Operator::All => "ALL",
            Operator::None => "NONE",
            Operator::Exists => "EXISTS",
            Operator::NotExists => "NOT_EXISTS",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::IsNumber => "IS_NUMBER",
            Operator::IsString => "IS_STRING",
            Operator::IsBool => "IS_BOOL",
            Operator::IsDate => "IS_DATE",
            Operator::IsList => "IS_LIST",
            Operator::IsObject => "IS_OBJECT",
            Operator::CustomFunc => "CUSTOM_FUNC",
        }
    }

    /// Returns true if this is a logical combinator over child rules.
    pub fn is_logical(&self) -> bool {
        matches!(
            self,
            Operator::And | Operator::Or | Operator::Not | Operator::IfThen
        )
    }

    /// Returns true if this is a quantifier over a collection field.
    pub fn is_quantifier(&self) -> bool {
        matches!(self, Operator::Any | Operator::All | Operator::None)
    }

    /// Returns true if this operator tolerates an absent input value. All
    /// other operators treat absence as an empty-value error.
    pub fn tolerates_absent(&self) -> bool {
        matches!(
            self,
            Operator::IsNull | Operator::NotExists | Operator::IsNotNull | Operator::Exists
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Operator::IfThen).unwrap(), r#""IF_THEN""#);
        assert_eq!(serde_json::to_string(&Operator::AnyIn).unwrap(), r#""ANY_IN""#);
        assert_eq!(
            serde_json::to_string(&Operator::CustomFunc).unwrap(),
            r#""CUSTOM_FUNC""#
        );

        let op: Operator = serde_json::from_str(r#""WITHIN_LAST""#).unwrap();
        assert_eq!(op, Operator::WithinLast);
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let parsed: Result<Operator, _> = serde_json::from_str(r#""SHOUT""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(Operator::NotIn.to_string(), "NOT_IN");
        assert_eq!(Operator::IsNotNull.to_string(), "IS_NOT_NULL");
    }

    #[test]
    fn test_categories() {
        assert!(Operator::And.is_logical());
        assert!(Operator::IfThen.is_logical());
        assert!(!Operator::Eq.is_logical());

        assert!(Operator::All.is_quantifier());
        assert!(!Operator::In.is_quantifier());

        assert!(Operator::IsNull.tolerates_absent());
        assert!(Operator::Exists.tolerates_absent());
        assert!(!Operator::Eq.tolerates_absent());
    }
}
