//! # Condition Evaluator
//!
//! Evaluates one filter condition against one product value.
//!
//! ## Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  token starts with "TEMPORADA" (any case)?                              │
//! │       │                                                                 │
//! │       ├── YES: season semantics on extracted years                     │
//! │       │        filter "lo-hi"   → lo <= year <= hi                     │
//! │       │        TEMPORADA_IGUAL  → year == filter                       │
//! │       │        TEMPORADA_MAYOR  → year >  filter                       │
//! │       │        TEMPORADA_MENOR  → year <  filter                       │
//! │       │        anything else    → false                                │
//! │       │                                                                 │
//! │       └── NO: string semantics on normalized values                    │
//! │                =  !=  Starts with  Contains  Ends with                  │
//! │                >  <  >=  <=   (lexical, never numeric)                 │
//! │                anything else    → false                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Evaluation never fails: unknown operators are a non-match and malformed
//! years become 0.

use super::normalize::normalize;
use super::season::extract_year;
use crate::SEASON_CONDITION_PREFIX;

// =============================================================================
// Operators
// =============================================================================

/// Relational operator of a season condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonOp {
    Equal,
    Greater,
    Less,
    /// Any other season token: only usable with a range operand.
    RangeOnly,
}

/// A parsed condition token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionOp {
    Eq,
    Ne,
    StartsWith,
    Contains,
    EndsWith,
    Gt,
    Lt,
    Ge,
    Le,
    Season(SeasonOp),
    Unknown(String),
}

impl ConditionOp {
    /// Parses an operator token.
    ///
    /// Season routing is case-insensitive on the prefix; every other token
    /// must match exactly.
    pub fn parse(token: &str) -> Self {
        if token.to_uppercase().starts_with(SEASON_CONDITION_PREFIX) {
            let op = match token {
                "TEMPORADA_IGUAL" => SeasonOp::Equal,
                "TEMPORADA_MAYOR" => SeasonOp::Greater,
                "TEMPORADA_MENOR" => SeasonOp::Less,
                _ => SeasonOp::RangeOnly,
            };
            return ConditionOp::Season(op);
        }

        match token {
            "=" => ConditionOp::Eq,
            "!=" => ConditionOp::Ne,
            "Starts with" => ConditionOp::StartsWith,
            "Contains" => ConditionOp::Contains,
            "Ends with" => ConditionOp::EndsWith,
            ">" => ConditionOp::Gt,
            "<" => ConditionOp::Lt,
            ">=" => ConditionOp::Ge,
            "<=" => ConditionOp::Le,
            other => ConditionOp::Unknown(other.to_string()),
        }
    }

    /// Applies the operator to a product value and a filter operand.
    pub fn matches(&self, product_value: Option<&str>, filter_value: Option<&str>) -> bool {
        let product = normalize(product_value);
        let filter = normalize(filter_value);

        match self {
            ConditionOp::Season(op) => season_matches(*op, &product, &filter),
            ConditionOp::Eq => product == filter,
            ConditionOp::Ne => product != filter,
            ConditionOp::StartsWith => product.starts_with(&filter),
            ConditionOp::Contains => product.contains(&filter),
            ConditionOp::EndsWith => product.ends_with(&filter),
            ConditionOp::Gt => product > filter,
            ConditionOp::Lt => product < filter,
            ConditionOp::Ge => product >= filter,
            ConditionOp::Le => product <= filter,
            ConditionOp::Unknown(_) => false,
        }
    }
}

fn season_matches(op: SeasonOp, product: &str, filter: &str) -> bool {
    let year = extract_year(product);

    // Range operands ignore the relational operator entirely.
    if let Some((lo, hi)) = filter.split_once('-') {
        return extract_year(lo) <= year && year <= extract_year(hi);
    }

    let target = extract_year(filter);
    match op {
        SeasonOp::Equal => year == target,
        SeasonOp::Greater => year > target,
        SeasonOp::Less => year < target,
        SeasonOp::RangeOnly => false,
    }
}

/// Evaluates `product_value <condition> filter_value`.
///
/// ## Example
/// ```rust
/// use vitrina_core::promotion::evaluate;
///
/// assert!(evaluate(Some("ROJO"), "=", Some("rojo")));
/// assert!(evaluate(Some("VER2024"), "TEMPORADA", Some("2023-2025")));
/// assert!(!evaluate(Some("VER2026"), "TEMPORADA", Some("2023-2025")));
/// ```
pub fn evaluate(product_value: Option<&str>, condition: &str, filter_value: Option<&str>) -> bool {
    ConditionOp::parse(condition).matches(product_value, filter_value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_case_and_space_insensitive() {
        assert!(evaluate(Some("ROJO"), "=", Some("rojo")));
        assert!(evaluate(Some(" rojo "), "=", Some("ROJO")));
        assert!(!evaluate(Some("ROJO"), "!=", Some("rojo")));
        assert!(evaluate(Some("AZUL"), "!=", Some("rojo")));
    }

    #[test]
    fn test_substring_operators() {
        assert!(evaluate(Some("ROJO OSCURO"), "Contains", Some("OSCURO")));
        assert!(evaluate(Some("ROJO"), "Starts with", Some("RO")));
        assert!(evaluate(Some("ROJO"), "Ends with", Some("JO")));
        assert!(!evaluate(Some("ROJO"), "Ends with", Some("RO")));
    }

    #[test]
    fn test_relational_is_lexical() {
        // "9" > "10" lexically even though 9 < 10 numerically
        assert!(evaluate(Some("9"), ">", Some("10")));
        assert!(evaluate(Some("ABC"), "<", Some("ABD")));
        assert!(evaluate(Some("M"), ">=", Some("m")));
        assert!(evaluate(Some("L"), "<=", Some("M")));
    }

    #[test]
    fn test_missing_product_value_is_empty_string() {
        assert!(evaluate(None, "=", Some("")));
        assert!(evaluate(None, "=", None));
        assert!(!evaluate(None, "=", Some("ROJO")));
        // every string starts with ""
        assert!(evaluate(Some("ROJO"), "Starts with", None));
    }

    #[test]
    fn test_unknown_operator_is_false() {
        assert!(!evaluate(Some("ROJO"), "LIKE", Some("ROJO")));
        // generic tokens are case-sensitive
        assert!(!evaluate(Some("ROJO"), "contains", Some("RO")));
    }

    #[test]
    fn test_season_range() {
        assert!(evaluate(Some("VER2024"), "TEMPORADA", Some("2023-2025")));
        assert!(evaluate(Some("VER2023"), "TEMPORADA", Some("VER2023-INV2025")));
        assert!(evaluate(Some("VER2025"), "TEMPORADA", Some("2023-2025")));
        assert!(!evaluate(Some("VER2026"), "TEMPORADA", Some("2023-2025")));
    }

    #[test]
    fn test_season_range_overrides_relational_token() {
        assert!(evaluate(Some("VER2024"), "TEMPORADA_MAYOR", Some("2020-2030")));
    }

    #[test]
    fn test_season_relational() {
        assert!(evaluate(Some("VER2024"), "TEMPORADA_IGUAL", Some("INV2024")));
        assert!(evaluate(Some("VER2024"), "TEMPORADA_MAYOR", Some("2023")));
        assert!(!evaluate(Some("VER2024"), "TEMPORADA_MAYOR", Some("2024")));
        assert!(evaluate(Some("VER2022"), "TEMPORADA_MENOR", Some("2023")));
    }

    #[test]
    fn test_season_prefix_is_case_insensitive_but_operator_is_not() {
        // lower-case prefix still routes to season semantics ...
        assert!(evaluate(Some("VER2024"), "temporada", Some("2023-2025")));
        // ... but the relational suffix must be exact
        assert!(!evaluate(Some("VER2024"), "temporada_igual", Some("2024")));
    }

    #[test]
    fn test_season_without_year_compares_as_zero() {
        assert!(evaluate(Some("INVIERNO"), "TEMPORADA_MENOR", Some("2024")));
        assert!(evaluate(Some("INVIERNO"), "TEMPORADA_IGUAL", Some("SIN AÑO")));
    }

    #[test]
    fn test_parse_routes_tokens() {
        assert_eq!(ConditionOp::parse("Contains"), ConditionOp::Contains);
        assert_eq!(
            ConditionOp::parse("TEMPORADA_MENOR"),
            ConditionOp::Season(SeasonOp::Less)
        );
        assert_eq!(
            ConditionOp::parse("temporada_x"),
            ConditionOp::Season(SeasonOp::RangeOnly)
        );
        assert_eq!(
            ConditionOp::parse("LIKE"),
            ConditionOp::Unknown("LIKE".to_string())
        );
    }
}
