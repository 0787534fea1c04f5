//! # Promotion Qualifier
//!
//! Decides whether a promotion's filter list accepts a product.
//!
//! ## Algorithm
//! ```text
//! matches = true, unmet = []
//! for each condition, in declaration order:
//!     column unmapped?   AND → unmet += "<col> is not mapped", matches = false, stop
//!                        OR  → skip
//!     ok = evaluate(product[field], condition, value)
//!     !ok                → unmet += "<field>: <value> <condition> <expected>"
//!     AND && !ok         → matches = false, stop
//!     OR  &&  ok         → matches = true,  stop
//! qualifies = matches && unmet.is_empty()        (Reference policy)
//! ```
//!
//! ## The Double Gate
//! An OR condition that succeeds sets `matches = true` and stops, but any
//! diagnostics gathered before it stay in `unmet`. Under the default
//! [`QualificationPolicy::Reference`] such a promotion is still rejected:
//! a failed AND followed by a satisfied OR never qualifies. This is the
//! established behaviour of the pricing back office and is kept as-is.
//! [`QualificationPolicy::StrictOr`] lets the OR short-circuit win instead.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::condition::ConditionOp;
use super::mapping::map_column;
use crate::types::{Combinator, FilterCondition, ProductAttributes, Promotion};

// =============================================================================
// Policy
// =============================================================================

/// How the final qualification gate treats an accepted OR short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QualificationPolicy {
    /// `matches` AND no unmet conditions.
    #[default]
    Reference,
    /// `matches` alone: a satisfied OR accepts despite earlier failures.
    StrictOr,
}

// =============================================================================
// Qualification
// =============================================================================

/// Outcome of checking one promotion against one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Qualification {
    pub qualifies: bool,
    /// Result of the AND/OR walk before the diagnostics gate.
    pub matches: bool,
    /// Human-readable description of every failed condition.
    pub unmet: Vec<String>,
}

impl Qualification {
    fn excluded() -> Self {
        Qualification {
            qualifies: false,
            matches: false,
            unmet: Vec::new(),
        }
    }
}

/// Checks a promotion's filters against a product.
pub fn qualify(
    product: &ProductAttributes,
    promotion: &Promotion,
    policy: QualificationPolicy,
) -> Qualification {
    if !promotion.is_evaluable() {
        return Qualification::excluded();
    }

    let mut matches = true;
    let mut unmet = Vec::new();

    for filter in &promotion.filters {
        let Some(field) = map_column(&filter.column) else {
            match filter.operator {
                Combinator::And => {
                    unmet.push(format!("{} is not mapped", filter.column));
                    matches = false;
                    break;
                }
                Combinator::Or => continue,
            }
        };

        let product_value = product.field(field);
        let ok = ConditionOp::parse(&filter.condition).matches(product_value, filter.value.as_deref());

        if !ok {
            unmet.push(describe_failure(field.as_str(), product_value, filter));
        }

        match (filter.operator, ok) {
            (Combinator::And, false) => {
                matches = false;
                break;
            }
            (Combinator::Or, true) => {
                matches = true;
                break;
            }
            _ => {}
        }
    }

    let qualifies = match policy {
        QualificationPolicy::Reference => matches && unmet.is_empty(),
        QualificationPolicy::StrictOr => matches,
    };

    Qualification {
        qualifies,
        matches,
        unmet,
    }
}

fn describe_failure(field: &str, product_value: Option<&str>, filter: &FilterCondition) -> String {
    format!(
        "{}: {} {} {}",
        field,
        product_value.unwrap_or_default(),
        filter.condition,
        filter.value.as_deref().unwrap_or_default()
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
