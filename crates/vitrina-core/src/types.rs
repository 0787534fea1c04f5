//! # Domain Types
//!
//! Core domain types used throughout Vitrina.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌─────────────────┐   ┌─────────────────┐      │
//! │  │ProductAttributes │   │   Promotion     │   │     Store       │      │
//! │  │ ──────────────── │   │  ─────────────  │   │  ─────────────  │      │
//! │  │ alu (business)   │   │  id             │   │  store_no       │      │
//! │  │ season, color... │   │  status         │   │  name           │      │
//! │  │ list_price       │   │  filters  ──────┼─► FilterCondition  │      │
//! │  └──────────────────┘   │  benefits ──────┼─► Benefit          │      │
//! │                         │  priority       │   └─────────────────┘      │
//! │                         └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │   Combinator    │   │     Scalar      │       │
//! │  │  bps (u32)      │   │   And / Or      │   │  Text / Number  │       │
//! │  │  2500 = 25%     │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here is built fresh per request from the database and never
//! mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::{ACTIVE_PROMOTION_STATUS, PERCENT_BENEFIT_KIND};

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2500 bps = 25%, 1250 bps = 12.5%
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage, rounded to the nearest
    /// basis point. Negative or non-finite input yields zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return DiscountRate::zero();
        }
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Scalar
// =============================================================================

/// A loosely typed column value: back-office tables store some numeric
/// fields as text and some as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Scalar {
    Text(String),
    Number(f64),
}

impl Scalar {
    /// Reads the value as a number. Text is trimmed and parsed; anything
    /// unparseable yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) if n.is_finite() => Some(*n),
            Scalar::Number(_) => None,
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

// =============================================================================
// Product
// =============================================================================

/// Semantic product fields a promotion filter can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ProductField {
    Window,
    Season,
    Collection,
    Family,
    Brand,
    Model,
    Color,
    Size,
}

impl ProductField {
    /// Field name as it appears in diagnostics and JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductField::Window => "window",
            ProductField::Season => "season",
            ProductField::Collection => "collection",
            ProductField::Family => "family",
            ProductField::Brand => "brand",
            ProductField::Model => "model",
            ProductField::Color => "color",
            ProductField::Size => "size",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive attributes of a single product, as used for promotion
/// matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductAttributes {
    /// Product code (model + color + size).
    pub alu: String,
    pub description: Option<String>,
    pub window: Option<String>,
    pub season: Option<String>,
    pub collection: Option<String>,
    pub family: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    /// Price level 1 list price. `None` when the product has no list price.
    pub list_price: Option<Money>,
}

impl ProductAttributes {
    /// Returns the raw value of a semantic field.
    pub fn field(&self, field: ProductField) -> Option<&str> {
        let value = match field {
            ProductField::Window => &self.window,
            ProductField::Season => &self.season,
            ProductField::Collection => &self.collection,
            ProductField::Family => &self.family,
            ProductField::Brand => &self.brand,
            ProductField::Model => &self.model,
            ProductField::Color => &self.color,
            ProductField::Size => &self.size,
        };
        value.as_deref()
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// How a filter condition combines with the rest of the promotion's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    /// Parses a stored combinator. Missing or unrecognised values fall back
    /// to `And`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_uppercase()) {
            Some(s) if s == "OR" => Combinator::Or,
            _ => Combinator::And,
        }
    }
}

impl Default for Combinator {
    fn default() -> Self {
        Combinator::And
    }
}

/// One eligibility predicate of a promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterCondition {
    /// External attribute identifier (e.g. `UDF7_VALUE`).
    pub column: String,
    /// Operator token (`=`, `Contains`, `TEMPORADA_MAYOR`, ...).
    pub condition: String,
    /// Operand. Season conditions may encode a `lo-hi` range.
    pub value: Option<String>,
    #[serde(default)]
    pub operator: Combinator,
    /// Back-office description of the filter, informational only.
    pub filter_text: Option<String>,
}

/// Discount payload of a promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Benefit {
    /// Discount kind tag. Only `P%` drives pricing.
    pub kind: String,
    pub value: Option<Scalar>,
    /// Item-level restriction, carried through but not used for selection.
    pub item_scope: Option<String>,
}

impl Benefit {
    /// Returns the percentage if this is a `P%` benefit with a numeric value.
    pub fn percentage(&self) -> Option<f64> {
        if self.kind.trim() != PERCENT_BENEFIT_KIND {
            return None;
        }
        self.value.as_ref().and_then(Scalar::as_f64)
    }
}

/// A time-bounded discount rule with its eligibility filters and benefits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Promotion {
    pub id: i64,
    pub description: Option<String>,
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub filters: Vec<FilterCondition>,
    pub benefits: Vec<Benefit>,
    /// Higher wins. Absent means 0.
    pub priority: Option<i64>,
}

impl Promotion {
    /// Effective priority (absent → 0).
    #[inline]
    pub fn priority(&self) -> i64 {
        self.priority.unwrap_or(0)
    }

    /// Whether the promotion is in the active ("Vigente") state.
    pub fn is_active(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(ACTIVE_PROMOTION_STATUS)
    }

    /// Whether the promotion can be evaluated at all.
    pub fn is_evaluable(&self) -> bool {
        !self.filters.is_empty() && !self.benefits.is_empty()
    }
}

// =============================================================================
// Store & Stock
// =============================================================================

/// A physical store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Store {
    pub store_no: i64,
    pub name: String,
    pub address: Option<String>,
    pub warehouse: Option<String>,
    pub sap_code: Option<String>,
    pub brand: Option<String>,
}

/// Stock and price of one ALU at one store and price level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockLevel {
    pub store_no: i64,
    pub alu: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub price: Money,
    pub price_level: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_percentage() {
        assert_eq!(DiscountRate::from_percentage(25.0).bps(), 2500);
        assert_eq!(DiscountRate::from_percentage(12.5).bps(), 1250);
        assert_eq!(DiscountRate::from_percentage(-3.0), DiscountRate::zero());
        assert_eq!(DiscountRate::from_percentage(f64::NAN), DiscountRate::zero());
        assert!((DiscountRate::from_bps(825).percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_scalar_as_f64() {
        assert_eq!(Scalar::from(" 30 ").as_f64(), Some(30.0));
        assert_eq!(Scalar::from(12.5).as_f64(), Some(12.5));
        assert_eq!(Scalar::from("treinta").as_f64(), None);
        assert_eq!(Scalar::Number(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn test_scalar_deserializes_untagged() {
        let values: Vec<Scalar> = serde_json::from_str(r#"["20", 15.5]"#).unwrap();
        assert_eq!(values, vec![Scalar::from("20"), Scalar::from(15.5)]);
    }

    #[test]
    fn test_combinator_parse() {
        assert_eq!(Combinator::parse(Some("OR")), Combinator::Or);
        assert_eq!(Combinator::parse(Some(" or ")), Combinator::Or);
        assert_eq!(Combinator::parse(Some("AND")), Combinator::And);
        assert_eq!(Combinator::parse(None), Combinator::And);
        assert_eq!(Combinator::parse(Some("XOR")), Combinator::And);
    }

    #[test]
    fn test_benefit_percentage_only_for_percent_kind() {
        let pct = Benefit {
            kind: "P%".to_string(),
            value: Some(Scalar::from("30")),
            item_scope: None,
        };
        assert_eq!(pct.percentage(), Some(30.0));

        let fixed = Benefit {
            kind: "$".to_string(),
            value: Some(Scalar::from(5000.0)),
            item_scope: None,
        };
        assert_eq!(fixed.percentage(), None);

        let empty = Benefit {
            kind: "P%".to_string(),
            value: None,
            item_scope: None,
        };
        assert_eq!(empty.percentage(), None);
    }

    #[test]
    fn test_product_field_lookup() {
        let product = ProductAttributes {
            alu: "12345678901201M".to_string(),
            season: Some("VER2024".to_string()),
            ..Default::default()
        };
        assert_eq!(product.field(ProductField::Season), Some("VER2024"));
        assert_eq!(product.field(ProductField::Color), None);
    }

    #[test]
    fn test_promotion_priority_and_status() {
        let promo = Promotion {
            id: 7,
            description: None,
            start_date: None,
            end_date: None,
            status: "vigente".to_string(),
            filters: vec![],
            benefits: vec![],
            priority: None,
        };
        assert_eq!(promo.priority(), 0);
        assert!(promo.is_active());
        assert!(!promo.is_evaluable());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = ProductAttributes {
            alu: "A".to_string(),
            list_price: Some(Money::from_cents(100)),
            ..Default::default()
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["listPrice"], 100);
    }
}
