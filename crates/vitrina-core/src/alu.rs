//! # ALU Codes
//!
//! An ALU is the retail product code. It encodes model, color and size
//! positionally, in one of two generations:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  legacy (13/14 chars)   123456789 │ RJO │ M / 38                        │
//! │                         model(9)  │ color(3) │ size(rest)               │
//! │                                                                         │
//! │  current (15/16 chars)  12345678901 │ AZU │ M / 38                      │
//! │                         model(11)   │ color(3) │ size(rest)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hyphens and spaces are stripped before measuring.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

const COLOR_CODE_LEN: usize = 3;

// =============================================================================
// Alu
// =============================================================================

/// A parsed ALU with a known model/color/size layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alu {
    code: String,
    model_len: usize,
}

impl Alu {
    /// Parses a raw ALU.
    ///
    /// ## Example
    /// ```rust
    /// use vitrina_core::alu::Alu;
    ///
    /// let alu = Alu::parse("123456789-RJO-38").unwrap();
    /// assert_eq!(alu.model(), "123456789");
    /// assert_eq!(alu.color_code(), "RJO");
    /// assert_eq!(alu.size(), "38");
    /// assert!(Alu::parse("12345").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let code: String = raw.chars().filter(|c| *c != '-' && *c != ' ').collect();

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidFormat {
                field: "alu".to_string(),
                reason: "must contain only letters and numbers".to_string(),
            });
        }

        let model_len = match code.len() {
            13 | 14 => 9,
            15 | 16 => 11,
            other => {
                return Err(ValidationError::InvalidFormat {
                    field: "alu".to_string(),
                    reason: format!("expected 13 to 16 characters, got {}", other),
                })
            }
        };

        Ok(Alu { code, model_len })
    }

    /// The cleaned code.
    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn model(&self) -> &str {
        &self.code[..self.model_len]
    }

    pub fn color_code(&self) -> &str {
        &self.code[self.model_len..self.model_len + COLOR_CODE_LEN]
    }

    pub fn size(&self) -> &str {
        &self.code[self.model_len + COLOR_CODE_LEN..]
    }

    /// Model prefix shared by every color and size of the product.
    pub fn base(&self) -> &str {
        self.model()
    }

    /// Model plus color: shared by every size of one colorway.
    pub fn style(&self) -> &str {
        &self.code[..self.model_len + COLOR_CODE_LEN]
    }
}

impl fmt::Display for Alu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

// =============================================================================
// Size Ordering
// =============================================================================

/// Orders sizes: numeric sizes first by value, then the rest lexically.
///
/// ```rust
/// use vitrina_core::alu::sort_sizes;
///
/// let mut sizes = vec!["M".to_string(), "40".to_string(), "8".to_string(), "L".to_string()];
/// sort_sizes(&mut sizes);
/// assert_eq!(sizes, ["8", "40", "L", "M"]);
/// ```
pub fn sort_sizes(sizes: &mut [String]) {
    sizes.sort_by(|a, b| compare_sizes(a, b));
}

fn compare_sizes(a: &str, b: &str) -> Ordering {
    match (numeric_size(a), numeric_size(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn numeric_size(size: &str) -> Option<u64> {
    if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    size.parse().ok()
}

// =============================================================================
// Variant Grouping
// =============================================================================

/// Stock of one concrete ALU, split into its color and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VariantStock {
    pub alu: String,
    pub color_code: String,
    pub size: String,
    pub quantity: i64,
}

impl VariantStock {
    /// Splits a stock row by its ALU. Codes with no known layout → `None`.
    pub fn from_alu(alu: &str, quantity: i64) -> Option<Self> {
        let parsed = Alu::parse(alu).ok()?;
        Some(VariantStock {
            alu: parsed.as_str().to_string(),
            color_code: parsed.color_code().to_string(),
            size: parsed.size().to_string(),
            quantity,
        })
    }
}

/// One size of a colorway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SizeStock {
    pub size: String,
    pub quantity: i64,
    pub alu: String,
}

/// All in-stock sizes of one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ColorVariants {
    pub code: String,
    pub sizes: Vec<SizeStock>,
    pub total: i64,
}

/// Colors and sizes of a model in stock at one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VariantSummary {
    pub colors: Vec<ColorVariants>,
    pub available_sizes: Vec<String>,
}

/// Groups stock rows by color (first-seen order) and collects the distinct
/// sizes in [`sort_sizes`] order.
pub fn group_variants(rows: &[VariantStock]) -> VariantSummary {
    let mut colors: Vec<ColorVariants> = Vec::new();
    let mut available_sizes: Vec<String> = Vec::new();

    for row in rows {
        let index = match colors.iter().position(|c| c.code == row.color_code) {
            Some(index) => index,
            None => {
                colors.push(ColorVariants {
                    code: row.color_code.clone(),
                    sizes: Vec::new(),
                    total: 0,
                });
                colors.len() - 1
            }
        };

        let color = &mut colors[index];
        color.sizes.push(SizeStock {
            size: row.size.clone(),
            quantity: row.quantity,
            alu: row.alu.clone(),
        });
        color.total += row.quantity;

        if !available_sizes.contains(&row.size) {
            available_sizes.push(row.size.clone());
        }
    }

    sort_sizes(&mut available_sizes);
    VariantSummary {
        colors,
        available_sizes,
    }
}

/// Quantity of one size summed over every matching ALU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SizeTotal {
    pub size: String,
    pub quantity: i64,
}

/// Sums quantities per size. Sizes are trimmed and upper-cased first so
/// `"m "` and `"M"` count together. Blank sizes are dropped.
pub fn total_by_size(rows: &[VariantStock]) -> Vec<SizeTotal> {
    let mut totals: Vec<SizeTotal> = Vec::new();

    for row in rows {
        let size = row.size.trim().to_uppercase();
        if size.is_empty() {
            continue;
        }
        match totals.iter_mut().find(|t| t.size == size) {
            Some(total) => total.quantity += row.quantity,
            None => totals.push(SizeTotal {
                size,
                quantity: row.quantity,
            }),
        }
    }

    totals.sort_by(|a, b| compare_sizes(&a.size, &b.size));
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(alu: &str, qty: i64) -> VariantStock {
        VariantStock::from_alu(alu, qty).unwrap()
    }

    #[test]
    fn test_parse_legacy_layout() {
        let alu = Alu::parse("123456789RJOM").unwrap();
        assert_eq!(alu.model(), "123456789");
        assert_eq!(alu.color_code(), "RJO");
        assert_eq!(alu.size(), "M");
        assert_eq!(alu.style(), "123456789RJO");

        let alu = Alu::parse("123456789RJO38").unwrap();
        assert_eq!(alu.size(), "38");
    }

    #[test]
    fn test_parse_current_layout() {
        let alu = Alu::parse("12345678901AZUXL").unwrap();
        assert_eq!(alu.base(), "12345678901");
        assert_eq!(alu.color_code(), "AZU");
        assert_eq!(alu.size(), "XL");
    }

    #[test]
    fn test_parse_strips_separators() {
        let alu = Alu::parse(" 12345678901-AZU 40 ").unwrap();
        assert_eq!(alu.as_str(), "12345678901AZU40");
        assert_eq!(alu.to_string(), "12345678901AZU40");
    }

    #[test]
    fn test_parse_rejects_other_lengths() {
        for raw in ["", "123456789012", "12345678901234567", "ABC"] {
            assert!(matches!(
                Alu::parse(raw),
                Err(ValidationError::InvalidFormat { .. })
            ));
        }
        // multibyte characters never reach the positional slicing
        assert!(Alu::parse("123456789ÑÑÑM").is_err());
    }

    #[test]
    fn test_sort_sizes_numeric_first() {
        let mut sizes: Vec<String> = ["XL", "42", "S", "9", "38", "M"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_sizes(&mut sizes);
        assert_eq!(sizes, ["9", "38", "42", "M", "S", "XL"]);
    }

    #[test]
    fn test_group_variants_keeps_first_seen_color_order() {
        let rows = vec![
            row("123456789RJOM", 2),
            row("123456789AZUS", 1),
            row("123456789RJOL", 3),
            row("123456789AZUM", 4),
        ];
        let summary = group_variants(&rows);

        let codes: Vec<&str> = summary.colors.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["RJO", "AZU"]);
        assert_eq!(summary.colors[0].total, 5);
        assert_eq!(summary.colors[1].total, 5);
        assert_eq!(summary.colors[0].sizes[1].alu, "123456789RJOL");
        assert_eq!(summary.available_sizes, ["L", "M", "S"]);
    }

    #[test]
    fn test_group_variants_empty() {
        let summary = group_variants(&[]);
        assert!(summary.colors.is_empty());
        assert!(summary.available_sizes.is_empty());
    }

    #[test]
    fn test_total_by_size_merges_and_orders() {
        let rows = vec![
            row("123456789RJOM", 2),
            row("12345678901RJO40", 1),
            row("123456789RJO38", 3),
            VariantStock {
                alu: "X".to_string(),
                color_code: "RJO".to_string(),
                size: "m ".to_string(),
                quantity: 5,
            },
        ];
        let totals = total_by_size(&rows);
        assert_eq!(
            totals,
            vec![
                SizeTotal { size: "38".to_string(), quantity: 3 },
                SizeTotal { size: "40".to_string(), quantity: 1 },
                SizeTotal { size: "M".to_string(), quantity: 7 },
            ]
        );
    }
}
