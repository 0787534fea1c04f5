//! # Offer Selector
//!
//! Ranks the qualifying promotions of a store and picks the winner.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  promotions ──► qualify() ──► best P% benefit > 0? ──► RankedOffer     │
//! │                    │                  │                     │           │
//! │                    ▼                  ▼                     ▼           │
//! │                 rejected           skipped        stable sort by:       │
//! │                                                    1. priority  DESC    │
//! │                                                    2. discount  DESC    │
//! │                                                           │             │
//! │                                                           ▼             │
//! │                                              head = best_offer          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `P%` benefits drive selection. Other kinds ride along on the offer
//! for display.

use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::qualifier::{qualify, Qualification, QualificationPolicy};
use crate::money::Money;
use crate::types::{Benefit, DiscountRate, ProductAttributes, Promotion};

// =============================================================================
// Per-Promotion Evaluation
// =============================================================================

/// Full evaluation of one promotion against one product.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromotionEvaluation {
    pub promotion_id: i64,
    pub qualification: Qualification,
    /// Selected percentage, present only when qualifying with a usable discount.
    pub discount: Option<f64>,
    pub final_price: Option<Money>,
}

/// Largest numeric `P%` benefit of a promotion. Unparseable values are skipped.
pub fn best_percentage(promotion: &Promotion) -> Option<f64> {
    promotion
        .benefits
        .iter()
        .filter_map(Benefit::percentage)
        .fold(None, |best: Option<f64>, pct| match best {
            Some(current) if current >= pct => Some(current),
            _ => Some(pct),
        })
}

/// Qualifies a promotion and, when it applies, computes its discount and price.
pub fn evaluate_promotion(
    product: &ProductAttributes,
    promotion: &Promotion,
    policy: QualificationPolicy,
) -> PromotionEvaluation {
    let qualification = qualify(product, promotion, policy);

    let discount = if qualification.qualifies {
        best_percentage(promotion).filter(|pct| *pct > 0.0)
    } else {
        None
    };
    let final_price = discount.and_then(|pct| discounted_price(product.list_price, pct));

    PromotionEvaluation {
        promotion_id: promotion.id,
        qualification,
        discount,
        final_price,
    }
}

fn discounted_price(list_price: Option<Money>, pct: f64) -> Option<Money> {
    list_price.map(|price| price.apply_percentage(pct))
}

// =============================================================================
// Ranking
// =============================================================================

/// A qualifying promotion with its computed discount.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RankedOffer {
    pub promotion_id: i64,
    pub description: Option<String>,
    /// Percentage as stored on the benefit (e.g. `25.0`).
    pub discount: f64,
    /// Discount rounded to basis points, for display. Prices use `discount`.
    pub rate: DiscountRate,
    /// `None` when the product has no list price.
    pub final_price: Option<Money>,
    pub priority: i64,
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    pub benefits: Vec<Benefit>,
}

/// Result of selecting the best offer for one product.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OfferDecision {
    pub best_offer: Option<RankedOffer>,
    pub ranked_offers: Vec<RankedOffer>,
    /// Number of promotions received.
    pub evaluated_count: usize,
    /// Number of promotions in `ranked_offers`.
    pub qualified_count: usize,
    /// Best offer's price, or the list price when nothing applies.
    pub final_price: Option<Money>,
}

/// Evaluates every promotion and ranks the ones that apply.
///
/// ## Example
/// ```rust
/// use vitrina_core::promotion::{select_best, QualificationPolicy};
/// use vitrina_core::{Money, ProductAttributes};
///
/// let product = ProductAttributes {
///     alu: "ABC".to_string(),
///     list_price: Some(Money::from_cents(1_999_000)),
///     ..Default::default()
/// };
/// let decision = select_best(&product, &[], QualificationPolicy::Reference);
/// assert!(decision.best_offer.is_none());
/// assert_eq!(decision.final_price, product.list_price);
/// ```
pub fn select_best(
    product: &ProductAttributes,
    promotions: &[Promotion],
    policy: QualificationPolicy,
) -> OfferDecision {
    let mut ranked: Vec<RankedOffer> = promotions
        .iter()
        .filter_map(|promotion| {
            let evaluation = evaluate_promotion(product, promotion, policy);
            let pct = evaluation.discount?;
            Some(RankedOffer {
                promotion_id: promotion.id,
                description: promotion.description.clone(),
                discount: pct,
                rate: DiscountRate::from_percentage(pct),
                final_price: evaluation.final_price,
                priority: promotion.priority(),
                start_date: promotion.start_date,
                end_date: promotion.end_date,
                benefits: promotion.benefits.clone(),
            })
        })
        .collect();

    // sort_by is stable: equal keys keep input order
    ranked.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.discount.total_cmp(&a.discount))
    });

    let best_offer = ranked.first().cloned();
    let final_price = match &best_offer {
        Some(offer) => offer.final_price,
        None => product.list_price,
    };

    OfferDecision {
        qualified_count: ranked.len(),
        evaluated_count: promotions.len(),
        best_offer,
        ranked_offers: ranked,
        final_price,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::fixtures::{and, benefit, pct, product, promotion};
    use crate::types::Scalar;

    fn red_only(id: i64, priority: i64, discount: &str) -> Promotion {
        let mut promo = promotion(id, vec![and("UDF12_VALUE", "=", "ROJO")], vec![pct(discount)]);
        promo.priority = Some(priority);
        promo
    }

    #[test]
    fn test_priority_beats_discount() {
        let promos = [red_only(1, 1, "30"), red_only(2, 2, "10")];
        let decision = select_best(&product(), &promos, QualificationPolicy::Reference);
        let best = decision.best_offer.unwrap();
        assert_eq!(best.promotion_id, 2);
        assert_eq!(best.discount, 10.0);
        assert_eq!(decision.qualified_count, 2);
    }

    #[test]
    fn test_equal_priority_larger_discount_wins() {
        let promos = [red_only(1, 1, "10"), red_only(2, 1, "30")];
        let decision = select_best(&product(), &promos, QualificationPolicy::Reference);
        assert_eq!(decision.best_offer.unwrap().promotion_id, 2);
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let promos = [red_only(5, 0, "20"), red_only(3, 0, "20"), red_only(9, 0, "20")];
        let decision = select_best(&product(), &promos, QualificationPolicy::Reference);
        let ids: Vec<i64> = decision.ranked_offers.iter().map(|o| o.promotion_id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_three_decimal_percentage_prices_exactly() {
        let mut item = product();
        item.list_price = Some(Money::from_major_minor(10_000, 0));

        let decision = select_best(&item, &[red_only(1, 0, "12.345")], QualificationPolicy::Reference);

        assert_eq!(decision.final_price, Some(Money::from_cents(876_550)));
        let offer = decision.best_offer.unwrap();
        assert_eq!(offer.discount, 12.345);
    }

    #[test]
    fn test_final_price_rounds_to_cents() {
        let decision = select_best(&product(), &[red_only(1, 0, "25")], QualificationPolicy::Reference);
        assert_eq!(decision.final_price, Some(Money::from_cents(1_499_250)));
        assert_eq!(decision.best_offer.unwrap().rate, DiscountRate::from_bps(2500));
    }

    #[test]
    fn test_no_qualifying_promotion_keeps_list_price() {
        let mut promo = red_only(1, 0, "25");
        promo.filters = vec![and("UDF12_VALUE", "=", "AZUL")];
        let decision = select_best(&product(), &[promo], QualificationPolicy::Reference);
        assert!(decision.best_offer.is_none());
        assert_eq!(decision.final_price, product().list_price);
        assert_eq!(decision.evaluated_count, 1);
        assert_eq!(decision.qualified_count, 0);
    }

    #[test]
    fn test_empty_filters_or_benefits_never_ranked() {
        let no_filters = promotion(1, vec![], vec![pct("50")]);
        let no_benefits = promotion(2, vec![and("UDF12_VALUE", "=", "ROJO")], vec![]);
        let decision = select_best(
            &product(),
            &[no_filters, no_benefits],
            QualificationPolicy::StrictOr,
        );
        assert!(decision.ranked_offers.is_empty());
        assert_eq!(decision.evaluated_count, 2);
    }

    #[test]
    fn test_best_percentage_skips_unusable_benefits() {
        let promo = promotion(
            1,
            vec![and("UDF12_VALUE", "=", "ROJO")],
            vec![
                pct("abc"),
                benefit("$", Some(Scalar::from(90.0))),
                pct("15"),
                benefit(" P% ", Some(Scalar::from(20.0))),
                benefit("P%", None),
            ],
        );
        assert_eq!(best_percentage(&promo), Some(20.0));
    }

    #[test]
    fn test_zero_discount_is_not_an_offer() {
        let decision = select_best(&product(), &[red_only(1, 9, "0")], QualificationPolicy::Reference);
        assert!(decision.best_offer.is_none());
        assert_eq!(decision.qualified_count, 0);
    }

    #[test]
    fn test_missing_list_price_still_ranks() {
        let mut item = product();
        item.list_price = None;
        let decision = select_best(&item, &[red_only(1, 0, "25")], QualificationPolicy::Reference);
        let best = decision.best_offer.unwrap();
        assert_eq!(best.final_price, None);
        assert_eq!(decision.final_price, None);
    }

    #[test]
    fn test_evaluation_reports_diagnostics() {
        let mut promo = red_only(4, 0, "25");
        promo.filters = vec![and("UDF13_VALUE", "=", "XL")];
        let evaluation = evaluate_promotion(&product(), &promo, QualificationPolicy::Reference);
        assert_eq!(evaluation.promotion_id, 4);
        assert!(!evaluation.qualification.qualifies);
        assert_eq!(evaluation.qualification.unmet, vec!["size: M = XL".to_string()]);
        assert_eq!(evaluation.discount, None);
    }
}
