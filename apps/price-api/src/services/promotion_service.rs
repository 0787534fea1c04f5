//! Promotion endpoints: the active promotions of a store and the best
//! promotion for one product at one store.
//!
//! ## Best-promotion flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/best-promotion/{alu}/{store_no}                               │
//! │        │                                                                │
//! │        ▼  validate_alu / validate_store_no                              │
//! │  tokio::try_join!                                                       │
//! │    ├── products().get_detail(alu)              ── None → 404           │
//! │    └── promotions().list_active_for_store(..)  ── []   → 404           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  select_best(product, promotions, policy)       (pure, synchronous)    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  BestPromotionResponse + summary                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use vitrina_core::promotion::select_best;
use vitrina_core::validation::validate_alu;
use vitrina_core::{
    CoreError, Money, ProductAttributes, Promotion, QualificationPolicy, RankedOffer,
};
use vitrina_db::Database;

use super::parse_store_no;
use crate::error::ApiError;
use crate::AppState;

/// Best-promotion answer for one product at one store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestPromotionResponse {
    pub product: ProductAttributes,
    /// Store number the promotions were fetched for.
    pub store: i64,
    pub best_offer: Option<RankedOffer>,
    pub ranked_offers: Vec<RankedOffer>,
    pub evaluated_count: usize,
    pub qualified_count: usize,
    pub query_timestamp: DateTime<Local>,
    pub summary: PriceSummary,
}

/// Headline numbers for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub original_price: Option<Money>,
    /// Winning percentage, `0.0` when nothing applies.
    pub best_discount: f64,
    /// Winning price, or the list price when nothing applies.
    pub best_final_price: Option<Money>,
    /// Number of qualifying promotions.
    pub total_available: usize,
}

/// Fetches the product and the store's promotions concurrently and runs the
/// engine over them.
///
/// `today` bounds promotion end dates; handlers pass the local date.
pub async fn evaluate_best_promotion(
    db: &Database,
    alu: &str,
    store_no: i64,
    policy: QualificationPolicy,
    today: NaiveDate,
) -> Result<BestPromotionResponse, ApiError> {
    let product_repo = db.products();
    let promotion_repo = db.promotions();

    let (product, promotions) = tokio::try_join!(
        product_repo.get_detail(alu),
        promotion_repo.list_active_for_store(store_no, today),
    )?;

    let product = product.ok_or_else(|| CoreError::ProductNotFound(alu.to_string()))?;
    if promotions.is_empty() {
        return Err(CoreError::NoActivePromotions(store_no).into());
    }

    let decision = select_best(&product, &promotions, policy);

    info!(
        alu = %alu,
        store_no,
        evaluated = decision.evaluated_count,
        qualified = decision.qualified_count,
        best = ?decision.best_offer.as_ref().map(|o| o.promotion_id),
        "Best promotion evaluated"
    );

    let summary = PriceSummary {
        original_price: product.list_price,
        best_discount: decision
            .best_offer
            .as_ref()
            .map(|offer| offer.discount)
            .unwrap_or(0.0),
        best_final_price: decision.final_price,
        total_available: decision.qualified_count,
    };

    Ok(BestPromotionResponse {
        product,
        store: store_no,
        best_offer: decision.best_offer,
        ranked_offers: decision.ranked_offers,
        evaluated_count: decision.evaluated_count,
        qualified_count: decision.qualified_count,
        query_timestamp: Local::now(),
        summary,
    })
}

/// `GET /api/best-promotion/{alu}/{store_no}`
pub async fn best_promotion(
    State(state): State<AppState>,
    Path((alu, store_no)): Path<(String, String)>,
) -> Result<Json<BestPromotionResponse>, ApiError> {
    let alu = validate_alu(&alu)?;
    let store_no = parse_store_no(&store_no)?;

    let response = evaluate_best_promotion(
        &state.db,
        &alu,
        store_no,
        state.policy,
        Local::now().date_naive(),
    )
    .await?;

    Ok(Json(response))
}

/// `GET /api/stores/{store_no}/promotions`
pub async fn store_promotions(
    State(state): State<AppState>,
    Path(store_no): Path<String>,
) -> Result<Json<Vec<Promotion>>, ApiError> {
    let store_no = parse_store_no(&store_no)?;

    let promotions = state
        .db
        .promotions()
        .list_active_for_store(store_no, Local::now().date_naive())
        .await?;

    if promotions.is_empty() {
        return Err(CoreError::NoActivePromotions(store_no).into());
    }

    debug!(store_no, count = promotions.len(), "Listed store promotions");
    Ok(Json(promotions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::test_support::{seeded_db, today};

    #[tokio::test]
    async fn test_best_offer_prefers_priority() {
        let db = seeded_db().await;

        let response = evaluate_best_promotion(
            &db,
            "123456789RJOM",
            1,
            QualificationPolicy::Reference,
            today(),
        )
        .await
        .unwrap();

        // 10: ROJO 25%, 11: prioritized ROJO 10%, 12: AZUL 50% (rejected)
        assert_eq!(response.evaluated_count, 3);
        assert_eq!(response.qualified_count, 2);
        let best = response.best_offer.as_ref().unwrap();
        assert_eq!(best.promotion_id, 11);
        assert_eq!(response.summary.best_discount, 10.0);
        assert_eq!(
            response.summary.best_final_price,
            Some(Money::from_cents(1_799_100))
        );
        assert_eq!(
            response.summary.original_price,
            Some(Money::from_cents(1_999_000))
        );
        assert_eq!(response.summary.total_available, 2);
        assert_eq!(response.store, 1);
    }

    #[tokio::test]
    async fn test_no_qualifying_offer_keeps_list_price() {
        let db = seeded_db().await;

        let response = evaluate_best_promotion(
            &db,
            "123456789NEGS",
            1,
            QualificationPolicy::Reference,
            today(),
        )
        .await
        .unwrap();

        assert!(response.best_offer.is_none());
        assert!(response.ranked_offers.is_empty());
        assert_eq!(response.summary.best_discount, 0.0);
        assert_eq!(
            response.summary.best_final_price,
            response.summary.original_price
        );
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let db = seeded_db().await;

        let err = evaluate_best_promotion(
            &db,
            "999999999XXXM",
            1,
            QualificationPolicy::Reference,
            today(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("999999999XXXM"));
    }

    #[tokio::test]
    async fn test_store_without_promotions_is_not_found() {
        let db = seeded_db().await;

        let err = evaluate_best_promotion(
            &db,
            "123456789RJOM",
            2,
            QualificationPolicy::Reference,
            today(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, "No active promotions for store 2");
    }

    #[tokio::test]
    async fn test_expired_promotions_are_ignored() {
        let db = seeded_db().await;
        let later = today().checked_add_days(chrono::Days::new(365)).unwrap();

        let err = evaluate_best_promotion(
            &db,
            "123456789RJOM",
            1,
            QualificationPolicy::Reference,
            later,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
