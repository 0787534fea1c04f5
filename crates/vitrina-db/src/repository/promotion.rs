//! # Promotion Repository
//!
//! Loads a store's active promotions with their filters and benefits
//! attached, in the shape the promotion engine consumes.
//!
//! ## Query Plan
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. headers   promotions ⋈ promotion_stores   (store, end_date >= today)│
//! │  2. filters   promotion_filters  ⋈ promotion_stores   (position order)  │
//! │  3. benefits  promotion_benefits ⋈ promotion_stores   (position order)  │
//! │                                                                         │
//! │  Three queries per call regardless of promotion count; children are     │
//! │  grouped by promotion id in memory.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

use crate::error::DbResult;
use vitrina_core::{Benefit, Combinator, FilterCondition, Promotion, Scalar};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct PromotionRow {
    id: i64,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: String,
    priority: Option<i64>,
}

#[derive(Debug, sqlx::FromRow)]
struct FilterRow {
    promotion_id: i64,
    column_name: String,
    condition: String,
    value: Option<String>,
    operator: Option<String>,
    filter_text: Option<String>,
}

impl From<FilterRow> for FilterCondition {
    fn from(row: FilterRow) -> Self {
        FilterCondition {
            column: row.column_name,
            condition: row.condition,
            value: row.value,
            operator: Combinator::parse(row.operator.as_deref()),
            filter_text: row.filter_text,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BenefitRow {
    promotion_id: i64,
    kind: String,
    value: Option<String>,
    item_scope: Option<String>,
}

impl From<BenefitRow> for Benefit {
    fn from(row: BenefitRow) -> Self {
        Benefit {
            kind: row.kind,
            value: row.value.map(Scalar::Text),
            item_scope: row.item_scope,
        }
    }
}

fn combinator_token(operator: Combinator) -> &'static str {
    match operator {
        Combinator::And => "AND",
        Combinator::Or => "OR",
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for promotion database operations.
#[derive(Debug, Clone)]
pub struct PromotionRepository {
    pool: SqlitePool,
}

impl PromotionRepository {
    /// Creates a new PromotionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PromotionRepository { pool }
    }

    /// Active promotions assigned to a store, newest id first.
    ///
    /// A promotion is active when its status is `Vigente` and its end date
    /// is today or later (or absent). Start dates are not checked.
    pub async fn list_active_for_store(
        &self,
        store_no: i64,
        today: NaiveDate,
    ) -> DbResult<Vec<Promotion>> {
        let headers: Vec<PromotionRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.description, p.start_date, p.end_date, p.status, p.priority
            FROM promotions p
            INNER JOIN promotion_stores ps ON ps.promotion_id = p.id
            WHERE ps.store_no = ?1
              AND (p.end_date IS NULL OR p.end_date >= ?2)
            ORDER BY p.id DESC
            "#,
        )
        .bind(store_no)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        if headers.is_empty() {
            debug!(store_no, "No current promotions");
            return Ok(Vec::new());
        }

        let filter_rows: Vec<FilterRow> = sqlx::query_as(
            r#"
            SELECT f.promotion_id, f.column_name, f.condition, f.value, f.operator, f.filter_text
            FROM promotion_filters f
            INNER JOIN promotion_stores ps ON ps.promotion_id = f.promotion_id
            WHERE ps.store_no = ?1
            ORDER BY f.promotion_id, f.position, f.id
            "#,
        )
        .bind(store_no)
        .fetch_all(&self.pool)
        .await?;

        let benefit_rows: Vec<BenefitRow> = sqlx::query_as(
            r#"
            SELECT b.promotion_id, b.kind, b.value, b.item_scope
            FROM promotion_benefits b
            INNER JOIN promotion_stores ps ON ps.promotion_id = b.promotion_id
            WHERE ps.store_no = ?1
            ORDER BY b.promotion_id, b.position, b.id
            "#,
        )
        .bind(store_no)
        .fetch_all(&self.pool)
        .await?;

        let mut filters: HashMap<i64, Vec<FilterCondition>> = HashMap::new();
        for row in filter_rows {
            filters.entry(row.promotion_id).or_default().push(row.into());
        }

        let mut benefits: HashMap<i64, Vec<Benefit>> = HashMap::new();
        for row in benefit_rows {
            benefits.entry(row.promotion_id).or_default().push(row.into());
        }

        let promotions: Vec<Promotion> = headers
            .into_iter()
            .map(|row| Promotion {
                id: row.id,
                description: row.description,
                start_date: row.start_date,
                end_date: row.end_date,
                status: row.status,
                filters: filters.remove(&row.id).unwrap_or_default(),
                benefits: benefits.remove(&row.id).unwrap_or_default(),
                priority: row.priority,
            })
            .filter(Promotion::is_active)
            .collect();

        debug!(store_no, count = promotions.len(), "Loaded active promotions");
        Ok(promotions)
    }

    /// Inserts a promotion with its filters and benefits and assigns it to
    /// the given stores, in one transaction.
    pub async fn insert(&self, promotion: &Promotion, store_nos: &[i64]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO promotions (id, description, start_date, end_date, status, priority)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(promotion.id)
        .bind(&promotion.description)
        .bind(promotion.start_date)
        .bind(promotion.end_date)
        .bind(&promotion.status)
        .bind(promotion.priority)
        .execute(&mut *tx)
        .await?;

        for store_no in store_nos {
            sqlx::query("INSERT INTO promotion_stores (promotion_id, store_no) VALUES (?1, ?2)")
                .bind(promotion.id)
                .bind(store_no)
                .execute(&mut *tx)
                .await?;
        }

        for (position, filter) in promotion.filters.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO promotion_filters
                    (promotion_id, position, column_name, condition, value, operator, filter_text)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(promotion.id)
            .bind(position as i64)
            .bind(&filter.column)
            .bind(&filter.condition)
            .bind(&filter.value)
            .bind(combinator_token(filter.operator))
            .bind(&filter.filter_text)
            .execute(&mut *tx)
            .await?;
        }

        for (position, benefit) in promotion.benefits.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO promotion_benefits (promotion_id, position, kind, value, item_scope)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(promotion.id)
            .bind(position as i64)
            .bind(&benefit.kind)
            .bind(benefit.value.as_ref().map(|v| v.to_string()))
            .bind(&benefit.item_scope)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(
            id = promotion.id,
            stores = store_nos.len(),
            filters = promotion.filters.len(),
            benefits = promotion.benefits.len(),
            "Inserted promotion"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use vitrina_core::Store;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for store_no in [1, 2] {
            let store = Store {
                store_no,
                name: format!("Tienda {}", store_no),
                address: None,
                warehouse: None,
                sap_code: None,
                brand: None,
            };
            db.stores().upsert(&store, true).await.unwrap();
        }
        db
    }

    fn promotion(id: i64, status: &str, end_date: Option<NaiveDate>) -> Promotion {
        Promotion {
            id,
            description: Some(format!("Promo {}", id)),
            start_date: Some(date(2024, 1, 1)),
            end_date,
            status: status.to_string(),
            filters: vec![
                FilterCondition {
                    column: "UDF12_VALUE".to_string(),
                    condition: "=".to_string(),
                    value: Some("ROJO".to_string()),
                    operator: Combinator::Or,
                    filter_text: Some("Color = ROJO".to_string()),
                },
                FilterCondition {
                    column: "UDF7_VALUE".to_string(),
                    condition: "TEMPORADA".to_string(),
                    value: Some("2023-2025".to_string()),
                    operator: Combinator::And,
                    filter_text: None,
                },
            ],
            benefits: vec![
                Benefit {
                    kind: "P%".to_string(),
                    value: Some(Scalar::Number(25.0)),
                    item_scope: None,
                },
                Benefit {
                    kind: "$".to_string(),
                    value: None,
                    item_scope: Some("ALL".to_string()),
                },
            ],
            priority: Some(id % 3),
        }
    }

    #[tokio::test]
    async fn test_list_active_for_store_filters_and_orders() {
        let db = setup().await;
        let repo = db.promotions();
        let today = date(2025, 6, 15);

        repo.insert(&promotion(10, "Vigente", Some(date(2025, 6, 15))), &[1]).await.unwrap();
        repo.insert(&promotion(11, "Vigente", None), &[1, 2]).await.unwrap();
        repo.insert(&promotion(12, "Vigente", Some(date(2025, 6, 14))), &[1]).await.unwrap();
        repo.insert(&promotion(13, "Anulada", Some(date(2026, 1, 1))), &[1]).await.unwrap();
        repo.insert(&promotion(14, "Vigente", Some(date(2026, 1, 1))), &[2]).await.unwrap();

        let promos = repo.list_active_for_store(1, today).await.unwrap();
        let ids: Vec<i64> = promos.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![11, 10]);

        let promos = repo.list_active_for_store(2, today).await.unwrap();
        let ids: Vec<i64> = promos.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![14, 11]);
    }

    #[tokio::test]
    async fn test_children_round_trip_in_order() {
        let db = setup().await;
        let repo = db.promotions();
        repo.insert(&promotion(7, "Vigente", None), &[1]).await.unwrap();

        let promos = repo.list_active_for_store(1, date(2025, 1, 1)).await.unwrap();
        let promo = &promos[0];

        assert_eq!(promo.priority, Some(1));
        assert_eq!(promo.start_date, Some(date(2024, 1, 1)));
        assert_eq!(promo.filters.len(), 2);
        assert_eq!(promo.filters[0].column, "UDF12_VALUE");
        assert_eq!(promo.filters[0].operator, Combinator::Or);
        assert_eq!(promo.filters[1].value.as_deref(), Some("2023-2025"));

        // numeric benefit values come back as text and still parse
        assert_eq!(promo.benefits[0].percentage(), Some(25.0));
        assert_eq!(promo.benefits[1].item_scope.as_deref(), Some("ALL"));
    }

    #[tokio::test]
    async fn test_missing_operator_defaults_to_and() {
        let db = setup().await;
        let mut promo = promotion(3, "Vigente", None);
        promo.filters.truncate(1);
        db.promotions().insert(&promo, &[1]).await.unwrap();

        sqlx::query("UPDATE promotion_filters SET operator = NULL WHERE promotion_id = 3")
            .execute(db.pool())
            .await
            .unwrap();

        let promos = db.promotions().list_active_for_store(1, date(2025, 1, 1)).await.unwrap();
        assert_eq!(promos[0].filters[0].operator, Combinator::And);
    }

    #[tokio::test]
    async fn test_promotion_without_children_is_still_listed() {
        let db = setup().await;
        let mut promo = promotion(5, "Vigente", None);
        promo.filters.clear();
        promo.benefits.clear();
        db.promotions().insert(&promo, &[1]).await.unwrap();

        let promos = db.promotions().list_active_for_store(1, date(2025, 1, 1)).await.unwrap();
        assert_eq!(promos.len(), 1);
        assert!(!promos[0].is_evaluable());
    }

    #[tokio::test]
    async fn test_empty_store() {
        let db = setup().await;
        let promos = db.promotions().list_active_for_store(2, date(2025, 1, 1)).await.unwrap();
        assert!(promos.is_empty());
    }
}
