//! # Product Repository
//!
//! Database operations for products, prices and stock.
//!
//! ## Key Operations
//! - Product detail (attributes + list price) for the promotion engine
//! - Stock and price per store
//! - Color/size variants of a model in one store
//!
//! ## Variant Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  requested ALU 123456789RJOM                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prefix match in SQL:  substr(alu, 1, 9) = '123456789'                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────┐                                            │
//! │  │ 123456789RJOM   qty 2   │ ← same model, same layout: kept            │
//! │  │ 123456789AZU38  qty 1   │ ← kept                                     │
//! │  │ 12345678901RJOM qty 4   │ ← prefix matches, but model is 11 chars:   │
//! │  └─────────────────────────┘   dropped after Alu::parse                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vitrina_core::alu::{Alu, VariantStock};
use vitrina_core::{Money, ProductAttributes, StockLevel};

/// Price level holding the list price.
pub const LIST_PRICE_LEVEL: i64 = 1;

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    alu: String,
    description: Option<String>,
    display_window: Option<String>,
    season: Option<String>,
    collection: Option<String>,
    family: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    color: Option<String>,
    size: Option<String>,
    list_price_cents: Option<i64>,
}

impl From<ProductRow> for ProductAttributes {
    fn from(row: ProductRow) -> Self {
        ProductAttributes {
            alu: row.alu,
            description: row.description,
            window: row.display_window,
            season: row.season,
            collection: row.collection,
            family: row.family,
            brand: row.brand,
            model: row.model,
            color: row.color,
            size: row.size,
            list_price: row.list_price_cents.map(Money::from_cents),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StockRow {
    store_no: i64,
    alu: String,
    description: Option<String>,
    quantity: i64,
    price_cents: i64,
    price_level: i64,
}

impl From<StockRow> for StockLevel {
    fn from(row: StockRow) -> Self {
        StockLevel {
            store_no: row.store_no,
            alu: row.alu,
            description: row.description,
            quantity: row.quantity,
            price: Money::from_cents(row.price_cents),
            price_level: row.price_level,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    alu: String,
    quantity: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.get_detail("123456789RJOM").await?;
/// let stock = repo.stock_in_store(12, "123456789RJOM").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets the descriptive attributes and list price of an active product.
    ///
    /// ## Returns
    /// * `Ok(Some(_))` - Product found and active
    /// * `Ok(None)` - Unknown ALU or inactive product
    pub async fn get_detail(&self, alu: &str) -> DbResult<Option<ProductAttributes>> {
        debug!(alu = %alu, "Fetching product detail");

        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT
                p.alu,
                p.description,
                p.display_window,
                p.season,
                p.collection,
                p.family,
                p.brand,
                p.model,
                p.color,
                p.size,
                (SELECT pp.price_cents
                   FROM product_prices pp
                  WHERE pp.product_id = p.id AND pp.price_level = ?2) AS list_price_cents
            FROM products p
            WHERE p.alu = ?1
              AND p.is_active = 1
            "#,
        )
        .bind(alu)
        .bind(LIST_PRICE_LEVEL)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductAttributes::from))
    }

    /// Stock and price rows of one ALU at one store.
    ///
    /// One row per reported price level (1, 3, 5). Rows with zero quantity
    /// are skipped; negative quantities (pending adjustments) are reported.
    pub async fn stock_in_store(&self, store_no: i64, alu: &str) -> DbResult<Vec<StockLevel>> {
        let rows: Vec<StockRow> = sqlx::query_as(
            r#"
            SELECT i.store_no, p.alu, p.description, i.quantity,
                   pp.price_cents, pp.price_level
            FROM inventory i
            INNER JOIN products p ON p.id = i.product_id
            INNER JOIN product_prices pp
                    ON pp.product_id = p.id AND pp.price_level IN (1, 3, 5)
            WHERE p.alu = ?1
              AND i.store_no = ?2
              AND i.quantity <> 0
            ORDER BY pp.price_level
            "#,
        )
        .bind(alu)
        .bind(store_no)
        .fetch_all(&self.pool)
        .await?;

        debug!(alu = %alu, store_no, count = rows.len(), "Fetched store stock");
        Ok(rows.into_iter().map(StockLevel::from).collect())
    }

    /// Stock and price rows of one ALU in every store holding it (qty > 0),
    /// ordered by store.
    pub async fn stock_across_stores(&self, alu: &str) -> DbResult<Vec<StockLevel>> {
        let rows: Vec<StockRow> = sqlx::query_as(
            r#"
            SELECT i.store_no, p.alu, p.description, i.quantity,
                   pp.price_cents, pp.price_level
            FROM inventory i
            INNER JOIN products p ON p.id = i.product_id
            INNER JOIN product_prices pp
                    ON pp.product_id = p.id AND pp.price_level IN (1, 3, 5)
            WHERE p.alu = ?1
              AND i.quantity > 0
            ORDER BY i.store_no, pp.price_level
            "#,
        )
        .bind(alu)
        .fetch_all(&self.pool)
        .await?;

        debug!(alu = %alu, count = rows.len(), "Fetched stock across stores");
        Ok(rows.into_iter().map(StockLevel::from).collect())
    }

    /// In-stock ALUs of the same model (every color and size) at a store.
    pub async fn variants_in_store(&self, store_no: i64, alu: &Alu) -> DbResult<Vec<VariantStock>> {
        let rows = self.in_stock_with_prefix(store_no, alu.model()).await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| VariantStock::from_alu(&row.alu, row.quantity))
            .filter(|variant| same_model(&variant.alu, alu))
            .collect())
    }

    /// In-stock ALUs of the same model and color (every size) at a store.
    pub async fn sizes_in_store(&self, store_no: i64, alu: &Alu) -> DbResult<Vec<VariantStock>> {
        let rows = self.in_stock_with_prefix(store_no, alu.style()).await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| VariantStock::from_alu(&row.alu, row.quantity))
            .filter(|variant| same_model(&variant.alu, alu))
            .collect())
    }

    async fn in_stock_with_prefix(&self, store_no: i64, prefix: &str) -> DbResult<Vec<VariantRow>> {
        let rows: Vec<VariantRow> = sqlx::query_as(
            r#"
            SELECT p.alu, i.quantity
            FROM inventory i
            INNER JOIN products p ON p.id = i.product_id
            WHERE i.store_no = ?1
              AND i.quantity > 0
              AND substr(p.alu, 1, ?2) = ?3
            ORDER BY p.alu
            "#,
        )
        .bind(store_no)
        .bind(prefix.len() as i64)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        debug!(store_no, prefix = %prefix, count = rows.len(), "Fetched variant rows");
        Ok(rows)
    }

    /// Inserts a product. A present `list_price` is stored as price level 1.
    ///
    /// ## Returns
    /// The new product's row id.
    pub async fn insert(&self, product: &ProductAttributes) -> DbResult<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                alu, description, display_window, season, collection,
                family, brand, model, color, size
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&product.alu)
        .bind(&product.description)
        .bind(&product.window)
        .bind(&product.season)
        .bind(&product.collection)
        .bind(&product.family)
        .bind(&product.brand)
        .bind(&product.model)
        .bind(&product.color)
        .bind(&product.size)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        if let Some(price) = product.list_price {
            sqlx::query(
                "INSERT INTO product_prices (product_id, price_level, price_cents) VALUES (?1, ?2, ?3)",
            )
            .bind(id)
            .bind(LIST_PRICE_LEVEL)
            .bind(price.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(alu = %product.alu, id, "Inserted product");
        Ok(id)
    }

    /// Sets the price of an ALU at a price level.
    pub async fn set_price(&self, alu: &str, price_level: i64, price: Money) -> DbResult<()> {
        let product_id = self.require_id(alu).await?;

        sqlx::query(
            r#"
            INSERT INTO product_prices (product_id, price_level, price_cents)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(product_id, price_level) DO UPDATE SET price_cents = excluded.price_cents
            "#,
        )
        .bind(product_id)
        .bind(price_level)
        .bind(price.cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sets the on-hand quantity of an ALU at a store.
    pub async fn set_stock(&self, store_no: i64, alu: &str, quantity: i64) -> DbResult<()> {
        let product_id = self.require_id(alu).await?;

        sqlx::query(
            r#"
            INSERT INTO inventory (store_no, product_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(store_no, product_id) DO UPDATE SET
                quantity = excluded.quantity,
                updated_at = datetime('now')
            "#,
        )
        .bind(store_no)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        debug!(alu = %alu, store_no, quantity, "Set stock");
        Ok(())
    }

    async fn require_id(&self, alu: &str) -> DbResult<i64> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE alu = ?1")
            .bind(alu)
            .fetch_optional(&self.pool)
            .await?;

        id.ok_or_else(|| DbError::not_found("Product", alu))
    }
}

fn same_model(candidate: &str, requested: &Alu) -> bool {
    Alu::parse(candidate)
        .map(|parsed| parsed.model() == requested.model())
        .unwrap_or(false)
}

// =============================================================================
// Unit Tests
// =============================================================================
