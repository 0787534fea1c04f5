//! # Store Repository
//!
//! Read access to the store directory.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use vitrina_core::Store;

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    store_no: i64,
    name: String,
    address: Option<String>,
    warehouse: Option<String>,
    sap_code: Option<String>,
    brand: Option<String>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            store_no: row.store_no,
            name: row.name,
            address: row.address,
            warehouse: row.warehouse,
            sap_code: row.sap_code,
            brand: row.brand,
        }
    }
}

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Lists active stores ordered by store number.
    ///
    /// Store 0 is the head office and never listed.
    pub async fn list_active(&self) -> DbResult<Vec<Store>> {
        let rows: Vec<StoreRow> = sqlx::query_as(
            r#"
            SELECT store_no, name, address, warehouse, sap_code, brand
            FROM stores
            WHERE is_active = 1
              AND store_no <> 0
            ORDER BY store_no
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed active stores");
        Ok(rows.into_iter().map(Store::from).collect())
    }

    /// Inserts or replaces a store.
    pub async fn upsert(&self, store: &Store, is_active: bool) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stores (store_no, name, address, warehouse, sap_code, brand, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(store_no) DO UPDATE SET
                name = excluded.name,
                address = excluded.address,
                warehouse = excluded.warehouse,
                sap_code = excluded.sap_code,
                brand = excluded.brand,
                is_active = excluded.is_active
            "#,
        )
        .bind(store.store_no)
        .bind(&store.name)
        .bind(&store.address)
        .bind(&store.warehouse)
        .bind(&store.sap_code)
        .bind(&store.brand)
        .bind(is_active)
        .execute(&self.pool)
        .await?;

        debug!(store_no = store.store_no, "Upserted store");
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

    fn store(store_no: i64, name: &str) -> Store {
        Store {
            store_no,
            name: name.to_string(),
            address: None,
            warehouse: Some(format!("B{:02}", store_no)),
            sap_code: None,
            brand: Some("ITALMOD".to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_active_orders_and_filters() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.stores();

        repo.upsert(&store(12, "Costanera"), true).await.unwrap();
        repo.upsert(&store(3, "Parque Arauco"), true).await.unwrap();
        repo.upsert(&store(7, "Cerrada"), false).await.unwrap();
        repo.upsert(&store(0, "Casa Matriz"), true).await.unwrap();

        let stores = repo.list_active().await.unwrap();
        let numbers: Vec<i64> = stores.iter().map(|s| s.store_no).collect();
        assert_eq!(numbers, vec![3, 12]);
        assert_eq!(stores[0].warehouse.as_deref(), Some("B03"));
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.stores();

        repo.upsert(&store(5, "Old"), true).await.unwrap();
        repo.upsert(&store(5, "New"), true).await.unwrap();

        let stores = repo.list_active().await.unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].name, "New");

        repo.upsert(&store(5, "New"), false).await.unwrap();
        assert!(repo.list_active().await.unwrap().is_empty());
    }
}
