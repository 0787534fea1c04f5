//! # vitrina-db: Database Layer for Vitrina
//!
//! This crate provides database access for the Vitrina price API.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrina Data Flow                                │
//! │                                                                         │
//! │  GET /api/best-promotion/{alu}/{store_no}                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vitrina-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ StoreRepo      │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │   │ 001_init.sql │   │   │
//! │  │   │ WAL, FKs on   │    │ PromotionRepo  │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductAttributes + Vec<Promotion>  ──►  vitrina_core::promotion       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (store, product, promotion)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrina_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./vitrina.db")).await?;
//!
//! let product = db.products().get_detail("123456789RJOM").await?;
//! let promotions = db.promotions().list_active_for_store(12, today).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::promotion::PromotionRepository;
pub use repository::store::StoreRepository;
