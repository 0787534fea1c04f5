//! # Vitrina Price API
//!
//! HTTP server for catalog lookups and best-promotion pricing.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Price API Routes                               │
//! │                                                                         │
//! │  ┌────────────────────────┐  ┌────────────────────────────────────────┐│
//! │  │  catalog_service       │  │  promotion_service                     ││
//! │  │                        │  │                                        ││
//! │  │ • /api/stores          │  │ • /api/stores/{store_no}/promotions    ││
//! │  │ • /api/products/{alu}  │  │ • /api/best-promotion/{alu}/{store_no} ││
//! │  │ • …/{alu}/stores       │  │                                        ││
//! │  │ • …/products/{alu}     │  └────────────────────────────────────────┘│
//! │  │ • …/variants/{alu}     │                                            │
//! │  │ • …/sizes/{alu}        │  ┌────────────────┐                        │
//! │  └────────────────────────┘  │ health_service │  • /health             │
//! │                              └────────────────┘                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState { db: Database (SQLite pool), policy }                 │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`]. Environment variables:
//! - `VITRINA_HOST` - Interface to bind (default: 0.0.0.0)
//! - `VITRINA_PORT` - HTTP port (default: 8080)
//! - `VITRINA_DATABASE_PATH` - SQLite file (default: ./vitrina.db)
//! - `VITRINA_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `VITRINA_ENGINE__STRICT_OR` - Accept satisfied OR conditions outright
//! - `RUST_LOG` - Log filter (default: info)

pub mod config;
pub mod error;
pub mod services;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use vitrina_core::QualificationPolicy;
use vitrina_db::Database;

use crate::services::{catalog_service, health_service, promotion_service};

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};

/// Shared application state. Cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub policy: QualificationPolicy,
}

impl AppState {
    pub fn new(db: Database, policy: QualificationPolicy) -> Self {
        AppState { db, policy }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_service::health))
        .route("/api/stores", get(catalog_service::list_stores))
        .route("/api/products/{alu}", get(catalog_service::get_product))
        .route(
            "/api/products/{alu}/stores",
            get(catalog_service::product_stores),
        )
        .route(
            "/api/stores/{store_no}/products/{alu}",
            get(catalog_service::store_product),
        )
        .route(
            "/api/stores/{store_no}/variants/{alu}",
            get(catalog_service::store_variants),
        )
        .route(
            "/api/stores/{store_no}/sizes/{alu}",
            get(catalog_service::store_sizes),
        )
        .route(
            "/api/stores/{store_no}/promotions",
            get(promotion_service::store_promotions),
        )
        .route(
            "/api/best-promotion/{alu}/{store_no}",
            get(promotion_service::best_promotion),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Router Tests
// =============================================================================
