//! # Repository Module
//!
//! Database repository implementations for Vitrina.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  db.promotions().list_active_for_store(12, today)               │
//! │       ▼                                                                 │
//! │  PromotionRepository                                                    │
//! │  ├── header query  (promotions ⋈ promotion_stores)                      │
//! │  ├── filter query  (promotion_filters, position order)                  │
//! │  └── benefit query (promotion_benefits, position order)                 │
//! │       │                                                                 │
//! │       │  rows (FromRow) → vitrina_core types                            │
//! │       ▼                                                                 │
//! │  Vec<Promotion> ready for the engine                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries are bound at runtime (`sqlx::query_as` + `#[derive(FromRow)]`
//! row structs) and converted into `vitrina_core` types at the boundary.
//!
//! ## Available Repositories
//!
//! - [`StoreRepository`](store::StoreRepository) - Store directory
//! - [`ProductRepository`](product::ProductRepository) - Product detail, stock, variants
//! - [`PromotionRepository`](promotion::PromotionRepository) - Active promotions per store

pub mod product;
pub mod promotion;
pub mod store;
