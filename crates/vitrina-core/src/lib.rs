//! # vitrina-core: Pure Pricing Logic for Vitrina
//!
//! This crate is the **heart** of Vitrina. It decides which of a store's
//! active promotions apply to a product and which one wins, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrina Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    price-api (axum)                             │   │
//! │  │    /api/products ──► /api/stores ──► /api/best-promotion        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ vitrina-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ promotion │  │    alu    │  │ validation│  │   │
//! │  │   │ Promotion │  │  qualify  │  │ model/    │  │  ALU,     │  │   │
//! │  │   │ Product   │  │  select   │  │ color/size│  │  store no │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  vitrina-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductAttributes, Promotion, Store, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`promotion`] - Condition evaluation, qualification and offer selection
//! - [`alu`] - ALU code layout and variant grouping
//! - [`error`] - Domain error types
//! - [`validation`] - Path parameter validation
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrina_core::promotion::{select_best, QualificationPolicy};
//! use vitrina_core::{Benefit, Combinator, FilterCondition, Money, ProductAttributes, Promotion, Scalar};
//!
//! let product = ProductAttributes {
//!     alu: "123456789RJOM".to_string(),
//!     color: Some("Rojo".to_string()),
//!     list_price: Some(Money::from_cents(1_999_000)),
//!     ..Default::default()
//! };
//! let promotion = Promotion {
//!     id: 1,
//!     description: Some("Rojos 25%".to_string()),
//!     start_date: None,
//!     end_date: None,
//!     status: "Vigente".to_string(),
//!     filters: vec![FilterCondition {
//!         column: "UDF12_VALUE".to_string(),
//!         condition: "=".to_string(),
//!         value: Some("ROJO".to_string()),
//!         operator: Combinator::And,
//!         filter_text: None,
//!     }],
//!     benefits: vec![Benefit {
//!         kind: "P%".to_string(),
//!         value: Some(Scalar::from("25")),
//!         item_scope: None,
//!     }],
//!     priority: None,
//! };
//!
//! let decision = select_best(&product, &[promotion], QualificationPolicy::Reference);
//! assert_eq!(decision.final_price, Some(Money::from_cents(1_499_250)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod alu;
pub mod error;
pub mod money;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vitrina_core::Money` instead of
// `use vitrina_core::money::Money`

pub use alu::Alu;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use promotion::{OfferDecision, QualificationPolicy, RankedOffer};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Promotion status of the active state, as written by the back office.
pub const ACTIVE_PROMOTION_STATUS: &str = "Vigente";

/// Benefit kind that carries a percentage discount.
pub const PERCENT_BENEFIT_KIND: &str = "P%";

/// Condition tokens starting with this prefix use season semantics.
pub const SEASON_CONDITION_PREFIX: &str = "TEMPORADA";

/// Longest accepted ALU, before separator stripping.
pub const MAX_ALU_LENGTH: usize = 32;
