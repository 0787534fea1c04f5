//! # Promotion Engine
//!
//! Decides which of a store's active promotions apply to a product and
//! picks the single best discount.
//!
//! ## Component Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         selector::select_best                           │
//! │                                  │                                      │
//! │                      qualifier::qualify (AND/OR walk)                   │
//! │                        │                     │                          │
//! │              mapping::map_column   condition::evaluate                  │
//! │                                      │              │                   │
//! │                         normalize::normalize  season::extract_year      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total. Malformed operands degrade to neutral
//! values (empty string, year 0, skipped benefit) instead of erroring.

pub mod condition;
pub mod mapping;
pub mod normalize;
pub mod qualifier;
pub mod season;
pub mod selector;

pub use condition::{evaluate, ConditionOp, SeasonOp};
pub use mapping::map_column;
pub use normalize::{normalize, normalize_scalar};
pub use qualifier::{qualify, Qualification, QualificationPolicy};
pub use season::extract_year;
pub use selector::{
    best_percentage, evaluate_promotion, select_best, OfferDecision, PromotionEvaluation,
    RankedOffer,
};
