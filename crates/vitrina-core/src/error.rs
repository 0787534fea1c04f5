//! # Error Types
//!
//! Domain-specific error types for vitrina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrina-core errors (this file)                                        │
//! │  ├── CoreError        - Lookups that came back empty                    │
//! │  └── ValidationError  - Malformed ALU / store number                    │
//! │                                                                         │
//! │  vitrina-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  price-api errors (in app)                                              │
//! │  └── ApiError         - What HTTP clients see ({code, message})         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → 400 / 404              │
//! │        DbError ──────────────────────► ApiError → 500                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The promotion engine itself never returns an error: see
//! [`crate::promotion`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised around the engine: missing inputs and bad codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No active product carries this ALU.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The store has no promotion in the active state.
    ///
    /// ## When This Occurs
    /// ```text
    /// GET /api/best-promotion/{alu}/{store_no}
    ///      │
    ///      ▼
    /// list_active_for_store(store_no) → []
    ///      │
    ///      ▼
    /// NoActivePromotions(store_no) → 404
    /// ```
    #[error("No active promotions for store {0}")]
    NoActivePromotions(i64),

    /// No store holds stock of the requested ALU.
    #[error("No stock found for {alu}")]
    NoStock { alu: String },

    /// No color/size variants of the model are in stock at the store.
    #[error("No variants of {model} in stock at store {store_no}")]
    NoVariants { model: String, store_no: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised on path parameters before any query runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (bad characters, unsupported ALU length).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
