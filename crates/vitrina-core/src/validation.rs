//! # Validation Module
//!
//! Input validation for path parameters of the price API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Router (axum)                                                 │
//! │  └── Path extraction: store_no must parse as i64                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Handler                                                       │
//! │  └── THIS MODULE: ALU shape, positive store number                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  └── Parameter binding, no string-built SQL                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrina_core::validation::{validate_alu, validate_store_no};
//!
//! assert_eq!(validate_alu(" 123456789RJOM ").unwrap(), "123456789RJOM");
//! assert!(validate_store_no(12).is_ok());
//! ```

use crate::error::ValidationError;
use crate::MAX_ALU_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an ALU (product code) and returns it in stored form: trimmed,
/// with hyphens removed.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_ALU_LENGTH`] characters, hyphens excluded
/// - Letters, digits and hyphens only
///
/// The positional model/color/size layout is checked separately by
/// [`Alu::parse`](crate::alu::Alu::parse): a plain product lookup accepts
/// codes of any length.
///
/// ## Example
/// ```rust
/// use vitrina_core::validation::validate_alu;
///
/// assert_eq!(validate_alu("123456789-RJO-M").unwrap(), "123456789RJOM");
/// assert!(validate_alu("").is_err());
/// assert!(validate_alu("123;DROP").is_err());
/// ```
pub fn validate_alu(alu: &str) -> ValidationResult<String> {
    let raw = alu.trim();

    if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "alu".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    let alu: String = raw.chars().filter(|c| *c != '-').collect();

    if alu.is_empty() {
        return Err(ValidationError::Required {
            field: "alu".to_string(),
        });
    }

    if alu.chars().count() > MAX_ALU_LENGTH {
        return Err(ValidationError::TooLong {
            field: "alu".to_string(),
            max: MAX_ALU_LENGTH,
        });
    }

    Ok(alu)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a store number. Must be positive.
pub fn validate_store_no(store_no: i64) -> ValidationResult<i64> {
    if store_no <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "store_no".to_string(),
        });
    }

    Ok(store_no)
}

// =============================================================================
// Unit Tests
// =============================================================================
