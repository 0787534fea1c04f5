//! HTTP handlers, grouped by concern.
//!
//! Path parameters arrive as strings and are validated here so that every
//! rejection carries the same `{code, message}` body.

pub mod catalog_service;
pub mod health_service;
pub mod promotion_service;

use vitrina_core::validation::validate_store_no;
use vitrina_core::ValidationError;

/// Parses and validates a store number path segment.
pub(crate) fn parse_store_no(raw: &str) -> Result<i64, ValidationError> {
    let store_no = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "store_no".to_string(),
            reason: format!("'{}' is not a number", raw),
        })?;

    validate_store_no(store_no)
}
