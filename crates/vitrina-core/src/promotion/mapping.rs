//! # Filter Attribute Mapper
//!
//! Promotion filters reference product attributes by their back-office
//! column identifiers (`UDFn_VALUE`). This table resolves them to the
//! semantic fields of [`ProductAttributes`](crate::ProductAttributes).

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::ProductField;

/// Column identifier → product field. Built once, never mutated.
static COLUMN_FIELDS: LazyLock<HashMap<&'static str, ProductField>> = LazyLock::new(|| {
    HashMap::from([
        ("UDF3_VALUE", ProductField::Window),
        ("UDF7_VALUE", ProductField::Season),
        ("UDF8_VALUE", ProductField::Collection),
        ("UDF9_VALUE", ProductField::Family),
        ("UDF10_VALUE", ProductField::Brand),
        ("UDF11_VALUE", ProductField::Model),
        ("UDF12_VALUE", ProductField::Color),
        ("UDF13_VALUE", ProductField::Size),
    ])
});

/// Resolves a filter column to a product field. Unknown columns → `None`.
pub fn map_column(column: &str) -> Option<ProductField> {
    COLUMN_FIELDS
        .get(column.trim().to_ascii_uppercase().as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_columns() {
        assert_eq!(map_column("UDF3_VALUE"), Some(ProductField::Window));
        assert_eq!(map_column("UDF7_VALUE"), Some(ProductField::Season));
        assert_eq!(map_column("UDF13_VALUE"), Some(ProductField::Size));
    }

    #[test]
    fn test_lookup_tolerates_case_and_padding() {
        assert_eq!(map_column(" udf12_value "), Some(ProductField::Color));
    }

    #[test]
    fn test_unknown_columns() {
        assert_eq!(map_column("UDF1_VALUE"), None);
        assert_eq!(map_column("PRICE"), None);
        assert_eq!(map_column(""), None);
    }
}
