//! # Value Normalizer
//!
//! Canonical comparison form for product and filter values:
//! ```text
//! None            → ""
//! "  rojo "       → "ROJO"
//! Number(2024.0)  → "2024"
//! ```

use crate::types::Scalar;

/// Normalizes an optional text value: trimmed and upper-cased, absent → "".
pub fn normalize(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_uppercase()).unwrap_or_default()
}

/// Normalizes an optional scalar. Numbers use their shortest display form.
pub fn normalize_scalar(value: Option<&Scalar>) -> String {
    match value {
        None => String::new(),
        Some(Scalar::Text(s)) => normalize(Some(s.as_str())),
        Some(number) => normalize(Some(number.to_string().as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize_scalar(None), "");
    }

    #[test]
    fn test_trims_and_uppercases() {
        assert_eq!(normalize(Some("  rojo oscuro ")), "ROJO OSCURO");
        assert_eq!(normalize(Some("ver2024")), "VER2024");
        assert_eq!(normalize(Some("camión")), "CAMIÓN");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(normalize_scalar(Some(&Scalar::Number(2024.0))), "2024");
        assert_eq!(normalize_scalar(Some(&Scalar::Number(12.5))), "12.5");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            Some(Scalar::from("  mixed Case  ")),
            Some(Scalar::from("")),
            Some(Scalar::from(42.0)),
            Some(Scalar::from(-0.75)),
            None,
        ];
        for input in &inputs {
            let once = normalize_scalar(input.as_ref());
            let twice = normalize(Some(once.as_str()));
            assert_eq!(once, twice, "normalize must be idempotent for {:?}", input);
        }
    }
}
