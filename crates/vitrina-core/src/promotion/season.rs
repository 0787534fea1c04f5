//! # Temporal Extractor
//!
//! Seasons are encoded as a tag plus a year (`VER2024`, `INV2023`).
//! Season conditions compare only the year part.
//!
//! ## Extraction Rule
//! ```text
//! "VER2024"    → first 4-digit run          → 2024
//! "OI20245"    → first 4 digits of the run  → 2024
//! "V24-25"     → no 4-digit run, first run  → 24
//! "INVIERNO"   → no digits                  → 0
//! ```
//! Multiple runs are never reconciled: the first qualifying run wins.

/// Extracts the season year from a (normalized) season string.
pub fn extract_year(season: &str) -> u32 {
    let mut fallback: Option<&str> = None;

    for run in season
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
    {
        if run.len() >= 4 {
            return parse_run(&run[..4]);
        }
        fallback.get_or_insert(run);
    }

    fallback.map(parse_run).unwrap_or(0)
}

fn parse_run(digits: &str) -> u32 {
    digits.parse().unwrap_or(0)
}
