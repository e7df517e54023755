//! Text and numeric canonicalization for record comparison.
//!
//! Reference annotations and model output disagree constantly on surface
//! form: casing, stray whitespace, unicode micro signs, percent suffixes,
//! thousands separators, and a zoo of "not reported" spellings. Everything
//! that compares two records goes through this module first so that both
//! sides are held to the same canonical form.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Spellings that mean "this value was not reported".
///
/// Matched case-insensitively after trimming. A sentinel parses to `None`,
/// not to an error: absence is data here, not a fault.
static MISSING_SENTINELS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["", "none", "nr", "not reported", "n/a", "na", "not extractable"]
        .into_iter()
        .collect()
});

/// Canonicalize free text for comparison: unit spelling, lowercase, trim,
/// collapse internal whitespace.
///
/// Idempotent: `normalize_text(normalize_text(s)) == normalize_text(s)`.
///
/// # Example
///
/// ```
/// use trialeval::normalize::normalize_text;
///
/// assert_eq!(normalize_text("  Multiple   Spaces  "), "multiple spaces");
/// assert_eq!(normalize_text("Serum µg/mL"), "serum mug/ml");
/// ```
#[must_use]
pub fn normalize_text(s: &str) -> String {
    // Rewrite after lower-casing: Greek capital Mu lower-cases to U+03BC,
    // which must still collapse for idempotence.
    let rewritten = normalize_unit_spelling(&s.to_lowercase());
    rewritten
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse micro-sign variants (U+00B5 MICRO SIGN, U+03BC GREEK SMALL MU)
/// to the ASCII digraph `mu`.
///
/// Pure string rewrite, independent of numeric parsing.
#[must_use]
pub fn normalize_unit_spelling(s: &str) -> String {
    if !s.contains(['\u{00B5}', '\u{03BC}']) {
        return s.to_string();
    }
    s.chars()
        .flat_map(|c| match c {
            '\u{00B5}' | '\u{03BC}' => vec!['m', 'u'],
            other => vec![other],
        })
        .collect()
}

/// Parse a numeric-ish string into a float, or `None`.
///
/// Recognizes the missing-value sentinels, strips a single trailing `%` and
/// thousands-separating commas, then parses. Any parse failure yields
/// `None` rather than an error: the source representation's fidelity is
/// itself part of what is being measured.
///
/// # Example
///
/// ```
/// use trialeval::normalize::normalize_numeric;
///
/// assert_eq!(normalize_numeric("1,234"), Some(1234.0));
/// assert_eq!(normalize_numeric("12.5%"), Some(12.5));
/// assert_eq!(normalize_numeric("Not Reported"), None);
/// assert_eq!(normalize_numeric("abc"), None);
/// ```
#[must_use]
pub fn normalize_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if MISSING_SENTINELS.contains(trimmed.to_lowercase().as_str()) {
        return None;
    }

    let stripped = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let without_commas = stripped.replace(',', "");
    without_commas.parse::<f64>().ok()
}

/// Extract an optional float from a JSON value.
///
/// Numbers pass through; strings go through [`normalize_numeric`];
/// everything else (null, bool, arrays, objects) is `None`.
#[must_use]
pub fn numeric_from_json(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => normalize_numeric(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  Multiple   Spaces  "), "multiple spaces");
        assert_eq!(normalize_text("Mortality\tRate"), "mortality rate");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_normalize_text_idempotent() {
        for s in ["  Mixed  CASE  ", "µg/mL dose", "plain", ""] {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_unit_spelling_micro_variants() {
        // MICRO SIGN and GREEK SMALL MU both collapse to "mu"
        assert_eq!(normalize_unit_spelling("\u{00B5}g"), "mug");
        assert_eq!(normalize_unit_spelling("\u{03BC}g"), "mug");
        assert_eq!(normalize_unit_spelling("mg"), "mg");
    }

    #[test]
    fn test_normalize_numeric_sentinels() {
        for s in ["", "  ", "none", "NR", "Not Reported", "n/a", "NA", "not extractable"] {
            assert_eq!(normalize_numeric(s), None, "sentinel {s:?} should be None");
        }
    }

    #[test]
    fn test_normalize_numeric_percent_and_commas() {
        assert_eq!(normalize_numeric("45%"), Some(45.0));
        assert_eq!(normalize_numeric("1,234,567"), Some(1_234_567.0));
        assert_eq!(normalize_numeric("1,234.5 %"), Some(1234.5));
        assert_eq!(normalize_numeric("12.5% "), Some(12.5));
    }

    #[test]
    fn test_normalize_numeric_failures() {
        assert_eq!(normalize_numeric("abc"), None);
        assert_eq!(normalize_numeric("12..5"), None);
        assert_eq!(normalize_numeric("--3"), None);
    }

    #[test]
    fn test_numeric_from_json() {
        use serde_json::json;
        assert_eq!(numeric_from_json(&json!(42)), Some(42.0));
        assert_eq!(numeric_from_json(&json!(4.5)), Some(4.5));
        assert_eq!(numeric_from_json(&json!("1,200")), Some(1200.0));
        assert_eq!(numeric_from_json(&json!(null)), None);
        assert_eq!(numeric_from_json(&json!(true)), None);
    }
}
