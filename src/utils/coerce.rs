//! Cell coercion for loosely-typed survey columns

/// Posture type values that are not real categories: a header row repeated
/// inside the data and stringified nulls.
pub const POSTURE_SENTINELS: [&str; 3] = ["자세 세부 유형", "nan", "None"];

/// Cell text read as null when loading a CSV. `nan` and `None` are left out
/// so rows carrying them are counted as sentinels and dropped.
pub const CSV_NULL_TOKENS: [&str; 16] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "n/a", "null",
];

/// Parse a body-part score cell; invalid or non-finite text is missing
pub fn parse_score(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// True when a posture type cell is a header leftover or null-like string
pub fn is_posture_sentinel(value: &str) -> bool {
    POSTURE_SENTINELS.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("85"), Some(85.0));
        assert_eq!(parse_score(" 72.5 "), Some(72.5));
        assert_eq!(parse_score("-3"), Some(-3.0));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("측정불가"), None);
        assert_eq!(parse_score("NaN"), None);
        assert_eq!(parse_score("inf"), None);
    }

    #[test]
    fn test_is_posture_sentinel() {
        assert!(is_posture_sentinel("자세 세부 유형"));
        assert!(is_posture_sentinel("nan"));
        assert!(is_posture_sentinel("None"));
        assert!(!is_posture_sentinel("거북목형"));
        // Only the exact strings count
        assert!(!is_posture_sentinel("NaN"));
        assert!(!is_posture_sentinel(""));
    }

    #[test]
    fn test_null_tokens_exclude_sentinels() {
        for sentinel in POSTURE_SENTINELS {
            assert!(!CSV_NULL_TOKENS.contains(&sentinel));
        }
        assert!(CSV_NULL_TOKENS.contains(&"NA"));
    }
}
