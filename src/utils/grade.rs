//! Standardized grade labels
//!
//! Survey rows carry a free-text school name and a free-text grade. Both are
//! reduced to a "school-level + numeric grade" label such as "중등 2학년".

use regex::Regex;
use std::sync::OnceLock;

use crate::model::SchoolLevel;

fn grade_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)").expect("static pattern compiles"))
}

/// First run of digits in the grade text, or "0" when there is none
///
/// # Example
/// ```
/// use posture_dashboard::utils::extract_grade_number;
/// assert_eq!(extract_grade_number("3학년"), "3");
/// assert_eq!(extract_grade_number("3.0"), "3");
/// assert_eq!(extract_grade_number("미상"), "0");
/// ```
pub fn extract_grade_number(grade: &str) -> String {
    grade_digits()
        .captures(grade)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "0".to_string())
}

/// Bucket a school name by its level marker
///
/// '초' wins over '중', which wins over '고'. Names without any marker fall
/// back to elementary.
pub fn classify_school(school: &str) -> SchoolLevel {
    if school.contains('초') {
        SchoolLevel::Elementary
    } else if school.contains('중') {
        SchoolLevel::Middle
    } else if school.contains('고') {
        SchoolLevel::High
    } else {
        SchoolLevel::Elementary
    }
}

/// Derive (standardized grade label, school level) for one row
pub fn standardize_grade(school: &str, grade: &str) -> (String, SchoolLevel) {
    let level = classify_school(school);
    let num = extract_grade_number(grade);
    (format!("{} {}학년", level.label(), num), level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_grade_number() {
        assert_eq!(extract_grade_number("2학년"), "2");
        assert_eq!(extract_grade_number("12"), "12");
        assert_eq!(extract_grade_number("4.0"), "4");
        assert_eq!(extract_grade_number(""), "0");
        assert_eq!(extract_grade_number("nan"), "0");
    }

    #[test]
    fn test_classify_school() {
        assert_eq!(classify_school("한빛초등학교"), SchoolLevel::Elementary);
        assert_eq!(classify_school("서울중학교"), SchoolLevel::Middle);
        assert_eq!(classify_school("부산고등학교"), SchoolLevel::High);
        assert_eq!(classify_school("Unknown"), SchoolLevel::Elementary);
        // '초' is checked first
        assert_eq!(classify_school("초중고통합학교"), SchoolLevel::Elementary);
    }

    #[test]
    fn test_standardize_grade() {
        assert_eq!(
            standardize_grade("서울중학교", "2"),
            ("중등 2학년".to_string(), SchoolLevel::Middle)
        );
        assert_eq!(
            standardize_grade("부산고", "1학년"),
            ("고등 1학년".to_string(), SchoolLevel::High)
        );
        assert_eq!(
            standardize_grade("", ""),
            ("초등 0학년".to_string(), SchoolLevel::Elementary)
        );
    }
}
