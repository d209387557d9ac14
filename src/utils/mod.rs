//! Utility modules for survey cleaning
//!
//! Contains shared functionality used by the loader and the metrics:
//! - Grade: standardized grade labels and school level buckets
//! - Coerce: score parsing and posture type sentinels
//! - LazyFrame helpers: Safe materialization with column validation

pub mod grade;
pub mod coerce;
pub mod lazy_helpers;

// Re-export commonly used functions
pub use grade::{extract_grade_number, classify_school, standardize_grade};
pub use coerce::{parse_score, is_posture_sentinel, CSV_NULL_TOKENS, POSTURE_SENTINELS};
pub use lazy_helpers::{materialize_with_columns, filter_by_label, f64_values};
