//! Aggregations over the filtered survey subset
//!
//! Each aggregate feeds one dashboard panel:
//! - semester means → bar and radar charts
//! - posture distribution → paired pie charts
//! - correlation → heatmap

pub mod semester_means;
pub mod posture_distribution;
pub mod correlation;

pub use semester_means::{semester_means, SemesterMeans, Improvement};
pub use posture_distribution::{
    posture_distribution, CategoryCount, PostureDistribution, LONG_TAIL_LABEL, LONG_TAIL_THRESHOLD,
};
pub use correlation::{correlation_matrix, pearson, CorrelationMatrix};
