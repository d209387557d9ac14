//! Student Posture Dashboard
//!
//! Two semesters of student posture-assessment scores, cleaned with Polars
//! and presented as four linked charts filtered by school level and grade.
//!
//! - `data`: CSV loading and normalization
//! - `utils`: grade standardization, score coercion, DataFrame helpers
//! - `filter`: cascading school level → grade selection
//! - `metrics`: semester means, posture distribution, correlation
//! - `charts`: Plotly figure JSON for each panel
//! - `dashboard`: one view per filter selection
//! - `api_server` / `web`: axum server with askama pages (feature `api`)

pub mod model;
pub mod config;
pub mod utils;
pub mod data;
pub mod filter;
pub mod metrics;
pub mod charts;
pub mod dashboard;

#[cfg(feature = "api")]
pub mod api_server;

#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use data::{LoadError, SurveyData};
pub use filter::{FilterSelection, GradeFilter, LevelFilter};
pub use dashboard::DashboardView;
pub use model::{BodyPart, SchoolLevel, Semester};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState, Dataset};
