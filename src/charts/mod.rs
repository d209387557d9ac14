//! Chart panels as Plotly figure JSON
//!
//! Each builder turns one aggregate into a panel: a title, a figure
//! (`{"data": [...], "layout": {...}}` consumed by plotly.js in the page)
//! and a one-line insight.

pub mod bar;
pub mod radar;
pub mod pie;
pub mod heatmap;

use serde::Serialize;
use serde_json::Value;

use crate::model::Semester;

/// Bar colour per semester
pub fn bar_color(semester: Semester) -> &'static str {
    match semester {
        Semester::First => "#A4C3E6",
        Semester::Second => "#3B82F6",
    }
}

/// Radar fill/line colour per semester
pub fn radar_color(semester: Semester) -> &'static str {
    match semester {
        Semester::First => "rgba(255, 99, 132, 0.5)",
        Semester::Second => "rgba(59, 130, 246, 0.5)",
    }
}

/// One dashboard cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    /// DOM id suffix
    pub id: &'static str,
    pub title: &'static str,
    /// Absent when there is nothing to draw
    pub figure: Option<Value>,
    pub insight: Option<String>,
    /// Shown instead of the figure
    pub empty_message: Option<String>,
}

impl ChartPanel {
    /// Figure JSON safe to inline in a `<script>` block
    pub fn figure_json(&self) -> String {
        match &self.figure {
            Some(figure) => serde_json::to_string(figure)
                .unwrap_or_else(|_| "null".to_string())
                .replace('<', "\\u003c"),
            None => "null".to_string(),
        }
    }

    pub fn has_figure(&self) -> bool {
        self.figure.is_some()
    }
}
