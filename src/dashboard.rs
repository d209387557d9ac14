//! Dashboard View Assembly
//!
//! Runs the full pipeline for one filter selection:
//! filter → aggregate (means, posture distribution, correlation) → panels.
//! The result is serializable for the JSON endpoint and rendered by the
//! page templates.

use anyhow::Result;
use serde::Serialize;

use crate::charts::{self, ChartPanel};
use crate::data::SurveyData;
use crate::filter::{apply_filters, grade_options, FilterSelection, LevelFilter};
use crate::metrics::{
    correlation_matrix, posture_distribution, semester_means, CorrelationMatrix, Improvement,
    PostureDistribution, LONG_TAIL_THRESHOLD,
};
use crate::model::Semester;

/// Posture distribution for one semester, labelled for output
#[derive(Debug, Clone, Serialize)]
pub struct SemesterDistribution {
    pub semester: &'static str,
    #[serde(flatten)]
    pub distribution: PostureDistribution,
}

/// Everything one dashboard render needs
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub level: String,
    pub grade: String,
    pub level_options: Vec<&'static str>,
    pub grade_options: Vec<String>,
    /// Rows left after filtering
    pub rows: usize,
    pub most_improved: Option<Improvement>,
    pub distributions: Vec<SemesterDistribution>,
    pub correlation: Option<CorrelationMatrix>,
    pub panels: Vec<ChartPanel>,
}

impl DashboardView {
    pub fn build(data: &SurveyData, selection: &FilterSelection) -> Result<Self> {
        let frame = data.frame();
        let grade_options = grade_options(frame, selection.level)?;
        let subset = apply_filters(frame, selection)?;

        tracing::debug!(
            "Building dashboard for {} / {}: {} rows",
            selection.level.label(),
            selection.grade.label(),
            subset.height()
        );

        let means = semester_means(&subset)?;
        let distributions: Vec<(Semester, PostureDistribution)> = Semester::ALL
            .into_iter()
            .map(|s| -> Result<(Semester, PostureDistribution)> {
                Ok((s, posture_distribution(&subset, s, LONG_TAIL_THRESHOLD)?))
            })
            .collect::<Result<_>>()?;
        let correlation = correlation_matrix(&subset, Semester::Second)?;

        let panels = vec![
            charts::bar::build(&means),
            charts::radar::build(&means),
            charts::pie::build(&distributions),
            charts::heatmap::build(correlation.as_ref()),
        ];

        Ok(Self {
            level: selection.level.label().to_string(),
            grade: selection.grade.label().to_string(),
            level_options: LevelFilter::options(),
            grade_options,
            rows: subset.height(),
            most_improved: means.most_improved(),
            distributions: distributions
                .into_iter()
                .map(|(s, distribution)| SemesterDistribution { semester: s.label(), distribution })
                .collect(),
            correlation,
            panels,
        })
    }

    pub fn panel(&self, id: &str) -> Option<&ChartPanel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn is_selected_level(&self, option: &str) -> bool {
        self.level == option
    }

    pub fn is_selected_grade(&self, option: &str) -> bool {
        self.grade == option
    }
}
