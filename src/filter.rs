//! Cascading filter controller
//!
//! School level narrows the table first; the grade options offered next are
//! the standardized grades left in that subset. "All" at either step passes
//! rows through unchanged.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::BTreeSet;

use crate::model::{SchoolLevel, SCHOOL_LEVEL_COL, STANDARD_GRADE_COL};
use crate::utils::filter_by_label;

pub const ALL_LEVELS_LABEL: &str = "전체";
pub const ALL_GRADES_LABEL: &str = "전체 학년";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Level(SchoolLevel),
}

impl LevelFilter {
    /// Unknown or absent labels select every level
    pub fn parse(label: Option<&str>) -> Self {
        label
            .and_then(SchoolLevel::from_label)
            .map(LevelFilter::Level)
            .unwrap_or(LevelFilter::All)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LevelFilter::All => ALL_LEVELS_LABEL,
            LevelFilter::Level(level) => level.label(),
        }
    }

    /// Radio options in display order
    pub fn options() -> Vec<&'static str> {
        std::iter::once(ALL_LEVELS_LABEL)
            .chain(SchoolLevel::ALL.iter().map(|l| l.label()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GradeFilter {
    #[default]
    All,
    Grade(String),
}

impl GradeFilter {
    pub fn label(&self) -> &str {
        match self {
            GradeFilter::All => ALL_GRADES_LABEL,
            GradeFilter::Grade(grade) => grade,
        }
    }
}

/// Resolved pair of selections
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterSelection {
    pub level: LevelFilter,
    pub grade: GradeFilter,
}

impl FilterSelection {
    /// Resolve raw selection labels against the data
    ///
    /// A grade that is not offered under the chosen level resets to all
    /// grades, the same way the grade picker resets when the level changes.
    pub fn resolve(df: &DataFrame, level: Option<&str>, grade: Option<&str>) -> Result<Self> {
        let level = LevelFilter::parse(level);

        let grade = match grade {
            None => GradeFilter::All,
            Some(g) if g == ALL_GRADES_LABEL => GradeFilter::All,
            Some(g) => {
                let offered = grade_options(df, level)?;
                if offered.iter().any(|o| o == g) {
                    GradeFilter::Grade(g.to_string())
                } else {
                    tracing::debug!("Grade '{}' not offered under level '{}', resetting", g, level.label());
                    GradeFilter::All
                }
            }
        };

        Ok(Self { level, grade })
    }

    /// Resolve a submission from the filter form
    ///
    /// `previous_level` is the level the form was rendered with. When the
    /// level differs, the grade picker starts over at all grades even if the
    /// submitted grade is still offered.
    pub fn resolve_change(
        df: &DataFrame,
        level: Option<&str>,
        grade: Option<&str>,
        previous_level: Option<&str>,
    ) -> Result<Self> {
        let level_changed = previous_level
            .is_some_and(|prev| LevelFilter::parse(Some(prev)) != LevelFilter::parse(level));
        Self::resolve(df, level, if level_changed { None } else { grade })
    }
}

/// Rows matching the level selection
pub fn level_subset(df: &DataFrame, level: LevelFilter) -> Result<DataFrame> {
    match level {
        LevelFilter::All => Ok(df.clone()),
        LevelFilter::Level(l) => filter_by_label(df, SCHOOL_LEVEL_COL, l.label(), "level filter"),
    }
}

/// Grade picker options: "전체 학년" then the sorted distinct grades left
/// after the level filter
pub fn grade_options(df: &DataFrame, level: LevelFilter) -> Result<Vec<String>> {
    let subset = level_subset(df, level)?;
    let grades = subset
        .column(STANDARD_GRADE_COL)
        .with_context(|| format!("grade options: Missing {} column", STANDARD_GRADE_COL))?
        .str()?;

    let distinct: BTreeSet<&str> = grades.into_iter().flatten().collect();

    Ok(std::iter::once(ALL_GRADES_LABEL.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect())
}

/// Working subset for the charts
pub fn apply_filters(df: &DataFrame, selection: &FilterSelection) -> Result<DataFrame> {
    let subset = level_subset(df, selection.level)?;
    match &selection.grade {
        GradeFilter::All => Ok(subset),
        GradeFilter::Grade(grade) => filter_by_label(&subset, STANDARD_GRADE_COL, grade, "grade filter"),
    }
}
