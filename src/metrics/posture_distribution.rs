//! Posture type frequency per semester with a long-tail bucket
//!
//! Categories whose share of the semester total is below the threshold are
//! merged into a single "기타" slice so the pie stays readable.

use polars::prelude::*;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::model::{Semester, POSTURE_TYPE_COL, SEMESTER_COL};
use crate::utils::filter_by_label;

/// Label of the merged long-tail slice
pub const LONG_TAIL_LABEL: &str = "기타";

/// Share below which a category is merged into the long tail
pub const LONG_TAIL_THRESHOLD: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostureDistribution {
    /// Non-null posture types counted
    pub total: usize,
    /// Kept categories by count (desc, then label), long tail last
    pub categories: Vec<CategoryCount>,
    /// Number of categories merged into the long tail
    pub merged: usize,
}

impl PostureDistribution {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.categories.iter().map(|c| c.count).collect()
    }
}

/// Count posture types for one semester of the filtered subset
pub fn posture_distribution(
    df: &DataFrame,
    semester: Semester,
    threshold: f64,
) -> Result<PostureDistribution> {
    let rows = filter_by_label(df, SEMESTER_COL, semester.label(), "posture distribution")?;
    let types = rows
        .column(POSTURE_TYPE_COL)
        .with_context(|| format!("posture distribution: Missing {} column", POSTURE_TYPE_COL))?
        .str()?;

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for value in types.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Ok(PostureDistribution::default());
    }

    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut categories = Vec::with_capacity(sorted.len());
    let mut tail_count = 0usize;
    let mut merged = 0usize;
    for (label, count) in sorted {
        if (count as f64 / total as f64) < threshold {
            tail_count += count;
            merged += 1;
        } else {
            categories.push(CategoryCount { label: label.to_string(), count });
        }
    }

    if merged > 0 {
        match categories.iter_mut().find(|c| c.label == LONG_TAIL_LABEL) {
            Some(existing) => existing.count += tail_count,
            None => categories.push(CategoryCount {
                label: LONG_TAIL_LABEL.to_string(),
                count: tail_count,
            }),
        }
    }

    Ok(PostureDistribution { total, categories, merged })
}
