//! Per-body-part mean scores grouped by semester
//!
//! **Columns needed**: 학기 plus the six body-part score columns.
//! Null scores are skipped by the mean; a part with no valid score in a
//! semester has no mean.

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{BodyPart, Semester, SEMESTER_COL};
use crate::utils::materialize_with_columns;

/// Mean score per body part (in `BodyPart::ALL` order) for each semester
/// present in the subset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemesterMeans {
    by_semester: BTreeMap<Semester, Vec<Option<f64>>>,
}

/// Largest semester-over-semester gain
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Improvement {
    pub part: BodyPart,
    /// Second semester mean minus first semester mean
    pub delta: f64,
}

impl SemesterMeans {
    pub fn has(&self, semester: Semester) -> bool {
        self.by_semester.contains_key(&semester)
    }

    /// Semesters present, in order
    pub fn semesters(&self) -> Vec<Semester> {
        self.by_semester.keys().copied().collect()
    }

    /// Means for one semester in `BodyPart::ALL` order
    pub fn series(&self, semester: Semester) -> Option<&[Option<f64>]> {
        self.by_semester.get(&semester).map(Vec::as_slice)
    }

    pub fn get(&self, part: BodyPart, semester: Semester) -> Option<f64> {
        let idx = BodyPart::ALL.iter().position(|p| *p == part)?;
        self.by_semester.get(&semester).and_then(|v| v[idx])
    }

    /// Body part with the largest mean improvement between semesters
    ///
    /// Needs both semesters. Parts without a computable difference are
    /// skipped; ties keep the earlier part.
    pub fn most_improved(&self) -> Option<Improvement> {
        let first = self.series(Semester::First)?;
        let second = self.series(Semester::Second)?;

        let mut best: Option<Improvement> = None;
        for (idx, part) in BodyPart::ALL.iter().enumerate() {
            let (Some(a), Some(b)) = (first[idx], second[idx]) else {
                continue;
            };
            let delta = b - a;
            if best.map_or(true, |current| delta > current.delta) {
                best = Some(Improvement { part: *part, delta });
            }
        }
        best
    }
}

/// Compute mean scores per semester over the filtered subset
pub fn semester_means(df: &DataFrame) -> Result<SemesterMeans> {
    let mut columns = vec![SEMESTER_COL];
    columns.extend(BodyPart::labels());

    let projected = materialize_with_columns(&df.clone().lazy(), &columns, "semester means")?;

    let mean_exprs: Vec<Expr> = BodyPart::ALL
        .iter()
        .map(|p| col(p.label()).cast(DataType::Float64).mean())
        .collect();

    let grouped = projected
        .lazy()
        .group_by([col(SEMESTER_COL)])
        .agg(mean_exprs)
        .collect()
        .with_context(|| "semester means: group_by failed")?;

    let labels = grouped.column(SEMESTER_COL)?.str()?;
    let part_means = BodyPart::ALL
        .iter()
        .map(|p| grouped.column(p.label()).and_then(|c| c.f64().cloned()))
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut by_semester = BTreeMap::new();
    for idx in 0..grouped.height() {
        let Some(semester) = labels.get(idx).and_then(Semester::from_label) else {
            continue;
        };
        let means: Vec<Option<f64>> = part_means.iter().map(|ca| ca.get(idx)).collect();
        by_semester.insert(semester, means);
    }

    Ok(SemesterMeans { by_semester })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(semesters: &[&str], neck: &[Option<f64>], knee: &[Option<f64>]) -> DataFrame {
        let fill: Vec<Option<f64>> = vec![Some(50.0); semesters.len()];
        df![
            "학기" => semesters,
            "목" => neck,
            "어깨" => fill.clone(),
            "허리" => fill.clone(),
            "엉덩" => fill.clone(),
            "무릎" => knee,
            "발목" => fill,
        ].unwrap()
    }

    #[test]
    fn test_means_skip_nulls() {
        let df = frame(
            &["1학기", "1학기", "2학기", "2학기"],
            &[Some(60.0), None, Some(70.0), Some(80.0)],
            &[Some(40.0), Some(50.0), Some(90.0), None],
        );

        let means = semester_means(&df).unwrap();
        assert_eq!(means.semesters(), vec![Semester::First, Semester::Second]);
        assert_relative_eq!(means.get(BodyPart::Neck, Semester::First).unwrap(), 60.0);
        assert_relative_eq!(means.get(BodyPart::Neck, Semester::Second).unwrap(), 75.0);
        assert_relative_eq!(means.get(BodyPart::Knee, Semester::First).unwrap(), 45.0);
        assert_relative_eq!(means.get(BodyPart::Knee, Semester::Second).unwrap(), 90.0);
    }

    #[test]
    fn test_most_improved() {
        let df = frame(
            &["1학기", "2학기"],
            &[Some(60.0), Some(63.0)],
            &[Some(40.0), Some(52.5)],
        );

        let improvement = semester_means(&df).unwrap().most_improved().unwrap();
        assert_eq!(improvement.part, BodyPart::Knee);
        assert_relative_eq!(improvement.delta, 12.5);
    }

    #[test]
    fn test_most_improved_needs_both_semesters() {
        let df = frame(&["1학기"], &[Some(60.0)], &[Some(40.0)]);

        let means = semester_means(&df).unwrap();
        assert!(means.has(Semester::First));
        assert!(!means.has(Semester::Second));
        assert!(means.most_improved().is_none());
    }

    #[test]
    fn test_all_null_part_has_no_mean() {
        let df = frame(&["1학기", "2학기"], &[None, None], &[Some(40.0), Some(30.0)]);

        let means = semester_means(&df).unwrap();
        assert_eq!(means.get(BodyPart::Neck, Semester::First), None);
        // Neck has no difference; knee dropped 10; the flat parts tie at 0
        let improvement = means.most_improved().unwrap();
        assert_eq!(improvement.part, BodyPart::Shoulder);
        assert_relative_eq!(improvement.delta, 0.0);
    }

    #[test]
    fn test_empty_subset() {
        let df = frame(&[], &[], &[]);
        let means = semester_means(&df).unwrap();
        assert!(means.semesters().is_empty());
    }
}
