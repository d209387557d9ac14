//! Pairwise Pearson correlation between body-part scores
//!
//! Each pair uses the rows where both scores are present. A pair with fewer
//! than two shared rows, or with a constant column, has no coefficient.

use polars::prelude::*;
use anyhow::Result;
use serde::Serialize;

use crate::model::{BodyPart, Semester, SEMESTER_COL};
use crate::utils::{f64_values, filter_by_label};

/// Square matrix over `BodyPart::ALL`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: BodyPart, b: BodyPart) -> Option<f64> {
        let i = BodyPart::ALL.iter().position(|p| *p == a)?;
        let j = BodyPart::ALL.iter().position(|p| *p == b)?;
        self.values.get(i)?.get(j).copied().flatten()
    }
}

/// Correlation matrix for one semester; `None` when it has no rows
pub fn correlation_matrix(df: &DataFrame, semester: Semester) -> Result<Option<CorrelationMatrix>> {
    let rows = filter_by_label(df, SEMESTER_COL, semester.label(), "correlation")?;
    if rows.height() == 0 {
        return Ok(None);
    }

    let columns = BodyPart::ALL
        .iter()
        .map(|p| f64_values(&rows, p.label(), "correlation"))
        .collect::<Result<Vec<_>>>()?;

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(Some(CorrelationMatrix {
        labels: BodyPart::labels().into_iter().map(str::to_string).collect(),
        values,
    }))
}

/// Pearson coefficient over pairwise-complete observations
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }

    Some((sxy / denom).clamp(-1.0, 1.0))
}
