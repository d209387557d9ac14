//! DataFrame helpers with column validation
//!
//! Every aggregation projects a handful of named columns out of the survey
//! table. These helpers fail loudly with the available column list instead of
//! surfacing a bare polars "not found".

use polars::prelude::*;
use anyhow::{Context, Result, anyhow};
use std::collections::HashSet;

/// Materialize LazyFrame with explicit column list and validation
///
/// # Arguments
/// * `lazy` - LazyFrame to materialize
/// * `columns` - Required column names
/// * `context` - Context for error messages (e.g., "semester means")
///
/// # Errors
/// Returns error if materialization fails or a column is missing
pub fn materialize_with_columns(
    lazy: &LazyFrame,
    columns: &[&str],
    context: &str,
) -> Result<DataFrame> {
    let col_exprs: Vec<Expr> = columns.iter()
        .map(|&name| col(name))
        .collect();

    let df = lazy
        .clone()
        .select(&col_exprs)
        .collect()
        .with_context(|| format!("{}: Failed to materialize columns {:?}", context, columns))?;

    let actual_cols: HashSet<String> = df.get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !actual_cols.contains(expected) {
            return Err(anyhow!(
                "{}: Missing expected column '{}'. Available columns: {:?}",
                context, expected, actual_cols
            ));
        }
    }

    Ok(df)
}

/// Keep rows whose string column equals `value`
///
/// # Example
/// ```rust,ignore
/// let middle = filter_by_label(&survey, "학교급", "중등", "level filter")?;
/// ```
pub fn filter_by_label(
    df: &DataFrame,
    col_name: &str,
    value: &str,
    context: &str,
) -> Result<DataFrame> {
    let labels = df.column(col_name)
        .with_context(|| format!("{}: Missing {} column", context, col_name))?
        .str()
        .with_context(|| format!("{}: Column '{}' is not string type", context, col_name))?;

    let mask: BooleanChunked = labels
        .into_iter()
        .map(|opt| opt.map_or(false, |s| s == value))
        .collect();

    df.filter(&mask)
        .with_context(|| format!("{}: Failed to filter on column '{}'", context, col_name))
}

/// Non-null f64 values of a column as `Option`s, one per row
pub fn f64_values(df: &DataFrame, col_name: &str, context: &str) -> Result<Vec<Option<f64>>> {
    let values = df.column(col_name)
        .with_context(|| format!("{}: Missing {} column", context, col_name))?
        .f64()
        .with_context(|| format!("{}: Column '{}' is not f64 type", context, col_name))?;

    Ok(values.into_iter().collect())
}
