//! DataFrame helpers with column validation
//!
//! Provides safe, explicit patterns for reading the raw polars frames so a
//! missing or mistyped column surfaces as a `DataIntegrityError` naming the
//! column, not as a panic or a silent empty result.

use crate::error::DataIntegrityError;
use polars::prelude::*;
use std::collections::HashSet;

/// Names from `required` that are absent from `df`, in `required` order.
pub fn missing_columns(df: &DataFrame, required: &[&str]) -> Vec<String> {
    let actual: HashSet<&str> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.as_str())
        .collect();

    required
        .iter()
        .filter(|name| !actual.contains(*name))
        .map(|name| name.to_string())
        .collect()
}

/// Fail with every missing column listed at once.
pub fn require_columns(
    df: &DataFrame,
    required: &[&str],
    table: &str,
) -> Result<(), DataIntegrityError> {
    let missing = missing_columns(df, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataIntegrityError::MissingColumns {
            table: table.to_string(),
            columns: missing,
        })
    }
}

/// Validate and project `df` down to exactly `columns`
///
/// # Errors
/// Returns error if:
/// - Any required column is missing (all missing names are reported)
/// - Projection fails
///
/// # Example
/// ```ignore
/// let df = materialize_with_columns(&raw, &["NOC", "region"], "noc_regions")?;
/// ```
pub fn materialize_with_columns(
    df: &DataFrame,
    columns: &[&str],
    table: &str,
) -> Result<DataFrame, DataIntegrityError> {
    require_columns(df, columns, table)?;

    let col_exprs: Vec<Expr> = columns.iter().map(|&name| col(name)).collect();

    let projected = df.clone().lazy().select(&col_exprs).collect()?;
    Ok(projected)
}

/// Read a column as strings, casting non-string data (all-null or numeric-looking columns).
pub fn string_column(df: &DataFrame, name: &str) -> Result<StringChunked, DataIntegrityError> {
    let cast = df.column(name)?.cast(&DataType::String).map_err(|e| invalid(name, e))?;
    let values = cast.str().map_err(|e| invalid(name, e))?;
    Ok(values.clone())
}

/// Read a column as f64. Unparseable cells become null.
pub fn f64_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, DataIntegrityError> {
    let cast = df.column(name)?.cast(&DataType::Float64).map_err(|e| invalid(name, e))?;
    let values = cast.f64().map_err(|e| invalid(name, e))?;
    Ok(values.clone())
}

/// Read a column as i32. Unparseable cells become null.
pub fn i32_column(df: &DataFrame, name: &str) -> Result<Int32Chunked, DataIntegrityError> {
    let cast = df.column(name)?.cast(&DataType::Int32).map_err(|e| invalid(name, e))?;
    let values = cast.i32().map_err(|e| invalid(name, e))?;
    Ok(values.clone())
}

fn invalid(column: &str, err: PolarsError) -> DataIntegrityError {
    DataIntegrityError::InvalidColumn {
        column: column.to_string(),
        reason: err.to_string(),
    }
}
