//! Error types
//!
//! Two failure kinds reach callers of the aggregation engine:
//! - `DataIntegrityError`: the input tables cannot be preprocessed (fatal, no partial result)
//! - `UnknownFilterValue`: a filter value that does not occur in the dataset
//!
//! Query functions themselves never fail. An unknown filter value yields an empty
//! result; `UnknownFilterValue` is what the table's `check_*` methods hand back so a
//! caller can tell "no such country" apart from "country without medals".

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while validating or preprocessing the input tables.
#[derive(Debug, Error)]
pub enum DataIntegrityError {
    /// One or more required columns are absent.
    #[error("{table} table is missing required columns: {}", columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    /// A required column exists but cannot be read as the expected type.
    #[error("column '{column}' has an unusable type: {reason}")]
    InvalidColumn { column: String, reason: String },

    /// The frame itself could not be read.
    #[error("failed to read input frame: {0}")]
    Frame(#[from] PolarsError),
}

/// Which filter argument carried the unknown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Year,
    Country,
    Sport,
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterField::Year => write!(f, "year"),
            FilterField::Country => write!(f, "country"),
            FilterField::Sport => write!(f, "sport"),
        }
    }
}

/// A filter value absent from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
#[error("unknown {field} '{value}'")]
pub struct UnknownFilterValue {
    pub field: FilterField,
    pub value: String,
}

/// A year selection that is neither "Overall" nor a year.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid year selection '{0}': expected \"Overall\" or a year such as 1996")]
pub struct SelectionParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_every_column() {
        let err = DataIntegrityError::MissingColumns {
            table: "athlete_events".to_string(),
            columns: vec!["Medal".to_string(), "NOC".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("athlete_events"));
        assert!(msg.contains("Medal, NOC"));
    }

    #[test]
    fn test_unknown_filter_value_message() {
        let err = UnknownFilterValue {
            field: FilterField::Country,
            value: "Atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "unknown country 'Atlantis'");
    }
}
