//! Data Loading
//!
//! Loads the participation records (`athlete_events.csv`) and the NOC → region
//! lookup (`noc_regions.csv`) with Polars. The source files write missing values
//! as `NA`, which is read as null.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Raw input frames, straight from disk
pub struct OlympicsData {
    /// One row per athlete-event appearance
    pub athletes: DataFrame,

    /// NOC code → modern region name (plus free-text notes)
    pub regions: DataFrame,
}

impl OlympicsData {
    /// Load both CSV files from `data_dir`
    pub fn load(data_dir: &Path, athletes_file: &str, regions_file: &str) -> Result<Self> {
        tracing::info!("Loading datasets from {:?}...", data_dir);

        let athletes_path: PathBuf = data_dir.join(athletes_file);
        let athletes = Self::load_csv(&athletes_path)?;

        let regions_path: PathBuf = data_dir.join(regions_file);
        let regions = Self::load_csv(&regions_path)?;

        tracing::info!("  Participation rows: {}", athletes.height());
        tracing::info!("  NOC region rows: {}", regions.height());

        Ok(OlympicsData { athletes, regions })
    }

    /// Load one CSV with a header row, reading `NA` cells as null
    ///
    /// Schema inference scans the whole file: Height/Weight are missing for
    /// most early editions, so a short scan would type them as strings.
    pub fn load_csv(path: &Path) -> Result<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .map_parse_options(|opts| {
                opts.with_null_values(Some(NullValues::AllColumnsSingle("NA".into())))
            })
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load CSV: {:?}", path))
    }
}
