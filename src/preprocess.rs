//! Preprocessor
//!
//! Turns the raw participation frame plus the NOC → region lookup into the
//! immutable `ProcessedTable`. Runs once at startup.
//!
//! Steps:
//! 1. Validate required columns on both frames (`DataIntegrityError` otherwise)
//! 2. Optional season filter
//! 3. Resolve region: `NocOverrides` first, then the lookup; unmapped → `None`
//! 4. Parse medal and set the Gold/Silver/Bronze indicators
//! 5. Drop rows identical in every column

use crate::config::PreprocessConfig;
use crate::error::DataIntegrityError;
use crate::table::{Medal, ParticipationRecord, ProcessedTable, Season, Sex};
use crate::utils::frame_helpers::{f64_column, i32_column, string_column};
use crate::utils::{materialize_with_columns, require_columns};
use polars::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// Columns every participation frame must carry
pub const RECORD_COLUMNS: &[&str] = &[
    "Name", "Sex", "Age", "Height", "Weight", "Team", "NOC", "Games", "Year", "Season", "City",
    "Sport", "Event", "Medal",
];

/// Columns the NOC lookup frame must carry
pub const LOOKUP_COLUMNS: &[&str] = &["NOC", "region"];

/// NOC code → region name
pub type RegionLookup = FxHashMap<String, String>;

/// Build the NOC → region map from the lookup frame
///
/// Rows with a null code or null region are skipped; the first row wins when a
/// code repeats.
pub fn region_lookup(regions: &DataFrame) -> Result<RegionLookup, DataIntegrityError> {
    let df = materialize_with_columns(regions, LOOKUP_COLUMNS, "noc_regions")?;
    let nocs = string_column(&df, "NOC")?;
    let names = string_column(&df, "region")?;

    let mut map = RegionLookup::default();
    for idx in 0..df.height() {
        if let (Some(noc), Some(region)) = (nocs.get(idx), names.get(idx)) {
            let (noc, region) = (noc.trim(), region.trim());
            if !noc.is_empty() && !region.is_empty() {
                map.entry(noc.to_string()).or_insert_with(|| region.to_string());
            }
        }
    }

    Ok(map)
}

/// Preprocess with the default configuration
pub fn preprocess(records: &DataFrame, regions: &DataFrame) -> Result<ProcessedTable, DataIntegrityError> {
    preprocess_with(records, regions, &PreprocessConfig::default())
}

/// Preprocess with explicit overrides, season filter and duplicate policy
pub fn preprocess_with(
    records: &DataFrame,
    regions: &DataFrame,
    config: &PreprocessConfig,
) -> Result<ProcessedTable, DataIntegrityError> {
    require_columns(records, RECORD_COLUMNS, "athlete_events")?;
    let lookup = region_lookup(regions)?;

    let names = string_column(records, "Name")?;
    let sexes = string_column(records, "Sex")?;
    let ages = f64_column(records, "Age")?;
    let heights = f64_column(records, "Height")?;
    let weights = f64_column(records, "Weight")?;
    let teams = string_column(records, "Team")?;
    let nocs = string_column(records, "NOC")?;
    let games = string_column(records, "Games")?;
    let years = i32_column(records, "Year")?;
    let seasons = string_column(records, "Season")?;
    let cities = string_column(records, "City")?;
    let sports = string_column(records, "Sport")?;
    let events = string_column(records, "Event")?;
    let medals = string_column(records, "Medal")?;

    let mut rows: Vec<ParticipationRecord> = Vec::with_capacity(records.height());
    let mut unmapped: FxHashSet<String> = FxHashSet::default();
    let mut overridden = 0usize;

    for idx in 0..records.height() {
        let year = years.get(idx).ok_or_else(|| DataIntegrityError::InvalidColumn {
            column: "Year".to_string(),
            reason: format!("missing or non-numeric year at row {}", idx),
        })?;

        let season = seasons.get(idx).and_then(|s| s.parse::<Season>().ok());
        if let Some(wanted) = config.season {
            if season != Some(wanted) {
                continue;
            }
        }

        let noc = nocs
            .get(idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let region = match noc.as_deref() {
            Some(code) => {
                if let Some(fixed) = config.noc_overrides.get(code) {
                    overridden += 1;
                    Some(fixed.to_string())
                } else if let Some(found) = lookup.get(code) {
                    Some(found.clone())
                } else {
                    unmapped.insert(code.to_string());
                    None
                }
            }
            None => None,
        };

        let record = ParticipationRecord {
            name: names.get(idx).unwrap_or_default().to_string(),
            sex: sexes.get(idx).and_then(Sex::parse),
            age: ages.get(idx),
            height: heights.get(idx),
            weight: weights.get(idx),
            team: teams.get(idx).unwrap_or_default().to_string(),
            noc,
            games: games.get(idx).unwrap_or_default().to_string(),
            year,
            season,
            city: cities.get(idx).unwrap_or_default().to_string(),
            sport: sports.get(idx).unwrap_or_default().to_string(),
            event: events.get(idx).unwrap_or_default().to_string(),
            medal: medals.get(idx).and_then(Medal::parse),
            region,
            gold: 0,
            silver: 0,
            bronze: 0,
        }
        .with_indicators();

        rows.push(record);
    }

    if config.drop_duplicate_rows {
        let before = rows.len();
        let keep: Vec<bool> = {
            let mut seen = FxHashSet::default();
            rows.iter().map(|r| seen.insert(exact_row_key(r))).collect()
        };
        rows = rows
            .into_iter()
            .zip(keep)
            .filter_map(|(row, keep)| keep.then_some(row))
            .collect();
        tracing::debug!("Dropped {} exact duplicate rows", before - rows.len());
    }

    if !unmapped.is_empty() {
        let mut codes: Vec<&String> = unmapped.iter().collect();
        codes.sort();
        tracing::info!("{} NOC codes have no region mapping: {:?}", codes.len(), codes);
    }
    tracing::info!(
        "Preprocessed {} rows ({} region overrides applied)",
        rows.len(),
        overridden
    );

    Ok(ProcessedTable::from_records(rows))
}

type ExactRowKey<'a> = (
    &'a str,
    Option<Sex>,
    Option<u64>,
    Option<u64>,
    Option<u64>,
    crate::table::TeamMedalKey<'a>,
    Option<Season>,
);

/// Every source column of the row; floats compared bitwise
fn exact_row_key(r: &ParticipationRecord) -> ExactRowKey<'_> {
    (
        &r.name,
        r.sex,
        r.age.map(f64::to_bits),
        r.height.map(f64::to_bits),
        r.weight.map(f64::to_bits),
        r.team_medal_key(),
        r.season,
    )
}
