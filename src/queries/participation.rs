//! Participation Over Time
//!
//! Edition-level counts for the overview page: nations, events and athletes per
//! Games, how many events each sport held, where the Games were hosted, and the
//! headline totals.

use crate::queries::matrix::SportYearMatrix;
use crate::table::{ParticipationRecord, ProcessedTable};
use crate::utils::distinct_by;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationsRow {
    #[serde(rename = "Edition")]
    pub edition: i32,
    #[serde(rename = "Nations")]
    pub nations: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditionCountRow {
    #[serde(rename = "Edition")]
    pub edition: i32,
    #[serde(rename = "Count")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostCityRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "City")]
    pub city: String,
}

/// Headline totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub editions: usize,
    pub host_cities: usize,
    pub sports: usize,
    pub events: usize,
    pub nations: usize,
    pub athletes: usize,
}

/// What `data_over_time` counts per edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverTimeDimension {
    /// Distinct NOC codes
    Nations,
    Events,
    /// Distinct athlete names
    Athletes,
}

impl FromStr for OverTimeDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nations" => Ok(OverTimeDimension::Nations),
            "events" => Ok(OverTimeDimension::Events),
            "athletes" => Ok(OverTimeDimension::Athletes),
            other => Err(format!(
                "unknown dimension '{}': expected nations, events or athletes",
                other
            )),
        }
    }
}

/// Distinct values of `dimension` per edition, ascending by edition
///
/// Null values (a missing NOC code) are not counted.
pub fn data_over_time(table: &ProcessedTable, dimension: OverTimeDimension) -> Vec<EditionCountRow> {
    let pairs = table.records().iter().filter_map(|r| {
        let value = match dimension {
            OverTimeDimension::Nations => r.noc.as_deref()?,
            OverTimeDimension::Events => r.event.as_str(),
            OverTimeDimension::Athletes => r.name.as_str(),
        };
        Some((r.year, value))
    });

    let distinct: FxHashSet<(i32, &str)> = pairs.collect();

    let mut by_year: BTreeMap<i32, u32> = BTreeMap::new();
    for (year, _) in distinct {
        *by_year.entry(year).or_insert(0) += 1;
    }

    by_year
        .into_iter()
        .map(|(edition, count)| EditionCountRow { edition, count })
        .collect()
}

/// Distinct NOC codes per edition, ascending
///
/// Counts codes, not regions: a code without a region mapping still counts.
pub fn participating_nations_over_time(table: &ProcessedTable) -> Vec<NationsRow> {
    data_over_time(table, OverTimeDimension::Nations)
        .into_iter()
        .map(|row| NationsRow {
            edition: row.edition,
            nations: row.count,
        })
        .collect()
}

/// Events held per sport per edition
pub fn sport_event_matrix(table: &ProcessedTable) -> SportYearMatrix {
    let events = distinct_by(table.records().iter(), |r| {
        (r.year, r.sport.as_str(), r.event.as_str())
    });
    SportYearMatrix::crosstab(events.into_iter().map(|r| (r.sport.as_str(), r.year)))
}

/// Host city of every edition, sorted by Year then City
///
/// 1956 had two hosts (Melbourne and Stockholm), so a year can repeat.
pub fn host_cities(table: &ProcessedTable) -> Vec<HostCityRow> {
    let distinct: FxHashSet<(i32, &str)> = table
        .records()
        .iter()
        .map(|r| (r.year, r.city.as_str()))
        .collect();

    let mut rows: Vec<HostCityRow> = distinct
        .into_iter()
        .map(|(year, city)| HostCityRow {
            year,
            city: city.to_string(),
        })
        .collect();
    rows.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.city.cmp(&b.city)));
    rows
}

/// Headline distinct counts; events are counted by name across sports
pub fn overview_stats(table: &ProcessedTable) -> OverviewStats {
    let records = table.records();
    let count = |key: fn(&ParticipationRecord) -> &str| {
        records.iter().map(key).collect::<FxHashSet<&str>>().len()
    };

    OverviewStats {
        editions: table.years().len(),
        host_cities: count(|r| r.city.as_str()),
        sports: table.sports().len(),
        events: count(|r| r.event.as_str()),
        nations: table.regions().len(),
        athletes: count(|r| r.name.as_str()),
    }
}
