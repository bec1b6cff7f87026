//! Medal Tally
//!
//! `fetch_medal_tally` counts medals on the team-medal de-duplicated view, so a
//! basketball gold is one gold for the country however many players collected it.
//!
//! Four cases, by (year, country):
//! - (Overall, Overall): per region, descending by Gold
//! - (Overall, country): per Year for that region, ascending by Year
//! - (year, Overall): per region within that year, descending by Gold
//! - (year, country): that region within that year (at most one row)
//!
//! Region groups start in ascending name order, so Gold ties list alphabetically.
//! Rows with a null region are not attributable to a country and are left out of
//! region-grouped tallies.

use crate::table::{ParticipationRecord, ProcessedTable, Selection, OVERALL};
use serde::Serialize;
use std::collections::BTreeMap;

/// Grouping label of a tally row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TallyKey {
    #[serde(rename = "region")]
    Region(String),
    Year(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedalTallyRow {
    #[serde(flatten)]
    pub key: TallyKey,
    #[serde(rename = "Gold")]
    pub gold: u32,
    #[serde(rename = "Silver")]
    pub silver: u32,
    #[serde(rename = "Bronze")]
    pub bronze: u32,
    #[serde(rename = "Total")]
    pub total: u32,
}

/// Running Gold/Silver/Bronze sums over indicator columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MedalCounts {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl MedalCounts {
    pub(crate) fn add(&mut self, record: &ParticipationRecord) {
        self.gold += record.gold;
        self.silver += record.silver;
        self.bronze += record.bronze;
    }

    pub(crate) fn total(&self) -> u32 {
        self.gold + self.silver + self.bronze
    }

    fn into_row(self, key: TallyKey) -> MedalTallyRow {
        MedalTallyRow {
            key,
            gold: self.gold,
            silver: self.silver,
            bronze: self.bronze,
            total: self.total(),
        }
    }
}

/// Medal tally for the (year, country) selection
pub fn fetch_medal_tally(
    table: &ProcessedTable,
    year: &Selection<i32>,
    country: &Selection<String>,
) -> Vec<MedalTallyRow> {
    if let Err(unknown) = table.check_year(year).and(table.check_country(country)) {
        tracing::debug!("fetch_medal_tally: {}, returning empty tally", unknown);
        return Vec::new();
    }

    let rows = table
        .medal_deduplicated()
        .into_iter()
        .filter(|r| year.specific().map_or(true, |y| r.year == *y))
        .filter(|r| country.specific().map_or(true, |c| r.in_region(c)));

    if year.is_overall() && !country.is_overall() {
        // Country history: one row per edition
        let mut by_year: BTreeMap<i32, MedalCounts> = BTreeMap::new();
        for record in rows {
            by_year.entry(record.year).or_default().add(record);
        }
        return by_year
            .into_iter()
            .map(|(y, counts)| counts.into_row(TallyKey::Year(y)))
            .collect();
    }

    let mut by_region: BTreeMap<&str, MedalCounts> = BTreeMap::new();
    for record in rows {
        if let Some(region) = record.region.as_deref() {
            by_region.entry(region).or_default().add(record);
        }
    }

    let mut tally: Vec<MedalTallyRow> = by_region
        .into_iter()
        .map(|(region, counts)| counts.into_row(TallyKey::Region(region.to_string())))
        .collect();
    tally.sort_by(|a, b| b.gold.cmp(&a.gold));
    tally
}

/// Selectable years and countries, each led by the "Overall" sentinel
///
/// Both lists are strictly ascending after the sentinel; null regions are never offered.
pub fn country_year_list(table: &ProcessedTable) -> (Vec<Selection<i32>>, Vec<Selection<String>>) {
    let years = std::iter::once(Selection::Overall)
        .chain(table.years().iter().copied().map(Selection::Only))
        .collect();

    let countries = std::iter::once(Selection::Overall)
        .chain(
            table
                .regions()
                .iter()
                .filter(|r| r.as_str() != OVERALL)
                .cloned()
                .map(Selection::Only),
        )
        .collect();

    (years, countries)
}
