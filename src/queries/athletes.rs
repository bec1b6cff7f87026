//! Athlete Leaderboards
//!
//! Medal counts here are raw medal rows: every member of a medal-winning team
//! gets the medal. This intentionally differs from the country tally.

use crate::table::{Medal, ParticipationRecord, ProcessedTable, Selection};
use crate::utils::top_n_by_count;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rows returned by `most_successful`
pub const MOST_SUCCESSFUL_LIMIT: usize = 15;

/// Rows returned by `most_successful_countrywise` and `top_athletes_overall`
pub const COUNTRY_TOP_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteMedalsRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Medals")]
    pub medals: u32,
    #[serde(rename = "Sport")]
    pub sport: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryAthleteRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "Medals")]
    pub medals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopAthleteRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gold")]
    pub gold: u32,
    #[serde(rename = "Silver")]
    pub silver: u32,
    #[serde(rename = "Bronze")]
    pub bronze: u32,
    #[serde(rename = "Total")]
    pub total: u32,
}

/// Medal rows grouped by (Name, Sport, region) in ascending key order
fn medal_rows_by_athlete<'a>(
    table: &'a ProcessedTable,
    keep: impl Fn(&ParticipationRecord) -> bool,
) -> BTreeMap<(&'a str, &'a str, &'a str), u32> {
    let mut groups: BTreeMap<(&str, &str, &str), u32> = BTreeMap::new();
    for record in table.records().iter().filter(|&r| r.has_medal() && keep(r)) {
        if let Some(region) = record.region.as_deref() {
            *groups
                .entry((record.name.as_str(), record.sport.as_str(), region))
                .or_insert(0) += 1;
        }
    }
    groups
}

/// Top 15 medal-winning athletes, optionally within one sport
pub fn most_successful(table: &ProcessedTable, sport: &Selection<String>) -> Vec<AthleteMedalsRow> {
    if let Err(unknown) = table.check_sport(sport) {
        tracing::debug!("most_successful: {}, returning no athletes", unknown);
        return Vec::new();
    }

    let groups = medal_rows_by_athlete(table, |r| {
        sport.specific().map_or(true, |s| r.sport == *s)
    });

    let rows = groups
        .into_iter()
        .map(|((name, sport, region), medals)| AthleteMedalsRow {
            name: name.to_string(),
            medals,
            sport: sport.to_string(),
            region: region.to_string(),
        })
        .collect();

    top_n_by_count(rows, MOST_SUCCESSFUL_LIMIT, |r| r.medals)
}

/// Top 10 medal-winning athletes of one region
pub fn most_successful_countrywise(table: &ProcessedTable, country: &str) -> Vec<CountryAthleteRow> {
    if !table.has_region(country) {
        tracing::debug!("most_successful_countrywise: unknown country '{}'", country);
        return Vec::new();
    }

    let groups = medal_rows_by_athlete(table, |r| r.in_region(country));

    let rows = groups
        .into_iter()
        .map(|((name, sport, _), medals)| CountryAthleteRow {
            name: name.to_string(),
            sport: sport.to_string(),
            medals,
        })
        .collect();

    top_n_by_count(rows, COUNTRY_TOP_LIMIT, |r| r.medals)
}

/// Top 10 athletes by total medals across all sports and regions, with the breakdown by type
pub fn top_athletes_overall(table: &ProcessedTable) -> Vec<TopAthleteRow> {
    let mut by_name: BTreeMap<&str, [u32; 3]> = BTreeMap::new();
    for record in table.records() {
        let slot = match record.medal {
            Some(Medal::Gold) => 0,
            Some(Medal::Silver) => 1,
            Some(Medal::Bronze) => 2,
            None => continue,
        };
        by_name.entry(record.name.as_str()).or_default()[slot] += 1;
    }

    let rows = by_name
        .into_iter()
        .map(|(name, [gold, silver, bronze])| TopAthleteRow {
            name: name.to_string(),
            gold,
            silver,
            bronze,
            total: gold + silver + bronze,
        })
        .collect();

    top_n_by_count(rows, COUNTRY_TOP_LIMIT, |r| r.total)
}
