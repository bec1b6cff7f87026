//! Country Reports
//!
//! Bundles the country-wise views (medal trend, sport heatmap, top athletes)
//! into one serializable profile. `all_country_profiles` builds every region's
//! profile in parallel with rayon; the table is read-only so no locking is needed.

use crate::queries::{
    country_event_heatmap, most_successful_countrywise, yearwise_medal_tally, CountryAthleteRow,
    SportYearMatrix, YearwiseTallyRow,
};
use crate::table::ProcessedTable;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryProfile {
    pub country: String,
    /// Sum of the year-wise `Medal` column (raw medal rows)
    pub medal_rows: u32,
    pub yearwise: Vec<YearwiseTallyRow>,
    pub heatmap: SportYearMatrix,
    pub top_athletes: Vec<CountryAthleteRow>,
}

/// Profile of one region, `None` if the region never appears in the table
pub fn country_profile(table: &ProcessedTable, country: &str) -> Option<CountryProfile> {
    if !table.has_region(country) {
        tracing::debug!("country_profile: unknown country '{}'", country);
        return None;
    }

    let yearwise = yearwise_medal_tally(table, country);
    Some(CountryProfile {
        country: country.to_string(),
        medal_rows: yearwise.iter().map(|r| r.medal).sum(),
        heatmap: country_event_heatmap(table, country),
        top_athletes: most_successful_countrywise(table, country),
        yearwise,
    })
}

/// Profiles of every region, ascending by region name
pub fn all_country_profiles(table: &ProcessedTable) -> Vec<CountryProfile> {
    let start = std::time::Instant::now();

    let profiles: Vec<CountryProfile> = table
        .regions()
        .par_iter()
        .filter_map(|country| country_profile(table, country))
        .collect();

    tracing::info!(
        "Built {} country profiles in {:.2?}",
        profiles.len(),
        start.elapsed()
    );
    profiles
}
