//! Country Analysis
//!
//! - `yearwise_medal_tally`: medal trend line, raw medal rows per edition
//! - `country_event_heatmap`: Sport × Year medals, one per team-medal key

use crate::queries::matrix::SportYearMatrix;
use crate::table::ProcessedTable;
use serde::Serialize;
use std::collections::BTreeMap;

use super::medal_tally::MedalCounts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearwiseTallyRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Gold")]
    pub gold: u32,
    #[serde(rename = "Silver")]
    pub silver: u32,
    #[serde(rename = "Bronze")]
    pub bronze: u32,
    /// Raw medal rows in that edition (not team de-duplicated)
    #[serde(rename = "Medal")]
    pub medal: u32,
}

/// Per-edition medal counts of one region, ascending by Year
pub fn yearwise_medal_tally(table: &ProcessedTable, country: &str) -> Vec<YearwiseTallyRow> {
    if !table.has_region(country) {
        tracing::debug!("yearwise_medal_tally: unknown country '{}'", country);
        return Vec::new();
    }

    let mut by_year: BTreeMap<i32, (MedalCounts, u32)> = BTreeMap::new();
    for record in table
        .records()
        .iter()
        .filter(|r| r.has_medal() && r.in_region(country))
    {
        let (counts, rows) = by_year.entry(record.year).or_default();
        counts.add(record);
        *rows += 1;
    }

    by_year
        .into_iter()
        .map(|(year, (counts, rows))| YearwiseTallyRow {
            year,
            gold: counts.gold,
            silver: counts.silver,
            bronze: counts.bronze,
            medal: rows,
        })
        .collect()
}

/// Sport × Year medal matrix of one region, team medals counted once
pub fn country_event_heatmap(table: &ProcessedTable, country: &str) -> SportYearMatrix {
    if !table.has_region(country) {
        tracing::debug!("country_event_heatmap: unknown country '{}'", country);
        return SportYearMatrix::default();
    }

    SportYearMatrix::crosstab(
        table
            .medal_deduplicated()
            .into_iter()
            .filter(|r| r.has_medal() && r.in_region(country))
            .map(|r| (r.sport.as_str(), r.year)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::fixtures::{row, table, B, G, NONE, S};

    fn sample() -> ProcessedTable {
        table(vec![
            row("Tim", Some("USA"), 2004, "Basketball", "Men's", B),
            row("Lebron", Some("USA"), 2004, "Basketball", "Men's", B),
            row("Michael", Some("USA"), 2004, "Swimming", "200m", G),
            row("Michael", Some("USA"), 2008, "Swimming", "200m", G),
            row("Michael", Some("USA"), 2008, "Swimming", "400m", S),
            row("Ryan", Some("USA"), 2008, "Swimming", "100m", NONE),
            row("Laure", Some("France"), 2004, "Swimming", "400m", G),
        ])
    }

    #[test]
    fn test_yearwise_counts_raw_rows() {
        let tally = yearwise_medal_tally(&sample(), "USA");
        assert_eq!(
            tally,
            vec![
                YearwiseTallyRow { year: 2004, gold: 1, silver: 0, bronze: 2, medal: 3 },
                YearwiseTallyRow { year: 2008, gold: 1, silver: 1, bronze: 0, medal: 2 },
            ]
        );
    }

    #[test]
    fn test_heatmap_counts_team_medal_once() {
        let heatmap = country_event_heatmap(&sample(), "USA");
        assert_eq!(heatmap.sports, vec!["Basketball", "Swimming"]);
        assert_eq!(heatmap.years, vec![2004, 2008]);
        assert_eq!(heatmap.get("Basketball", 2004), 1);
        assert_eq!(heatmap.get("Basketball", 2008), 0);
        assert_eq!(heatmap.get("Swimming", 2008), 2);
        assert_eq!(heatmap.total(), 4);
    }

    #[test]
    fn test_split_teams_under_one_noc_count_separately() {
        // Two crews entered under the same NOC: each crew's medal counts once
        let t = table(vec![
            row("Ann", Some("USA"), 1960, "Sailing", "Two Person", G).team("United States-1"),
            row("Bea", Some("USA"), 1960, "Sailing", "Two Person", G).team("United States-1"),
            row("Cat", Some("USA"), 1960, "Sailing", "Two Person", G).team("United States-2"),
            row("Dee", Some("USA"), 1960, "Sailing", "Two Person", G).team("United States-2"),
        ]);

        let heatmap = country_event_heatmap(&t, "USA");
        assert_eq!(heatmap.get("Sailing", 1960), 2);

        let yearwise = yearwise_medal_tally(&t, "USA");
        assert_eq!(yearwise[0].medal, 4);
    }

    #[test]
    fn test_unknown_country_is_empty() {
        assert!(yearwise_medal_tally(&sample(), "Atlantis").is_empty());
        assert!(country_event_heatmap(&sample(), "Atlantis").is_empty());
    }

    #[test]
    fn test_country_without_medals() {
        let t = table(vec![row("Nobody", Some("Chad"), 2008, "Judo", "Heavy", NONE)]);
        assert!(yearwise_medal_tally(&t, "Chad").is_empty());
        assert!(country_event_heatmap(&t, "Chad").is_empty());
    }
}
