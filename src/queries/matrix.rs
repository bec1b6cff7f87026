//! Sport × Year cross-tabulation
//!
//! Shared by the country heatmap (medals per sport per edition) and the sport
//! evolution matrix (events per sport per edition). Rows and columns are sorted
//! ascending; combinations that never occur are 0.

use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SportYearMatrix {
    /// Row labels, ascending
    pub sports: Vec<String>,
    /// Column labels, ascending
    pub years: Vec<i32>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<u32>>,
}

impl SportYearMatrix {
    /// Count occurrences of each (sport, year) pair
    pub fn crosstab<'a>(pairs: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let mut cells: FxHashMap<(&'a str, i32), u32> = FxHashMap::default();
        for pair in pairs {
            *cells.entry(pair).or_insert(0) += 1;
        }

        let mut sports: Vec<&str> = cells.keys().map(|(s, _)| *s).collect();
        sports.sort_unstable();
        sports.dedup();

        let mut years: Vec<i32> = cells.keys().map(|(_, y)| *y).collect();
        years.sort_unstable();
        years.dedup();

        let counts = sports
            .iter()
            .map(|sport| {
                years
                    .iter()
                    .map(|year| cells.get(&(*sport, *year)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Self {
            sports: sports.into_iter().map(str::to_string).collect(),
            years,
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sports.is_empty()
    }

    /// Cell value; 0 for labels outside the matrix
    pub fn get(&self, sport: &str, year: i32) -> u32 {
        let row = self.sports.iter().position(|s| s == sport);
        let column = self.years.binary_search(&year).ok();
        match (row, column) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Sum over every cell
    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }
}
