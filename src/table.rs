//! Typed Participation Model
//!
//! One `ParticipationRecord` per athlete-event appearance, plus the immutable
//! `ProcessedTable` every query reads from.
//!
//! Two de-duplication keys matter for correctness of the displayed numbers:
//! - team-medal key `(Team, NOC, Games, Year, City, Sport, Event, Medal)`: rows sharing it
//!   are one medal (e.g. every player of a gold-winning basketball team)
//! - athlete key `(Name, region)`: one athlete, however many events they entered

use crate::error::{FilterField, SelectionParseError, UnknownFilterValue};
use crate::utils::distinct_by;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sentinel accepted by every filter argument to mean "no restriction".
pub const OVERALL: &str = "Overall";

/// Podium result. Non-podium rows carry `None` on the record, never a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Parse the raw medal cell. "NA", empty and unknown strings mean no medal.
    pub fn parse(raw: &str) -> Option<Medal> {
        match raw.trim() {
            "Gold" => Some(Medal::Gold),
            "Silver" => Some(Medal::Silver),
            "Bronze" => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn parse(raw: &str) -> Option<Sex> {
        match raw.trim() {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Winter,
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("summer") => Ok(Season::Summer),
            s if s.eq_ignore_ascii_case("winter") => Ok(Season::Winter),
            other => Err(format!("unknown season '{}'", other)),
        }
    }
}

/// A filter argument: either the "Overall" sentinel or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    Overall,
    Only(T),
}

impl<T> Selection<T> {
    pub fn is_overall(&self) -> bool {
        matches!(self, Selection::Overall)
    }

    pub fn specific(&self) -> Option<&T> {
        match self {
            Selection::Overall => None,
            Selection::Only(v) => Some(v),
        }
    }
}

impl Selection<String> {
    /// Country and sport selections are free text; only the sentinel is special.
    pub fn from_value(raw: &str) -> Self {
        if raw == OVERALL {
            Selection::Overall
        } else {
            Selection::Only(raw.to_string())
        }
    }
}

impl FromStr for Selection<i32> {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == OVERALL {
            return Ok(Selection::Overall);
        }
        trimmed
            .parse::<i32>()
            .map(Selection::Only)
            .map_err(|_| SelectionParseError(s.to_string()))
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Overall => f.write_str(OVERALL),
            Selection::Only(v) => v.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::Overall => serializer.serialize_str(OVERALL),
            Selection::Only(v) => v.serialize(serializer),
        }
    }
}

/// One athlete-event appearance after preprocessing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationRecord {
    pub name: String,
    pub sex: Option<Sex>,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub team: String,
    pub noc: Option<String>,
    pub games: String,
    pub year: i32,
    pub season: Option<Season>,
    pub city: String,
    pub sport: String,
    pub event: String,
    pub medal: Option<Medal>,
    /// Modern region resolved from the NOC code; `None` when unmapped.
    pub region: Option<String>,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

/// Borrowed team-medal de-duplication key.
pub type TeamMedalKey<'a> = (
    &'a str,
    Option<&'a str>,
    &'a str,
    i32,
    &'a str,
    &'a str,
    &'a str,
    Option<Medal>,
);

impl ParticipationRecord {
    pub fn team_medal_key(&self) -> TeamMedalKey<'_> {
        (
            &self.team,
            self.noc.as_deref(),
            &self.games,
            self.year,
            &self.city,
            &self.sport,
            &self.event,
            self.medal,
        )
    }

    pub fn athlete_key(&self) -> (&str, Option<&str>) {
        (&self.name, self.region.as_deref())
    }

    pub fn has_medal(&self) -> bool {
        self.medal.is_some()
    }

    pub fn in_region(&self, region: &str) -> bool {
        self.region.as_deref() == Some(region)
    }

    /// Sets the one-hot medal indicators from `medal`.
    pub(crate) fn with_indicators(mut self) -> Self {
        self.gold = u32::from(self.medal == Some(Medal::Gold));
        self.silver = u32::from(self.medal == Some(Medal::Silver));
        self.bronze = u32::from(self.medal == Some(Medal::Bronze));
        self
    }
}

/// Immutable, preprocessed dataset shared by every query.
///
/// Built once at startup; queries only ever borrow it, so it can sit behind an
/// `Arc` and serve concurrent sessions without locking.
#[derive(Debug, Clone, Default)]
pub struct ProcessedTable {
    records: Vec<ParticipationRecord>,
    years: Vec<i32>,
    regions: Vec<String>,
    sports: Vec<String>,
}

impl ProcessedTable {
    /// Wrap already-preprocessed records and index their filter values.
    pub fn from_records(records: Vec<ParticipationRecord>) -> Self {
        let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        let mut regions: Vec<String> = records.iter().filter_map(|r| r.region.clone()).collect();
        regions.sort();
        regions.dedup();

        let mut sports: Vec<String> = records.iter().map(|r| r.sport.clone()).collect();
        sports.sort();
        sports.dedup();

        Self {
            records,
            years,
            regions,
            sports,
        }
    }

    pub fn records(&self) -> &[ParticipationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Distinct non-null regions, ascending.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Distinct sports, ascending.
    pub fn sports(&self) -> &[String] {
        &self.sports
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions.binary_search_by(|r| r.as_str().cmp(region)).is_ok()
    }

    pub fn has_sport(&self, sport: &str) -> bool {
        self.sports.binary_search_by(|s| s.as_str().cmp(sport)).is_ok()
    }

    pub fn check_year(&self, year: &Selection<i32>) -> Result<(), UnknownFilterValue> {
        match year {
            Selection::Only(y) if !self.has_year(*y) => Err(UnknownFilterValue {
                field: FilterField::Year,
                value: y.to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn check_country(&self, country: &Selection<String>) -> Result<(), UnknownFilterValue> {
        match country {
            Selection::Only(c) if !self.has_region(c) => Err(UnknownFilterValue {
                field: FilterField::Country,
                value: c.clone(),
            }),
            _ => Ok(()),
        }
    }

    pub fn check_sport(&self, sport: &Selection<String>) -> Result<(), UnknownFilterValue> {
        match sport {
            Selection::Only(s) if !self.has_sport(s) => Err(UnknownFilterValue {
                field: FilterField::Sport,
                value: s.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// First row of every team-medal key, in table order.
    pub fn medal_deduplicated(&self) -> Vec<&ParticipationRecord> {
        distinct_by(self.records.iter(), |r| r.team_medal_key())
    }

    /// First row of every (Name, region) athlete, in table order.
    pub fn athlete_deduplicated(&self) -> Vec<&ParticipationRecord> {
        distinct_by(self.records.iter(), |r| r.athlete_key())
    }
}
