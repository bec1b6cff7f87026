//! Query Functions
//!
//! Independent, read-only aggregations over a `ProcessedTable`. Each takes the
//! table plus optional filter arguments and returns ordered rows ready to render.
//!
//! De-duplication differs per query and is part of each contract:
//! - medal tally, country heatmap: one medal per team-medal key
//! - athlete leaderboards, year-wise tally: raw medal rows (one per teammate)
//! - demographics: one row per athlete
//!
//! A filter value absent from the dataset returns an empty result, never an error.

pub mod athletes;
pub mod country;
pub mod demographics;
pub mod matrix;
pub mod medal_tally;
pub mod participation;

pub use athletes::{
    most_successful, most_successful_countrywise, top_athletes_overall, AthleteMedalsRow,
    CountryAthleteRow, TopAthleteRow,
};
pub use country::{country_event_heatmap, yearwise_medal_tally, YearwiseTallyRow};
pub use demographics::{
    age_distribution, gold_medalist_ages_by_sport, men_vs_women, weight_v_height, AgeDistribution,
    AgeSeries, GenderRow, MedalCategory, PhysiqueRow,
};
pub use matrix::SportYearMatrix;
pub use medal_tally::{country_year_list, fetch_medal_tally, MedalTallyRow, TallyKey};
pub use participation::{
    data_over_time, host_cities, overview_stats, participating_nations_over_time,
    sport_event_matrix, EditionCountRow, HostCityRow, NationsRow, OverTimeDimension,
    OverviewStats,
};
