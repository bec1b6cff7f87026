//! Olympics Analytics
//!
//! Aggregation engine behind an Olympics history dashboard: loads 120 years of
//! athlete-event records, resolves NOC codes to modern regions once, then answers
//! medal tally, leaderboard, country and demographic questions from the shared
//! processed table.
//!
//! - `data`: CSV loading with Polars
//! - `preprocess`: region resolution, medal indicators, duplicate removal
//! - `table`: typed records and the immutable `ProcessedTable`
//! - `queries`: read-only aggregations
//! - `report`: per-country bundles, built in parallel
//! - `api_server`: axum JSON API (feature `api`)

pub mod config;
pub mod data;
pub mod error;
pub mod preprocess;
pub mod queries;
pub mod report;
pub mod table;
pub mod utils;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::{NocOverrides, PreprocessConfig, ServerConfig};
pub use data::OlympicsData;
pub use error::{DataIntegrityError, FilterField, SelectionParseError, UnknownFilterValue};
pub use preprocess::{preprocess, preprocess_with};
pub use queries::*;
pub use report::{all_country_profiles, country_profile, CountryProfile};
pub use table::{Medal, ParticipationRecord, ProcessedTable, Season, Selection, Sex, OVERALL};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
