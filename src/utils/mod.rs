//! Utility modules for the aggregation engine
//!
//! Contains shared functionality used across multiple queries:
//! - Frame helpers: column validation and typed column access on polars frames
//! - Dedup: first-occurrence de-duplication by a borrowed key
//! - Ranking: stable descending sort + top-N truncation
//! - Stats: mean/median for demographic series

pub mod frame_helpers;
pub mod dedup;
pub mod ranking;
pub mod stats;

// Re-export commonly used helpers
pub use frame_helpers::{materialize_with_columns, missing_columns, require_columns};
pub use dedup::distinct_by;
pub use ranking::top_n_by_count;
pub use stats::{mean, median};
