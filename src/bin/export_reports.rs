//! Export country reports and dashboard summaries as JSON
//!
//! Loads the dataset configured through the environment (see `ServerConfig`),
//! preprocesses it once, and writes:
//! - `countries/<region>.json`: one profile per region
//! - `summary.json`: medal tally, overview figures and participation trends
//!
//! Usage:
//!   cargo run --release --bin export_reports -- [output_dir]

use anyhow::{Context, Result};
use olympics_analytics::{
    all_country_profiles, fetch_medal_tally, men_vs_women, overview_stats,
    participating_nations_over_time, preprocess_with, OlympicsData, Selection, ServerConfig,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "olympics_analytics=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let output_dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "reports".to_string()),
    );
    let config = ServerConfig::from_env()?;

    let total_start = Instant::now();

    let data = OlympicsData::load(&config.data_dir, &config.athletes_file, &config.regions_file)?;
    let table = preprocess_with(&data.athletes, &data.regions, &config.preprocess)
        .context("Failed to preprocess the Olympics dataset")?;

    let countries_dir = output_dir.join("countries");
    fs::create_dir_all(&countries_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", countries_dir))?;

    // Country profiles (parallel)
    let profiles = all_country_profiles(&table);
    for profile in &profiles {
        let path = countries_dir.join(format!("{}.json", file_stem(&profile.country)));
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
    }

    // Dashboard summary
    let summary = serde_json::json!({
        "overview": overview_stats(&table),
        "medal_tally": fetch_medal_tally(&table, &Selection::Overall, &Selection::Overall),
        "nations_over_time": participating_nations_over_time(&table),
        "men_vs_women": men_vs_women(&table),
    });
    let summary_path = output_dir.join("summary.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("Failed to write {:?}", summary_path))?;

    tracing::info!(
        "Exported {} country profiles to {:?} in {:.2?}",
        profiles.len(),
        output_dir,
        total_start.elapsed()
    );

    Ok(())
}

/// Region names contain spaces and slashes ("Antigua", "Trinidad/Tobago")
fn file_stem(region: &str) -> String {
    region
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
