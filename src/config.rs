//! Configuration
//!
//! - `PreprocessConfig`: how raw rows become the processed table
//! - `NocOverrides`: explicit NOC → region corrections for historical entities
//! - `ServerConfig`: process settings read from environment variables

use crate::table::Season;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// NOC → region corrections applied before the lookup table
///
/// The source data attributes some composite teams to a code that either has
/// no region or a misleading one. The default maps the 1992 Unified Team (EUN),
/// a delegation of former Soviet republics, to Russia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NocOverrides(FxHashMap<String, String>);

impl NocOverrides {
    pub fn empty() -> Self {
        Self(FxHashMap::default())
    }

    pub fn with(mut self, noc: &str, region: &str) -> Self {
        self.0.insert(noc.to_string(), region.to_string());
        self
    }

    pub fn get(&self, noc: &str) -> Option<&str> {
        self.0.get(noc).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse `"EUN=Russia,IOA=Individual Olympic Athletes"`
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut overrides = Self::empty();
        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (noc, region) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected NOC=Region, got '{}'", pair))?;
            let (noc, region) = (noc.trim(), region.trim());
            if noc.is_empty() || region.is_empty() {
                return Err(format!("expected NOC=Region, got '{}'", pair));
            }
            overrides = overrides.with(noc, region);
        }
        Ok(overrides)
    }
}

impl Default for NocOverrides {
    fn default() -> Self {
        Self::empty().with("EUN", "Russia")
    }
}

/// Preprocessing options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub noc_overrides: NocOverrides,
    /// Keep only one season's Games; `None` keeps both
    pub season: Option<Season>,
    /// Drop rows that are identical in every column
    pub drop_duplicate_rows: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            noc_overrides: NocOverrides::default(),
            season: None,
            drop_duplicate_rows: true,
        }
    }
}

/// Process configuration for the binaries
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub athletes_file: String,
    pub regions_file: String,
    pub port: u16,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
    pub preprocess: PreprocessConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            athletes_file: "athlete_events.csv".to_string(),
            regions_file: "noc_regions.csv".to_string(),
            port: 3000,
            cache_ttl_secs: 300,
            cache_capacity: 10_000,
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables, falling back to defaults
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, over any key → value source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("ATHLETES_FILE") {
            config.athletes_file = file;
        }
        if let Some(file) = lookup("REGIONS_FILE") {
            config.regions_file = file;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got '{}'", port))?;
        }
        if let Some(ttl) = lookup("CACHE_TTL_SECS") {
            config.cache_ttl_secs = ttl
                .parse()
                .map_err(|_| anyhow::anyhow!("CACHE_TTL_SECS must be an integer, got '{}'", ttl))?;
        }
        if let Some(capacity) = lookup("CACHE_CAPACITY") {
            config.cache_capacity = capacity.parse().map_err(|_| {
                anyhow::anyhow!("CACHE_CAPACITY must be an integer, got '{}'", capacity)
            })?;
        }
        if let Some(season) = lookup("SEASON") {
            config.preprocess.season = Some(season.parse().map_err(anyhow::Error::msg)?);
        }
        if let Some(raw) = lookup("NOC_OVERRIDES") {
            config.preprocess.noc_overrides = NocOverrides::parse(&raw).map_err(anyhow::Error::msg)?;
        }

        Ok(config)
    }
}
