// Axum API Server Module
//
// Purpose: JSON API over the Olympics query functions
// The dataset is preprocessed once at startup; handlers only borrow the shared table.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use serde::Serialize;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use anyhow::Context;

#[cfg(feature = "api")]
use crate::config::ServerConfig;

#[cfg(feature = "api")]
use crate::data::OlympicsData;

#[cfg(feature = "api")]
use crate::error::UnknownFilterValue;

#[cfg(feature = "api")]
use crate::preprocess::preprocess_with;

#[cfg(feature = "api")]
use crate::queries::{
    age_distribution, country_year_list, data_over_time, fetch_medal_tally,
    gold_medalist_ages_by_sport, host_cities, men_vs_women, most_successful,
    overview_stats, participating_nations_over_time, sport_event_matrix,
    top_athletes_overall, weight_v_height, OverTimeDimension,
};

#[cfg(feature = "api")]
use crate::report::country_profile;

#[cfg(feature = "api")]
use crate::table::{ProcessedTable, Selection, OVERALL};

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ProcessedTable>,
    pub cache: Cache<String, serde_json::Value>,
}

#[cfg(feature = "api")]
impl AppState {
    /// Load both CSV files and preprocess them
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let data = OlympicsData::load(
            &config.data_dir,
            &config.athletes_file,
            &config.regions_file,
        )?;

        tracing::info!("Preprocessing participation records...");
        let table = preprocess_with(&data.athletes, &data.regions, &config.preprocess)
            .context("Failed to preprocess the Olympics dataset")?;
        tracing::info!(
            "Processed table ready: {} rows, {} editions, {} regions",
            table.len(),
            table.years().len(),
            table.regions().len()
        );

        Ok(Self::from_table(table, config))
    }

    /// Wrap an already processed table
    pub fn from_table(table: ProcessedTable, config: &ServerConfig) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();

        Self {
            table: Arc::new(table),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Selector options
        .route("/api/filters", get(get_filters))

        // Medal tally
        .route("/api/medal-tally", get(get_medal_tally))

        // Overall analysis
        .route("/api/overview", get(get_overview))
        .route("/api/over-time/:dimension", get(get_over_time))
        .route("/api/sport-events", get(get_sport_events))
        .route("/api/host-cities", get(get_host_cities))

        // Athlete analysis
        .route("/api/athletes/top", get(get_top_athletes))
        .route("/api/athletes/overall", get(get_overall_athletes))
        .route("/api/athletes/physique", get(get_physique))
        .route("/api/athletes/gender", get(get_gender))
        .route("/api/athletes/ages", get(get_ages))

        // Country-wise analysis
        .route("/api/countries/:country", get(get_country))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "records": state.table.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn get_filters(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let result = cached(&state, "filters".to_string(), |table| {
        let (years, countries) = country_year_list(table);
        let sports: Vec<Selection<String>> = std::iter::once(Selection::Overall)
            .chain(table.sports().iter().cloned().map(Selection::Only))
            .collect();

        Ok(serde_json::json!({
            "years": years,
            "countries": countries,
            "sports": sports,
        }))
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_medal_tally(
    State(state): State<AppState>,
    Query(params): Query<TallyQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let year = params
        .year
        .as_deref()
        .unwrap_or(OVERALL)
        .parse::<Selection<i32>>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let country = Selection::from_value(params.country.as_deref().unwrap_or(OVERALL));

    let cache_key = format!("medal_tally:{}:{}", year, country);
    let result = cached(&state, cache_key, move |table| {
        let unknown = table
            .check_year(&year)
            .and_then(|_| table.check_country(&country))
            .err();
        let tally = fetch_medal_tally(table, &year, &country);
        rows_response(&tally, unknown)
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_overview(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let result = cached(&state, "overview".to_string(), |table| {
        Ok(serde_json::to_value(overview_stats(table))?)
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_over_time(
    State(state): State<AppState>,
    Path(dimension): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let dimension: OverTimeDimension = dimension.parse().map_err(AppError::BadRequest)?;

    let cache_key = format!("over_time:{:?}", dimension);
    let result = cached(&state, cache_key, move |table| match dimension {
        OverTimeDimension::Nations => rows_response(&participating_nations_over_time(table), None),
        other => rows_response(&data_over_time(table, other), None),
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_sport_events(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let result = cached(&state, "sport_events".to_string(), |table| {
        Ok(serde_json::to_value(sport_event_matrix(table))?)
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_host_cities(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let result = cached(&state, "host_cities".to_string(), |table| {
        rows_response(&host_cities(table), None)
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_top_athletes(
    State(state): State<AppState>,
    Query(params): Query<SportQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sport = params.selection();

    let cache_key = format!("most_successful:{}", sport);
    let result = cached(&state, cache_key, move |table| {
        let unknown = table.check_sport(&sport).err();
        rows_response(&most_successful(table, &sport), unknown)
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_overall_athletes(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let result = cached(&state, "top_athletes_overall".to_string(), |table| {
        rows_response(&top_athletes_overall(table), None)
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_physique(
    State(state): State<AppState>,
    Query(params): Query<SportQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sport = params.selection();

    let cache_key = format!("weight_v_height:{}", sport);
    let result = cached(&state, cache_key, move |table| {
        let unknown = table.check_sport(&sport).err();
        rows_response(&weight_v_height(table, &sport), unknown)
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_gender(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let result = cached(&state, "men_vs_women".to_string(), |table| {
        rows_response(&men_vs_women(table), None)
    })
    .await?;

    Ok(Json(result))
}

/// Age distribution plus gold medalist ages for the listed sports (all sports when omitted)
#[cfg(feature = "api")]
async fn get_ages(
    State(state): State<AppState>,
    Query(params): Query<AgesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Comma-separated: "Swimming,Gymnastics"
    let sports: Vec<String> = params
        .sports
        .as_deref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let cache_key = format!("ages:{}", sports.join(","));
    let result = cached(&state, cache_key, move |table| {
        Ok(serde_json::json!({
            "distribution": age_distribution(table),
            "gold_by_sport": gold_medalist_ages_by_sport(table, &sports),
        }))
    })
    .await?;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Err(unknown) = state.table.check_country(&Selection::from_value(&country)) {
        return Err(AppError::NotFound(unknown.to_string()));
    }

    let cache_key = format!("country_profile:{}", country);
    let result = cached(&state, cache_key, move |table| {
        let profile = country_profile(table, &country)
            .ok_or_else(|| AppError::NotFound(format!("unknown country '{}'", country)))?;
        Ok(serde_json::to_value(profile)?)
    })
    .await?;

    Ok(Json(result))
}

// ============================================================================
// Request Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct TallyQuery {
    year: Option<String>,
    country: Option<String>,
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct SportQuery {
    sport: Option<String>,
}

#[cfg(feature = "api")]
impl SportQuery {
    fn selection(&self) -> Selection<String> {
        Selection::from_value(self.sport.as_deref().unwrap_or(OVERALL))
    }
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct AgesQuery {
    sports: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Serve from the result cache, computing on the blocking pool on a miss
#[cfg(feature = "api")]
async fn cached<F>(state: &AppState, cache_key: String, compute: F) -> Result<serde_json::Value, AppError>
where
    F: FnOnce(&ProcessedTable) -> Result<serde_json::Value, AppError> + Send + 'static,
{
    if let Some(hit) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return Ok(hit);
    }

    let table = Arc::clone(&state.table);
    let result = tokio::task::spawn_blocking(move || compute(&table))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    state.cache.insert(cache_key, result.clone()).await;
    Ok(result)
}

/// `{"rows": n, "data": [...]}`, plus `unknown_filter` when a filter value is absent
#[cfg(feature = "api")]
fn rows_response<T: Serialize>(
    rows: &[T],
    unknown: Option<UnknownFilterValue>,
) -> Result<serde_json::Value, AppError> {
    let mut body = serde_json::json!({
        "rows": rows.len(),
        "data": serde_json::to_value(rows)?,
    });

    if let Some(unknown) = unknown {
        body["unknown_filter"] = serde_json::to_value(&unknown)?;
    }

    Ok(body)
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
    NotFound(String),
}

#[cfg(feature = "api")]
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON serialization error: {}", e))
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
