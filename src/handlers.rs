use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::models::*;
use crate::score_cache::{fingerprint, ScoreCache};
use crate::similarity::SimilarityEngine;
use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Scoring engine (carries the observability hook).
    pub engine: SimilarityEngine,
    /// Pair score cache keyed by request fingerprint.
    pub score_cache: ScoreCache,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let score_cache = ScoreCache::new(
            Duration::from_secs(config.score_cache_ttl_secs),
            config.score_cache_capacity,
        );
        Self {
            config,
            engine: SimilarityEngine::default(),
            score_cache,
        }
    }
}

/// Body of `POST /api/v1/similarity`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRequest {
    pub target: CompanyProfile,
    pub candidate: CompanyProfile,
    #[serde(default)]
    pub options: SimilarityOptions,
}

/// Body of the batch and compare endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub target: CompanyProfile,
    pub candidates: Vec<CompanyProfile>,
    #[serde(default)]
    pub options: SimilarityOptions,
}

/// Rejects profiles the engine cannot describe meaningfully.
///
/// The engine itself is permissive; the service fails fast on a blank name
/// or coordinates outside the valid lat/lon ranges.
pub fn validate_profile(profile: &CompanyProfile) -> Result<(), AppError> {
    if profile.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }
    if let Some(lat) = profile.latitude {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::InvalidInput(format!(
                "latitude out of range for '{}': {}",
                profile.name, lat
            )));
        }
    }
    if let Some(lon) = profile.longitude {
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(AppError::InvalidInput(format!(
                "longitude out of range for '{}': {}",
                profile.name, lon
            )));
        }
    }
    Ok(())
}

pub fn validate_options(options: &SimilarityOptions) -> Result<(), AppError> {
    options.weights.validate().map_err(AppError::InvalidInput)?;
    if let Some(min_score) = options.min_score {
        if min_score > 100 {
            return Err(AppError::InvalidInput(format!(
                "minScore must be between 0 and 100, got {}",
                min_score
            )));
        }
    }
    Ok(())
}

fn validate_batch(request: &BatchRequest, max_batch_size: usize) -> Result<(), AppError> {
    validate_profile(&request.target).context("target")?;
    validate_options(&request.options)?;
    if request.candidates.len() > max_batch_size {
        return Err(AppError::BatchTooLarge {
            size: request.candidates.len(),
            max: max_batch_size,
        });
    }
    for (index, candidate) in request.candidates.iter().enumerate() {
        validate_profile(candidate).with_context(|| format!("candidate #{}", index))?;
    }
    Ok(())
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "company-similarity-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/similarity
///
/// Scores one candidate against the target. Results are memoised.
pub async fn calculate_similarity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PairRequest>,
) -> Result<Json<SimilarityScore>, AppError> {
    tracing::info!(
        "POST /similarity - target: {}, candidate: {}",
        payload.target.name,
        payload.candidate.name
    );
    validate_profile(&payload.target).context("target")?;
    validate_profile(&payload.candidate).context("candidate")?;
    validate_options(&payload.options)?;

    let key = fingerprint(&payload.target, &payload.candidate, &payload.options);
    if let Some(cached) = state.score_cache.get(&key).await {
        tracing::debug!("Score cache HIT for {}", payload.candidate.name);
        return Ok(Json(cached));
    }

    let score = state
        .engine
        .calculate(&payload.target, &payload.candidate, &payload.options);
    state.score_cache.insert(key, &score).await;

    Ok(Json(score))
}

/// POST /api/v1/similarity/batch
///
/// Scores, filters by `minScore` and sorts all candidates. Runs on the
/// blocking pool since large batches are CPU bound.
pub async fn batch_similarity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<Vec<BatchMatch>>, AppError> {
    tracing::info!(
        "POST /similarity/batch - target: {}, candidates: {}",
        payload.target.name,
        payload.candidates.len()
    );
    validate_batch(&payload, state.config.max_batch_size)?;

    let engine = state.engine.clone();
    let results = tokio::task::spawn_blocking(move || {
        engine.batch(&payload.target, &payload.candidates, &payload.options)
    })
    .await?;

    Ok(Json(results))
}

/// POST /api/v1/similarity/compare
///
/// Ranked comparison with summary statistics.
pub async fn compare_similarities(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<ComparisonReport>, AppError> {
    tracing::info!(
        "POST /similarity/compare - target: {}, candidates: {}",
        payload.target.name,
        payload.candidates.len()
    );
    validate_batch(&payload, state.config.max_batch_size)?;

    let engine = state.engine.clone();
    let report = tokio::task::spawn_blocking(move || {
        engine.compare(&payload.target, &payload.candidates, &payload.options)
    })
    .await?;

    tracing::info!(
        "Compared {} candidates: avg {}, max {}, {} excellent",
        report.comparisons.len(),
        report.statistics.avg_score,
        report.statistics.max_score,
        report.statistics.excellent_count
    );

    Ok(Json(report))
}

/// Scoring routes, without rate limiting or state attached.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/similarity", post(calculate_similarity))
        .route("/api/v1/similarity/batch", post(batch_similarity))
        .route("/api/v1/similarity/compare", post(compare_similarities))
}

/// Full router (health + scoring routes) bound to `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(api_routes())
        .with_state(state)
}
