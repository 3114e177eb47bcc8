//! Axum route handlers for the stylecraft HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`               - liveness probe and generator availability
//! - `POST /api/generate-post`    - synthesize a post for `{context, style?}`
//! - `POST /api/extract-patterns` - extract and store a profile for `{dataset_name}`
//! - `GET  /api/datasets`         - list raw corpora
//! - `GET  /api/patterns/:style`  - fetch a stored profile

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::SynthConfig;
use crate::corpus::CorpusLoader;
use crate::error::StyleError;
use crate::generation::orchestrator::resolve_style;
use crate::generation::Synthesizer;
use crate::patterns::{CorpusReport, PatternExtractor};
use crate::profiles::{ProfileCache, ProfileStore};
use crate::style::StyleTag;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub synthesizer: Arc<Synthesizer>,
    pub loader: CorpusLoader,
    /// Shared with the synthesizer, so fresh extractions apply immediately.
    pub profiles: ProfileCache,
    pub extractor: PatternExtractor,
}

impl AppState {
    pub fn new(
        synthesizer: Synthesizer,
        loader: CorpusLoader,
        profiles: ProfileCache,
        extractor: PatternExtractor,
    ) -> Self {
        Self {
            synthesizer: Arc::new(synthesizer),
            loader,
            profiles,
            extractor,
        }
    }

    pub fn from_config(config: &SynthConfig) -> Self {
        let profiles = ProfileCache::new(ProfileStore::new(&config.data_dir));
        let synthesizer =
            Synthesizer::from_config_with_profiles(config, Arc::new(profiles.clone()));
        Self::new(
            synthesizer,
            CorpusLoader::new(&config.data_dir),
            profiles,
            PatternExtractor::new(config.limits),
        )
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/generate-post", post(generate_post_handler))
        .route("/api/extract-patterns", post(extract_patterns_handler))
        .route("/api/datasets", get(list_datasets_handler))
        .route("/api/patterns/:style", get(get_patterns_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error response rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<StyleError> for ApiError {
    fn from(err: StyleError) -> Self {
        let status = match &err {
            StyleError::DatasetNotFound { .. } => StatusCode::NOT_FOUND,
            StyleError::DatasetFormat { .. } | StyleError::EmptyCorpus => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StyleError::EmptyContext => StatusCode::BAD_REQUEST,
            StyleError::ProfileStore { .. } | StyleError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Worker task failed: {err}"),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self.message);
        }
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /health
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": crate::VERSION,
        "service": "stylecraft",
        "generator_available": state.synthesizer.generator_available(),
    }))
}

#[derive(Debug, Deserialize)]
struct GeneratePostRequest {
    #[serde(default)]
    context: String,
    #[serde(default)]
    style: Option<String>,
}

/// POST /api/generate-post
///
/// Synthesis may block on the external generator, so it runs on the
/// blocking pool.
async fn generate_post_handler(
    State(state): State<AppState>,
    Json(request): Json<GeneratePostRequest>,
) -> Result<Json<Value>, ApiError> {
    let context = request.context.trim().to_string();
    if context.is_empty() {
        return Err(StyleError::EmptyContext.into());
    }

    let style = request
        .style
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| StyleTag::DEFAULT.as_str().to_string());
    if let (tag, false) = resolve_style(&style) {
        tracing::warn!("Unknown style '{}', using '{}'", style, tag);
    }

    let synthesizer = Arc::clone(&state.synthesizer);
    let label = style.clone();
    let post = tokio::task::spawn_blocking(move || synthesizer.synthesize(&context, &label, None))
        .await??;

    tracing::info!(
        "Generated '{}' post via {:?} ({} chars)",
        post.style,
        post.generator_used,
        post.full_text.chars().count()
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "post": post,
        "style": style,
    })))
}

#[derive(Debug, Deserialize)]
struct ExtractPatternsRequest {
    dataset_name: String,
}

/// POST /api/extract-patterns
async fn extract_patterns_handler(
    State(state): State<AppState>,
    Json(request): Json<ExtractPatternsRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = request.dataset_name;
    let worker_state = state.clone();
    let worker_name = name.clone();

    let (profile, report) = tokio::task::spawn_blocking(move || {
        let posts = worker_state.loader.load(&worker_name)?;
        let profile = worker_state.extractor.extract(&posts)?;
        let report = CorpusReport::build(&worker_name, &posts);
        let profile = worker_state.profiles.put(&worker_name, profile)?;
        Ok::<_, StyleError>((profile, report))
    })
    .await??;

    tracing::info!(
        "Extracted patterns from '{}' ({} posts)",
        name,
        report.total_posts
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "profile": &*profile,
        "report": report,
        "message": "Patterns extracted successfully",
    })))
}

/// GET /api/datasets
async fn list_datasets_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let datasets = state.loader.list()?;
    Ok(Json(serde_json::json!({
        "count": datasets.len(),
        "datasets": datasets,
    })))
}

/// GET /api/patterns/:style
async fn get_patterns_handler(
    State(state): State<AppState>,
    Path(style): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let not_found = || {
        ApiError::new(
            StatusCode::NOT_FOUND,
            format!("No patterns found for '{style}'. Run extraction first."),
        )
    };

    if CorpusLoader::canonical_name(&style).is_none() {
        return Err(not_found());
    }
    let profile = state.profiles.get(&style)?.ok_or_else(not_found)?;
    let value = serde_json::to_value(&*profile)
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(value))
}
