//! HTTP routes.
//!
//! | Method | Path                 | Handler                |
//! |--------|----------------------|------------------------|
//! | GET    | `/`                  | [`health`]             |
//! | GET    | `/usage-stats`       | [`usage_stats`]        |
//! | POST   | `/color-similarity`  | [`color_similarity`]   |
//! | POST   | `/analyze-sequences` | [`analyze_sequences`]  |

use axum::extract::{DefaultBodyLimit, Multipart, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use matriz_core::{
    AnalysisReport, ColorCatalog, ColorSchema, MatrizError, SemanticCatalog, SequenceAnalysis,
    SequenceAnalyzer, SequenceCatalog, SimilarityOutcome,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::{AppState, UsageSnapshot};

/// Body limit applied when the caller does not choose one.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Router with request logging and the default upload limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, true, DEFAULT_MAX_UPLOAD_BYTES)
}

pub fn create_router_with(state: AppState, log_requests: bool, max_upload_bytes: usize) -> Router {
    let router = Router::new()
        .route("/", get(health))
        .route("/usage-stats", get(usage_stats))
        .route("/color-similarity", post(color_similarity))
        .route("/analyze-sequences", post(analyze_sequences))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state);

    if log_requests {
        router.layer(middleware::from_fn(log_request))
    } else {
        router
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    tracing::info!("Incoming request: {} {}", request.method(), request.uri());
    let response = next.run(request).await;
    tracing::info!("Response status: {}", response.status());
    response
}

pub async fn health() -> Json<Value> {
    Json(json!({ "message": "La Matriz API is running." }))
}

pub async fn usage_stats(State(state): State<AppState>) -> Json<UsageSnapshot> {
    Json(state.usage.snapshot())
}

#[derive(Debug, Deserialize)]
pub struct SimilarityForm {
    pub color1: String,
    pub color2: String,
}

/// Score a color pair against the startup table.
///
/// An unknown pair is still a 200 answer carrying `{"error": ...}`; only a
/// missing table is a server error.
pub async fn color_similarity(
    State(state): State<AppState>,
    Form(form): Form<SimilarityForm>,
) -> Result<Json<SimilarityOutcome>, ApiError> {
    if !state.similarity.is_initialized() {
        tracing::error!("Dot products not initialized.");
        return Err(ApiError::NotInitialized);
    }

    let outcome = SimilarityOutcome::from(state.similarity.lookup(&form.color1, &form.color2));
    let total = state.usage.record_similarity();
    tracing::info!("Color similarity called. Total calls: {}", total);
    Ok(Json(outcome))
}

/// Uploaded catalogs of one `/analyze-sequences` request.
#[derive(Debug, Default)]
struct AnalysisUpload {
    colors: Option<String>,
    sequences: Option<String>,
    semantic: Option<String>,
    k: Option<i64>,
}

impl AnalysisUpload {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut upload = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| ApiError::bad_request(err.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::bad_request(err.body_text()))?;
            let text = String::from_utf8(bytes.to_vec())
                .map_err(|_| ApiError::bad_request(format!("{} is not valid UTF-8", name)))?;

            match name.as_str() {
                "colors_file" => upload.colors = Some(text),
                "sequences_file" => upload.sequences = Some(text),
                "semantic_file" => upload.semantic = Some(text),
                "k" => {
                    let k = text.trim().parse::<i64>().map_err(|_| {
                        ApiError::bad_request(format!("k must be an integer, got '{}'", text.trim()))
                    })?;
                    upload.k = Some(k);
                }
                other => tracing::debug!("Ignoring multipart field '{}'", other),
            }
        }
        Ok(upload)
    }

    fn run(self, analyzer: &SequenceAnalyzer) -> Result<SequenceAnalysis, ApiError> {
        let colors = self
            .colors
            .ok_or_else(|| ApiError::bad_request("colors_file is required"))?;
        let sequences = self
            .sequences
            .ok_or_else(|| ApiError::bad_request("sequences_file is required"))?;

        let config = analyzer.config();
        let schema = ColorSchema::with_words(config.word_column.clone());
        let colors = ColorCatalog::from_csv_str(&colors, &schema)?;
        let sequences = SequenceCatalog::from_csv_str(&sequences)?;
        let semantic = self
            .semantic
            .as_deref()
            .map(SemanticCatalog::from_csv_str)
            .transpose()?;

        let requested = self.k.unwrap_or(config.default_k as i64);
        let k = usize::try_from(requested)
            .map_err(|_| MatrizError::invalid_cluster_count(requested, colors.len()))?;

        Ok(analyzer.analyze(&colors, &sequences, semantic.as_ref(), k)?)
    }
}

/// Cluster an uploaded color catalog and rank the uploaded sequences.
///
/// The analysis runs on the blocking pool. Every failure is a 400 with the
/// error message.
pub async fn analyze_sequences(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, ApiError> {
    match run_analysis(&state, multipart).await {
        Ok(report) => {
            let total = state.usage.record_analysis();
            tracing::info!("Analyze sequences called. Total calls: {}", total);
            Ok(Json(report))
        }
        Err(err) => {
            tracing::error!("Error in analyze-sequences: {}", err);
            Err(err)
        }
    }
}

async fn run_analysis(state: &AppState, multipart: Multipart) -> Result<AnalysisReport, ApiError> {
    let upload = AnalysisUpload::read(multipart).await?;
    let analyzer = state.analyzer.clone();
    let journal = state.journal.clone();

    tokio::task::spawn_blocking(move || {
        let analysis = upload.run(&analyzer)?;
        if let Some(journal) = journal {
            if let Err(err) = journal.log_analysis(&analysis) {
                tracing::warn!("Failed to journal analysis (k = {}): {}", analysis.k(), err);
            }
        }
        Ok::<_, ApiError>(analysis.into_report())
    })
    .await
    .map_err(|err| ApiError::Internal(format!("analysis task failed: {}", err)))?
}
