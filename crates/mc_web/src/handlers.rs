use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};
use mc_core::{ArticleForm, CategoryLabel, CategorySummary, Error, PredictionResult};
use mc_pipeline::{demo::TEMPLATE_CSV, BatchOutcome, ExportPayload, MIME_TYPE};
use crate::AppState;

/// Failure returned to the browser. Only the user-facing message leaves the
/// server; the detailed error is logged.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::EmptyTitle => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Schema(_) | Error::Inference(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if self.0.is_user_error() {
            warn!("Request rejected: {}", self.0);
        } else {
            error!("Request failed: {}", self.0);
        }
        (status, Json(ErrorBody { error: self.0.user_message() })).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub model: String,
    pub categories: Vec<CategoryLabel>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub category: CategoryLabel,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub rows: PredictionResult,
    pub summary: CategorySummary,
    pub total: usize,
}

impl From<BatchOutcome> for BatchResponse {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            total: outcome.result.len(),
            rows: outcome.result,
            summary: outcome.summary,
        }
    }
}

fn download(payload: &ExportPayload) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", payload.file_name());
    (
        [
            (header::CONTENT_TYPE, payload.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        payload.to_vec(),
    )
        .into_response()
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        model: state.classifier.name().to_string(),
        categories: state.classifier.labels().to_vec(),
    })
}

pub async fn template() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, MIME_TYPE)], TEMPLATE_CSV)
}

pub async fn predict_article(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ArticleForm>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let category = state.predictor.submit(form).await?;
    Ok(Json(PredictionResponse { category }))
}

pub async fn predict_batch(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<BatchResponse>, ApiError> {
    let outcome = state.batch.run(&body).await?;
    Ok(Json(outcome.into()))
}

pub async fn export_batch(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let outcome = state.batch.run(&body).await?;
    Ok(download(&outcome.export))
}

pub async fn predict_demo(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BatchResponse>, ApiError> {
    let outcome = state.batch.run_demo().await?;
    Ok(Json(outcome.into()))
}

pub async fn export_demo(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let outcome = state.batch.run_demo().await?;
    Ok(download(&outcome.export))
}
