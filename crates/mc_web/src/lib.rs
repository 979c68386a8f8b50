use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use mc_core::Result;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/template", get(handlers::template))
        .route("/api/predict", post(handlers::predict_article))
        .route("/api/batch", post(handlers::predict_batch))
        .route("/api/batch/export", post(handlers::export_batch))
        .route("/api/demo", get(handlers::predict_demo))
        .route("/api/demo/export", get(handlers::export_demo))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serve until the process is stopped.
pub async fn serve(state: AppState, config: ServerConfig) -> Result<()> {
    let app = create_app(state, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use mc_core::{ArticleForm, Result, Error};
    pub use crate::{AppState, ServerConfig};
}
