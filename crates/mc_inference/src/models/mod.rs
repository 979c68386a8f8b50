use std::sync::Arc;
use mc_core::{Classifier, Result};
use tracing::info;
use crate::{ModelConfig, ModelKind};

pub mod keyword;
pub mod linear;

pub use keyword::KeywordModel;
pub use linear::{LinearArtifact, LinearModel};

/// Build the process-wide classifier handle. Called once at startup.
pub async fn create_model(config: Option<ModelConfig>) -> Result<Arc<dyn Classifier>> {
    let config = config.unwrap_or_default();
    let model: Arc<dyn Classifier> = match config.kind {
        ModelKind::Keyword => Arc::new(KeywordModel::new()),
        ModelKind::Linear => Arc::new(LinearModel::load(&config.model_path).await?),
    };
    info!("🧠 Classifier ready (using {}, {} categories)", model.name(), model.labels().len());
    Ok(model)
}
