use std::sync::Arc;
use mc_core::Classifier;
use mc_pipeline::{BatchPipeline, SinglePredictor};

/// Shared by every request; only holds the read-only classifier handle.
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub batch: BatchPipeline,
    pub predictor: SinglePredictor,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            batch: BatchPipeline::new(classifier.clone()),
            predictor: SinglePredictor::new(classifier.clone()),
            classifier,
        }
    }
}
