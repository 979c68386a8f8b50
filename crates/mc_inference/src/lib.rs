use std::path::{Path, PathBuf};

pub mod models;
pub mod features;

pub use mc_core::Classifier;

pub const DEFAULT_MODEL_PATH: &str = "models/medcat_model.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ModelKind {
    /// Built-in keyword voting model
    #[default]
    Keyword,
    /// Trained linear model loaded from a JSON artifact
    Linear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub kind: ModelKind,
    pub model_path: PathBuf,
}

impl ModelConfig {
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.model_path = path.as_ref().to_path_buf();
        self
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::default(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

pub mod prelude {
    pub use super::{ModelConfig, ModelKind};
    pub use super::models::create_model;
    pub use mc_core::{ArticleRecord, CategoryLabel, Classifier, Result, Error};
}

pub use models::create_model;
