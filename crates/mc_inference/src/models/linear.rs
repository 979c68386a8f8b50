use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use mc_core::{ArticleRecord, CategoryLabel, Classifier, Error, Result, CATEGORY_COUNT};
use crate::features::tokenize;

/// On-disk form of a trained [`LinearModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    #[serde(default)]
    pub name: Option<String>,
    pub labels: Vec<String>,
    pub bias: Vec<f32>,
    pub weights: HashMap<String, Vec<f32>>,
}

/// Bag-of-words linear classifier: every token adds its weight vector to the
/// per-label bias, the highest score wins and ties go to the earlier label.
pub struct LinearModel {
    name: String,
    labels: Vec<CategoryLabel>,
    bias: Vec<f32>,
    weights: HashMap<String, Vec<f32>>,
}

impl fmt::Debug for LinearModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearModel")
            .field("name", &self.name)
            .field("labels", &self.labels.len())
            .field("vocabulary", &self.weights.len())
            .finish()
    }
}

impl LinearModel {
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self> {
        if artifact.labels.len() != CATEGORY_COUNT {
            return Err(Error::Model(format!(
                "expected {} labels, found {}",
                CATEGORY_COUNT,
                artifact.labels.len()
            )));
        }

        let mut seen = HashSet::new();
        for label in &artifact.labels {
            if label.trim().is_empty() {
                return Err(Error::Model("labels must not be empty".to_string()));
            }
            if !seen.insert(label.as_str()) {
                return Err(Error::Model(format!("duplicate label: {}", label)));
            }
        }

        if artifact.bias.len() != CATEGORY_COUNT {
            return Err(Error::Model(format!(
                "bias has {} entries, expected {}",
                artifact.bias.len(),
                CATEGORY_COUNT
            )));
        }

        if let Some((token, weights)) = artifact
            .weights
            .iter()
            .find(|(_, weights)| weights.len() != CATEGORY_COUNT)
        {
            return Err(Error::Model(format!(
                "weights for '{}' have {} entries, expected {}",
                token,
                weights.len(),
                CATEGORY_COUNT
            )));
        }

        Ok(Self {
            name: artifact.name.unwrap_or_else(|| "Linear".to_string()),
            labels: artifact.labels.into_iter().map(CategoryLabel::new).collect(),
            bias: artifact.bias,
            weights: artifact.weights,
        })
    }

    /// Parse and validate a serialized [`LinearArtifact`].
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: LinearArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Load the artifact once; the returned model is never mutated.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let model = Self::from_json(&json)?;
        info!(
            "Loaded model '{}' from {} ({} tokens)",
            model.name,
            path.display(),
            model.weights.len()
        );
        Ok(model)
    }

    fn classify(&self, record: &ArticleRecord) -> &CategoryLabel {
        let mut scores = self.bias.clone();
        for token in tokenize(record) {
            if let Some(weights) = self.weights.get(&token) {
                for (score, weight) in scores.iter_mut().zip(weights) {
                    *score += weight;
                }
            }
        }

        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }
        &self.labels[best]
    }
}

#[async_trait::async_trait]
impl Classifier for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[CategoryLabel] {
        &self.labels
    }

    async fn predict(&self, records: &[ArticleRecord]) -> Result<Vec<CategoryLabel>> {
        Ok(records.iter().map(|record| self.classify(record).clone()).collect())
    }
}
